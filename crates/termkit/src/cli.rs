use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use regex::Regex;
use std::path::PathBuf;
use termkit_core::config;
use termkit_core::errors::{TermkitError, ValidationError};
use termkit_core::io::Output;
use termkit_core::process::{AsyncRunOptions, RunOptions};
use termkit_core::terminal::GitStatus;
use termkit_core::{Terminal, ThemeUpdate};

/// Log format options
#[derive(Debug, Clone, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    Text,
    /// JSON structured format
    Json,
}

/// Log level options
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warn,
    /// Informational messages and above
    Info,
    /// Debug messages and above
    Debug,
    /// All messages including trace
    Trace,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Filled and bordered box styles
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum BoxKind {
    /// Banner in the theme's background color
    Info,
    /// White on green
    Confirmation,
    /// Black on yellow
    Warning,
    /// White on red
    Error,
    /// Banner with the theme's logo
    Title,
    /// Text inside a drawn border
    Bordered,
    /// "Completed" banner (text is ignored)
    Completion,
}

/// Single-line message styles
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SayKind {
    /// Raw text, unchanged
    Echo,
    /// Dedented and indented text
    Indent,
    /// Text in the theme's text color
    Print,
    /// Green text
    Confirmation,
    /// Yellow text
    Warning,
    /// Red text
    Error,
    /// Green check mark line
    Success,
    /// Red cross line
    Failure,
}

/// Exit status to use without rendering anything else.
#[derive(Debug)]
pub struct QuietExit(pub i32);

impl std::fmt::Display for QuietExit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "exit status {}", self.0)
    }
}

impl std::error::Error for QuietExit {}

/// Theme overrides shared by every subcommand
#[derive(Debug, Clone, Default, Args)]
pub struct ThemeArgs {
    /// Theme file (TOML) applied before environment and flags
    #[arg(long, global = true, value_name = "PATH")]
    pub theme_file: Option<PathBuf>,

    /// Language code (en, fr)
    #[arg(long, global = true)]
    pub language: Option<String>,

    /// Indentation in columns
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub indent: Option<i64>,

    /// Logo shown in title boxes
    #[arg(long, global = true)]
    pub logo: Option<String>,

    /// Text color (color name or #rrggbb)
    #[arg(long, global = true)]
    pub text_color: Option<String>,

    /// Background color of themed boxes
    #[arg(long, global = true)]
    pub background_color: Option<String>,

    /// Text color inside themed boxes
    #[arg(long, global = true)]
    pub text_on_background_color: Option<String>,

    /// Border color of bordered boxes
    #[arg(long, global = true)]
    pub border_color: Option<String>,

    /// Spinner color (color name only)
    #[arg(long, global = true)]
    pub spinner_color: Option<String>,

    /// Spinner preset name
    #[arg(long, global = true)]
    pub spinner_type: Option<String>,
}

impl ThemeArgs {
    /// Overrides given on the command line, as one update.
    pub fn to_update(&self) -> ThemeUpdate {
        let mut update = ThemeUpdate::new();
        if let Some(language) = &self.language {
            update = update.language(language);
        }
        if let Some(indent) = self.indent {
            update = update.indent(indent);
        }
        if let Some(logo) = &self.logo {
            update = update.logo(logo);
        }
        if let Some(color) = &self.text_color {
            update = update.text_color(color);
        }
        if let Some(color) = &self.background_color {
            update = update.background_color(color);
        }
        if let Some(color) = &self.text_on_background_color {
            update = update.text_on_background_color(color);
        }
        if let Some(color) = &self.border_color {
            update = update.border_color(color);
        }
        if let Some(color) = &self.spinner_color {
            update = update.spinner_color(color);
        }
        if let Some(name) = &self.spinner_type {
            update = update.spinner_preset(name);
        }
        update
    }
}

/// Where and with which environment a command runs
#[derive(Debug, Clone, Default, Args)]
pub struct CommandArgs {
    /// Working directory for the command
    #[arg(long, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Extra environment variable (format: NAME=value, can be repeated)
    #[arg(long, value_name = "NAME=VALUE")]
    pub env: Vec<String>,
}

impl CommandArgs {
    pub fn to_run_options(&self) -> Result<RunOptions> {
        let mut options = RunOptions::new();
        if let Some(directory) = &self.directory {
            options = options.directory(directory);
        }
        for pair in &self.env {
            let Some((name, value)) = pair.split_once('=') else {
                bail!("Invalid --env value '{}': expected NAME=value", pair);
            };
            if name.is_empty() {
                bail!("Invalid --env value '{}': variable name is empty", pair);
            }
            options = options.env(name, value);
        }
        Ok(options)
    }
}

/// Terminal presentation toolkit for shell scripts
#[derive(Debug, Parser)]
#[command(
    name = "termkit",
    version,
    about = "Terminal presentation toolkit",
    long_about = "Terminal presentation toolkit\n\nRenders themed boxes, status lines and spinners, and runs commands with consistent failure reporting.",
    color = clap::ColorChoice::Auto
)]
pub struct Cli {
    /// Log format (text or json, can be set via TERMKIT_LOG_FORMAT env var)
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Log level (defaults to TERMKIT_LOG, then RUST_LOG, then warn)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub theme: ThemeArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// termkit subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a command, echo its output and report failures
    #[command(long_about = "Run a command, echo its output and report failures\n\n\
        Failure output left after removing the ignore pattern is fatal: it is shown in an error box \
        and termkit exits with status 2. Stderr output from a successful command is shown as a warning.")]
    Run {
        /// Text to remove from failure output before classifying it
        #[arg(long, conflicts_with = "ignore_error_regex")]
        ignore_error: Option<String>,
        /// Regular expression to remove from failure output before classifying it
        #[arg(long)]
        ignore_error_regex: Option<String>,
        /// Report nothing; exit with the command's own status on failure
        #[arg(long)]
        silent: bool,
        #[command(flatten)]
        exec: CommandArgs,
        /// Command line to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Title box, command, then a completion box with the elapsed time
    Task {
        /// Title shown in the opening box
        title: String,
        #[command(flatten)]
        exec: CommandArgs,
        /// Command line to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Run a command and print what it wrote to stdout
    Read {
        /// Print each non-empty line
        #[arg(long, conflicts_with_all = ["get", "echo"])]
        lines: bool,
        /// Print the non-empty lines joined with " / "
        #[arg(long, conflicts_with = "echo")]
        get: bool,
        /// Echo the non-empty lines as one block
        #[arg(long)]
        echo: bool,
        #[command(flatten)]
        exec: CommandArgs,
        /// Command line to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Run a command behind a spinner
    Spin {
        /// Spinner message
        text: String,
        #[command(flatten)]
        exec: CommandArgs,
        /// Command line to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Render text in a box
    Box {
        /// Box style
        #[arg(long, value_enum, default_value = "info")]
        kind: BoxKind,
        /// Box content
        text: Option<String>,
    },

    /// Print a single message
    Say {
        /// Message style
        #[arg(long, value_enum, default_value = "echo")]
        kind: SayKind,
        /// Message text
        text: String,
    },

    /// Print a name/value status line
    State {
        /// Mark the state as failed
        #[arg(long)]
        failed: bool,
        /// Detail appended to a failed state
        #[arg(long)]
        message: Option<String>,
        /// State name
        name: String,
        /// State value
        value: String,
    },

    /// List changed files of the current git repository
    GitStatus {
        /// Repository directory
        #[arg(long, value_name = "PATH")]
        directory: Option<PathBuf>,
    },

    /// Print the effective theme as JSON
    Theme {
        /// Print the theme on a single line
        #[arg(long)]
        compact: bool,
    },
}

/// Join trailing arguments into one shell command line.
///
/// A single argument is used as-is so pipes and redirections survive.
pub fn command_line(args: &[String]) -> String {
    match args {
        [single] => single.clone(),
        _ => shell_words::join(args),
    }
}

impl Cli {
    /// Dispatch the parsed command line.
    pub async fn dispatch(self) -> Result<()> {
        let log_format = match self.log_format {
            Some(LogFormat::Text) => Some("text"),
            Some(LogFormat::Json) => Some("json"),
            None => None,
        };
        let log_level = self.log_level.as_ref().map(LogLevel::as_str);
        termkit_core::logging::init(log_format, log_level)?;
        tracing::debug!("CLI initialized with log level: {:?}", log_level);

        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        let mut terminal = self.build_terminal()?;

        match self.command {
            Commands::Run {
                ignore_error,
                ignore_error_regex,
                silent,
                exec,
                command,
            } => {
                let mut options = AsyncRunOptions::new()
                    .run_options(exec.to_run_options()?)
                    .silent(silent);
                if let Some(literal) = ignore_error {
                    options = options.ignore_error(literal.as_str());
                }
                if let Some(pattern) = ignore_error_regex {
                    let regex = Regex::new(&pattern)
                        .with_context(|| format!("Invalid --ignore-error-regex '{}'", pattern))?;
                    options = options.ignore_error(regex);
                }

                let outcome = terminal
                    .process()
                    .run_async(&command_line(&command), &options)
                    .await?;
                terminal.flush()?;
                if let Some(error) = outcome.error {
                    // Only reachable when silent or when the failure was ignored
                    if silent {
                        return Err(QuietExit(error.code().unwrap_or(1)).into());
                    }
                }
                Ok(())
            }
            Commands::Task {
                title,
                exec,
                command,
            } => {
                let options = exec.to_run_options()?;
                terminal
                    .process()
                    .run_task(&title, &command_line(&command), &options)?;
                terminal.flush()?;
                Ok(())
            }
            Commands::Read {
                lines,
                get,
                echo,
                exec,
                command,
            } => {
                let options = exec.to_run_options()?;
                let command = command_line(&command);
                if echo {
                    terminal.process().run_and_echo(&command, &options)?;
                } else if get {
                    let joined = terminal.process().run_and_get(&command, &options)?;
                    terminal.echo(&joined)?;
                } else if lines {
                    let lines = terminal.process().run_and_read_lines(&command, &options)?;
                    for line in lines {
                        terminal.echo(&line)?;
                    }
                } else {
                    let output = terminal.process().run_and_read(&command, &options)?;
                    terminal.echo(output.trim_end_matches('\n'))?;
                }
                terminal.flush()?;
                Ok(())
            }
            Commands::Spin {
                text,
                exec,
                command,
            } => {
                let options = AsyncRunOptions::new()
                    .run_options(exec.to_run_options()?)
                    .silent(true);
                terminal.start_spinner(&text)?;
                let outcome = terminal
                    .process()
                    .run_async(&command_line(&command), &options)
                    .await?;

                let spinner = terminal.take_spinner();
                match outcome.error {
                    None => {
                        if let Some(spinner) = spinner {
                            spinner.finish_with_message(&text);
                        }
                        Ok(())
                    }
                    Some(error) => {
                        tracing::warn!("Spinner command failed: {}", error);
                        if let Some(spinner) = spinner {
                            spinner.fail_with_message(&text);
                        }
                        let stderr = outcome.stderr.trim();
                        if !stderr.is_empty() {
                            terminal.error(stderr)?;
                        }
                        terminal.flush()?;
                        Err(QuietExit(error.code().unwrap_or(1)).into())
                    }
                }
            }
            Commands::Box { kind, text } => {
                let text = match text {
                    Some(text) => text,
                    None if kind == BoxKind::Completion => String::new(),
                    None => return Err(TermkitError::from(ValidationError::missing("text")).into()),
                };
                match kind {
                    BoxKind::Info => terminal.info_box(&text)?,
                    BoxKind::Confirmation => terminal.confirmation_box(&text)?,
                    BoxKind::Warning => terminal.warning_box(&text)?,
                    BoxKind::Error => terminal.error_box(&text)?,
                    BoxKind::Title => terminal.title_box(&text)?,
                    BoxKind::Bordered => terminal.bordered_box(&text)?,
                    BoxKind::Completion => terminal.completion_box(false)?,
                };
                terminal.flush()?;
                Ok(())
            }
            Commands::Say { kind, text } => {
                match kind {
                    SayKind::Echo => terminal.echo(&text)?,
                    SayKind::Indent => terminal.echo_indent(&text)?,
                    SayKind::Print => terminal.print(&text)?,
                    SayKind::Confirmation => terminal.confirmation(&text)?,
                    SayKind::Warning => terminal.warning(&text)?,
                    SayKind::Error => terminal.error(&text)?,
                    SayKind::Success => terminal.success(&text)?,
                    SayKind::Failure => terminal.failure(&text)?,
                };
                terminal.flush()?;
                Ok(())
            }
            Commands::State {
                failed,
                message,
                name,
                value,
            } => {
                terminal.print_state(!failed, &name, &value, message.as_deref())?;
                terminal.flush()?;
                Ok(())
            }
            Commands::GitStatus { directory } => {
                let mut options = RunOptions::new();
                if let Some(directory) = directory {
                    options = options.directory(directory);
                }
                let lines = terminal
                    .process()
                    .run_and_read_lines("git status --porcelain", &options)?;
                let status = GitStatus::from_porcelain(&lines);
                tracing::debug!(clean = status.is_empty(), "Parsed git status");
                terminal.print_git_status(&status)?;
                terminal.flush()?;
                Ok(())
            }
            Commands::Theme { compact } => {
                let mut output = Output::stdout();
                if compact {
                    output.write_json(&terminal.theme())?;
                } else {
                    output.write_json_pretty(&terminal.theme())?;
                }
                output.flush()?;
                Ok(())
            }
        }
    }

    /// Defaults, then theme file, then environment, then flags.
    fn build_terminal(&self) -> Result<Terminal> {
        let mut terminal = Terminal::new();

        if let Some(path) = &self.theme.theme_file {
            let update = config::load_theme_file(path)?;
            terminal.set_theme(&update)?;
        }

        let from_env = config::theme_from_env()?;
        if !from_env.is_empty() {
            tracing::debug!("Applying theme overrides from environment");
            terminal.set_theme(&from_env)?;
        }

        let from_flags = self.theme.to_update();
        if !from_flags.is_empty() {
            terminal.set_theme(&from_flags)?;
        }

        Ok(terminal)
    }
}

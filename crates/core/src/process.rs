//! Command execution wrapper
//!
//! Commands are handed to the platform shell (`sh -c`, `cmd /C` on Windows)
//! and report through the owning [`Terminal`].
//!
//! Synchronous runners inherit the terminal's streams and surface a failed
//! command as an [`ExecutionError`]; the caller decides whether it is fatal.
//! [`Process::run_async`] captures both streams and classifies the outcome:
//!
//! * a failure left after stripping the ignore pattern is fatal: it is shown
//!   in an error box and the process exits with status 2;
//! * stderr text without a failure is a warning and execution continues;
//! * everything else is clean.
//!
//! Only invalid arguments make `run_async` return `Err`; the command outcome
//! itself is always handed back in a [`CommandOutcome`].

use crate::errors::{ExecutionError, Result, ValidationError};
use crate::terminal::Terminal;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, info, instrument, warn};

/// Working directory and extra environment for a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Working directory; inherited when unset
    pub directory: Option<PathBuf>,
    /// Variables added on top of the inherited environment
    pub environment: BTreeMap<String, String>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }
}

/// Text removed from failure and stderr output before classification.
#[derive(Debug, Clone)]
pub enum IgnorePattern {
    Literal(String),
    Pattern(Regex),
}

impl IgnorePattern {
    /// Remove every occurrence of the pattern from `text`.
    pub fn strip(&self, text: &str) -> String {
        match self {
            Self::Literal(literal) if literal.is_empty() => text.to_string(),
            Self::Literal(literal) => text.replace(literal.as_str(), ""),
            Self::Pattern(regex) => regex.replace_all(text, "").into_owned(),
        }
    }
}

impl From<&str> for IgnorePattern {
    fn from(literal: &str) -> Self {
        Self::Literal(literal.to_string())
    }
}

impl From<Regex> for IgnorePattern {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

/// Options for [`Process::run_async`].
#[derive(Debug, Clone, Default)]
pub struct AsyncRunOptions {
    pub run: RunOptions,
    pub ignore_error: Option<IgnorePattern>,
    /// Skip every reporting side effect
    pub silent: bool,
}

impl AsyncRunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run_options(mut self, run: RunOptions) -> Self {
        self.run = run;
        self
    }

    pub fn ignore_error(mut self, pattern: impl Into<IgnorePattern>) -> Self {
        self.ignore_error = Some(pattern.into());
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}

/// Captured result of a command run with [`Process::run_async`].
#[derive(Debug)]
pub struct CommandOutcome {
    /// Spawn failure or unsuccessful exit
    pub error: Option<ExecutionError>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.error.is_none()
    }
}

/// How a captured outcome is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Nothing to report
    Clean,
    /// Stderr text without a failure; printed, non-fatal
    Warning(String),
    /// Failure text (and whatever stderr remains); terminates the process
    Fatal { failure: String, stderr: String },
}

/// Classify trimmed failure and stderr text after removing `ignore`.
pub fn classify(failure: &str, stderr: &str, ignore: Option<&IgnorePattern>) -> Classification {
    let (failure, stderr) = match ignore {
        Some(pattern) => (pattern.strip(failure), pattern.strip(stderr)),
        None => (failure.to_string(), stderr.to_string()),
    };
    let failure = failure.trim();
    let stderr = stderr.trim();

    if !failure.is_empty() {
        Classification::Fatal {
            failure: failure.to_string(),
            stderr: stderr.to_string(),
        }
    } else if !stderr.is_empty() {
        Classification::Warning(stderr.to_string())
    } else {
        Classification::Clean
    }
}

fn require_command(command: &str) -> std::result::Result<(), ValidationError> {
    if command.trim().is_empty() {
        return Err(ValidationError::missing("command"));
    }
    Ok(())
}

fn shell_command(command: &str, options: &RunOptions) -> Command {
    let mut cmd = if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    };

    if let Some(ref dir) = options.directory {
        cmd.current_dir(dir);
    }
    cmd.envs(&options.environment);
    cmd
}

fn check_status(command: &str, status: ExitStatus) -> std::result::Result<(), ExecutionError> {
    if status.success() {
        return Ok(());
    }
    match status.code() {
        Some(code) => Err(ExecutionError::ExitStatus {
            command: command.to_string(),
            code,
        }),
        None => Err(ExecutionError::Terminated {
            command: command.to_string(),
        }),
    }
}

fn spawn_error(command: &str, source: std::io::Error) -> ExecutionError {
    ExecutionError::Spawn {
        command: command.to_string(),
        source,
    }
}

/// Command runner bound to a [`Terminal`]; see [`Terminal::process`].
#[derive(Debug)]
pub struct Process<'t> {
    terminal: &'t mut Terminal,
}

impl<'t> Process<'t> {
    pub fn new(terminal: &'t mut Terminal) -> Self {
        Self { terminal }
    }

    /// Run `command` with inherited streams and wait for it.
    #[instrument(skip(self, options))]
    pub fn run(&mut self, command: &str, options: &RunOptions) -> Result<()> {
        require_command(command)?;
        self.terminal.flush()?;

        debug!("Running command");
        let status = shell_command(command, options)
            .status()
            .map_err(|e| spawn_error(command, e))?;
        check_status(command, status)?;
        Ok(())
    }

    /// Run `command` with captured output, report the outcome through the
    /// terminal and hand it back.
    ///
    /// A fatal outcome (unless `silent`) does not return: the process exits
    /// with status 2 after rendering the failure.
    #[instrument(skip(self, options), fields(silent = options.silent))]
    pub async fn run_async(
        &mut self,
        command: &str,
        options: &AsyncRunOptions,
    ) -> Result<CommandOutcome> {
        require_command(command)?;

        let mut cmd = tokio::process::Command::from(shell_command(command, &options.run));
        cmd.stdin(Stdio::null());

        debug!("Spawning command");
        let outcome = match cmd.output().await {
            Ok(output) => CommandOutcome {
                error: check_status(command, output.status).err(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
            Err(e) => CommandOutcome {
                error: Some(spawn_error(command, e)),
                stdout: String::new(),
                stderr: String::new(),
            },
        };

        if options.silent {
            debug!(success = outcome.success(), "Silent command finished");
            return Ok(outcome);
        }

        let failure = outcome
            .error
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let classification = classify(&failure, &outcome.stderr, options.ignore_error.as_ref());
        debug!(?classification, "Command finished");

        let stdout = outcome.stdout.trim();
        if !stdout.is_empty() {
            self.terminal.echo(stdout)?;
        }

        match classification {
            Classification::Clean => {}
            Classification::Warning(text) => {
                warn!("Command wrote to stderr: {}", text);
                self.terminal.warning(&text)?;
            }
            Classification::Fatal { failure, stderr } => {
                if stderr.is_empty() {
                    let message = self.terminal.translate("silentError");
                    self.terminal.error(message)?;
                }
                let message = if stderr.is_empty() {
                    failure
                } else {
                    format!("{failure}\n{stderr}")
                };
                self.terminal.exit(Some(&message));
            }
        }

        Ok(outcome)
    }

    /// Run `command` and return its stdout; stderr stays on the terminal.
    #[instrument(skip(self, options))]
    pub fn run_and_read(&mut self, command: &str, options: &RunOptions) -> Result<String> {
        require_command(command)?;

        let output = shell_command(command, options)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| spawn_error(command, e))?;
        check_status(command, output.status)?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Non-empty stdout lines, in order.
    pub fn run_and_read_lines(&mut self, command: &str, options: &RunOptions) -> Result<Vec<String>> {
        let output = self.run_and_read(command, options)?;
        Ok(output
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Non-empty stdout lines joined with `" / "`.
    pub fn run_and_get(&mut self, command: &str, options: &RunOptions) -> Result<String> {
        Ok(self.run_and_read_lines(command, options)?.join(" / "))
    }

    /// Echo each non-empty stdout line.
    pub fn run_and_echo(&mut self, command: &str, options: &RunOptions) -> Result<()> {
        let lines = self.run_and_read_lines(command, options)?;
        self.terminal.echo(&lines.join("\n"))?;
        Ok(())
    }

    /// Title box, synchronous run, completion box with elapsed time.
    #[instrument(skip(self, options))]
    pub fn run_task(&mut self, title: &str, command: &str, options: &RunOptions) -> Result<()> {
        if title.is_empty() {
            return Err(ValidationError::missing("title").into());
        }
        require_command(command)?;

        info!("Starting task");
        self.terminal.title_box(title)?;
        self.run(command, options)?;
        self.terminal.completion_box(true)?;
        Ok(())
    }
}

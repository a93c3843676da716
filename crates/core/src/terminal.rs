//! Terminal output facility
//!
//! A [`Terminal`] owns its [`Theme`], the pending title [`Timer`], the
//! running spinner and the [`Output`] sink. There is no process-wide state:
//! two terminals never share a theme, which keeps tests isolated.
//!
//! Every printing method returns `Result<&mut Self>` so calls chain with `?`:
//!
//! ```
//! use termkit_core::io::Output;
//! use termkit_core::terminal::Terminal;
//!
//! # fn main() -> termkit_core::errors::Result<()> {
//! let mut term = Terminal::with_output(Output::from_writer(Vec::new()));
//! term.title_box("Deploy")?
//!     .print("Uploading assets")?
//!     .success("Assets uploaded")?
//!     .completion_box(true)?;
//! # Ok(())
//! # }
//! ```

use crate::color::{default_colors, palette, Colorizer, Paint};
use crate::errors::{Result, ValidationError};
use crate::i18n::translate;
use crate::io::Output;
use crate::process::Process;
use crate::spinner::Spinner;
use crate::text::boxing::{self, BoxOptions};
use crate::text::clean::clean_up;
use crate::theme::{Theme, ThemeUpdate};
use crate::timer::{format_elapsed, Timer};
use crate::width::{codepoint_count, display_width};
use console::style;
use serde::Deserialize;
use tracing::{debug, error};

/// Check mark used by success messages
pub const SUCCESS_ICON: &str = "✔";

/// Cross used by failure messages
pub const FAILURE_ICON: &str = "✖";

/// Exit status used by every fatal path
pub const FATAL_EXIT_CODE: i32 = 2;

const CRY: &str = "😢";
const GIT_LABEL_WIDTH: usize = 12;
const LOGO_FIELD_MARGIN: usize = 3;

/// File renamed in a git working tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// Working tree changes, grouped the way [`Terminal::print_git_status`]
/// lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GitStatus {
    pub not_added: Vec<String>,
    pub created: Vec<String>,
    pub modified: Vec<String>,
    pub renamed: Vec<Rename>,
    pub deleted: Vec<String>,
}

impl GitStatus {
    /// Group `git status --porcelain` (v1) lines.
    ///
    /// Unmerged and ignored entries are skipped.
    pub fn from_porcelain<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut status = Self::default();
        for line in lines {
            let line = line.as_ref();
            let (Some(code), Some(path)) = (line.get(..2), line.get(3..)) else {
                continue;
            };
            if path.is_empty() {
                continue;
            }
            let path = path.to_string();
            match code {
                "??" => status.not_added.push(path),
                _ if code.starts_with('R') || code.ends_with('R') => {
                    if let Some((from, to)) = path.split_once(" -> ") {
                        status.renamed.push(Rename {
                            from: from.to_string(),
                            to: to.to_string(),
                        });
                    }
                }
                _ if code.starts_with('A') => status.created.push(path),
                _ if code.contains('D') => status.deleted.push(path),
                _ if code.contains('M') => status.modified.push(path),
                _ => {}
            }
        }
        status
    }

    pub fn is_empty(&self) -> bool {
        self.not_added.is_empty()
            && self.created.is_empty()
            && self.modified.is_empty()
            && self.renamed.is_empty()
            && self.deleted.is_empty()
    }
}

/// Styled output facility.
pub struct Terminal {
    theme: Theme,
    timer: Timer,
    output: Output,
    spinner: Option<Spinner>,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terminal")
            .field("theme", &self.theme)
            .field("timer", &self.timer)
            .field("spinner", &self.spinner.is_some())
            .finish_non_exhaustive()
    }
}

impl Terminal {
    /// Terminal writing to stdout with the default theme
    pub fn new() -> Self {
        Self::with_output(Output::stdout())
    }

    /// Terminal writing to `output` with the default theme
    pub fn with_output(output: Output) -> Self {
        Self {
            theme: Theme::default(),
            timer: Timer::new(),
            output,
            spinner: None,
        }
    }

    /// Snapshot of the current theme.
    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }

    /// Validate and merge a partial theme; nothing is applied on error.
    pub fn set_theme(&mut self, update: &ThemeUpdate) -> Result<&mut Self> {
        self.theme.apply(update)?;
        Ok(self)
    }

    /// Localized phrase for `key` in the theme's language
    pub fn translate(&self, key: &str) -> &'static str {
        translate(self.theme.language, key)
    }

    /// Dedent `text` and re-indent it with the theme's indent.
    pub fn clean_up(&self, text: &str) -> String {
        clean_up(text, self.theme.indent)
    }

    /// Paint used for themed text
    pub fn text_paint(&self) -> Paint {
        Paint::new().fg(self.theme.text_color)
    }

    /// Paint used for themed banners
    pub fn background_paint(&self) -> Paint {
        Paint::new()
            .fg(self.theme.text_on_background_color)
            .bg(self.theme.background_color)
    }

    pub fn colorize_text(&self, text: &str) -> String {
        self.text_paint().paint(text)
    }

    pub fn colorize_background(&self, text: &str) -> String {
        self.background_paint().paint(text)
    }

    // ---------------------------------------------------------------
    // Lines

    /// Write `text` as-is, followed by a newline.
    pub fn echo(&mut self, text: &str) -> Result<&mut Self> {
        self.output.write_line(text)?;
        Ok(self)
    }

    pub fn echo_indent(&mut self, text: &str) -> Result<&mut Self> {
        let cleaned = self.clean_up(text);
        self.echo(&cleaned)
    }

    /// Cleaned text in the theme's text color
    pub fn print(&mut self, text: &str) -> Result<&mut Self> {
        let line = self.colorize_text(&self.clean_up(text));
        self.echo(&line)
    }

    /// Write `number` empty lines; `number` must be at least 1.
    pub fn spacer(&mut self, number: usize) -> Result<&mut Self> {
        if number == 0 {
            return Err(ValidationError::invalid("number", "an integer of at least 1", "0").into());
        }
        self.output.write_raw(&"\n".repeat(number))?;
        Ok(self)
    }

    pub fn confirmation(&mut self, text: &str) -> Result<&mut Self> {
        let line = style(self.clean_up(text)).green().to_string();
        self.echo(&line)
    }

    pub fn warning(&mut self, text: &str) -> Result<&mut Self> {
        let line = style(self.clean_up(text)).yellow().to_string();
        self.echo(&line)
    }

    pub fn error(&mut self, text: &str) -> Result<&mut Self> {
        let line = style(self.clean_up(text)).red().to_string();
        self.echo(&line)
    }

    pub fn success(&mut self, text: &str) -> Result<&mut Self> {
        self.confirmation(&format!("{SUCCESS_ICON}  {text}"))?
            .spacer(1)
    }

    pub fn failure(&mut self, text: &str) -> Result<&mut Self> {
        self.error(&format!("{FAILURE_ICON}  {text}"))?.spacer(1)
    }

    /// `name  ✔  value`, or `name  ✖  value message` on failure.
    pub fn print_state(
        &mut self,
        state: bool,
        name: &str,
        value: &str,
        message: Option<&str>,
    ) -> Result<&mut Self> {
        if name.is_empty() {
            return Err(ValidationError::missing("name").into());
        }
        if value.is_empty() {
            return Err(ValidationError::missing("value").into());
        }

        let status = if state {
            style(format!("{SUCCESS_ICON}  {value}")).green()
        } else {
            let detail = message.map(|m| format!(" {m}")).unwrap_or_default();
            style(format!("{FAILURE_ICON}  {value}{detail}")).red()
        };
        let line = format!("{}  {}", style(name).bold(), status);
        self.echo_indent(&line)
    }

    /// List changed files by type, between two double spacers.
    pub fn print_git_status(&mut self, status: &GitStatus) -> Result<&mut Self> {
        let label = |kind: &str| format!("{:<width$}", format!("{kind}:"), width = GIT_LABEL_WIDTH);

        let mut lines = Vec::new();
        for file in &status.not_added {
            lines.push(format!("{} {file}", style(label("not_added")).green()));
        }
        for file in &status.created {
            lines.push(format!("{} {file}", style(label("created")).green()));
        }
        for file in &status.modified {
            lines.push(format!("{} {file}", style(label("modified")).yellow()));
        }
        for file in &status.renamed {
            lines.push(format!(
                "{} {} → {}",
                style(label("renamed")).yellow(),
                file.from,
                file.to
            ));
        }
        for file in &status.deleted {
            lines.push(format!("{} {file}", style(label("deleted")).red()));
        }

        self.spacer(2)?
            .echo_indent(&lines.join("\n"))?
            .spacer(2)
    }

    /// Error box telling the operator not to run this with sudo.
    pub fn dont_sudo_me(&mut self) -> Result<&mut Self> {
        let text = format!("{} {CRY}", self.translate("sudo"));
        self.error_box(&text)
    }

    /// Render `message` in an error box, flush, and exit with status 2.
    pub fn exit(&mut self, message: Option<&str>) -> ! {
        self.stop_spinner();
        if let Some(message) = message {
            if let Err(e) = self.error_box(message) {
                error!("Failed to render exit message: {}", e);
            }
        }
        if let Err(e) = self.output.flush() {
            error!("Failed to flush output before exit: {}", e);
        }
        std::process::exit(FATAL_EXIT_CODE)
    }

    // ---------------------------------------------------------------
    // Boxes

    /// Clean `text`, lay it out as a filled box, colorize each line with
    /// `colorizer` and write it between two blank lines.
    pub fn boxed(
        &mut self,
        text: &str,
        colorizer: &dyn Colorizer,
        options: BoxOptions,
    ) -> Result<&mut Self> {
        let block = boxing::render_box(&self.clean_up(text), colorizer, options);
        self.emit_box(&block)
    }

    fn emit_box(&mut self, block: &str) -> Result<&mut Self> {
        self.spacer(1)?.echo(block)?.spacer(1)
    }

    /// Banner with the theme's logo; starts the completion timer.
    pub fn title_box(&mut self, text: &str) -> Result<&mut Self> {
        self.timer.start();

        let logo = self.theme.logo.clone();
        let codepoints = codepoint_count(&logo);
        let width = display_width(&logo);
        let logo_gap = codepoints == width;
        let extra_padding = logo_gap && width == 2;

        let background = self.background_paint();
        let indent = " ".repeat(self.theme.indent);
        let margin = " ".repeat(LOGO_FIELD_MARGIN);
        let field = format!(
            "{margin}{logo}{}{margin}",
            if logo_gap { " " } else { "" }
        );
        let gutter = " ".repeat(display_width(&field));

        let text = text.replace('\t', "  ");
        let mut title_lines = text.split('\n');
        let first = title_lines.next().unwrap_or_default();

        let mut lines = vec![
            format!("{indent}{}{}", default_colors(&gutter), background.paint(" ")),
            format!(
                "{indent}{}{} {first}",
                default_colors(&field),
                background.paint(" ")
            ),
        ];
        // continuation lines line up under the first one
        for line in title_lines {
            lines.push(format!(
                "{indent}{}{} {line}",
                default_colors(&gutter),
                background.paint(" ")
            ));
        }
        lines.push(format!("{indent}{}{}", default_colors(&gutter), background.paint(" ")));

        debug!(logo = %logo, extra_padding, "Rendering title box");
        let laid_out = boxing::layout_lines(
            &lines,
            BoxOptions {
                padding: true,
                extra_padding,
            },
        );
        self.emit_box(&boxing::render_lines(&laid_out, &background))
    }

    /// Themed banner
    pub fn info_box(&mut self, text: &str) -> Result<&mut Self> {
        let paint = self.background_paint();
        self.boxed(text, &paint, BoxOptions::default())
    }

    pub fn confirmation_box(&mut self, text: &str) -> Result<&mut Self> {
        self.boxed(text, &palette::confirmation_background(), BoxOptions::default())
    }

    pub fn warning_box(&mut self, text: &str) -> Result<&mut Self> {
        self.boxed(text, &palette::warning_background(), BoxOptions::default())
    }

    pub fn error_box(&mut self, text: &str) -> Result<&mut Self> {
        self.boxed(text, &palette::error_background(), BoxOptions::default())
    }

    /// "Completed" banner, with the time elapsed since the last title box
    /// when `show_duration` is set and a title box is pending.
    pub fn completion_box(&mut self, show_duration: bool) -> Result<&mut Self> {
        let time = if show_duration && self.timer.is_pending() {
            let elapsed = self.timer.stop();
            format!(" {} {}", self.translate("after"), format_elapsed(elapsed))
        } else {
            String::new()
        };

        let text = format!("{SUCCESS_ICON}  {}{time}", self.translate("completed"));
        self.info_box(&text)?.spacer(2)
    }

    /// Centered text inside a border drawn in the theme's border color.
    pub fn bordered_box(&mut self, text: &str) -> Result<&mut Self> {
        let border = Paint::new().fg(self.theme.border_color);
        let rendered = boxing::bordered_box(text, &self.text_paint(), &border);
        self.echo(&rendered)
    }

    // ---------------------------------------------------------------
    // Spinner

    /// Start a themed spinner, replacing the current one.
    pub fn start_spinner(&mut self, text: &str) -> Result<&mut Self> {
        self.stop_spinner();
        self.spinner = Some(Spinner::start(
            text,
            &self.theme.spinner_type,
            self.theme.spinner_color,
        ));
        Ok(self)
    }

    /// Stop and clear the spinner; no-op when none is running.
    pub fn stop_spinner(&mut self) -> &mut Self {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop();
        }
        self
    }

    /// Take ownership of the running spinner, to finish it with a message.
    pub fn take_spinner(&mut self) -> Option<Spinner> {
        self.spinner.take()
    }

    pub fn has_spinner(&self) -> bool {
        self.spinner.is_some()
    }

    // ---------------------------------------------------------------
    // Processes

    /// Command runner reporting through this terminal
    pub fn process(&mut self) -> Process<'_> {
        Process::new(self)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }
}

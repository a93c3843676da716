//! Animated progress indicator
//!
//! Thin RAII wrapper over an indicatif spinner drawn on stderr. Frames,
//! interval and color come from the theme; when stderr is not a terminal
//! indicatif hides the spinner entirely.

use crate::color::BasicColor;
use crate::theme::SpinnerType;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;

fn spinner_style(spinner_type: &SpinnerType, color: BasicColor) -> ProgressStyle {
    let template = format!("{{spinner:.{}}} {{msg}}", color.dotted_style());
    // The last tick string is shown once the spinner is finished.
    let mut ticks: Vec<&str> = spinner_type.frames().iter().map(String::as_str).collect();
    ticks.push(" ");

    ProgressStyle::with_template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&ticks)
}

fn message_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// A running spinner; cleared when dropped.
#[derive(Debug)]
pub struct Spinner {
    pb: ProgressBar,
    finished: bool,
}

impl Spinner {
    /// Start animating `message`.
    pub fn start(message: &str, spinner_type: &SpinnerType, color: BasicColor) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(spinner_style(spinner_type, color));
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(spinner_type.interval_ms()));
        debug!(
            frames = spinner_type.frames().len(),
            interval_ms = spinner_type.interval_ms(),
            "Spinner started"
        );
        Self {
            pb,
            finished: false,
        }
    }

    /// Replace the message shown next to the animation.
    pub fn set_message(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    /// Stop and erase the spinner line.
    pub fn stop(mut self) {
        self.pb.finish_and_clear();
        self.finished = true;
    }

    /// Stop, leaving a green `message` in place of the spinner.
    pub fn finish_with_message(mut self, message: &str) {
        self.pb.set_style(message_style());
        self.pb
            .finish_with_message(style(format!("✔ {message}")).green().to_string());
        self.finished = true;
    }

    /// Stop, leaving a red `message` in place of the spinner.
    pub fn fail_with_message(mut self, message: &str) {
        self.pb.set_style(message_style());
        self.pb
            .finish_with_message(style(format!("✖ {message}")).red().to_string());
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished || self.pb.is_finished()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.finished {
            self.pb.finish_and_clear();
        }
    }
}

//! Output sink
//!
//! Everything a [`crate::terminal::Terminal`] prints goes through an
//! [`Output`]: user-facing text to stdout by default, or any writer handed
//! in by the caller (tests capture into an in-memory buffer). Diagnostics
//! never pass through here; they go to stderr via `tracing`.

use serde::Serialize;
use std::io::{self, Result, Write};

/// Line-oriented writer for user-facing output.
///
/// # Examples
///
/// ```
/// use termkit_core::io::Output;
///
/// let mut output = Output::from_writer(Vec::new());
/// output.write_line("Build completed successfully!").unwrap();
/// output.write_json(&serde_json::json!({"indent": 2})).unwrap();
/// ```
pub struct Output {
    writer: Box<dyn Write + Send>,
}

impl Output {
    /// Output bound to the process stdout
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    /// Output bound to an arbitrary writer
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }

    /// Write `text` followed by a newline.
    pub fn write_line(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write `text` as-is, without a trailing newline.
    pub fn write_raw(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write a value as a single line of JSON.
    pub fn write_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json_output = serde_json::to_string(value).map_err(io::Error::from)?;
        self.write_line(&json_output)
    }

    /// Write a value as indented JSON.
    pub fn write_json_pretty<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json_output = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
        self.write_line(&json_output)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::stdout()
    }
}

impl std::fmt::Debug for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Output").finish_non_exhaustive()
    }
}

impl Drop for Output {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

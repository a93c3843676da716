//! Core library for termkit
//!
//! A terminal presentation layer for CLI scripts: themed text, filled and
//! bordered boxes, status lines, spinners, and a command runner that reports
//! failures through the same output primitives.
//!
//! The entry point is [`terminal::Terminal`], which owns its theme, timer,
//! spinner and output sink. Command execution lives in [`process`] and is
//! reached through [`terminal::Terminal::process`].

pub mod color;
pub mod config;
pub mod errors;
pub mod i18n;
pub mod io;
pub mod logging;
pub mod process;
pub mod spinner;
pub mod terminal;
pub mod text;
pub mod theme;
pub mod timer;
pub mod width;

pub use terminal::Terminal;
pub use theme::{Theme, ThemeUpdate};

/// Get the version of the core library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

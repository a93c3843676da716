//! Theme configuration sources
//!
//! A [`ThemeUpdate`] can come from a TOML file or from `TERMKIT_*`
//! environment variables. Both loaders only check the *shape* of the input
//! (types, known keys); domain validation happens when the update is
//! applied with [`crate::terminal::Terminal::set_theme`], so every source
//! fails the same way for the same bad value.
//!
//! ## Theme file
//!
//! ```toml
//! language = "fr"
//! indent = 4
//! logo = "🦊"
//! text_color = "#ff8800"
//! spinner_color = "cyanBright"
//! spinner_type = { frames = ["-", "+"], interval = 120 }
//! ```
//!
//! `spinner_type` may also be a preset name: `spinner_type = "line"`.

use crate::errors::{ConfigError, Result};
use crate::theme::{SpinnerSpec, ThemeUpdate};
use std::path::Path;
use tracing::{debug, instrument};

/// Environment variable names, in the order they are read
pub const ENV_LANGUAGE: &str = "TERMKIT_LANGUAGE";
pub const ENV_INDENT: &str = "TERMKIT_INDENT";
pub const ENV_LOGO: &str = "TERMKIT_LOGO";
pub const ENV_TEXT_COLOR: &str = "TERMKIT_TEXT_COLOR";
pub const ENV_BACKGROUND_COLOR: &str = "TERMKIT_BACKGROUND_COLOR";
pub const ENV_TEXT_ON_BACKGROUND_COLOR: &str = "TERMKIT_TEXT_ON_BACKGROUND_COLOR";
pub const ENV_BORDER_COLOR: &str = "TERMKIT_BORDER_COLOR";
pub const ENV_SPINNER_COLOR: &str = "TERMKIT_SPINNER_COLOR";
pub const ENV_SPINNER_TYPE: &str = "TERMKIT_SPINNER_TYPE";

/// Load a partial theme from a TOML file.
///
/// Unknown keys and wrongly typed values are rejected with
/// [`ConfigError::Parsing`].
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_theme_file(path: &Path) -> Result<ThemeUpdate> {
    debug!("Loading theme from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| {
        debug!("Failed to read theme file: {}", e);
        ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        }
    })?;

    parse_theme(&content, &path.display().to_string())
}

/// Parse TOML theme content; `origin` names the source in errors.
pub fn parse_theme(content: &str, origin: &str) -> Result<ThemeUpdate> {
    let update: ThemeUpdate = toml::from_str(content).map_err(|e| {
        debug!("Failed to parse theme: {}", e);
        ConfigError::Parsing {
            path: origin.to_string(),
            message: e.message().to_string(),
        }
    })?;
    Ok(update)
}

/// Collect a partial theme from the process environment.
pub fn theme_from_env() -> Result<ThemeUpdate> {
    theme_from_vars(|name| std::env::var(name).ok())
}

/// Collect a partial theme through an arbitrary variable lookup.
///
/// Empty values count as unset.
pub fn theme_from_vars<F>(lookup: F) -> Result<ThemeUpdate>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

    let indent = var(ENV_INDENT)
        .map(|raw| {
            raw.trim()
                .parse::<i64>()
                .map_err(|e| ConfigError::Environment {
                    name: ENV_INDENT.to_string(),
                    message: format!("expected an integer, got {raw:?} ({e})"),
                })
        })
        .transpose()?;

    let update = ThemeUpdate {
        language: var(ENV_LANGUAGE),
        indent,
        logo: var(ENV_LOGO),
        text_color: var(ENV_TEXT_COLOR),
        background_color: var(ENV_BACKGROUND_COLOR),
        text_on_background_color: var(ENV_TEXT_ON_BACKGROUND_COLOR),
        border_color: var(ENV_BORDER_COLOR),
        spinner_color: var(ENV_SPINNER_COLOR),
        spinner_type: var(ENV_SPINNER_TYPE).map(SpinnerSpec::Preset),
    };

    if !update.is_empty() {
        debug!(?update, "Theme overrides found in environment");
    }
    Ok(update)
}

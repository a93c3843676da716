//! Presentation theme
//!
//! A [`Theme`] always holds valid values: colors are parsed into
//! [`ColorValue`]s and spinner frames are checked when the theme is updated,
//! never when something is rendered. Updates arrive as a [`ThemeUpdate`],
//! a partial carrying raw values (as typed by a user, a config file or the
//! environment). [`Theme::apply`] validates every provided field first and
//! only then assigns them, so a rejected update leaves the theme untouched.

use crate::color::{BasicColor, ColorValue, BASIC_COLOR_DOMAIN};
use crate::errors::ValidationError;
use crate::i18n::Language;
use crate::width::grapheme_count;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default indentation, in spaces
pub const DEFAULT_INDENT: usize = 2;

/// Default logo glyph shown in title boxes
pub const DEFAULT_LOGO: &str = "•";

/// Default spinner preset
pub const DEFAULT_SPINNER: &str = "dots3";

const DEFAULT_INTERVAL_MS: u64 = 80;

// (name, interval in ms, frames)
const SPINNER_PRESETS: &[(&str, u64, &[&str])] = &[
    (
        "dots",
        80,
        &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
    ),
    (
        "dots3",
        80,
        &["⠋", "⠙", "⠚", "⠞", "⠖", "⠦", "⠴", "⠲", "⠳", "⠓"],
    ),
    ("line", 130, &["-", "\\", "|", "/"]),
    ("simpleDots", 400, &[".  ", ".. ", "...", "   "]),
    ("arc", 100, &["◜", "◠", "◝", "◞", "◡", "◟"]),
    ("star", 70, &["✶", "✸", "✹", "✺", "✹", "✷"]),
    (
        "bouncingBar",
        80,
        &[
            "[    ]", "[=   ]", "[==  ]", "[=== ]", "[ ===]", "[  ==]", "[   =]", "[    ]",
            "[   =]", "[  ==]", "[ ===]", "[====]", "[=== ]", "[==  ]", "[=   ]",
        ],
    ),
];

/// Spinner look: an ordered, non-empty list of frames and a frame interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpinnerType {
    frames: Vec<String>,
    interval: u64,
}

impl SpinnerType {
    /// Build a custom spinner; `frames` must not be empty.
    pub fn new(frames: Vec<String>, interval_ms: u64) -> Result<Self, ValidationError> {
        if frames.is_empty() {
            return Err(ValidationError::invalid(
                "spinnerType.frames",
                "a non-empty list of frames",
                "[]",
            ));
        }
        Ok(Self {
            frames,
            interval: interval_ms,
        })
    }

    /// Named preset, if it exists.
    pub fn preset(name: &str) -> Option<Self> {
        SPINNER_PRESETS
            .iter()
            .find(|(candidate, _, _)| *candidate == name)
            .map(|(_, interval, frames)| Self {
                frames: frames.iter().map(|frame| frame.to_string()).collect(),
                interval: *interval,
            })
    }

    /// Names of the available presets
    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        SPINNER_PRESETS.iter().map(|(name, _, _)| *name)
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval
    }
}

impl Default for SpinnerType {
    fn default() -> Self {
        Self::preset(DEFAULT_SPINNER).unwrap_or(Self {
            frames: vec!["-".to_string(), "\\".to_string(), "|".to_string(), "/".to_string()],
            interval: DEFAULT_INTERVAL_MS,
        })
    }
}

/// Current presentation options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub language: Language,
    pub indent: usize,
    pub logo: String,
    pub text_color: ColorValue,
    pub background_color: ColorValue,
    pub text_on_background_color: ColorValue,
    pub border_color: ColorValue,
    pub spinner_color: BasicColor,
    pub spinner_type: SpinnerType,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            language: Language::English,
            indent: DEFAULT_INDENT,
            logo: DEFAULT_LOGO.to_string(),
            text_color: BasicColor::Blue.into(),
            background_color: BasicColor::Blue.into(),
            text_on_background_color: BasicColor::White.into(),
            border_color: BasicColor::Blue.into(),
            spinner_color: BasicColor::Blue,
            spinner_type: SpinnerType::default(),
        }
    }
}

/// Spinner as written in an update: a preset name or explicit frames.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SpinnerSpec {
    Preset(String),
    Custom {
        frames: Vec<String>,
        #[serde(default)]
        interval: Option<i64>,
    },
}

/// Partial theme update carrying raw, not yet validated values.
///
/// ```
/// use termkit_core::theme::{Theme, ThemeUpdate};
///
/// let mut theme = Theme::default();
/// theme
///     .apply(&ThemeUpdate::new().indent(4).text_color("#ff8800"))
///     .unwrap();
/// assert_eq!(theme.indent, 4);
///
/// assert!(theme.apply(&ThemeUpdate::new().indent(-1)).is_err());
/// assert_eq!(theme.indent, 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeUpdate {
    pub language: Option<String>,
    pub indent: Option<i64>,
    pub logo: Option<String>,
    pub text_color: Option<String>,
    pub background_color: Option<String>,
    pub text_on_background_color: Option<String>,
    pub border_color: Option<String>,
    pub spinner_color: Option<String>,
    pub spinner_type: Option<SpinnerSpec>,
}

impl ThemeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn indent(mut self, indent: i64) -> Self {
        self.indent = Some(indent);
        self
    }

    pub fn logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn text_on_background_color(mut self, color: impl Into<String>) -> Self {
        self.text_on_background_color = Some(color.into());
        self
    }

    pub fn border_color(mut self, color: impl Into<String>) -> Self {
        self.border_color = Some(color.into());
        self
    }

    pub fn spinner_color(mut self, color: impl Into<String>) -> Self {
        self.spinner_color = Some(color.into());
        self
    }

    pub fn spinner_preset(mut self, name: impl Into<String>) -> Self {
        self.spinner_type = Some(SpinnerSpec::Preset(name.into()));
        self
    }

    pub fn spinner_frames(mut self, frames: Vec<String>, interval_ms: i64) -> Self {
        self.spinner_type = Some(SpinnerSpec::Custom {
            frames,
            interval: Some(interval_ms),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Fully validated update, ready to be assigned.
#[derive(Debug, Default)]
struct ValidatedUpdate {
    language: Option<Language>,
    indent: Option<usize>,
    logo: Option<String>,
    text_color: Option<ColorValue>,
    background_color: Option<ColorValue>,
    text_on_background_color: Option<ColorValue>,
    border_color: Option<ColorValue>,
    spinner_color: Option<BasicColor>,
    spinner_type: Option<SpinnerType>,
}

fn validate_color(field: &str, value: &Option<String>) -> Result<Option<ColorValue>, ValidationError> {
    value
        .as_deref()
        .map(|raw| ColorValue::parse(field, raw))
        .transpose()
}

fn validate_spinner(spec: &SpinnerSpec) -> Result<SpinnerType, ValidationError> {
    match spec {
        SpinnerSpec::Preset(name) => SpinnerType::preset(name).ok_or_else(|| {
            let names: Vec<&str> = SpinnerType::preset_names().collect();
            ValidationError::invalid(
                "spinnerType",
                format!("one of {}", names.join(", ")),
                name.as_str(),
            )
        }),
        SpinnerSpec::Custom { frames, interval } => {
            let interval = match interval {
                None => DEFAULT_INTERVAL_MS,
                Some(value) => u64::try_from(*value).map_err(|_| {
                    ValidationError::invalid(
                        "spinnerType.interval",
                        "a non-negative integer",
                        value.to_string(),
                    )
                })?,
            };
            SpinnerType::new(frames.clone(), interval)
        }
    }
}

impl ThemeUpdate {
    fn validate(&self) -> Result<ValidatedUpdate, ValidationError> {
        let language = self
            .language
            .as_deref()
            .map(str::parse::<Language>)
            .transpose()?;

        let indent = self
            .indent
            .map(|value| {
                usize::try_from(value).map_err(|_| {
                    ValidationError::invalid("indent", "a non-negative integer", value.to_string())
                })
            })
            .transpose()?;

        let logo = match &self.logo {
            Some(logo) if grapheme_count(logo) != 1 => {
                return Err(ValidationError::invalid(
                    "logo",
                    "a single glyph",
                    format!("{logo:?}"),
                ))
            }
            other => other.clone(),
        };

        let spinner_color = self
            .spinner_color
            .as_deref()
            .map(|raw| {
                BasicColor::from_name(raw)
                    .ok_or_else(|| ValidationError::invalid("spinnerColor", BASIC_COLOR_DOMAIN, raw))
            })
            .transpose()?;

        Ok(ValidatedUpdate {
            language,
            indent,
            logo,
            text_color: validate_color("textColor", &self.text_color)?,
            background_color: validate_color("backgroundColor", &self.background_color)?,
            text_on_background_color: validate_color(
                "textOnBackgroundColor",
                &self.text_on_background_color,
            )?,
            border_color: validate_color("borderColor", &self.border_color)?,
            spinner_color,
            spinner_type: self.spinner_type.as_ref().map(validate_spinner).transpose()?,
        })
    }
}

impl Theme {
    /// Validate `update` and merge it in; all or nothing.
    pub fn apply(&mut self, update: &ThemeUpdate) -> Result<(), ValidationError> {
        let validated = update.validate()?;

        macro_rules! assign {
            ($($field:ident),*) => {
                $(if let Some(value) = validated.$field {
                    self.$field = value;
                })*
            };
        }
        assign!(
            language,
            indent,
            logo,
            text_color,
            background_color,
            text_on_background_color,
            border_color,
            spinner_color,
            spinner_type
        );

        debug!(theme = ?self, "Theme updated");
        Ok(())
    }
}

//! Localized phrases
//!
//! A tiny fixed dictionary keyed by phrase name. Unknown keys resolve to an
//! empty string instead of failing, so a missing translation degrades the
//! message rather than the command.

use crate::errors::ValidationError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Language used by localized outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Language {
    /// Primary language
    #[default]
    #[serde(rename = "en")]
    English,
    /// Secondary language
    #[serde(rename = "fr")]
    Francais,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Francais => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" | "english" => Ok(Self::English),
            "fr" | "francais" | "français" => Ok(Self::Francais),
            _ => Err(ValidationError::invalid("language", "one of en, fr", s)),
        }
    }
}

// (key, english, french)
const DICTIONARY: &[(&str, &str, &str)] = &[
    (
        "sudo",
        "It is useless to force me with a sudo",
        "Ça sert à rien de me forcer avec un sudo",
    ),
    ("completed", "Completed", "Complété"),
    ("after", "after", "après"),
    (
        "silentError",
        "A silent error has occurred",
        "Une erreur silencieuse s'est produite",
    ),
];

/// Look up `key` in `language`; unknown keys yield `""`.
pub fn translate(language: Language, key: &str) -> &'static str {
    DICTIONARY
        .iter()
        .find(|(candidate, _, _)| *candidate == key)
        .map(|(_, en, fr)| match language {
            Language::English => *en,
            Language::Francais => *fr,
        })
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_keys() {
        assert_eq!(translate(Language::English, "completed"), "Completed");
        assert_eq!(translate(Language::Francais, "completed"), "Complété");
        assert_eq!(translate(Language::Francais, "after"), "après");
    }

    #[test]
    fn unknown_keys_are_empty() {
        assert_eq!(translate(Language::English, "nope"), "");
        assert_eq!(translate(Language::Francais, ""), "");
    }

    #[test]
    fn parses_language_codes() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("francais".parse::<Language>().unwrap(), Language::Francais);
        let err = "de".parse::<Language>().unwrap_err();
        assert_eq!(err.field(), "language");
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// UI language of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    De,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PreferencesError {
    #[error("unsupported language: {0}")]
    UnknownLanguage(String),
}

impl Language {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = PreferencesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "en" => Ok(Language::En),
            "de" => Ok(Language::De),
            other => Err(PreferencesError::UnknownLanguage(other.to_owned())),
        }
    }
}

/// Device-wide settings shared by all profiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preferences {
    pub language: Language,
    pub audio_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: Language::De,
            audio_enabled: true,
        }
    }
}

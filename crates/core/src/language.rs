//! Supported conversation languages
//!
//! Telugu, Tamil and Hindi are handled in their romanized (chat) form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Languages recognised by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Telugu,
    Tamil,
    Hindi,
}

impl Language {
    /// Get ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Telugu => "te",
            Self::Tamil => "ta",
            Self::Hindi => "hi",
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Telugu => "Telugu",
            Self::Tamil => "Tamil",
            Self::Hindi => "Hindi",
        }
    }

    /// Wire name, as used in API responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Telugu => "telugu",
            Self::Tamil => "tamil",
            Self::Hindi => "hindi",
        }
    }

    /// Parse from a name or ISO code, case-insensitive
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Self::English),
            "te" | "telugu" => Some(Self::Telugu),
            "ta" | "tamil" => Some(Self::Tamil),
            "hi" | "hindi" => Some(Self::Hindi),
            _ => None,
        }
    }

    pub fn all() -> &'static [Language] {
        &[Self::English, Self::Telugu, Self::Tamil, Self::Hindi]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| Error::UnknownLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::Telugu.code(), "te");
        assert_eq!(Language::Hindi.code(), "hi");
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn test_from_str_loose() {
        assert_eq!(Language::from_str_loose("TAMIL"), Some(Language::Tamil));
        assert_eq!(Language::from_str_loose("hi"), Some(Language::Hindi));
        assert_eq!(Language::from_str_loose("kannada"), None);
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Language::Telugu).unwrap();
        assert_eq!(json, "\"telugu\"");
        let lang: Language = serde_json::from_str("\"hindi\"").unwrap();
        assert_eq!(lang, Language::Hindi);
    }
}

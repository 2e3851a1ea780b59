//! Emotions and intensity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Intensity on a 1..=5 scale
pub type Intensity = u8;

pub const MIN_INTENSITY: Intensity = 1;
pub const MAX_INTENSITY: Intensity = 5;
/// Intensity reported when nothing stronger is detected
pub const NEUTRAL_INTENSITY: Intensity = 3;

/// Emotion labels
///
/// The text classifier only produces `Neutral`, `Happy` and `Stressed`.
/// The remaining labels arrive from session requests and are keys in the
/// voice reply and sequence tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    #[default]
    Neutral,
    Happy,
    Stressed,
    Anxious,
    Sad,
    Angry,
    Tired,
    Overwhelmed,
}

impl Emotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Stressed => "stressed",
            Self::Anxious => "anxious",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Tired => "tired",
            Self::Overwhelmed => "overwhelmed",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn all() -> &'static [Emotion] {
        &[
            Self::Neutral,
            Self::Happy,
            Self::Stressed,
            Self::Anxious,
            Self::Sad,
            Self::Angry,
            Self::Tired,
            Self::Overwhelmed,
        ]
    }

    /// Emotions that make a user eligible for a yoga suggestion on the voice path
    pub fn is_distressed(&self) -> bool {
        !matches!(self, Self::Neutral | Self::Happy)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| Error::UnknownEmotion(s.to_string()))
    }
}

/// Classifier output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionResult {
    pub emotion: Emotion,
    pub intensity: Intensity,
}

impl EmotionResult {
    /// Create a result, clamping intensity into range
    pub fn new(emotion: Emotion, intensity: i64) -> Self {
        let clamped = intensity.clamp(MIN_INTENSITY as i64, MAX_INTENSITY as i64) as Intensity;
        Self {
            emotion,
            intensity: clamped,
        }
    }

    pub fn neutral() -> Self {
        Self {
            emotion: Emotion::Neutral,
            intensity: NEUTRAL_INTENSITY,
        }
    }
}

impl Default for EmotionResult {
    fn default() -> Self {
        Self::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_clamped() {
        assert_eq!(EmotionResult::new(Emotion::Happy, 9).intensity, 5);
        assert_eq!(EmotionResult::new(Emotion::Sad, -2).intensity, 1);
        assert_eq!(EmotionResult::new(Emotion::Tired, 4).intensity, 4);
    }

    #[test]
    fn test_distressed() {
        assert!(Emotion::Overwhelmed.is_distressed());
        assert!(Emotion::Stressed.is_distressed());
        assert!(!Emotion::Happy.is_distressed());
        assert!(!Emotion::Neutral.is_distressed());
    }

    #[test]
    fn test_parse() {
        assert_eq!("Anxious".parse::<Emotion>(), Ok(Emotion::Anxious));
        assert_eq!(
            "joyful".parse::<Emotion>(),
            Err(Error::UnknownEmotion("joyful".to_string()))
        );
    }
}

//! Yoga reference data and practice sessions
//!
//! Asanas and sequences are immutable once seeded. A `PracticeSession`
//! records one guided run through a sequence and is only ever updated
//! (duration, completion), never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One instruction within an asana
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsanaStep {
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A single yoga pose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asana {
    pub id: i64,
    pub name: String,
    pub sanskrit_name: String,
    pub overview_image: String,
    pub steps: Vec<AsanaStep>,
    pub difficulty: String,
    pub benefits: String,
}

/// Position of an asana within a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceStep {
    pub asana_id: i64,
    /// Hold time in seconds
    pub duration: u32,
}

/// An ordered, timed program of asanas for one target emotion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub id: i64,
    pub name: String,
    pub emotion: String,
    #[serde(default = "default_intensity_min")]
    pub intensity_min: u8,
    #[serde(default = "default_intensity_max")]
    pub intensity_max: u8,
    pub asana_sequence: Vec<SequenceStep>,
    /// Total duration in seconds
    pub total_duration: u32,
}

fn default_intensity_min() -> u8 {
    1
}

fn default_intensity_max() -> u8 {
    5
}

impl Sequence {
    /// Sum of step durations
    pub fn computed_duration(&self) -> u32 {
        self.asana_sequence.iter().map(|s| s.duration).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A guided practice session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeSession {
    pub id: i64,
    pub user_id: i64,
    pub emotion: String,
    pub intensity: u8,
    pub sequence_id: i64,
    pub completed: bool,
    /// Seconds actually practiced, reported by the client
    pub duration: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_duration_and_defaults() {
        let seq: Sequence = serde_json::from_str(
            r#"{"id":1,"name":"Calm","emotion":"anxious",
                "asana_sequence":[{"asana_id":1,"duration":90},{"asana_id":4,"duration":180}],
                "total_duration":270}"#,
        )
        .unwrap();
        assert_eq!(seq.computed_duration(), seq.total_duration);
        assert_eq!(seq.intensity_min, 1);
        assert_eq!(seq.intensity_max, 5);
    }
}

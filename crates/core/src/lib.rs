//! Core types for the yoga mood agent
//!
//! Shared by the text processing, agent, persistence and server crates:
//! - `Language` and `Emotion` enums produced by the classifiers
//! - Conversation messages, context flags and response buckets
//! - Reference data for asanas, sequences, users and practice sessions

pub mod conversation;
pub mod emotion;
pub mod error;
pub mod language;
pub mod yoga;

pub use conversation::{user_turns, ContextBucket, ContextFlags, Message, Sender};
pub use emotion::{
    Emotion, EmotionResult, Intensity, MAX_INTENSITY, MIN_INTENSITY, NEUTRAL_INTENSITY,
};
pub use error::{Error, Result};
pub use language::Language;
pub use yoga::{Asana, AsanaStep, PracticeSession, Sequence, SequenceStep, User};

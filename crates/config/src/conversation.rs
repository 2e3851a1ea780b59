//! Conversation thresholds and per-conversation state limits

use serde::{Deserialize, Serialize};

/// Which engine produces `/api/voice-chat` reply text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VoiceResponder {
    /// Context-flag driven replies with bounded memory
    #[default]
    Contextual,
    /// Turn-counter driven greeting/emotion/continuation replies
    Scripted,
}

/// Conversation behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Chat path suggests yoga once user turns exceed this
    #[serde(default = "default_chat_yoga_turns")]
    pub chat_yoga_turn_threshold: usize,

    /// Voice path suggests yoga once user turns reach this
    #[serde(default = "default_voice_yoga_turns")]
    pub voice_yoga_turn_threshold: usize,

    /// Minimum intensity for a voice-path yoga suggestion
    #[serde(default = "default_voice_yoga_intensity")]
    pub voice_yoga_min_intensity: u8,

    /// Cap on follow-up questions in a chat reply
    #[serde(default = "default_max_follow_ups")]
    pub max_follow_up_questions: usize,

    /// Entries kept in conversation memory
    #[serde(default = "default_memory_size")]
    pub memory_size: usize,

    /// Turns during which the scripted engine prefers emotion replies
    #[serde(default = "default_voice_emotion_turns")]
    pub voice_emotion_turns: u32,

    /// Shortest accepted message after trimming, in characters
    #[serde(default = "default_min_message_chars")]
    pub min_message_chars: usize,

    #[serde(default)]
    pub voice_responder: VoiceResponder,
}

fn default_chat_yoga_turns() -> usize {
    5
}
fn default_voice_yoga_turns() -> usize {
    3
}
fn default_voice_yoga_intensity() -> u8 {
    3
}
fn default_max_follow_ups() -> usize {
    3
}
fn default_memory_size() -> usize {
    5
}
fn default_voice_emotion_turns() -> u32 {
    2
}
fn default_min_message_chars() -> usize {
    2
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            chat_yoga_turn_threshold: default_chat_yoga_turns(),
            voice_yoga_turn_threshold: default_voice_yoga_turns(),
            voice_yoga_min_intensity: default_voice_yoga_intensity(),
            max_follow_up_questions: default_max_follow_ups(),
            memory_size: default_memory_size(),
            voice_emotion_turns: default_voice_emotion_turns(),
            min_message_chars: default_min_message_chars(),
            voice_responder: VoiceResponder::default(),
        }
    }
}

/// Limits for the live conversation registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_max_conversations")]
    pub max_conversations: usize,

    /// Idle time after which a conversation is dropped
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,

    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

fn default_max_conversations() -> usize {
    1000
}
fn default_idle_timeout() -> u64 {
    3600
}
fn default_cleanup_interval() -> u64 {
    300
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_conversations: default_max_conversations(),
            idle_timeout_seconds: default_idle_timeout(),
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }
}

//! Conversation messages, context flags and response buckets

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who sent a message
///
/// Anything other than `user`, including a missing sender, is treated as
/// the system side of the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Sender {
    User,
    #[default]
    System,
}

impl From<String> for Sender {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("user") {
            Sender::User
        } else {
            Sender::System
        }
    }
}

impl From<Sender> for String {
    fn from(value: Sender) -> Self {
        match value {
            Sender::User => "user".to_string(),
            Sender::System => "system".to_string(),
        }
    }
}

/// A single chat turn as carried in `conversation_history`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub sender: Sender,
    #[serde(default)]
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::System,
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Number of user turns in a history
pub fn user_turns(history: &[Message]) -> usize {
    history.iter().filter(|m| m.is_user()).count()
}

/// Independent keyword flags derived from one message
///
/// No flag excludes another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContextFlags {
    pub is_question: bool,
    pub is_sharing: bool,
    pub is_problem: bool,
    pub is_positive: bool,
    pub is_work_related: bool,
    pub is_family_related: bool,
    pub mentions_time: bool,
}

/// Response bucket chosen for a chat reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextBucket {
    GeneralChat,
    CopingResponse,
    SimpleGreeting,
    HappyResponse,
    SupportiveResponse,
}

impl ContextBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeneralChat => "general_chat",
            Self::CopingResponse => "coping_response",
            Self::SimpleGreeting => "simple_greeting",
            Self::HappyResponse => "happy_response",
            Self::SupportiveResponse => "supportive_response",
        }
    }

    /// Buckets that may carry follow-up questions
    pub fn allows_follow_ups(&self) -> bool {
        matches!(self, Self::SupportiveResponse | Self::GeneralChat)
    }
}

impl fmt::Display for ContextBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_from_wire() {
        let history: Vec<Message> = serde_json::from_str(
            r#"[{"sender":"user","content":"hi"},{"sender":"bot","content":"hello"},{"content":"x"}]"#,
        )
        .unwrap();
        assert!(history[0].is_user());
        assert_eq!(history[1].sender, Sender::System);
        assert!(!history[2].is_user());
        assert_eq!(user_turns(&history), 1);
    }

    #[test]
    fn test_bucket_serde() {
        let json = serde_json::to_string(&ContextBucket::SimpleGreeting).unwrap();
        assert_eq!(json, "\"simple_greeting\"");
        assert_eq!(ContextBucket::CopingResponse.to_string(), "coping_response");
        assert!(ContextBucket::GeneralChat.allows_follow_ups());
        assert!(!ContextBucket::HappyResponse.allows_follow_ups());
    }
}

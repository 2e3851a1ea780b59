//! Reply selection for the yoga mood agent
//!
//! Features:
//! - Chat replies: response bucket decision table, canned multilingual
//!   templates, follow-up questions and yoga gating
//! - Contextual replies driven by context flags with bounded memory
//! - Scripted voice replies driven by a per-conversation turn counter
//! - Aggregate mood analysis over a whole conversation
//!
//! Randomised choices take an injected `rand::RngCore` so callers and tests
//! control the source.

pub mod advisory;
pub mod chat;
pub mod contextual;
pub mod memory;
pub mod phrasebook;
pub mod state;
pub mod traits;
pub mod voice;

pub use advisory::{analyze_conversation, yoga_advisory, ConversationSummary};
pub use chat::{compose_reply, follow_up_questions, select_bucket, ChatReply, ChatResponder};
pub use contextual::ContextualEngine;
pub use memory::{ConversationMemory, MemoryEntry};
pub use phrasebook::Localized;
pub use state::{ConversationState, VoiceReply};
pub use traits::Responder;
pub use voice::VoiceResponseEngine;

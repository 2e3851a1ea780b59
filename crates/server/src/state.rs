//! Application State
//!
//! Shared state across all handlers.

use parking_lot::RwLock;
use std::sync::Arc;

use yoga_agent_agent::ChatResponder;
use yoga_agent_config::Settings;
use yoga_agent_persistence::PersistenceLayer;
use yoga_agent_text_processing::MessageAnalyzer;

use crate::conversation::ConversationManager;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Settings>>,
    /// Catalog, user and practice-session stores
    pub persistence: PersistenceLayer,
    /// Live voice-chat conversations
    pub conversations: Arc<ConversationManager>,
    pub chat: Arc<ChatResponder>,
    pub analyzer: MessageAnalyzer,
}

impl AppState {
    pub fn new(config: Settings, persistence: PersistenceLayer) -> Self {
        let conversations =
            ConversationManager::new(&config.registry, config.conversation.clone());
        let chat = ChatResponder::new(config.conversation.clone());

        Self {
            config: Arc::new(RwLock::new(config)),
            persistence,
            conversations: Arc::new(conversations),
            chat: Arc::new(chat),
            analyzer: MessageAnalyzer::new(),
        }
    }

    /// State over a fresh in-memory store
    pub fn in_memory(config: Settings) -> Self {
        Self::new(config, PersistenceLayer::in_memory())
    }

    /// Get a read guard to the current configuration
    pub fn get_config(&self) -> parking_lot::RwLockReadGuard<'_, Settings> {
        self.config.read()
    }

    /// Shortest accepted chat/voice message, in characters
    pub fn min_message_chars(&self) -> usize {
        self.config.read().conversation.min_message_chars
    }
}

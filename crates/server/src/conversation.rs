//! Live conversation registry
//!
//! Voice-chat conversations keep reply-engine state between requests.
//! Each one is keyed by a client-supplied id, expires after a period of
//! inactivity, and serialises its own mutations behind a mutex. When the
//! registry is full the least recently active conversation is evicted.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

use yoga_agent_agent::ConversationState;
use yoga_agent_config::{ConversationConfig, RegistryConfig};

use crate::ServerError;

/// Longest client-supplied conversation id accepted
const MAX_ID_LEN: usize = 128;

/// One live conversation
pub struct Conversation {
    pub id: String,
    state: Mutex<ConversationState>,
    last_activity: RwLock<Instant>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, config: ConversationConfig) -> Self {
        let id = id.into();
        Self {
            state: Mutex::new(ConversationState::new(id.clone(), config)),
            id,
            last_activity: RwLock::new(Instant::now()),
        }
    }

    /// Run `f` with exclusive access to the conversation state
    pub fn with_state<R>(&self, f: impl FnOnce(&mut ConversationState) -> R) -> R {
        self.touch();
        f(&mut self.state.lock())
    }

    pub fn touch(&self) {
        *self.last_activity.write() = Instant::now();
    }

    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.read().elapsed() > timeout
    }

    fn last_activity(&self) -> Instant {
        *self.last_activity.read()
    }
}

/// Conversation manager
pub struct ConversationManager {
    conversations: RwLock<HashMap<String, Arc<Conversation>>>,
    max_conversations: usize,
    idle_timeout: Duration,
    cleanup_interval: Duration,
    config: ConversationConfig,
}

impl ConversationManager {
    pub fn new(registry: &RegistryConfig, config: ConversationConfig) -> Self {
        Self::with_limits(
            registry.max_conversations,
            Duration::from_secs(registry.idle_timeout_seconds),
            Duration::from_secs(registry.cleanup_interval_seconds),
            config,
        )
    }

    pub fn with_limits(
        max_conversations: usize,
        idle_timeout: Duration,
        cleanup_interval: Duration,
        config: ConversationConfig,
    ) -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
            max_conversations,
            idle_timeout,
            cleanup_interval,
            config,
        }
    }

    /// Start a background task that periodically drops idle conversations.
    ///
    /// Send `true` on the returned channel to stop it.
    pub fn start_cleanup_task(self: &Arc<Self>) -> watch::Sender<bool> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let manager = Arc::clone(self);
        let interval = manager.cleanup_interval.max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut interval_timer = tokio::time::interval(interval);
            interval_timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval_timer.tick() => {
                        let removed = manager.cleanup_expired();
                        if removed > 0 {
                            tracing::info!(
                                removed,
                                remaining = manager.count(),
                                "Conversation cleanup"
                            );
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::info!("Conversation cleanup task shutting down");
                            break;
                        }
                    }
                }
            }
        });

        shutdown_tx
    }

    /// Look up `id`, creating the conversation when it is unknown
    pub fn get_or_create(&self, id: &str) -> Result<Arc<Conversation>, ServerError> {
        let id = id.trim();
        if id.is_empty() || id.len() > MAX_ID_LEN {
            return Err(ServerError::InvalidRequest(format!(
                "conversation_id must be 1 to {} characters",
                MAX_ID_LEN
            )));
        }
        if let Some(existing) = self.get(id) {
            return Ok(existing);
        }

        let mut conversations = self.conversations.write();

        // Another request may have created it since the read above
        if let Some(existing) = conversations.get(id) {
            return Ok(existing.clone());
        }

        if conversations.len() >= self.max_conversations.max(1) {
            self.cleanup_expired_internal(&mut conversations);

            while conversations.len() >= self.max_conversations.max(1) {
                let Some(oldest) = conversations
                    .values()
                    .min_by_key(|c| c.last_activity())
                    .map(|c| c.id.clone())
                else {
                    break;
                };
                conversations.remove(&oldest);
                tracing::info!(
                    conversation_id = %oldest,
                    "Evicted least recently active conversation"
                );
            }
        }

        let conversation = Arc::new(Conversation::new(id, self.config.clone()));
        conversations.insert(id.to_string(), conversation.clone());

        tracing::info!(conversation_id = %id, "Created conversation");
        Ok(conversation)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Conversation>> {
        self.conversations.read().get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> bool {
        let removed = self.conversations.write().remove(id).is_some();
        if removed {
            tracing::info!(conversation_id = %id, "Removed conversation");
        }
        removed
    }

    pub fn count(&self) -> usize {
        self.conversations.read().len()
    }

    pub fn list(&self) -> Vec<String> {
        self.conversations.read().keys().cloned().collect()
    }

    /// Drop idle conversations, returning how many were removed
    pub fn cleanup_expired(&self) -> usize {
        let mut conversations = self.conversations.write();
        self.cleanup_expired_internal(&mut conversations)
    }

    fn cleanup_expired_internal(
        &self,
        conversations: &mut HashMap<String, Arc<Conversation>>,
    ) -> usize {
        let timeout = self.idle_timeout;
        let before = conversations.len();
        conversations.retain(|id, c| {
            let keep = !c.is_expired(timeout);
            if !keep {
                tracing::debug!(conversation_id = %id, "Expired conversation");
            }
            keep
        });
        before - conversations.len()
    }
}

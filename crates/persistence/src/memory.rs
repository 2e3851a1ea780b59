//! Process-local store
//!
//! Implements every store trait over shared maps. Used when
//! `persistence.backend = "memory"` and throughout the server tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use yoga_agent_core::{Asana, PracticeSession, Sequence, User};

use crate::catalog::CatalogStore;
use crate::sessions::{NewPracticeSession, PracticeSessionStore};
use crate::users::UserStore;
use crate::PersistenceError;

#[derive(Debug, Default)]
struct Tables {
    asanas: BTreeMap<i64, Asana>,
    sequences: BTreeMap<i64, Sequence>,
    users: BTreeMap<i64, User>,
    sessions: BTreeMap<i64, PracticeSession>,
    last_session_id: i64,
}

/// In-memory implementation of all stores; clones share the same data
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn get_asana(&self, id: i64) -> Result<Option<Asana>, PersistenceError> {
        Ok(self.tables.read().asanas.get(&id).cloned())
    }

    async fn list_sequences(&self) -> Result<Vec<Sequence>, PersistenceError> {
        Ok(self.tables.read().sequences.values().cloned().collect())
    }

    async fn sequence_for_emotion(
        &self,
        emotion: &str,
    ) -> Result<Option<Sequence>, PersistenceError> {
        Ok(self
            .tables
            .read()
            .sequences
            .values()
            .find(|s| s.emotion == emotion)
            .cloned())
    }

    async fn count_asanas(&self) -> Result<u64, PersistenceError> {
        Ok(self.tables.read().asanas.len() as u64)
    }

    async fn count_sequences(&self) -> Result<u64, PersistenceError> {
        Ok(self.tables.read().sequences.len() as u64)
    }

    async fn replace_catalog(
        &self,
        asanas: &[Asana],
        sequences: &[Sequence],
    ) -> Result<(), PersistenceError> {
        let mut tables = self.tables.write();
        tables.asanas = asanas.iter().map(|a| (a.id, a.clone())).collect();
        tables.sequences = sequences.iter().map(|s| (s.id, s.clone())).collect();
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn get(&self, id: i64) -> Result<Option<User>, PersistenceError> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), PersistenceError> {
        let mut tables = self.tables.write();
        if tables.users.contains_key(&user.id) {
            return Err(PersistenceError::InvalidData(format!(
                "user {} already exists",
                user.id
            )));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn count(&self) -> Result<u64, PersistenceError> {
        Ok(self.tables.read().users.len() as u64)
    }
}

#[async_trait]
impl PracticeSessionStore for InMemoryStore {
    async fn create(
        &self,
        session: NewPracticeSession,
    ) -> Result<PracticeSession, PersistenceError> {
        let mut tables = self.tables.write();
        tables.last_session_id += 1;

        let created = PracticeSession {
            id: tables.last_session_id,
            user_id: session.user_id,
            emotion: session.emotion,
            intensity: session.intensity,
            sequence_id: session.sequence_id,
            completed: false,
            duration: None,
            created_at: Utc::now(),
        };
        tables.sessions.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get(&self, id: i64) -> Result<Option<PracticeSession>, PersistenceError> {
        Ok(self.tables.read().sessions.get(&id).cloned())
    }

    async fn save(&self, session: &PracticeSession) -> Result<(), PersistenceError> {
        if let Some(stored) = self.tables.write().sessions.get_mut(&session.id) {
            stored.completed = session.completed;
            stored.duration = session.duration;
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, PersistenceError> {
        Ok(self.tables.read().sessions.len() as u64)
    }
}

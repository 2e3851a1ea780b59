//! Storage for the yoga mood agent
//!
//! Provides persistent storage for:
//! - The asana/sequence catalog (seeded from bundled JSON)
//! - Users
//! - Practice sessions
//!
//! Two backends implement the store traits: SQLite through `sqlx`, and a
//! process-local map store.

pub mod catalog;
pub mod client;
pub mod error;
pub mod memory;
pub mod schema;
pub mod seed;
pub mod sessions;
pub mod users;

use std::sync::Arc;

use yoga_agent_config::{PersistenceBackend, PersistenceConfig};

pub use catalog::{CatalogStore, SqliteCatalogStore};
pub use client::{SqliteClient, SqliteConfig};
pub use error::PersistenceError;
pub use memory::InMemoryStore;
pub use seed::{ensure_default_user, seed_catalog, Catalog, DEFAULT_USER_ID};
pub use sessions::{NewPracticeSession, PracticeSessionStore, SqlitePracticeSessionStore};
pub use users::{SqliteUserStore, UserStore};

/// Initialize the persistence layer for the configured backend
pub async fn init(config: &PersistenceConfig) -> Result<PersistenceLayer, PersistenceError> {
    let layer = match config.backend {
        PersistenceBackend::Memory => PersistenceLayer::in_memory(),
        PersistenceBackend::Sqlite => {
            let client = SqliteClient::connect(SqliteConfig::from(config)).await?;
            client.ensure_schema().await?;
            PersistenceLayer::sqlite(client)
        }
    };

    if config.seed_on_startup {
        seed_catalog(layer.catalog.as_ref()).await?;
    }
    ensure_default_user(layer.users.as_ref()).await?;

    if layer.catalog.count_asanas().await? == 0 {
        tracing::warn!("No asanas in the catalog; run `yoga-agent seed` to load them");
    }

    Ok(layer)
}

/// Combined persistence layer with all stores
#[derive(Clone)]
pub struct PersistenceLayer {
    pub catalog: Arc<dyn CatalogStore>,
    pub users: Arc<dyn UserStore>,
    pub sessions: Arc<dyn PracticeSessionStore>,
    backend: PersistenceBackend,
}

impl PersistenceLayer {
    pub fn sqlite(client: SqliteClient) -> Self {
        Self {
            catalog: Arc::new(SqliteCatalogStore::new(client.clone())),
            users: Arc::new(SqliteUserStore::new(client.clone())),
            sessions: Arc::new(SqlitePracticeSessionStore::new(client)),
            backend: PersistenceBackend::Sqlite,
        }
    }

    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            catalog: Arc::new(store.clone()),
            users: Arc::new(store.clone()),
            sessions: Arc::new(store),
            backend: PersistenceBackend::Memory,
        }
    }

    pub fn backend(&self) -> PersistenceBackend {
        self.backend
    }

    /// Cheap round trip to the backing store
    pub async fn ping(&self) -> Result<(), PersistenceError> {
        self.catalog.count_sequences().await.map(|_| ())
    }
}

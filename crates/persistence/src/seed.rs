//! Bundled catalog and default records
//!
//! The catalog ships inside the binary as JSON. Seeding replaces whatever
//! catalog the store holds; users and practice sessions are untouched.

use chrono::Utc;
use yoga_agent_core::{Asana, Sequence, User};

use crate::catalog::CatalogStore;
use crate::users::UserStore;
use crate::PersistenceError;

const ASANAS_JSON: &str = include_str!("../data/asanas.json");
const SEQUENCES_JSON: &str = include_str!("../data/sequences.json");

/// Id of the user every practice session belongs to
pub const DEFAULT_USER_ID: i64 = 1;
const DEFAULT_USERNAME: &str = "default";
const DEFAULT_EMAIL: &str = "default@example.com";

/// Parsed and checked bundled catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    pub asanas: Vec<Asana>,
    pub sequences: Vec<Sequence>,
}

impl Catalog {
    /// Parse the bundled catalog
    pub fn bundled() -> Result<Self, PersistenceError> {
        let asanas: Vec<Asana> = serde_json::from_str(ASANAS_JSON)
            .map_err(|e| PersistenceError::Seed(format!("asanas.json: {}", e)))?;
        let sequences: Vec<Sequence> = serde_json::from_str(SEQUENCES_JSON)
            .map_err(|e| PersistenceError::Seed(format!("sequences.json: {}", e)))?;

        let catalog = Self { asanas, sequences };
        catalog.check()?;
        Ok(catalog)
    }

    /// Every step must name a known asana and totals must match
    pub fn check(&self) -> Result<(), PersistenceError> {
        for sequence in &self.sequences {
            if let Some(step) = sequence
                .asana_sequence
                .iter()
                .find(|step| !self.asanas.iter().any(|a| a.id == step.asana_id))
            {
                return Err(PersistenceError::Seed(format!(
                    "sequence '{}' references unknown asana {}",
                    sequence.name, step.asana_id
                )));
            }

            if sequence.computed_duration() != sequence.total_duration {
                return Err(PersistenceError::Seed(format!(
                    "sequence '{}' total_duration {} does not match its steps ({})",
                    sequence.name,
                    sequence.total_duration,
                    sequence.computed_duration()
                )));
            }
        }
        Ok(())
    }
}

/// Replace the store's catalog with the bundled one
pub async fn seed_catalog(catalog: &dyn CatalogStore) -> Result<Catalog, PersistenceError> {
    let bundled = Catalog::bundled()?;
    catalog
        .replace_catalog(&bundled.asanas, &bundled.sequences)
        .await?;

    tracing::info!(
        asanas = bundled.asanas.len(),
        sequences = bundled.sequences.len(),
        "Catalog seeded"
    );

    Ok(bundled)
}

/// Create the default user when it does not exist yet
pub async fn ensure_default_user(users: &dyn UserStore) -> Result<User, PersistenceError> {
    if let Some(user) = users.get(DEFAULT_USER_ID).await? {
        return Ok(user);
    }

    let user = User {
        id: DEFAULT_USER_ID,
        username: DEFAULT_USERNAME.to_string(),
        email: DEFAULT_EMAIL.to_string(),
        created_at: Utc::now(),
    };
    users.insert(&user).await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.asanas.len(), 11);
        assert_eq!(catalog.sequences.len(), 6);

        let anxiety = &catalog.sequences[0];
        assert_eq!(anxiety.name, "Anxiety Relief Flow");
        assert_eq!(anxiety.emotion, "anxious");
        assert_eq!(anxiety.total_duration, 1050);

        assert!(catalog.sequences.iter().all(|s| s.emotion != "happy"));
    }

    #[test]
    fn test_check_rejects_unknown_asana() {
        let mut catalog = Catalog::bundled().unwrap();
        catalog.asanas.retain(|a| a.id != 9);
        assert!(matches!(catalog.check(), Err(PersistenceError::Seed(_))));
    }
}

use std::sync::Arc;

use chrono::Utc;
use tracing::error;

use crate::domain::model::{Profile, UserIdentity};
use crate::domain::ports::FactSource;

/// Fallback fact substituted whenever the external dependency cannot be used.
pub const FALLBACK_FACT: &str = "Could not fetch a cat fact at this time. Cats are still awesome!";

/// Assembles profile responses: static identity, best-effort fact, fresh
/// timestamp. Holds no mutable state; safe to share across requests.
pub struct ProfileService {
    identity: UserIdentity,
    facts: Arc<dyn FactSource>,
}

impl ProfileService {
    pub fn new(identity: UserIdentity, facts: Arc<dyn FactSource>) -> Self {
        Self { identity, facts }
    }

    /// Assemble a profile. The timestamp is computed after the fact fetch so
    /// it reflects the time of handling, whether or not the fetch succeeded.
    pub async fn profile(&self) -> Profile {
        let fact = self.resolve_fact().await;

        Profile {
            user: self.identity.clone(),
            timestamp: current_timestamp(),
            fact,
        }
    }

    /// Exactly one attempt against the fact source; every failure shape
    /// collapses into the fallback string. Only genuine failures are logged;
    /// a successful response without a `fact` field is not one.
    async fn resolve_fact(&self) -> String {
        match self.facts.fetch_fact().await {
            Ok(Some(fact)) => fact,
            Ok(None) => FALLBACK_FACT.to_string(),
            Err(e) => {
                error!("Failed to fetch cat fact from external API. Error: {e}");
                FALLBACK_FACT.to_string()
            }
        }
    }
}

/// Current UTC time as ISO-8601 with millisecond precision and a `Z` suffix,
/// e.g. `2026-08-06T14:03:21.417Z`.
fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

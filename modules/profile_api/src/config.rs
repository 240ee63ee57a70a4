use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::domain::model::UserIdentity;

/// Default external fact endpoint.
pub const DEFAULT_FACTS_URL: &str = "https://catfact.ninja/fact";

const DEFAULT_FACTS_TIMEOUT: Duration = Duration::from_secs(5);

/// Profile API configuration, read from the `profile_api` entry of the
/// application's module configuration bag. Every field defaults to the
/// canonical value, so an absent section behaves like the hardcoded service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProfileApiConfig {
    pub cors_enabled: bool,
    pub identity: IdentityConfig,
    pub facts: FactsConfig,
}

/// Static identity block served by `GET /me`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct IdentityConfig {
    pub email: String,
    pub name: String,
    pub stack: String,
}

/// External fact dependency settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct FactsConfig {
    pub url: String,
    /// Bound on the single outbound attempt, e.g. "5s".
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for ProfileApiConfig {
    fn default() -> Self {
        Self {
            cors_enabled: true,
            identity: IdentityConfig::default(),
            facts: FactsConfig::default(),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            email: "okekeebuka225@gmail.com".to_string(),
            name: "Ebuka Okeke".to_string(),
            stack: "Rust/Axum".to_string(),
        }
    }
}

impl Default for FactsConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FACTS_URL.to_string(),
            timeout: DEFAULT_FACTS_TIMEOUT,
        }
    }
}

impl ProfileApiConfig {
    /// Extract this module's config from the application `modules` bag.
    /// A missing entry yields the defaults; a malformed entry is an error.
    pub fn from_modules_bag(modules: &HashMap<String, serde_json::Value>) -> Result<Self> {
        match modules.get("profile_api") {
            Some(value) => serde_json::from_value(value.clone())
                .context("Invalid 'profile_api' module configuration"),
            None => Ok(Self::default()),
        }
    }
}

impl From<IdentityConfig> for UserIdentity {
    fn from(cfg: IdentityConfig) -> Self {
        Self {
            email: cfg.email,
            name: cfg.name,
            stack: cfg.stack,
        }
    }
}

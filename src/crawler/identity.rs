//! Client identity (User-Agent) selection per request

use rand::seq::SliceRandom;

use crate::config::DEFAULT_USER_AGENTS;
use crate::error::{Error, Result};

/// Source of the identity string sent with each request
pub trait IdentitySource: Send + Sync {
    fn next_identity(&self) -> String;
}

/// Uniform random pick from a fixed, non-empty pool
#[derive(Debug, Clone)]
pub struct RotatingIdentity {
    pool: Vec<String>,
}

impl RotatingIdentity {
    /// # Errors
    ///
    /// Returns `Error::Config` if the pool is empty
    pub fn new(pool: Vec<String>) -> Result<Self> {
        if pool.is_empty() {
            return Err(Error::config("identity pool must not be empty"));
        }
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }
}

impl Default for RotatingIdentity {
    fn default() -> Self {
        Self {
            pool: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl IdentitySource for RotatingIdentity {
    fn next_identity(&self) -> String {
        let mut rng = rand::thread_rng();
        self.pool.choose(&mut rng).cloned().unwrap_or_default()
    }
}

/// Always the same identity; for tests and reproducible runs
#[derive(Debug, Clone)]
pub struct FixedIdentity(pub String);

impl FixedIdentity {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }
}

impl IdentitySource for FixedIdentity {
    fn next_identity(&self) -> String {
        self.0.clone()
    }
}

//! Resolver configuration.

use serde::{Deserialize, Serialize};

/// Default upper bound on substitution passes per template.
pub const DEFAULT_MAX_RESOLVE_PASSES: usize = 1000;

/// Scenario state configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Substitution passes allowed before a template is reported as non-convergent
    pub max_resolve_passes: usize,
}

impl Default for StateConfig {
    fn default() -> Self {
        StateConfig {
            max_resolve_passes: std::env::var("BDD_MAX_RESOLVE_PASSES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_RESOLVE_PASSES),
        }
    }
}

impl StateConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Override the pass limit
    pub fn with_max_resolve_passes(mut self, passes: usize) -> Self {
        self.max_resolve_passes = passes.max(1);
        self
    }
}

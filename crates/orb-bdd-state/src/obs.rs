//! Structured observability hooks for scenario state.
//!
//! Events are emitted with an `event` field so that JSON log output
//! (see [`crate::telemetry::init_tracing`]) can be filtered by kind.

use tracing::{debug, info, warn};

/// Scenario-scoped tracing span.
///
/// Synchronous steps hold the guard from [`ScenarioSpan::enter`]; async
/// steps instrument their future with [`ScenarioSpan::span`] instead, since
/// an entered guard must not be held across an `.await`.
pub struct ScenarioSpan {
    span: tracing::Span,
}

impl ScenarioSpan {
    /// Create a span tagged with the scenario name.
    pub fn new(scenario: &str) -> Self {
        Self {
            span: tracing::info_span!("orb.bdd.scenario", scenario = %scenario),
        }
    }

    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    /// Enter the span until the returned guard drops.
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

/// Emit event: scenario state reset to the environment snapshot.
pub fn emit_state_cleared(vars: usize) {
    info!(event = "state.cleared", vars = vars);
}

/// Emit event: a variable was written by a step.
pub fn emit_variable_set(name: &str) {
    debug!(event = "state.variable_set", name = %name);
}

/// Emit event: a bearer token was registered.
pub fn emit_auth_token_set(path: &str, method: &str) {
    debug!(event = "state.auth_token_set", path = %path, method = %method);
}

/// Emit event: a template failed to resolve.
pub fn emit_resolve_failed(template: &str, error: &dyn std::fmt::Display) {
    warn!(event = "resolve.failed", template = %template, error = %error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_span_enter_and_reenter() {
        let scenario = ScenarioSpan::new("follow domain2");
        {
            let _entered = scenario.enter();
            emit_state_cleared(0);
        }
        let _entered = scenario.enter();
        emit_variable_set("followID");
    }
}

//! Scenario context passed explicitly to every step.

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::auth::AuthTokenRegistry;
use crate::config::StateConfig;
use crate::deep::resolve_value;
use crate::error::{Result, StateError};
use crate::functions::FunctionRegistry;
use crate::obs;
use crate::resolver::{Resolver, DEFAULT_PREFIX};
use crate::response::{value_to_var, ResponseState};
use crate::store::VariableStore;

/// All mutable state of one running scenario.
///
/// Owned by the scenario runner and handed to each step by reference.
/// Not synchronised: concurrent request workers get `&ScenarioContext`
/// and must not mutate it.
#[derive(Debug)]
pub struct ScenarioContext {
    config: StateConfig,
    vars: VariableStore,
    auth: AuthTokenRegistry,
    response: Option<ResponseState>,
    functions: FunctionRegistry,
}

impl ScenarioContext {
    /// Build a context from an explicit environment snapshot.
    pub fn new<I, K, V>(config: StateConfig, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            config,
            vars: VariableStore::from_env(env),
            auth: AuthTokenRegistry::new(),
            response: None,
            functions: FunctionRegistry::with_defaults(),
        }
    }

    /// Build a context from the process environment and env-derived config.
    pub fn from_process_env() -> Self {
        Self::new(StateConfig::from_env(), std::env::vars())
    }

    /// Replace the function registry (builder pattern).
    pub fn with_functions(mut self, functions: FunctionRegistry) -> Self {
        self.functions = functions;
        self
    }

    pub fn config(&self) -> &StateConfig {
        &self.config
    }

    pub fn vars(&self) -> &VariableStore {
        &self.vars
    }

    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        obs::emit_variable_set(&name);
        self.vars.set(name, value);
    }

    pub fn get_var(&self, name: &str) -> Option<&str> {
        self.vars.get(name)
    }

    /// Store a fresh UUID under `name` and return it.
    pub fn assign_unique_id(&mut self, name: impl Into<String>) -> String {
        let id = Uuid::new_v4().to_string();
        self.set_var(name, id.clone());
        id
    }

    /// Reset variables to the environment snapshot and drop tokens and response.
    pub fn clear(&mut self) {
        self.vars.clear();
        self.auth.clear();
        self.response = None;
        obs::emit_state_cleared(self.vars.len());
    }

    /// Expand `${...}` placeholders, then evaluate template functions.
    pub fn resolve(&self, template: &str) -> Result<String> {
        self.resolve_with_prefix(DEFAULT_PREFIX, template)
    }

    /// Expand `<prefix>{...}` placeholders, then evaluate template functions.
    pub fn resolve_with_prefix(&self, prefix: &str, template: &str) -> Result<String> {
        let resolver = Resolver::new(&self.vars, self.config.max_resolve_passes);
        resolver
            .expand_with_prefix(prefix, template)
            .and_then(|expanded| self.functions.evaluate(&expanded))
            .inspect_err(|e| obs::emit_resolve_failed(template, e))
    }

    /// Resolve each template in order, stopping at the first failure.
    pub fn resolve_all<S: AsRef<str>>(&self, templates: &[S]) -> Result<Vec<String>> {
        templates
            .iter()
            .map(|t| self.resolve(t.as_ref()))
            .collect()
    }

    /// Resolve every string leaf of a JSON document.
    pub fn resolve_vars(&self, value: &Value) -> Result<Value> {
        resolve_value(value, &|s: &str| self.resolve(s))
    }

    /// Run only the function-evaluation stage.
    pub fn evaluate_functions(&self, expr: &str) -> Result<String> {
        self.functions.evaluate(expr)
    }

    pub fn set_auth_token(
        &mut self,
        path: impl Into<String>,
        method: impl Into<String>,
        token: impl Into<String>,
    ) {
        let (path, method) = (path.into(), method.into());
        obs::emit_auth_token_set(&path, &method);
        self.auth.set(path, method, token);
    }

    /// Bearer token for `(path, method)`; `""` means send unauthenticated.
    pub fn get_auth_token(&self, path: &str, method: &str) -> &str {
        self.auth.get(path, method)
    }

    pub fn set_response(&mut self, response: ResponseState) {
        debug!(status = response.status, bytes = response.body.len(), "Recorded response");
        self.response = Some(response);
    }

    pub fn response(&self) -> Option<&ResponseState> {
        self.response.as_ref()
    }

    /// The recorded response, or [`StateError::NoResponse`].
    pub fn require_response(&self) -> Result<&ResponseState> {
        self.response.as_ref().ok_or(StateError::NoResponse)
    }

    /// Copy a value from the JSON response body into variable `var`.
    pub fn save_response_path(&mut self, path: &str, var: impl Into<String>) -> Result<String> {
        let selected = self.require_response()?.json_path(path)?;
        let value = value_to_var(&selected);
        self.set_var(var, value.clone());
        Ok(value)
    }
}

impl Default for ScenarioContext {
    fn default() -> Self {
        Self::from_process_env()
    }
}

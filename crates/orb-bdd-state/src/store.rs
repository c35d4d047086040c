//! Variable store seeded from an environment snapshot.

use std::collections::HashMap;

/// Mutable name → value mapping used by scenario steps.
///
/// The store remembers the environment it was built from so that
/// [`VariableStore::clear`] can restore exactly that snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    env: HashMap<String, String>,
    vars: HashMap<String, String>,
}

impl VariableStore {
    /// Build a store from an explicit environment snapshot.
    pub fn from_env<I, K, V>(env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env: HashMap<String, String> = env
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let vars = env.clone();
        Self { env, vars }
    }

    /// Snapshot the process environment once.
    pub fn from_process_env() -> Self {
        Self::from_env(std::env::vars())
    }

    /// Insert or overwrite a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Look up a variable; `None` when it was never set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Look up a variable, treating absence as the empty string.
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Reset to the construction-time environment snapshot.
    pub fn clear(&mut self) {
        self.vars = self.env.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> VariableStore {
        VariableStore::from_env([("HOME", "/root"), ("DOMAIN1", "orb.domain1.com")])
    }

    #[test]
    fn test_environment_is_preloaded() {
        let store = store();
        assert_eq!(store.get("DOMAIN1"), Some("orb.domain1.com"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_missing_variable_is_not_an_error() {
        let store = store();
        assert_eq!(store.get("nope"), None);
        assert_eq!(store.get_or_empty("nope"), "");
    }

    #[test]
    fn test_set_overwrites_environment_entry() {
        let mut store = store();
        store.set("DOMAIN1", "localhost");
        assert_eq!(store.get("DOMAIN1"), Some("localhost"));
    }

    #[test]
    fn test_clear_restores_snapshot() {
        let mut store = store();
        store.set("followID", "123");
        store.set("HOME", "/tmp");

        store.clear();

        assert!(!store.contains("followID"));
        assert_eq!(store.get("HOME"), Some("/root"));
        assert_eq!(store.len(), 2);
    }
}

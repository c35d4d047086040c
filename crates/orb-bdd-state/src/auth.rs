//! Bearer tokens keyed by request path and method.

use std::collections::HashMap;

/// Registry consulted by the HTTP sender before each request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthTokenRegistry {
    tokens: HashMap<(String, String), String>,
}

impl AuthTokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token for `(path, method)`; last write wins.
    pub fn set(&mut self, path: impl Into<String>, method: impl Into<String>, token: impl Into<String>) {
        self.tokens
            .insert((path.into(), method.into()), token.into());
    }

    /// Token for `(path, method)`, or `""` when none is registered.
    pub fn get(&self, path: &str, method: &str) -> &str {
        self.tokens
            .get(&(path.to_string(), method.to_string()))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_lookup_is_per_method() {
        let mut registry = AuthTokenRegistry::new();
        registry.set("/outbox", "POST", "T1");

        assert_eq!(registry.get("/outbox", "POST"), "T1");
        assert_eq!(registry.get("/outbox", "GET"), "");
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = AuthTokenRegistry::new();
        registry.set("/outbox", "POST", "T1");
        registry.set("/outbox", "POST", "T2");

        assert_eq!(registry.get("/outbox", "POST"), "T2");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear_removes_all_tokens() {
        let mut registry = AuthTokenRegistry::new();
        registry.set("/cas", "GET", "read");
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.get("/cas", "GET"), "");
    }
}

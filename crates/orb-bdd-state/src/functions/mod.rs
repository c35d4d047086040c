//! Function evaluation over fully expanded templates.
//!
//! After placeholder expansion a template may still contain a function
//! call such as `$hashlink(|hl:...|).ResourceHash`. Each function is a
//! [`TemplateFunction`] registered under a marker token; the registry
//! hands the expression to the first function whose marker it contains
//! and passes everything else through untouched.
//!
//! # Modules
//!
//! - [`hashlink`] — `$hashlink(|<hashlink>|).<Property>`

pub mod hashlink;

use std::fmt;

use tracing::debug;

use crate::error::Result;

pub use hashlink::HashLinkFunction;

/// A function callable from a resolved template.
pub trait TemplateFunction: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &str;

    /// Token whose presence selects this function.
    fn marker(&self) -> &str;

    /// Evaluate an expression containing [`TemplateFunction::marker`].
    ///
    /// The returned value replaces the whole expression.
    fn evaluate(&self, expr: &str) -> Result<String>;
}

/// Ordered set of template functions, first match wins.
pub struct FunctionRegistry {
    functions: Vec<Box<dyn TemplateFunction>>,
}

impl FunctionRegistry {
    /// A registry with no functions; every expression passes through.
    pub fn empty() -> Self {
        Self {
            functions: Vec::new(),
        }
    }

    /// The functions available to feature files.
    pub fn with_defaults() -> Self {
        Self::empty().with_function(HashLinkFunction)
    }

    /// Append a function and return `self` (builder pattern).
    pub fn with_function(mut self, function: impl TemplateFunction + 'static) -> Self {
        self.functions.push(Box::new(function));
        self
    }

    /// Names of registered functions, in dispatch order.
    pub fn names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name()).collect()
    }

    /// Evaluate the first function whose marker appears in `expr`.
    pub fn evaluate(&self, expr: &str) -> Result<String> {
        match self.functions.iter().find(|f| expr.contains(f.marker())) {
            Some(function) => {
                debug!(function = function.name(), "Evaluating template function");
                function.evaluate(expr)
            }
            None => Ok(expr.to_string()),
        }
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl TemplateFunction for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        fn marker(&self) -> &str {
            "$upper("
        }

        fn evaluate(&self, expr: &str) -> Result<String> {
            let inner = expr
                .trim_start_matches("$upper(")
                .trim_end_matches(')');
            Ok(inner.to_uppercase())
        }
    }

    #[test]
    fn test_expression_without_marker_passes_through() {
        let registry = FunctionRegistry::with_defaults();
        assert_eq!(registry.evaluate("plain text").unwrap(), "plain text");
    }

    #[test]
    fn test_custom_function_is_dispatched() {
        let registry = FunctionRegistry::with_defaults().with_function(Upper);
        assert_eq!(registry.evaluate("$upper(orb)").unwrap(), "ORB");
        assert_eq!(registry.names(), vec!["hashlink", "upper"]);
    }

    #[test]
    fn test_empty_registry_never_evaluates() {
        let registry = FunctionRegistry::empty();
        assert_eq!(
            registry.evaluate("$hashlink(|hl:abc|).ResourceHash").unwrap(),
            "$hashlink(|hl:abc|).ResourceHash"
        );
    }
}

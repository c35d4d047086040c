//! Placeholder expansion to a fixpoint.
//!
//! Templates contain `${name}` or `${name[index]}` placeholders. Each pass
//! replaces the leftmost placeholder and rescans from the start, so values
//! that themselves contain placeholders are expanded transitively.
//!
//! Expansion stops when a pass finds no placeholder. A pass that
//! reproduces an earlier intermediate string is a cycle, and exceeding the
//! configured pass limit is reported as non-convergence.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Result, StateError};
use crate::store::VariableStore;

/// Placeholder prefix used by most step definitions.
pub const DEFAULT_PREFIX: &str = "$";

/// Strings shorter than this cannot hold a placeholder.
const MIN_TEMPLATE_LEN: usize = 3;

const CLOSE: char = '}';
const LIST_SEPARATOR: char = ',';

/// Expands placeholders against a [`VariableStore`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    vars: &'a VariableStore,
    max_passes: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(vars: &'a VariableStore, max_passes: usize) -> Self {
        Self { vars, max_passes }
    }

    /// Expand `${...}` placeholders.
    pub fn expand(&self, template: &str) -> Result<String> {
        self.expand_with_prefix(DEFAULT_PREFIX, template)
    }

    /// Expand `<prefix>{...}` placeholders.
    ///
    /// # TDD: test_chained_indirection_resolves
    pub fn expand_with_prefix(&self, prefix: &str, template: &str) -> Result<String> {
        let open = format!("{prefix}{{");
        let mut current = template.to_string();
        let mut seen = HashSet::from([current.clone()]);
        let mut passes = 0;

        while let Some(next) = self.substitute_first(&open, &current, template)? {
            passes += 1;
            if passes > self.max_passes {
                return Err(StateError::NonConvergent {
                    expr: template.to_string(),
                    passes: self.max_passes,
                });
            }
            if !seen.insert(next.clone()) {
                return Err(StateError::CyclicReference {
                    expr: template.to_string(),
                });
            }
            current = next;
        }

        if passes > 0 {
            debug!(passes, "Expanded template");
        }
        Ok(current)
    }

    /// Replace the leftmost placeholder, or `None` if there is nothing to replace.
    fn substitute_first(&self, open: &str, expr: &str, template: &str) -> Result<Option<String>> {
        if expr.len() < MIN_TEMPLATE_LEN {
            return Ok(None);
        }

        let Some(start) = expr.find(open) else {
            return Ok(None);
        };
        let name_start = start + open.len();
        let end = match expr[name_start..].find(CLOSE) {
            Some(offset) => name_start + offset,
            None => {
                return Err(StateError::UnterminatedPlaceholder {
                    expr: template.to_string(),
                })
            }
        };

        let value = self.lookup(&expr[name_start..end], template)?;

        let mut out = String::with_capacity(expr.len() - (end + 1 - start) + value.len());
        out.push_str(&expr[..start]);
        out.push_str(&value);
        out.push_str(&expr[end + CLOSE.len_utf8()..]);
        Ok(Some(out))
    }

    fn lookup(&self, name: &str, template: &str) -> Result<String> {
        let Some((base, index)) = split_index(name) else {
            return Ok(self.vars.get_or_empty(name).to_string());
        };

        let value = self.vars.get_or_empty(base);
        if value.is_empty() {
            return Ok(String::new());
        }

        let index: usize = index.parse().map_err(|_| StateError::InvalidIndex {
            index: index.to_string(),
            expr: template.to_string(),
        })?;

        let items: Vec<&str> = value.split(LIST_SEPARATOR).collect();
        items
            .get(index)
            .map(|item| item.to_string())
            .ok_or_else(|| StateError::IndexOutOfRange {
                index,
                len: items.len(),
                expr: template.to_string(),
            })
    }
}

/// Split `name[index]` into `(name, index)`.
fn split_index(name: &str) -> Option<(&str, &str)> {
    let open = name.find('[')?;
    let index = name[open + 1..].strip_suffix(']')?;
    Some((&name[..open], index))
}

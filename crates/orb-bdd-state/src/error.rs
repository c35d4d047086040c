//! Error taxonomy for template resolution and scenario state.

use orb_hashlink::HashLinkError;

/// Errors produced while resolving templates or reading scenario state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid expression '{expr}': placeholder opened without closing '}}'")]
    UnterminatedPlaceholder { expr: String },

    #[error("invalid index [{index}] in expression '{expr}'")]
    InvalidIndex { index: String, expr: String },

    #[error("index [{index}] out of range (length {len}) in expression '{expr}'")]
    IndexOutOfRange {
        index: usize,
        len: usize,
        expr: String,
    },

    #[error("cyclic variable reference while resolving '{expr}'")]
    CyclicReference { expr: String },

    #[error("resolving '{expr}' did not converge after {passes} passes")]
    NonConvergent { expr: String, passes: usize },

    #[error("unterminated {function} call in '{expr}'")]
    UnterminatedFunction { function: String, expr: String },

    #[error("no {function} property specified in '{expr}'")]
    MissingFunctionProperty { function: String, expr: String },

    #[error("invalid {function} property [{property}]")]
    InvalidFunctionProperty { function: String, property: String },

    #[error(transparent)]
    HashLink(#[from] HashLinkError),

    #[error("element [{index}]: {source}")]
    AtIndex {
        index: usize,
        source: Box<StateError>,
    },

    #[error("field '{key}': {source}")]
    AtKey {
        key: String,
        source: Box<StateError>,
    },

    #[error("no response has been recorded in this scenario")]
    NoResponse,

    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON path '{path}' not found in response")]
    PathNotFound { path: String },

    #[error("expected response status {expected}, got {actual}: {body}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body: String,
    },
}

impl StateError {
    /// Wrap an element failure with its array position.
    pub fn at_index(index: usize, source: StateError) -> Self {
        StateError::AtIndex {
            index,
            source: Box::new(source),
        }
    }

    /// Wrap a field failure with its map key.
    pub fn at_key(key: impl Into<String>, source: StateError) -> Self {
        StateError::AtKey {
            key: key.into(),
            source: Box::new(source),
        }
    }
}

/// Result type for scenario state operations.
pub type Result<T> = std::result::Result<T, StateError>;

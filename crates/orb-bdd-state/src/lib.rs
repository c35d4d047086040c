//! Orb BDD State: scenario variables and template resolution
//!
//! Step definitions in the Orb integration suite build request URLs and
//! bodies from templates such as `${domain1IRI}/activities/${followID}`.
//! This crate owns the per-scenario state those templates resolve against
//! and the resolution engine itself:
//!
//! - [`store`] — variables seeded from an environment snapshot
//! - [`auth`] — bearer tokens keyed by `(path, method)`
//! - [`resolver`] — `${name}` / `${name[i]}` expansion to a fixpoint
//! - [`deep`] — resolution over JSON documents
//! - [`functions`] — post-expansion function calls (`$hashlink(|..|)`)
//! - [`response`] — the last HTTP response and JSON path selection
//! - [`context`] — [`ScenarioContext`], tying the above together

pub mod auth;
pub mod config;
pub mod context;
pub mod deep;
pub mod error;
pub mod functions;
pub mod obs;
pub mod resolver;
pub mod response;
pub mod store;
pub mod telemetry;

pub use auth::AuthTokenRegistry;
pub use config::StateConfig;
pub use context::ScenarioContext;
pub use deep::resolve_value;
pub use error::{Result, StateError};
pub use functions::{FunctionRegistry, HashLinkFunction, TemplateFunction};
pub use obs::ScenarioSpan;
pub use resolver::{Resolver, DEFAULT_PREFIX};
pub use response::{select_path, value_to_var, ResponseState};
pub use store::VariableStore;
pub use telemetry::init_tracing;

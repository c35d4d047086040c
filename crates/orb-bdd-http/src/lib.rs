//! Orb BDD HTTP: sends resolved requests to a live Orb deployment
//!
//! Step definitions describe requests as templates; this crate resolves
//! them through an [`orb_bdd_state::ScenarioContext`], adds the bearer
//! token registered for the request path and method, and stores the
//! response back in the context for later assertions.

pub mod client;
pub mod config;
pub mod error;
pub mod fakes;
pub mod request;
pub mod sender;

pub use client::ScenarioClient;
pub use config::HttpConfig;
pub use error::HttpError;
pub use request::{url_path, HttpRequest, RequestBody};
pub use sender::{ReqwestSender, RequestSender};

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, HttpError>;

//! # fibra-api
//!
//! HTTP surface for Fibra Core: route definitions, the authenticated-user
//! extractor, error-to-response mapping, and application wiring.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_state, run_server};
pub use error::ApiError;
pub use state::AppState;

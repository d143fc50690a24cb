//! Client library for the remote tracking service.
//!
//! Provides an HTTP implementation of [`scorersync_core::ScorerBackend`]
//! against MLflow-style REST endpoints with bearer-token authentication.

pub mod error;
pub mod http;
pub mod tracking;

pub use error::ClientError;
pub use http::HttpClient;
pub use tracking::TrackingClient;

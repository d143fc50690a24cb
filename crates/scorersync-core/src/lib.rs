//! ScorerSync Core Domain Types
//!
//! This crate contains the scorer domain model and the reconciliation engine,
//! with no dependencies on:
//! - Network/HTTP
//! - Runtime specifics
//!
//! The remote tracking service is reached only through the [`ScorerBackend`]
//! trait, implemented elsewhere.

pub mod backend;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod scorer;

// Re-export commonly used types
pub use backend::{BackendError, ScorerBackend};
pub use config::ReconcileConfig;
pub use error::{ConfigError, ReconcileError};
pub use reconcile::Reconciler;
pub use scorer::{RemoteScorer, SamplingConfig, ScorerDefinition, ScorerSpec, ScorerType};

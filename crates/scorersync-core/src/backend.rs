//! The seam between the reconciler and the remote tracking service.

use async_trait::async_trait;
use thiserror::Error;

use crate::scorer::{RemoteScorer, SamplingConfig, ScorerDefinition};

/// Errors surfaced by a [`ScorerBackend`] implementation.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The remote service could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote service answered with an error.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A response body could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Remote scorer operations, scoped to one experiment.
///
/// The experiment is selected when the backend is constructed; every call
/// here operates within it. Implementations perform blocking-equivalent
/// sequential I/O; the reconciler never issues concurrent calls.
#[async_trait]
pub trait ScorerBackend {
    /// List every scorer currently registered on the experiment.
    async fn list(&self) -> Result<Vec<RemoteScorer>, BackendError>;

    /// Delete the scorer registered under `name`.
    async fn delete(&self, name: &str) -> Result<(), BackendError>;

    /// Register a new scorer. Registration alone does not start evaluation;
    /// follow with [`ScorerBackend::activate`].
    async fn register(&self, def: &ScorerDefinition) -> Result<RemoteScorer, BackendError>;

    /// Start a freshly registered scorer with the given sampling.
    async fn activate(&self, name: &str, sampling: &SamplingConfig) -> Result<(), BackendError>;

    /// Change the sampling rate of an existing scorer. Type and guidelines
    /// are never touched by an update.
    async fn update(&self, name: &str, sampling: &SamplingConfig) -> Result<(), BackendError>;
}

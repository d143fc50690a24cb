//! Core domain errors.

use thiserror::Error;

use crate::backend::BackendError;

/// Errors raised while parsing and validating the input configuration.
///
/// All of these abort the run before any remote call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration blob is not valid JSON or lacks the required keys.
    #[error(
        "creation config must be a valid JSON string with keys \
         ['experiment_name', 'scorers']: {0}"
    )]
    InvalidJson(String),

    /// The experiment name is empty.
    #[error("'experiment_name' must be a non-empty string")]
    EmptyExperimentName,

    /// A scorer's sample rate is outside [0, 1] or not a finite number.
    #[error("scorer '{name}' has sample_rate {rate}, expected a number in [0, 1]")]
    InvalidSampleRate { name: String, rate: f64 },
}

/// Errors raised by the reconciliation run itself.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The spec names a scorer type that is not in the built-in registry.
    #[error("scorer type '{0}' is not a pre-built scorer")]
    UnknownScorerType(String),

    /// A remote call in the create/update pass failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

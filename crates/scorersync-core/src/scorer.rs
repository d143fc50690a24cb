//! Scorer types: the built-in type registry, desired-state specs, and the
//! handles exchanged with the remote service.

use serde::{Deserialize, Serialize};

use crate::error::ReconcileError;

/// The built-in scorer kinds the tracking service knows how to run.
///
/// Scorer specs carry the type as a plain string; it is resolved against this
/// registry only when a new scorer has to be constructed, so an unknown type
/// surfaces during the create pass rather than at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScorerType {
    /// Evaluates if the response avoids harmful/toxic content.
    Safety,
    /// Compares the response to expected facts (requires ground truth).
    Correctness,
    /// Checks if the response directly addresses the user input.
    RelevanceToQuery,
    /// Checks if the response is grounded in retrieved information.
    RetrievalGroundedness,
    /// Assesses relevance of the retrieved documents.
    RetrievalRelevance,
    /// Determines if the retrieved documents contain the necessary
    /// information (requires ground truth).
    RetrievalSufficiency,
    /// Evaluates against custom free-text guidelines supplied at creation.
    Guidelines,
}

impl ScorerType {
    /// All registry entries, in catalog order.
    pub const ALL: [ScorerType; 7] = [
        ScorerType::Safety,
        ScorerType::Correctness,
        ScorerType::RelevanceToQuery,
        ScorerType::RetrievalGroundedness,
        ScorerType::RetrievalRelevance,
        ScorerType::RetrievalSufficiency,
        ScorerType::Guidelines,
    ];

    /// Resolve a wire name against the registry.
    pub fn from_name(name: &str) -> Result<Self, ReconcileError> {
        match name {
            "Safety" => Ok(ScorerType::Safety),
            "Correctness" => Ok(ScorerType::Correctness),
            "RelevanceToQuery" => Ok(ScorerType::RelevanceToQuery),
            "RetrievalGroundedness" => Ok(ScorerType::RetrievalGroundedness),
            "RetrievalRelevance" => Ok(ScorerType::RetrievalRelevance),
            "RetrievalSufficiency" => Ok(ScorerType::RetrievalSufficiency),
            "Guidelines" => Ok(ScorerType::Guidelines),
            other => Err(ReconcileError::UnknownScorerType(other.to_string())),
        }
    }

    /// The registry name, as it appears in specs and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScorerType::Safety => "Safety",
            ScorerType::Correctness => "Correctness",
            ScorerType::RelevanceToQuery => "RelevanceToQuery",
            ScorerType::RetrievalGroundedness => "RetrievalGroundedness",
            ScorerType::RetrievalRelevance => "RetrievalRelevance",
            ScorerType::RetrievalSufficiency => "RetrievalSufficiency",
            ScorerType::Guidelines => "Guidelines",
        }
    }

    /// Whether this type takes a list of free-text guidelines at creation.
    pub fn is_guideline_based(&self) -> bool {
        matches!(self, ScorerType::Guidelines)
    }
}

impl std::fmt::Display for ScorerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Desired state for one scorer, as declared in the input config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerSpec {
    /// Scorer name, the key matched against remote state.
    pub name: String,

    /// Registry name of the scorer type. Kept as a string and resolved
    /// lazily; see [`ScorerType::from_name`].
    pub scorer_type: String,

    /// Fraction of traced events the scorer evaluates, in [0, 1].
    pub sample_rate: f64,

    /// Free-text guidelines; only meaningful for the guideline-based type.
    #[serde(default)]
    pub guidelines: Vec<String>,
}

/// Sampling configuration sent on activate/update calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Fraction of traced events to evaluate, in [0, 1].
    pub sample_rate: f64,
}

impl SamplingConfig {
    pub fn new(sample_rate: f64) -> Self {
        Self { sample_rate }
    }
}

/// A fully resolved scorer, ready to be registered with the remote service.
#[derive(Debug, Clone, PartialEq)]
pub struct ScorerDefinition {
    /// Name to register the scorer under.
    pub name: String,

    /// Resolved scorer type.
    pub scorer_type: ScorerType,

    /// Guidelines to attach; empty unless the type is guideline-based and
    /// the spec supplied a non-empty list (remote default applies otherwise).
    pub guidelines: Vec<String>,
}

/// Handle for a scorer that exists remotely. Opaque beyond its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteScorer {
    /// The remote scorer's name.
    pub name: String,
}

impl RemoteScorer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

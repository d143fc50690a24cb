//! The reconciliation engine: converge remote scorer state to the desired
//! state in a single sequential pass.

use std::collections::{HashMap, HashSet};

use tracing::{info, warn};

use crate::backend::ScorerBackend;
use crate::error::ReconcileError;
use crate::scorer::{RemoteScorer, SamplingConfig, ScorerDefinition, ScorerSpec, ScorerType};

/// Drives one reconciliation run against a [`ScorerBackend`].
///
/// Failure policy is asymmetric on purpose: listing and deletion failures are
/// logged and skipped (the run degrades rather than aborts), while any error
/// in the create/update pass propagates and terminates the run. Nothing is
/// retried.
pub struct Reconciler<B> {
    backend: B,
    managed_prefix: Option<String>,
}

impl<B: ScorerBackend> Reconciler<B> {
    /// Create a reconciler that treats every remote scorer as managed.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            managed_prefix: None,
        }
    }

    /// Restrict the deletion pass to remote scorers whose names start with
    /// `prefix`. Scorers created by other actors are then left alone.
    pub fn with_managed_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.managed_prefix = Some(prefix.into());
        self
    }

    /// Converge the remote scorer set to `specs`.
    ///
    /// An empty `specs` deletes every (managed) remote scorer. On success the
    /// remote name set equals the spec name set and each remaining scorer
    /// samples at its spec's rate.
    pub async fn run(&self, specs: &[ScorerSpec]) -> Result<(), ReconcileError> {
        let desired: HashSet<&str> = specs.iter().map(|s| s.name.as_str()).collect();

        let actual = self.fetch_actual().await;
        self.delete_obsolete(&actual, &desired).await;

        for spec in specs {
            let sampling = SamplingConfig::new(spec.sample_rate);
            if actual.contains_key(spec.name.as_str()) {
                // Existing scorers are only re-sampled, never re-typed or
                // re-guided.
                self.backend.update(&spec.name, &sampling).await?;
                info!(
                    scorer = %spec.name,
                    sample_rate = spec.sample_rate,
                    "updated scorer sampling"
                );
            } else {
                let def = resolve_spec(spec)?;
                self.backend.register(&def).await?;
                self.backend.activate(&spec.name, &sampling).await?;
                info!(
                    scorer = %spec.name,
                    scorer_type = %def.scorer_type,
                    sample_rate = spec.sample_rate,
                    "registered and started scorer"
                );
            }
        }

        Ok(())
    }

    /// List remote scorers into a name-keyed map. A listing failure degrades
    /// to an empty map: the deletion pass is skipped and every spec is
    /// treated as new (creates will surface a clear conflict downstream).
    async fn fetch_actual(&self) -> HashMap<String, RemoteScorer> {
        match self.backend.list().await {
            Ok(scorers) => scorers
                .into_iter()
                .map(|s| (s.name.clone(), s))
                .collect(),
            Err(err) => {
                warn!(error = %err, "could not list existing scorers; skipping cleanup");
                HashMap::new()
            }
        }
    }

    /// Delete remote scorers that are not in the desired set. Failures are
    /// isolated per name and never abort the pass.
    async fn delete_obsolete(
        &self,
        actual: &HashMap<String, RemoteScorer>,
        desired: &HashSet<&str>,
    ) {
        for name in actual.keys() {
            if desired.contains(name.as_str()) {
                continue;
            }
            if let Some(prefix) = &self.managed_prefix {
                if !name.starts_with(prefix.as_str()) {
                    continue;
                }
            }
            match self.backend.delete(name).await {
                Ok(()) => info!(scorer = %name, "deleted obsolete scorer"),
                Err(err) => warn!(scorer = %name, error = %err, "could not delete scorer"),
            }
        }
    }
}

/// Resolve a spec into a registerable definition. Guidelines are attached
/// only when the type is guideline-based and the spec supplied a non-empty
/// list; otherwise the remote default applies.
fn resolve_spec(spec: &ScorerSpec) -> Result<ScorerDefinition, ReconcileError> {
    let scorer_type = ScorerType::from_name(&spec.scorer_type)?;
    let guidelines = if scorer_type.is_guideline_based() && !spec.guidelines.is_empty() {
        spec.guidelines.clone()
    } else {
        Vec::new()
    };
    Ok(ScorerDefinition {
        name: spec.name.clone(),
        scorer_type,
        guidelines,
    })
}

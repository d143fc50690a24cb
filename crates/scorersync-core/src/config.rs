//! Top-level input configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scorer::ScorerSpec;

/// The reconciliation request: which experiment to target and the full set of
/// scorers that should exist on it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Name of the tracking experiment all operations are scoped to.
    pub experiment_name: String,

    /// Desired scorers, in the order create/update calls are issued.
    pub scorers: Vec<ScorerSpec>,

    /// When set, the deletion pass only targets remote scorers whose names
    /// start with this prefix; scorers created by other actors are left
    /// alone. When absent, every remote scorer not in `scorers` is deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_prefix: Option<String>,
}

impl ReconcileConfig {
    /// Parse and validate a JSON configuration blob.
    ///
    /// Fails before any remote call on malformed JSON, missing required keys,
    /// an empty experiment name, or a sample rate outside [0, 1].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: ReconcileConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::InvalidJson(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.experiment_name.is_empty() {
            return Err(ConfigError::EmptyExperimentName);
        }
        for spec in &self.scorers {
            if !spec.sample_rate.is_finite() || !(0.0..=1.0).contains(&spec.sample_rate) {
                return Err(ConfigError::InvalidSampleRate {
                    name: spec.name.clone(),
                    rate: spec.sample_rate,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_parse_full_config() {
        let raw = r#"{
            "experiment_name": "my_experiment",
            "scorers": [
                {"name": "my_safety", "scorer_type": "Safety", "sample_rate": 0.5, "guidelines": []},
                {"name": "my_custom_guidelines", "scorer_type": "Guidelines", "sample_rate": 0.5,
                 "guidelines": ["Be polite.", "Answers with less than 10 characters."]}
            ]
        }"#;
        let config = ReconcileConfig::from_json(raw).unwrap();
        assert_eq!(config.experiment_name, "my_experiment");
        assert_eq!(config.scorers.len(), 2);
        assert_eq!(config.scorers[1].guidelines.len(), 2);
        assert_eq!(config.managed_prefix, None);
    }

    #[test]
    fn test_guidelines_default_to_empty() {
        let raw = r#"{
            "experiment_name": "exp",
            "scorers": [{"name": "s", "scorer_type": "Safety", "sample_rate": 1.0}]
        }"#;
        let config = ReconcileConfig::from_json(raw).unwrap();
        assert!(config.scorers[0].guidelines.is_empty());
    }

    #[test]
    fn test_unknown_scorer_type_parses() {
        // Resolution against the registry is deferred to the create pass.
        let raw = r#"{
            "experiment_name": "exp",
            "scorers": [{"name": "s", "scorer_type": "NotARealScorer", "sample_rate": 0.1}]
        }"#;
        let config = ReconcileConfig::from_json(raw).unwrap();
        assert_eq!(config.scorers[0].scorer_type, "NotARealScorer");
    }

    #[test]
    fn test_missing_required_keys() {
        let err = ReconcileConfig::from_json(r#"{"scorers": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJson(_)));
        assert!(err.to_string().contains("experiment_name"));

        let err = ReconcileConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJson(_)));
    }

    #[test]
    fn test_missing_spec_field_rejected() {
        // sample_rate is required on every entry.
        let raw = r#"{
            "experiment_name": "exp",
            "scorers": [{"name": "s", "scorer_type": "Safety"}]
        }"#;
        assert!(matches!(
            ReconcileConfig::from_json(raw),
            Err(ConfigError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        let raw = r#"{
            "experiment_name": "exp",
            "scorers": [{"name": "s", "scorer_type": "Safety", "sample_rate": 1.2}]
        }"#;
        let err = ReconcileConfig::from_json(raw).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSampleRate { .. }));
    }

    #[test]
    fn test_empty_experiment_name() {
        let raw = r#"{"experiment_name": "", "scorers": []}"#;
        assert!(matches!(
            ReconcileConfig::from_json(raw),
            Err(ConfigError::EmptyExperimentName)
        ));
    }

    #[test]
    fn test_managed_prefix_round_trip() {
        let raw = r#"{"experiment_name": "exp", "scorers": [], "managed_prefix": "n8n_"}"#;
        let config = ReconcileConfig::from_json(raw).unwrap();
        assert_eq!(config.managed_prefix.as_deref(), Some("n8n_"));
    }
}

//! [`ScorerBackend`] implementation over the tracking service's REST API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use scorersync_core::{BackendError, RemoteScorer, SamplingConfig, ScorerBackend, ScorerDefinition};

use crate::error::ClientError;
use crate::http::HttpClient;

const EXPERIMENTS_GET_BY_NAME: &str = "/api/2.0/mlflow/experiments/get-by-name";
const EXPERIMENTS_CREATE: &str = "/api/2.0/mlflow/experiments/create";
const SCORERS_LIST: &str = "/api/2.0/mlflow/scorers/list";
const SCORERS_DELETE: &str = "/api/2.0/mlflow/scorers/delete";
const SCORERS_REGISTER: &str = "/api/2.0/mlflow/scorers/register";
const SCORERS_START: &str = "/api/2.0/mlflow/scorers/start";
const SCORERS_UPDATE: &str = "/api/2.0/mlflow/scorers/update";

#[derive(Debug, Deserialize)]
struct Experiment {
    experiment_id: String,
}

#[derive(Debug, Deserialize)]
struct GetExperimentResponse {
    experiment: Experiment,
}

#[derive(Debug, Serialize)]
struct CreateExperimentRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateExperimentResponse {
    experiment_id: String,
}

#[derive(Debug, Deserialize)]
struct ScorerInfo {
    scorer_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct ListScorersResponse {
    #[serde(default)]
    scorers: Vec<ScorerInfo>,
}

#[derive(Debug, Serialize)]
struct DeleteScorerRequest<'a> {
    experiment_id: &'a str,
    scorer_name: &'a str,
}

#[derive(Debug, Serialize)]
struct ScorerPayload<'a> {
    scorer_type: &'a str,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    guidelines: &'a [String],
}

#[derive(Debug, Serialize)]
struct RegisterScorerRequest<'a> {
    experiment_id: &'a str,
    scorer_name: &'a str,
    scorer: ScorerPayload<'a>,
}

#[derive(Debug, Deserialize)]
struct RegisterScorerResponse {
    scorer_name: String,
}

#[derive(Debug, Serialize)]
struct SamplingRequest<'a> {
    experiment_id: &'a str,
    scorer_name: &'a str,
    sampling_config: SamplingConfig,
}

// Some endpoints answer `{}` on success; decode into this.
#[derive(Debug, Deserialize)]
struct Empty {}

/// Decide between the get and create paths from a get-by-name result.
///
/// `Ok(Some(id))` means the experiment exists, `Ok(None)` means it has to be
/// created; any error other than HTTP 404 propagates.
fn classify_lookup(
    result: Result<GetExperimentResponse, ClientError>,
) -> Result<Option<String>, ClientError> {
    match result {
        Ok(resp) => Ok(Some(resp.experiment.experiment_id)),
        Err(ClientError::Api { status: 404, .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Client for one experiment's scorers on the tracking service.
pub struct TrackingClient {
    http: HttpClient,
    experiment_id: String,
}

impl TrackingClient {
    /// Connect to the tracking service and select the target experiment,
    /// creating it when it does not exist yet.
    pub async fn connect(
        host: &str,
        token: &str,
        experiment_name: &str,
    ) -> Result<Self, ClientError> {
        let http = HttpClient::new(host, token)?;

        let lookup = http
            .get_json::<GetExperimentResponse>(
                EXPERIMENTS_GET_BY_NAME,
                &[("experiment_name", experiment_name)],
            )
            .await;
        let experiment_id = match classify_lookup(lookup)? {
            Some(id) => id,
            None => {
                let resp: CreateExperimentResponse = http
                    .post_json(
                        EXPERIMENTS_CREATE,
                        &CreateExperimentRequest {
                            name: experiment_name,
                        },
                    )
                    .await?;
                resp.experiment_id
            }
        };

        info!(
            experiment = %experiment_name,
            experiment_id = %experiment_id,
            "tracking client configured for experiment"
        );

        Ok(Self {
            http,
            experiment_id,
        })
    }

    /// The id of the selected experiment.
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    async fn set_sampling(
        &self,
        path: &str,
        name: &str,
        sampling: &SamplingConfig,
    ) -> Result<(), ClientError> {
        let _: Empty = self
            .http
            .post_json(
                path,
                &SamplingRequest {
                    experiment_id: &self.experiment_id,
                    scorer_name: name,
                    sampling_config: *sampling,
                },
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ScorerBackend for TrackingClient {
    async fn list(&self) -> Result<Vec<RemoteScorer>, BackendError> {
        let resp: ListScorersResponse = self
            .http
            .get_json(SCORERS_LIST, &[("experiment_id", self.experiment_id())])
            .await
            .map_err(BackendError::from)?;
        Ok(resp
            .scorers
            .into_iter()
            .map(|s| RemoteScorer::new(s.scorer_name))
            .collect())
    }

    async fn delete(&self, name: &str) -> Result<(), BackendError> {
        let _: Empty = self
            .http
            .post_json(
                SCORERS_DELETE,
                &DeleteScorerRequest {
                    experiment_id: &self.experiment_id,
                    scorer_name: name,
                },
            )
            .await
            .map_err(BackendError::from)?;
        Ok(())
    }

    async fn register(&self, def: &ScorerDefinition) -> Result<RemoteScorer, BackendError> {
        let resp: RegisterScorerResponse = self
            .http
            .post_json(
                SCORERS_REGISTER,
                &RegisterScorerRequest {
                    experiment_id: &self.experiment_id,
                    scorer_name: &def.name,
                    scorer: ScorerPayload {
                        scorer_type: def.scorer_type.as_str(),
                        guidelines: &def.guidelines,
                    },
                },
            )
            .await
            .map_err(BackendError::from)?;
        Ok(RemoteScorer::new(resp.scorer_name))
    }

    async fn activate(&self, name: &str, sampling: &SamplingConfig) -> Result<(), BackendError> {
        self.set_sampling(SCORERS_START, name, sampling)
            .await
            .map_err(ClientError::into)
    }

    async fn update(&self, name: &str, sampling: &SamplingConfig) -> Result<(), BackendError> {
        self.set_sampling(SCORERS_UPDATE, name, sampling)
            .await
            .map_err(ClientError::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorersync_core::ScorerType;

    #[test]
    fn test_register_request_with_guidelines() {
        let guidelines = vec!["Be polite.".to_string()];
        let request = RegisterScorerRequest {
            experiment_id: "42",
            scorer_name: "g1",
            scorer: ScorerPayload {
                scorer_type: ScorerType::Guidelines.as_str(),
                guidelines: &guidelines,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["experiment_id"], "42");
        assert_eq!(value["scorer"]["scorer_type"], "Guidelines");
        assert_eq!(value["scorer"]["guidelines"][0], "Be polite.");
    }

    #[test]
    fn test_register_request_omits_empty_guidelines() {
        let request = RegisterScorerRequest {
            experiment_id: "42",
            scorer_name: "my_safety",
            scorer: ScorerPayload {
                scorer_type: ScorerType::Safety.as_str(),
                guidelines: &[],
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value["scorer"].get("guidelines").is_none());
    }

    #[test]
    fn test_sampling_request_shape() {
        let request = SamplingRequest {
            experiment_id: "42",
            scorer_name: "my_safety",
            sampling_config: SamplingConfig::new(0.5),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["sampling_config"]["sample_rate"], 0.5);
    }

    #[test]
    fn test_existing_experiment_resolves_to_its_id() {
        let lookup = Ok(GetExperimentResponse {
            experiment: Experiment {
                experiment_id: "42".to_string(),
            },
        });
        assert_eq!(classify_lookup(lookup).unwrap(), Some("42".to_string()));
    }

    #[test]
    fn test_missing_experiment_takes_create_path() {
        let lookup = Err(ClientError::Api {
            status: 404,
            message: "RESOURCE_DOES_NOT_EXIST: nope".to_string(),
        });
        assert_eq!(classify_lookup(lookup).unwrap(), None);
    }

    #[test]
    fn test_other_lookup_errors_propagate() {
        let lookup: Result<GetExperimentResponse, ClientError> = Err(ClientError::Api {
            status: 500,
            message: "internal error".to_string(),
        });
        let err = classify_lookup(lookup).unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 500, .. }));
    }

    #[test]
    fn test_list_response_tolerates_missing_scorers_key() {
        let resp: ListScorersResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.scorers.is_empty());

        let resp: ListScorersResponse =
            serde_json::from_str(r#"{"scorers":[{"scorer_name":"a"},{"scorer_name":"b"}]}"#)
                .unwrap();
        assert_eq!(resp.scorers.len(), 2);
        assert_eq!(resp.scorers[0].scorer_name, "a");
    }
}

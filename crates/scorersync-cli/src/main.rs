//! ScorerSync CLI - reconcile experiment scorers against a declarative config.

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use scorersync_client::TrackingClient;
use scorersync_core::{ReconcileConfig, Reconciler};

const HOST_VAR: &str = "DATABRICKS_HOST";
const TOKEN_VAR: &str = "DATABRICKS_TOKEN";

/// Create or update the scorers of a GenAI tracking experiment.
#[derive(Parser)]
#[command(name = "scorersync")]
#[command(about = "Reconcile experiment scorers against a JSON config", long_about = None)]
struct Cli {
    /// JSON specification of the scorers config and target experiment
    #[arg(long = "creation_config")]
    creation_config: String,
}

/// Read a required credential from the environment.
fn require_env(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|_| {
        format!("{name} must be set in the environment before running this tool")
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Credentials are checked before argument parsing or any remote work.
    let host = require_env(HOST_VAR)?;
    let token = require_env(TOKEN_VAR)?;

    let cli = Cli::parse();

    let config = ReconcileConfig::from_json(&cli.creation_config)?;

    let client = TrackingClient::connect(&host, &token, &config.experiment_name).await?;

    let mut reconciler = Reconciler::new(client);
    if let Some(prefix) = &config.managed_prefix {
        reconciler = reconciler.with_managed_prefix(prefix);
    }
    reconciler.run(&config.scorers).await?;

    info!(
        experiment = %config.experiment_name,
        scorers = config.scorers.len(),
        "reconciliation complete"
    );

    Ok(())
}

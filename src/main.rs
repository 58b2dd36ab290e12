//! driftwatch - model quality drift monitor
//!
//! Runs one monitoring pass: reads the prediction batch and the training
//! baseline from the configured store, computes current regression metrics,
//! compares them against the baseline and writes both artifacts back.
//!
//! # Usage
//! ```sh
//! STORE_BACKEND=gcs STORE_BUCKET=my-bucket cargo run --bin driftwatch
//! ```
//!
//! # Exit codes
//! - `0` success
//! - `2` configuration error
//! - `3` schema or decoding error in the observation batch
//! - `4` metrics undefined (empty batch, constant ground truth, overflow)
//! - `5` malformed baseline snapshot
//! - `6` store I/O failure
//! - `1` anything else

use driftwatch::application::{FailureKind, MonitoringJob};
use driftwatch::config::{Config, ObservabilityEnvConfig};
use driftwatch::infrastructure::factory::StoreFactory;
use driftwatch::infrastructure::observability::{RunReporter, init_tracing};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let observability = ObservabilityEnvConfig::from_env();
    init_tracing(observability.as_ref().unwrap_or(&ObservabilityEnvConfig::default()));
    info!("driftwatch {} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = observability {
        return fail(FailureKind::Configuration, &e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => return fail(FailureKind::Configuration, &e),
    };
    info!(
        "Configuration loaded: Backend={:?}, Observations={}, Baseline={}",
        config.store.backend, config.job.observations_path, config.job.baseline_path
    );

    let store = match StoreFactory::create_store(&config.store) {
        Ok(store) => store,
        Err(e) => return fail(FailureKind::Configuration, &e),
    };

    let job = MonitoringJob::with_csv(store, config.job.clone());
    match job.run().await {
        Ok(summary) => {
            RunReporter::new(config.observability.enabled).report(&summary);
            info!("Pipeline completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => fail(FailureKind::classify(&e), &e),
    }
}

fn fail(kind: FailureKind, err: &anyhow::Error) -> ExitCode {
    error!("Run failed ({} error): {:#}", kind, err);
    ExitCode::from(kind.exit_code())
}

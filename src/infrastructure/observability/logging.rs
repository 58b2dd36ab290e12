use crate::config::{LogFormat, ObservabilityEnvConfig};
use tracing::Level;
use tracing_subscriber::prelude::*;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` directives are honoured; the baseline level is INFO.
pub fn init_tracing(config: &ObservabilityEnvConfig) {
    let filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into());

    match config.log_format {
        LogFormat::Pretty => {
            let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .init();
        }
        LogFormat::Json => {
            let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).json();
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .init();
        }
    }
}

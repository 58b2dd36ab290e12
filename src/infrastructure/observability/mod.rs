//! Push-based observability for driftwatch
//!
//! Outbound only: human-readable logs through `tracing`, plus one
//! machine-readable summary line per successful run.

pub mod logging;
pub mod reporter;

pub use logging::init_tracing;
pub use reporter::{RunReporter, SUMMARY_PREFIX};

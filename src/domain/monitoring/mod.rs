// Drift monitoring domain
pub mod comparison;
pub mod metric_vector;
pub mod metrics_engine;
pub mod observation;
pub mod raw_table;
pub mod run_summary;

pub use comparison::{ComparisonReport, DriftComparator};
pub use metric_vector::MetricVector;
pub use metrics_engine::MetricsEngine;
pub use observation::{
    DEFAULT_PREDICTION_COLUMN, DEFAULT_TRUE_COLUMN, Observation, ObservationBatch, RowPolicy,
};
pub use raw_table::RawTable;
pub use run_summary::RunSummary;

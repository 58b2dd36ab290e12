//! Classification of run failures into exit codes.

use crate::domain::errors::{BaselineError, MetricsError, ObservationError, StoreError};
use std::fmt;

/// Broad failure class of a run, one per exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    Schema,
    Statistical,
    Baseline,
    Store,
    Other,
}

impl FailureKind {
    /// Walk the error chain and classify by the first domain error found.
    pub fn classify(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if cause.downcast_ref::<ObservationError>().is_some() {
                return FailureKind::Schema;
            }
            if cause.downcast_ref::<MetricsError>().is_some() {
                return FailureKind::Statistical;
            }
            if cause.downcast_ref::<BaselineError>().is_some() {
                return FailureKind::Baseline;
            }
            if cause.downcast_ref::<StoreError>().is_some() {
                return FailureKind::Store;
            }
        }
        FailureKind::Other
    }

    pub fn exit_code(self) -> u8 {
        match self {
            FailureKind::Other => 1,
            FailureKind::Configuration => 2,
            FailureKind::Schema => 3,
            FailureKind::Statistical => 4,
            FailureKind::Baseline => 5,
            FailureKind::Store => 6,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Configuration => "configuration",
            FailureKind::Schema => "schema",
            FailureKind::Statistical => "statistical",
            FailureKind::Baseline => "baseline",
            FailureKind::Store => "store",
            FailureKind::Other => "other",
        };
        write!(f, "{}", name)
    }
}

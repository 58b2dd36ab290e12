use anyhow::bail;
use std::str::FromStr;

pub const DEFAULT_TRUE_COLUMN: &str = "true_values";
pub const DEFAULT_PREDICTION_COLUMN: &str = "predictions";

/// A single (ground truth, prediction) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub y_true: f64,
    pub y_pred: f64,
}

impl Observation {
    pub fn new(y_true: f64, y_pred: f64) -> Self {
        Self { y_true, y_pred }
    }

    /// Signed residual `y_true - y_pred`
    pub fn residual(&self) -> f64 {
        self.y_true - self.y_pred
    }
}

/// Ordered, immutable batch of observations for one evaluation window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationBatch {
    observations: Vec<Observation>,
}

impl ObservationBatch {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|&(y_true, y_pred)| Observation::new(y_true, y_pred))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }
}

/// What to do with a row whose values cannot be coerced to a finite f64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Reject the whole batch on the first bad row
    #[default]
    FailFast,
    /// Drop bad rows and keep going
    SkipInvalid,
}

impl FromStr for RowPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail_fast" | "fail-fast" => Ok(RowPolicy::FailFast),
            "skip_invalid" | "skip-invalid" => Ok(RowPolicy::SkipInvalid),
            _ => bail!(
                "Invalid MONITOR_ROW_POLICY: {}. Must be 'fail_fast' or 'skip_invalid'",
                s
            ),
        }
    }
}

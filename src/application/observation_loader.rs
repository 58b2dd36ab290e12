//! Observation loading.
//!
//! Validates the decoded table's schema and coerces the two required
//! columns into an `ObservationBatch`.

use crate::domain::errors::ObservationError;
use crate::domain::monitoring::{
    DEFAULT_PREDICTION_COLUMN, DEFAULT_TRUE_COLUMN, Observation, ObservationBatch, RawTable,
    RowPolicy,
};
use tracing::{debug, warn};

/// Batch plus the number of rows the row policy dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedObservations {
    pub batch: ObservationBatch,
    pub skipped_rows: usize,
}

#[derive(Debug, Clone)]
pub struct ObservationLoader {
    true_column: String,
    prediction_column: String,
    policy: RowPolicy,
}

impl Default for ObservationLoader {
    fn default() -> Self {
        Self::new(DEFAULT_TRUE_COLUMN, DEFAULT_PREDICTION_COLUMN, RowPolicy::FailFast)
    }
}

impl ObservationLoader {
    pub fn new(true_column: &str, prediction_column: &str, policy: RowPolicy) -> Self {
        Self {
            true_column: true_column.to_string(),
            prediction_column: prediction_column.to_string(),
            policy,
        }
    }

    /// Load a batch, discarding the skipped-row count.
    pub fn load(&self, table: &RawTable) -> Result<ObservationBatch, ObservationError> {
        self.load_counted(table).map(|loaded| loaded.batch)
    }

    /// Load a batch in input order.
    ///
    /// A missing column is a schema problem and always fails. Bad cells are
    /// handled according to the configured `RowPolicy`. Rows are numbered
    /// from 1, excluding the header.
    pub fn load_counted(&self, table: &RawTable) -> Result<LoadedObservations, ObservationError> {
        let true_idx = self.require_column(table, &self.true_column)?;
        let pred_idx = self.require_column(table, &self.prediction_column)?;

        let mut observations = Vec::with_capacity(table.len());
        let mut skipped_rows = 0;

        for (i, record) in table.records.iter().enumerate() {
            let row = i + 1;
            let parsed = Self::coerce(record, true_idx, &self.true_column, row).and_then(|y_true| {
                Self::coerce(record, pred_idx, &self.prediction_column, row)
                    .map(|y_pred| Observation::new(y_true, y_pred))
            });

            match (parsed, self.policy) {
                (Ok(obs), _) => observations.push(obs),
                (Err(e), RowPolicy::FailFast) => return Err(e),
                (Err(e), RowPolicy::SkipInvalid) => {
                    debug!("Skipping row: {}", e);
                    skipped_rows += 1;
                }
            }
        }

        if skipped_rows > 0 {
            warn!(
                "ObservationLoader: dropped {} of {} rows with invalid values",
                skipped_rows,
                table.len()
            );
        }

        Ok(LoadedObservations {
            batch: ObservationBatch::new(observations),
            skipped_rows,
        })
    }

    fn require_column(&self, table: &RawTable, column: &str) -> Result<usize, ObservationError> {
        table
            .column_index(column)
            .ok_or_else(|| ObservationError::MissingColumn {
                column: column.to_string(),
                available: table.headers.iter().map(|h| h.trim().to_string()).collect(),
            })
    }

    fn coerce(
        record: &[String],
        idx: usize,
        column: &str,
        row: usize,
    ) -> Result<f64, ObservationError> {
        let raw = record.get(idx).map(|s| s.trim()).unwrap_or_default();
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(ObservationError::InvalidRow {
                row,
                column: column.to_string(),
                raw: raw.to_string(),
            }),
        }
    }
}

//! Delimited-text decoding for observation batches.

use crate::domain::errors::ObservationError;
use crate::domain::monitoring::RawTable;
use crate::domain::ports::TabularDecoder;
use csv::{ReaderBuilder, Trim};

/// Header-first delimited text decoder built on the `csv` crate.
#[derive(Debug, Clone)]
pub struct CsvDecoder {
    delimiter: u8,
}

impl CsvDecoder {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for CsvDecoder {
    fn default() -> Self {
        Self::new(b';')
    }
}

impl TabularDecoder for CsvDecoder {
    fn decode(&self, raw: &[u8]) -> Result<RawTable, ObservationError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(raw);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ObservationError::Decode {
                reason: format!("failed to read header row: {}", e),
            })?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ObservationError::Decode {
                reason: "missing header row".to_string(),
            });
        }

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ObservationError::Decode {
                reason: e.to_string(),
            })?;
            records.push(record.iter().map(str::to_string).collect());
        }

        Ok(RawTable::new(headers, records))
    }
}

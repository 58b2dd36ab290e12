use serde::{Deserialize, Serialize};

/// Regression quality snapshot: `{mse, mae, r2}`.
///
/// All fields are finite. `r2` may be negative when the model does worse
/// than predicting the mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricVector {
    pub mse: f64,
    pub mae: f64,
    pub r2: f64,
}

impl MetricVector {
    pub fn new(mse: f64, mae: f64, r2: f64) -> Self {
        Self { mse, mae, r2 }
    }

    pub fn fields(&self) -> [(&'static str, f64); 3] {
        [("mse", self.mse), ("mae", self.mae), ("r2", self.r2)]
    }

    /// First non-finite field, if any
    pub fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        self.fields().into_iter().find(|(_, v)| !v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_to_flat_object() {
        let vector = MetricVector::new(0.25, 0.5, -0.1);
        let json: serde_json::Value = serde_json::to_value(vector).unwrap();
        assert_eq!(json["mse"], 0.25);
        assert_eq!(json["mae"], 0.5);
        assert_eq!(json["r2"], -0.1);
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_first_non_finite() {
        assert!(MetricVector::new(1.0, 1.0, -3.0).first_non_finite().is_none());
        let bad = MetricVector::new(f64::INFINITY, 1.0, 0.0);
        assert_eq!(bad.first_non_finite().map(|(k, _)| k), Some("mse"));
    }
}

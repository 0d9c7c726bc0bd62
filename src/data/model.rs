/// Column holding the observed value.
pub const ACTUAL_COLUMN: &str = "Actual";
/// Column holding the model output.
pub const PREDICTED_COLUMN: &str = "Predicted";

// ---------------------------------------------------------------------------
// PredictionRecord – one row of the input table
// ---------------------------------------------------------------------------

/// A single (actual, predicted) observation. Row position is the time index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionRecord {
    pub actual: f64,
    pub predicted: f64,
}

impl PredictionRecord {
    pub fn new(actual: f64, predicted: f64) -> Self {
        Self { actual, predicted }
    }
}

// ---------------------------------------------------------------------------
// PredictionDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Ordered, read-only sequence of observations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionDataset {
    records: Vec<PredictionRecord>,
}

impl PredictionDataset {
    pub fn from_records(records: Vec<PredictionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn actual(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.actual).collect()
    }

    pub fn predicted(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.predicted).collect()
    }

    /// Per-row residuals in row order.
    pub fn errors(&self) -> Vec<f64> {
        super::stats::errors(&self.actual(), &self.predicted())
    }

    /// Smallest and largest value across both columns, or `None` when empty.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .flat_map(|r| [r.actual, r.predicted])
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_stay_aligned() {
        let ds = PredictionDataset::from_records(vec![
            PredictionRecord::new(1.0, 1.5),
            PredictionRecord::new(2.0, 2.5),
            PredictionRecord::new(3.0, 2.0),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.actual(), vec![1.0, 2.0, 3.0]);
        assert_eq!(ds.predicted(), vec![1.5, 2.5, 2.0]);
        assert_eq!(ds.errors(), vec![-0.5, -0.5, 1.0]);
    }

    #[test]
    fn value_extent_spans_both_columns() {
        let ds = PredictionDataset::from_records(vec![
            PredictionRecord::new(5.0, 4.0),
            PredictionRecord::new(7.0, 9.0),
        ]);
        assert_eq!(ds.value_extent(), Some((4.0, 9.0)));
        assert_eq!(PredictionDataset::default().value_extent(), None);
    }
}

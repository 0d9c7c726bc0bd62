use anyhow::Result;

use crate::data::model::PredictionDataset;
use crate::data::stats::{CorrelationSummary, ErrorSummary, Histogram};
use crate::error::ReportError;

// ---------------------------------------------------------------------------
// Report state
// ---------------------------------------------------------------------------

/// The dataset plus every derived value, independent of rendering.
///
/// Computed once; both the PNG renderer and the viewer read from it.
#[derive(Debug, Clone)]
pub struct ReportState {
    pub dataset: PredictionDataset,
    pub actual: Vec<f64>,
    pub predicted: Vec<f64>,
    /// `actual[i] - predicted[i]`.
    pub errors: Vec<f64>,
    pub correlation: CorrelationSummary,
    pub error_summary: ErrorSummary,
    pub histogram: Histogram,
}

impl ReportState {
    pub fn new(dataset: PredictionDataset, bins: usize) -> Result<Self> {
        if dataset.is_empty() {
            return Err(ReportError::EmptyDataset.into());
        }

        let actual = dataset.actual();
        let predicted = dataset.predicted();
        let errors = dataset.errors();
        // Finite inputs near ±f64::MAX can still overflow the difference.
        if let Some(row) = errors.iter().position(|e| !e.is_finite()) {
            return Err(ReportError::NonFiniteResidual { row }.into());
        }
        let correlation = CorrelationSummary::compute(&actual, &predicted);
        let error_summary = ErrorSummary::compute(&errors);
        let histogram = Histogram::new(&errors, bins);

        log::debug!(
            "error histogram: {} bins over [{:.4}, {:.4}]",
            histogram.bins(),
            histogram.edges.first().copied().unwrap_or(f64::NAN),
            histogram.edges.last().copied().unwrap_or(f64::NAN)
        );
        log::info!(
            "{} records: R² = {:.4}, mean error = {:.4}, std error = {:.4}",
            dataset.len(),
            correlation.r_squared,
            error_summary.mean,
            error_summary.std
        );

        Ok(Self {
            dataset,
            actual,
            predicted,
            errors,
            correlation,
            error_summary,
            histogram,
        })
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    /// `(index, actual)` and `(index, predicted)` points for the time-series chart.
    pub fn time_series(&self) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
        let indexed = |values: &[f64]| {
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, v))
                .collect::<Vec<_>>()
        };
        (indexed(&self.actual), indexed(&self.predicted))
    }

    /// `(predicted, residual)` points for the residual chart.
    pub fn residual_points(&self) -> Vec<(f64, f64)> {
        self.predicted
            .iter()
            .copied()
            .zip(self.errors.iter().copied())
            .collect()
    }

    /// `(actual, predicted)` points for the scatter chart.
    pub fn scatter_points(&self) -> Vec<(f64, f64)> {
        self.dataset
            .records()
            .iter()
            .map(|r| (r.actual, r.predicted))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PredictionRecord;

    fn sample() -> PredictionDataset {
        PredictionDataset::from_records(vec![
            PredictionRecord::new(10.0, 12.0),
            PredictionRecord::new(20.0, 19.0),
            PredictionRecord::new(30.0, 31.0),
        ])
    }

    #[test]
    fn derives_every_view_from_one_dataset() {
        let state = ReportState::new(sample(), 30).unwrap();
        assert_eq!(state.len(), 3);
        assert_eq!(state.errors, vec![-2.0, 1.0, -1.0]);
        assert_eq!(state.errors, state.dataset.errors());
        assert!((state.error_summary.mean + 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(state.histogram.bins(), 30);
        assert_eq!(state.histogram.counts.iter().sum::<usize>(), 3);
        assert!(state.correlation.r_squared > 0.97);
    }

    #[test]
    fn chart_points_stay_aligned() {
        let state = ReportState::new(sample(), 5).unwrap();
        let (actual, predicted) = state.time_series();
        assert_eq!(actual[2], (2.0, 30.0));
        assert_eq!(predicted[0], (0.0, 12.0));
        assert_eq!(state.scatter_points()[1], (20.0, 19.0));
        assert_eq!(state.residual_points()[0], (12.0, -2.0));
    }

    #[test]
    fn overflowing_residual_is_rejected() {
        let dataset = PredictionDataset::from_records(vec![
            PredictionRecord::new(1.0, 2.0),
            PredictionRecord::new(f64::MAX, -f64::MAX),
        ]);
        let err = ReportState::new(dataset, 30).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ReportError>(),
            Some(&ReportError::NonFiniteResidual { row: 1 })
        );
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = ReportState::new(PredictionDataset::default(), 30).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ReportError>(),
            Some(&ReportError::EmptyDataset)
        );
    }
}

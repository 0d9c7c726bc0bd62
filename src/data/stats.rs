// ---------------------------------------------------------------------------
// Summary statistics over the prediction columns
// ---------------------------------------------------------------------------

/// Per-row residuals: `actual[i] - predicted[i]`.
///
/// Both slices come from the same dataset, so they are always the same length.
pub fn errors(actual: &[f64], predicted: &[f64]) -> Vec<f64> {
    debug_assert_eq!(actual.len(), predicted.len());
    actual
        .iter()
        .zip(predicted)
        .map(|(&a, &p)| a - p)
        .collect()
}

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sample standard deviation (n - 1 denominator). NaN below two values.
pub fn sample_std(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return f64::NAN;
    }
    let m = mean(xs);
    let ss: f64 = xs.iter().map(|&x| (x - m).powi(2)).sum();
    (ss / (xs.len() - 1) as f64).sqrt()
}

/// Pearson correlation coefficient.
///
/// Zero variance in either series yields NaN (0 / 0).
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let mx = mean(xs);
    let my = mean(ys);
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    // Rounding can push |r| a hair past 1 for perfectly linear inputs.
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

// ---------------------------------------------------------------------------
// CorrelationSummary / ErrorSummary
// ---------------------------------------------------------------------------

/// Fit-quality indicator shown on the scatter chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationSummary {
    pub correlation: f64,
    /// Square of `correlation`, not a regression R².
    pub r_squared: f64,
}

impl CorrelationSummary {
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Self {
        let correlation = pearson(actual, predicted);
        Self {
            correlation,
            r_squared: correlation * correlation,
        }
    }
}

/// Location and spread of the residuals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSummary {
    pub mean: f64,
    pub std: f64,
}

impl ErrorSummary {
    pub fn compute(errors: &[f64]) -> Self {
        Self {
            mean: mean(errors),
            std: sample_std(errors),
        }
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width histogram over the value range.
///
/// Bins are half-open `[lo, hi)` except the last, which is closed so the
/// maximum lands in it. A constant input is binned over `[v - 0.5, v + 0.5]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` monotonically increasing bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn new(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (mut lo, mut hi) = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if !lo.is_finite() {
            lo = 0.0;
            hi = 1.0;
        } else if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0usize; bins];
        for &v in values {
            if !(lo..=hi).contains(&v) {
                continue;
            }
            let mut idx = (((v - lo) / width) as usize).min(bins - 1);
            // Division can land one bin off at an edge; settle against `edges`.
            if v < edges[idx] {
                idx -= 1;
            } else if idx + 1 < bins && v >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1;
        }

        Self { edges, counts }
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// `(lo, hi, count)` for every bin.
    pub fn iter_bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| (w[0], w[1], c))
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

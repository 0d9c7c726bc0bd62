/// Data layer: core types, loading, and summary statistics.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PredictionDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ PredictionDataset │  Vec<PredictionRecord>, row index = time index
///   └───────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  errors, correlation, mean / std, histogram
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod stats;

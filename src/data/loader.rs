use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::{DataType, Schema};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{PredictionDataset, PredictionRecord, ACTUAL_COLUMN, PREDICTED_COLUMN};
use crate::error::ReportError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a prediction table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Actual` and `Predicted` columns
/// * `.json`    – `[{ "Actual": 1.0, "Predicted": 1.1, ... }, ...]`
/// * `.parquet` – numeric `Actual` and `Predicted` columns
///
/// Column names are matched case-insensitively; other columns are ignored.
pub fn load_file(path: &Path) -> Result<PredictionDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(ReportError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    if dataset.is_empty() {
        return Err(ReportError::EmptyDataset)
            .with_context(|| format!("loading {}", path.display()));
    }
    Ok(dataset)
}

fn column_matches(name: &str, wanted: &str) -> bool {
    name.trim().eq_ignore_ascii_case(wanted)
}

fn find_column<'a, I>(names: I, wanted: &'static str) -> Result<usize, ReportError>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .position(|h| column_matches(h, wanted))
        .ok_or(ReportError::MissingColumn(wanted))
}

fn checked(value: f64, row: usize, column: &'static str) -> Result<f64, ReportError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ReportError::InvalidValue {
            row,
            column,
            value: value.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<PredictionDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let actual_idx = find_column(headers.iter(), ACTUAL_COLUMN)?;
    let predicted_idx = find_column(headers.iter(), PREDICTED_COLUMN)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let actual = parse_cell(record.get(actual_idx), row_no, ACTUAL_COLUMN)?;
        let predicted = parse_cell(record.get(predicted_idx), row_no, PREDICTED_COLUMN)?;

        records.push(PredictionRecord::new(actual, predicted));
    }

    log::debug!("parsed {} CSV rows from {}", records.len(), path.display());
    Ok(PredictionDataset::from_records(records))
}

fn parse_cell(cell: Option<&str>, row: usize, column: &'static str) -> Result<f64, ReportError> {
    let text = cell.unwrap_or("").trim();
    let value = text.parse::<f64>().map_err(|_| ReportError::InvalidValue {
        row,
        column,
        value: text.to_string(),
    })?;
    checked(value, row, column)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Actual": 101.2, "Predicted": 100.8 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<PredictionDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| -> Result<PredictionRecord> {
            let obj = row
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            let actual = json_field(obj, i, ACTUAL_COLUMN)?;
            let predicted = json_field(obj, i, PREDICTED_COLUMN)?;
            Ok(PredictionRecord::new(actual, predicted))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PredictionDataset::from_records(records))
}

fn json_field(
    obj: &serde_json::Map<String, JsonValue>,
    row: usize,
    column: &'static str,
) -> Result<f64, ReportError> {
    let value = obj
        .iter()
        .find(|(k, _)| column_matches(k, column))
        .map(|(_, v)| v)
        .ok_or(ReportError::MissingColumn(column))?;

    let number = value.as_f64().ok_or_else(|| ReportError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    })?;
    checked(number, row, column)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// `Actual` and `Predicted` may be Float64, Float32, Int64 or Int32.
fn load_parquet(path: &Path) -> Result<PredictionDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let actual_col = batch.column(schema_index(&schema, ACTUAL_COLUMN)?);
        let predicted_col = batch.column(schema_index(&schema, PREDICTED_COLUMN)?);

        // Row numbers are global across batches.
        let offset = records.len();
        for row in 0..batch.num_rows() {
            let actual = extract_f64(actual_col, row, offset + row, ACTUAL_COLUMN)?;
            let predicted = extract_f64(predicted_col, row, offset + row, PREDICTED_COLUMN)?;
            records.push(PredictionRecord::new(actual, predicted));
        }
    }

    Ok(PredictionDataset::from_records(records))
}

fn schema_index(schema: &Schema, column: &'static str) -> Result<usize, ReportError> {
    find_column(schema.fields().iter().map(|f| f.name().as_str()), column)
}

/// Read one numeric cell as `f64`, rejecting nulls and non-numeric columns.
fn extract_f64(
    col: &Arc<dyn Array>,
    row: usize,
    global_row: usize,
    column: &'static str,
) -> Result<f64> {
    let invalid = |value: String| ReportError::InvalidValue {
        row: global_row,
        column,
        value,
    };

    if col.is_null(row) {
        return Err(invalid("null".to_string()).into());
    }

    let value = match col.data_type() {
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row) as f64,
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row) as f64,
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row) as f64,
        other => return Err(invalid(format!("{other:?}")).into()),
    };

    Ok(checked(value, global_row, column)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::datatypes::Field;
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    fn report_error(err: &anyhow::Error) -> Option<&ReportError> {
        err.chain().find_map(|e| e.downcast_ref::<ReportError>())
    }

    #[test]
    fn loads_csv_and_ignores_extra_columns() {
        let file = write_temp(
            ".csv",
            "Date,Actual,Predicted\n2024-01-01,10,12\n2024-01-02,20,19\n2024-01-03,30,31\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.actual(), vec![10.0, 20.0, 30.0]);
        assert_eq!(ds.predicted(), vec![12.0, 19.0, 31.0]);
    }

    #[test]
    fn csv_headers_match_case_insensitively() {
        let file = write_temp(".csv", "predicted, actual \n1.5,1.0\n");
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records(), &[PredictionRecord::new(1.0, 1.5)]);
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let file = write_temp(".csv", "Actual,Forecast\n1,2\n");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            report_error(&err),
            Some(&ReportError::MissingColumn(PREDICTED_COLUMN))
        );
    }

    #[test]
    fn csv_non_numeric_cell_names_row_and_column() {
        let file = write_temp(".csv", "Actual,Predicted\n1,2\nabc,3\n");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            report_error(&err),
            Some(&ReportError::InvalidValue {
                row: 1,
                column: ACTUAL_COLUMN,
                value: "abc".to_string(),
            })
        );
    }

    #[test]
    fn csv_empty_cell_is_rejected() {
        let file = write_temp(".csv", "Actual,Predicted\n1,\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            report_error(&err),
            Some(ReportError::InvalidValue { column: PREDICTED_COLUMN, .. })
        ));
    }

    #[test]
    fn csv_with_only_header_is_empty_dataset() {
        let file = write_temp(".csv", "Actual,Predicted\n");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(report_error(&err), Some(&ReportError::EmptyDataset));
    }

    #[test]
    fn missing_file_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("predictions.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("opening CSV"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            report_error(&err),
            Some(&ReportError::UnsupportedExtension("xlsx".to_string()))
        );
    }

    #[test]
    fn loads_json_records() {
        let file = write_temp(
            ".json",
            r#"[{"Actual": 10, "Predicted": 12.5}, {"Actual": 11.0, "Predicted": 10.5, "note": "x"}]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(
            ds.records(),
            &[
                PredictionRecord::new(10.0, 12.5),
                PredictionRecord::new(11.0, 10.5)
            ]
        );
    }

    #[test]
    fn json_null_is_invalid() {
        let file = write_temp(".json", r#"[{"Actual": null, "Predicted": 1}]"#);
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            report_error(&err),
            Some(ReportError::InvalidValue { row: 0, column: ACTUAL_COLUMN, .. })
        ));
    }

    #[test]
    fn loads_parquet_with_mixed_numeric_types() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Actual", DataType::Float64, false),
            Field::new("Predicted", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Float64Array::from(vec![1.5, 2.5])),
                Arc::new(Int64Array::from(vec![1, 3])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(
            ds.records(),
            &[
                PredictionRecord::new(1.5, 1.0),
                PredictionRecord::new(2.5, 3.0)
            ]
        );
    }
}

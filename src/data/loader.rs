use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

const SITE_COL: &str = "Launch Site";
const PAYLOAD_COL: &str = "Payload Mass (kg)";
const CLASS_COL: &str = "class";
const CATEGORY_COL: &str = "Booster Version Category";
const FLIGHT_COL: &str = "Flight Number";
const VERSION_COL: &str = "Booster Version";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and validate a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – capstone layout (`Launch Site`, `Payload Mass (kg)`, `class`,
///   `Booster Version Category`; other columns ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – same column names as the CSV
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            load_csv(file)?
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            load_json(&text)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    dataset
        .validate()
        .with_context(|| format!("validating {}", path.display()))?;
    log::debug!(
        "{}: {} launches across {} sites",
        path.display(),
        dataset.len(),
        dataset.sites.len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV launch records with a header row.
pub fn load_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let mut records = Vec::new();

    for (row_no, result) in reader.deserialize::<LaunchRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 0.0,
///     "class": 0, "Booster Version Category": "v1.0" },
///   ...
/// ]
/// ```
pub fn load_json(text: &str) -> Result<LaunchDataset> {
    let records: Vec<LaunchRecord> =
        serde_json::from_str(text).context("parsing JSON launch records")?;
    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        records.extend(records_from_batch(&batch)?);
    }

    Ok(LaunchDataset::from_records(records))
}

fn records_from_batch(batch: &RecordBatch) -> Result<Vec<LaunchRecord>> {
    let site_col = required_column(batch, SITE_COL)?;
    let payload_col = required_column(batch, PAYLOAD_COL)?;
    let class_col = required_column(batch, CLASS_COL)?;
    let category_col = required_column(batch, CATEGORY_COL)?;
    let flight_col = optional_column(batch, FLIGHT_COL);
    let version_col = optional_column(batch, VERSION_COL);

    (0..batch.num_rows())
        .map(|row| {
            let class = extract_i64(class_col, row)
                .with_context(|| format!("Row {row}: failed to read '{CLASS_COL}'"))?;
            let outcome = Outcome::try_from(class).with_context(|| format!("Row {row}"))?;

            Ok(LaunchRecord {
                flight_number: flight_col
                    .and_then(|col| extract_i64(col, row).ok())
                    .and_then(|n| u32::try_from(n).ok()),
                site: extract_string(site_col, row)
                    .with_context(|| format!("Row {row}: failed to read '{SITE_COL}'"))?,
                payload_mass_kg: extract_f64(payload_col, row)
                    .with_context(|| format!("Row {row}: failed to read '{PAYLOAD_COL}'"))?,
                outcome,
                booster_version: version_col.and_then(|col| extract_string(col, row).ok()),
                booster_category: extract_string(category_col, row)
                    .with_context(|| format!("Row {row}: failed to read '{CATEGORY_COL}'"))?,
            })
        })
        .collect()
}

// -- Parquet / Arrow helpers --

fn required_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    optional_column(batch, name).with_context(|| format!("Parquet file missing '{name}' column"))
}

fn optional_column<'a>(batch: &'a RecordBatch, name: &str) -> Option<&'a ArrayRef> {
    let idx = batch.schema().index_of(name).ok()?;
    Some(batch.column(idx))
}

fn extract_string(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        DataType::Utf8View => Ok(col.as_string_view().value(row).to_string()),
        other => bail!("Expected string column, got {other:?}"),
    }
}

fn extract_f64(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Ok(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        bail!("Expected numeric column, got {:?}", col.data_type())
    }
}

fn extract_i64(col: &ArrayRef, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value in integer column");
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Ok(arr.value(row) as i64)
    } else if let Some(arr) = any.downcast_ref::<BooleanArray>() {
        Ok(i64::from(arr.value(row)))
    } else {
        bail!("Expected integer column, got {:?}", col.data_type())
    }
}

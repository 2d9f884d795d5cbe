use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::model::{Dataset, Record, Species};

/// The 150-row reference table compiled into the binary.
const BUNDLED_IRIS_CSV: &str = include_str!("../../assets/iris.csv");

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the bundled reference dataset.
pub fn load_bundled() -> Result<Dataset> {
    parse_csv(BUNDLED_IRIS_CSV.as_bytes()).context("parsing bundled iris table")
}

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the four measurement columns and `species`
/// * `.json` – `[{ "sepal_length": 5.1, ..., "species": "setosa" }, ...]`
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            parse_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            parse_json(&text)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Row schema
// ---------------------------------------------------------------------------

/// One row as stored on disk. Both the tidy column names and the raw
/// reference names (`sepal length (cm)`) are accepted.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(alias = "sepal length (cm)")]
    sepal_length: f64,
    #[serde(alias = "sepal width (cm)")]
    sepal_width: f64,
    #[serde(alias = "petal length (cm)")]
    petal_length: f64,
    #[serde(alias = "petal width (cm)")]
    petal_width: f64,
    #[serde(alias = "variety", alias = "class")]
    species: String,
}

impl RawRecord {
    fn into_record(self, row: usize) -> Result<Record> {
        let species: Species = self
            .species
            .parse()
            .with_context(|| format!("Row {row}: bad species"))?;
        Ok(Record::new(
            [
                self.sepal_length,
                self.sepal_width,
                self.petal_length,
                self.petal_width,
            ],
            species,
        ))
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

fn parse_csv<R: std::io::Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }

    Ok(Dataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn parse_json(text: &str) -> Result<Dataset> {
    let rows: Vec<RawRecord> = serde_json::from_str(text).context("parsing JSON")?;
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.into_record(i))
        .collect::<Result<Vec<_>>>()?;

    Ok(Dataset::from_records(records)?)
}

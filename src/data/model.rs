use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{FilterError, Result};

// ---------------------------------------------------------------------------
// Species – the closed categorical label
// ---------------------------------------------------------------------------

/// One of the three Iris species. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    /// Identifier used in data files and the UI.
    pub fn name(self) -> &'static str {
        match self {
            Species::Setosa => "setosa",
            Species::Versicolor => "versicolor",
            Species::Virginica => "virginica",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Species {
    type Err = FilterError;

    /// Accepts `setosa` as well as the UCI spelling `Iris-setosa`.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let bare = lower.strip_prefix("iris-").unwrap_or(&lower);
        Species::ALL
            .into_iter()
            .find(|sp| sp.name() == bare)
            .ok_or_else(|| FilterError::UnknownSpecies(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Field – one of the four measurement columns
// ---------------------------------------------------------------------------

/// A continuous measurement column (centimetres).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::SepalLength,
        Field::SepalWidth,
        Field::PetalLength,
        Field::PetalWidth,
    ];

    /// Tidy column name, e.g. `sepal_length`.
    pub fn column(self) -> &'static str {
        match self {
            Field::SepalLength => "sepal_length",
            Field::SepalWidth => "sepal_width",
            Field::PetalLength => "petal_length",
            Field::PetalWidth => "petal_width",
        }
    }

    /// Axis / metric label.
    pub fn label(self) -> &'static str {
        match self {
            Field::SepalLength => "Sepal Length (cm)",
            Field::SepalWidth => "Sepal Width (cm)",
            Field::PetalLength => "Petal Length (cm)",
            Field::PetalWidth => "Petal Width (cm)",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Field {
    type Err = FilterError;

    /// Accepts the tidy name (`sepal_length`) and the raw reference name
    /// (`sepal length (cm)`).
    fn from_str(s: &str) -> Result<Self> {
        let tidy = s
            .trim()
            .to_ascii_lowercase()
            .replace(" (cm)", "")
            .replace(' ', "_");
        Field::ALL
            .into_iter()
            .find(|f| f.column() == tidy)
            .ok_or_else(|| FilterError::UnknownField(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Record – one flower
// ---------------------------------------------------------------------------

/// A single flower measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
    pub species: Species,
}

impl Record {
    pub fn new(measurements: [f64; 4], species: Species) -> Self {
        let [sepal_length, sepal_width, petal_length, petal_width] = measurements;
        Record {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
            species,
        }
    }

    /// Value of the given measurement column.
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::SepalLength => self.sepal_length,
            Field::SepalWidth => self.sepal_width,
            Field::PetalLength => self.petal_length,
            Field::PetalWidth => self.petal_width,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the immutable loaded table
// ---------------------------------------------------------------------------

/// The full dataset, validated once at load time and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Validate and wrap the loaded records.
    ///
    /// Fails when the table is empty or any measurement is negative or not
    /// finite.
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        if records.is_empty() {
            return Err(FilterError::EmptyDataset);
        }
        for (row, rec) in records.iter().enumerate() {
            for field in Field::ALL {
                let v = rec.value(field);
                if !v.is_finite() || v < 0.0 {
                    return Err(FilterError::InvalidRecord {
                        row,
                        reason: format!("{field} = {v} is not a finite non-negative value"),
                    });
                }
            }
        }
        Ok(Dataset { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed dataset; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Observed `(min, max)` of a field over the whole dataset.
    pub fn field_range(&self, field: Field) -> (f64, f64) {
        self.records
            .iter()
            .map(|r| r.value(field))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_parses_tidy_and_uci_names() {
        assert_eq!("setosa".parse::<Species>().unwrap(), Species::Setosa);
        assert_eq!("Iris-virginica".parse::<Species>().unwrap(), Species::Virginica);
        assert_eq!(" Versicolor ".parse::<Species>().unwrap(), Species::Versicolor);
    }

    #[test]
    fn unknown_species_is_rejected() {
        let err = "daisy".parse::<Species>().unwrap_err();
        assert_eq!(err, FilterError::UnknownSpecies("daisy".into()));
    }

    #[test]
    fn field_parses_reference_column_names() {
        assert_eq!("sepal_length".parse::<Field>().unwrap(), Field::SepalLength);
        assert_eq!("petal width (cm)".parse::<Field>().unwrap(), Field::PetalWidth);
        assert!(matches!(
            "stem_length".parse::<Field>(),
            Err(FilterError::UnknownField(_))
        ));
    }

    #[test]
    fn dataset_rejects_bad_measurements() {
        let ok = Record::new([5.0, 3.0, 1.4, 0.2], Species::Setosa);
        let neg = Record::new([5.0, -3.0, 1.4, 0.2], Species::Setosa);
        let nan = Record::new([5.0, 3.0, f64::NAN, 0.2], Species::Setosa);

        assert!(Dataset::from_records(vec![ok]).is_ok());
        assert!(matches!(
            Dataset::from_records(vec![ok, neg]),
            Err(FilterError::InvalidRecord { row: 1, .. })
        ));
        assert!(matches!(
            Dataset::from_records(vec![nan]),
            Err(FilterError::InvalidRecord { row: 0, .. })
        ));
        assert_eq!(Dataset::from_records(Vec::new()).unwrap_err(), FilterError::EmptyDataset);
    }

    #[test]
    fn field_range_spans_all_records() {
        let ds = Dataset::from_records(vec![
            Record::new([5.0, 3.0, 1.4, 0.2], Species::Setosa),
            Record::new([7.0, 2.5, 5.0, 1.8], Species::Virginica),
        ])
        .unwrap();
        assert_eq!(ds.field_range(Field::SepalLength), (5.0, 7.0));
        assert_eq!(ds.field_range(Field::SepalWidth), (2.5, 3.0));
    }

    #[test]
    fn serde_uses_snake_case_identifiers() {
        let json = serde_json::to_string(&Field::PetalLength).unwrap();
        assert_eq!(json, "\"petal_length\"");
        let sp: Species = serde_json::from_str("\"versicolor\"").unwrap();
        assert_eq!(sp, Species::Versicolor);
    }
}

use thiserror::Error;

/// Malformed input to the filter engine.
///
/// Every variant is an "invalid argument": the caller handed over an
/// identifier or bound the engine does not know how to interpret. An empty
/// filter result is never reported through this type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("invalid argument: unknown species '{0}'")]
    UnknownSpecies(String),

    #[error("invalid argument: unknown field '{0}'")]
    UnknownField(String),

    #[error("invalid argument: range [{min}, {max}] on {field} is malformed")]
    InvalidRange { field: String, min: f64, max: f64 },

    #[error("invalid argument: feature pair uses '{0}' twice")]
    DuplicateFeature(String),

    #[error("invalid argument: histogram needs at least one bin")]
    InvalidBins,

    #[error("invalid argument: record {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("invalid argument: dataset is empty")]
    EmptyDataset,
}

pub type Result<T> = std::result::Result<T, FilterError>;

/// Data layer: core types, loading, filtering and statistics.
///
/// Architecture:
/// ```text
///  bundled iris.csv / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Dataset (validated, immutable)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  ConstraintSet → FilteredView (stable, order-preserving)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  Summary, DescriptiveStats, Histogram
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;

pub use error::FilterError;
pub use filter::{filter, ConstraintSet, FeaturePair, FilteredView, NumericRange};
pub use model::{Dataset, Field, Record, Species};
pub use stats::{describe, describe_by_species, histogram, summarize, DescriptiveStats, Summary};

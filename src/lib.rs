//! Iris dataset explorer.
//!
//! The [`data`] module is the filter engine: a validated, immutable
//! [`data::Dataset`], a per-interaction [`data::ConstraintSet`], and pure
//! functions deriving a [`data::FilteredView`] and its aggregates. It holds
//! no session state and can be shared read-only between callers.

pub mod color;
pub mod config;
pub mod data;

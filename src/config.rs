use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Which of the two dashboard layouts to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardVariant {
    /// Species filter plus a sepal-length range; fixed sepal/petal charts.
    RangeFilter,
    /// Species filter plus a chosen x/y feature pair; box plot and pair matrix.
    FeatureSelection,
}

impl FromStr for DashboardVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "range" => Ok(DashboardVariant::RangeFilter),
            "features" | "feature" => Ok(DashboardVariant::FeatureSelection),
            other => bail!("IRIS_VARIANT must be 'range' or 'features', got '{other}'"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub variant: DashboardVariant,
    /// Replaces the bundled table when set.
    pub data_path: Option<PathBuf>,
    pub histogram_bins: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            variant: DashboardVariant::RangeFilter,
            data_path: None,
            histogram_bins: 20,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests need not touch the
    /// process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let variant = match get("IRIS_VARIANT") {
            Some(v) => v.parse()?,
            None => defaults.variant,
        };

        let data_path = get("IRIS_DATA")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let histogram_bins = match get("IRIS_HIST_BINS") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .with_context(|| format!("IRIS_HIST_BINS must be a positive integer, got '{v}'"))?,
            None => defaults.histogram_bins,
        };

        if histogram_bins == 0 {
            bail!("IRIS_HIST_BINS must be at least 1");
        }

        Ok(Self {
            variant,
            data_path,
            histogram_bins,
        })
    }
}

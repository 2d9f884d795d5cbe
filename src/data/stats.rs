use std::collections::BTreeMap;

use serde::Serialize;

use super::error::{FilterError, Result};
use super::filter::FilteredView;
use super::model::{Field, Species};

// ---------------------------------------------------------------------------
// Summary – headline metrics
// ---------------------------------------------------------------------------

/// Row count, per-field means and per-species counts of a view.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Summary {
    pub row_count: usize,
    /// `None` for every field when the view is empty.
    pub mean_by_field: BTreeMap<Field, Option<f64>>,
    /// Always holds every species; absent ones count 0.
    pub count_by_species: BTreeMap<Species, usize>,
}

impl Summary {
    pub fn mean(&self, field: Field) -> Option<f64> {
        self.mean_by_field.get(&field).copied().flatten()
    }

    pub fn count(&self, species: Species) -> usize {
        self.count_by_species.get(&species).copied().unwrap_or(0)
    }

    /// Species counts, largest first. Ties keep species order.
    pub fn counts_descending(&self) -> Vec<(Species, usize)> {
        let mut counts: Vec<(Species, usize)> =
            self.count_by_species.iter().map(|(s, n)| (*s, *n)).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

pub fn summarize(view: &FilteredView<'_>) -> Summary {
    let mut count_by_species: BTreeMap<Species, usize> =
        Species::ALL.into_iter().map(|s| (s, 0)).collect();
    for rec in view.records() {
        *count_by_species.entry(rec.species).or_insert(0) += 1;
    }

    let mean_by_field = Field::ALL
        .into_iter()
        .map(|f| (f, mean(&view.values(f))))
        .collect();

    Summary {
        row_count: view.len(),
        mean_by_field,
        count_by_species,
    }
}

// ---------------------------------------------------------------------------
// DescriptiveStats – the "describe()" table
// ---------------------------------------------------------------------------

/// Count, mean, sample standard deviation, min, quartiles and max of one
/// column. Every statistic is `None` when it is undefined for the sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FieldStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

impl FieldStats {
    pub fn from_values(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        FieldStats {
            count: sorted.len(),
            mean: mean(&sorted),
            std: sample_std(&sorted),
            min: sorted.first().copied(),
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted.last().copied(),
        }
    }

    /// Rows of the describe table in display order.
    pub fn rows(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("count", Some(self.count as f64)),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q1),
            ("50%", self.median),
            ("75%", self.q3),
            ("max", self.max),
        ]
    }
}

/// Per-field [`FieldStats`] over a view.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DescriptiveStats {
    pub by_field: BTreeMap<Field, FieldStats>,
}

impl DescriptiveStats {
    pub fn field(&self, field: Field) -> FieldStats {
        self.by_field.get(&field).copied().unwrap_or_default()
    }
}

pub fn describe(view: &FilteredView<'_>) -> DescriptiveStats {
    let by_field = Field::ALL
        .into_iter()
        .map(|f| (f, FieldStats::from_values(&view.values(f))))
        .collect();
    DescriptiveStats { by_field }
}

/// [`describe`] split by species, for box plots. Every species is present.
pub fn describe_by_species(view: &FilteredView<'_>) -> BTreeMap<Species, DescriptiveStats> {
    Species::ALL
        .into_iter()
        .map(|sp| {
            let by_field = Field::ALL
                .into_iter()
                .map(|f| (f, FieldStats::from_values(&view.species_values(sp, f))))
                .collect();
            (sp, DescriptiveStats { by_field })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram – overlay bins per species
// ---------------------------------------------------------------------------

/// Equal-width bins over one field with a count per species per bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub field: Field,
    /// `bins + 1` ascending edges. Empty when the view was empty.
    pub edges: Vec<f64>,
    /// One count vector per species, each `bins` long.
    pub counts: BTreeMap<Species, Vec<usize>>,
}

impl Histogram {
    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    pub fn bin_width(&self) -> Option<f64> {
        match self.edges.as_slice() {
            [first, second, ..] => Some(second - first),
            _ => None,
        }
    }

    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    pub fn total(&self) -> usize {
        self.counts.values().flatten().sum()
    }
}

/// Bin `field` into `bins` equal-width bins over `bounds`, or over the
/// observed range of the view when `bounds` is `None`.
///
/// Bins are half-open except the last, which also takes the upper bound.
/// Values outside `bounds` are not counted.
pub fn histogram(
    view: &FilteredView<'_>,
    field: Field,
    bins: usize,
    bounds: Option<(f64, f64)>,
) -> Result<Histogram> {
    if bins == 0 {
        return Err(FilterError::InvalidBins);
    }
    let values = view.values(field);
    let empty = Histogram {
        field,
        edges: Vec::new(),
        counts: BTreeMap::new(),
    };

    let (lo, hi) = match bounds {
        Some((lo, hi)) => {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(FilterError::InvalidRange {
                    field: field.column().to_string(),
                    min: lo,
                    max: hi,
                });
            }
            (lo, hi)
        }
        None => {
            let (Some(lo), Some(hi)) = (min(&values), max(&values)) else {
                return Ok(empty);
            };
            (lo, hi)
        }
    };
    // A single distinct value still needs a bin with positive width.
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };
    let width = (hi - lo) / bins as f64;

    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts: BTreeMap<Species, Vec<usize>> = Species::ALL
        .into_iter()
        .map(|s| (s, vec![0; bins]))
        .collect();

    for rec in view.records() {
        let v = rec.value(field);
        if v < lo || v > hi {
            continue;
        }
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        if let Some(slot) = counts.get_mut(&rec.species) {
            slot[idx] += 1;
        }
    }

    Ok(Histogram {
        field,
        edges,
        counts,
    })
}

// ---------------------------------------------------------------------------
// Scalar helpers
// ---------------------------------------------------------------------------

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (N-1 denominator). Undefined below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Percentile `p` in `[0, 1]` of ascending `sorted` values.
///
/// Uses rank `r = p * (n - 1)` and interpolates linearly between
/// `sorted[floor(r)]` and `sorted[ceil(r)]`. `None` for an empty slice or a
/// `p` outside `[0, 1]`.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::error::{FilterError, Result};
use super::model::{Dataset, Field, Record, Species};

// ---------------------------------------------------------------------------
// Constraint values
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` bound over one measurement column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericRange {
    field: Field,
    min: f64,
    max: f64,
}

impl NumericRange {
    /// Rejects non-finite bounds and `min > max`.
    pub fn new(field: Field, min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(FilterError::InvalidRange {
                field: field.column().to_string(),
                min,
                max,
            });
        }
        Ok(NumericRange { field, min, max })
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, record: &Record) -> bool {
        let v = record.value(self.field);
        v >= self.min && v <= self.max
    }
}

/// Ordered pair of distinct fields to compare (x axis, y axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeaturePair {
    x: Field,
    y: Field,
}

impl FeaturePair {
    pub fn new(x: Field, y: Field) -> Result<Self> {
        if x == y {
            return Err(FilterError::DuplicateFeature(x.column().to_string()));
        }
        Ok(FeaturePair { x, y })
    }

    pub fn x(&self) -> Field {
        self.x
    }

    pub fn y(&self) -> Field {
        self.y
    }
}

/// The user's selection for one interaction.
///
/// Built fresh on every change; it carries no identity beyond that.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintSet {
    /// Species to keep. Empty means nothing passes.
    pub selected_species: BTreeSet<Species>,
    /// Optional inclusive bound on one column.
    pub numeric_range: Option<NumericRange>,
    /// Columns to compare. Does not restrict rows.
    pub feature_pair: Option<FeaturePair>,
}

impl ConstraintSet {
    /// Every species selected, no range, no pair: the identity filter.
    pub fn all_species() -> Self {
        ConstraintSet {
            selected_species: Species::ALL.into_iter().collect(),
            numeric_range: None,
            feature_pair: None,
        }
    }

    /// Build a selection from species identifiers, failing on unknown names.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let selected_species = names
            .iter()
            .map(|n| n.as_ref().parse::<Species>())
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(ConstraintSet {
            selected_species,
            numeric_range: None,
            feature_pair: None,
        })
    }

    pub fn with_range(mut self, range: NumericRange) -> Self {
        self.numeric_range = Some(range);
        self
    }

    pub fn with_feature_pair(mut self, pair: FeaturePair) -> Self {
        self.feature_pair = Some(pair);
        self
    }

    /// Whether a record satisfies every row-restricting constraint.
    pub fn admits(&self, record: &Record) -> bool {
        self.selected_species.contains(&record.species)
            && self.numeric_range.map_or(true, |r| r.contains(record))
    }
}

// ---------------------------------------------------------------------------
// FilteredView
// ---------------------------------------------------------------------------

/// The records of a dataset that pass a [`ConstraintSet`], in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Positions of the passing records in the source dataset (ascending).
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Column vector of one field, in view order.
    pub fn values(&self, field: Field) -> Vec<f64> {
        self.records().map(|r| r.value(field)).collect()
    }

    /// Column vector of one field restricted to one species.
    pub fn species_values(&self, species: Species, field: Field) -> Vec<f64> {
        self.records()
            .filter(|r| r.species == species)
            .map(|r| r.value(field))
            .collect()
    }

    /// `(x, y)` points per species for the given pair. Species absent from
    /// the view are absent from the map.
    pub fn points(&self, pair: FeaturePair) -> BTreeMap<Species, Vec<[f64; 2]>> {
        let mut out: BTreeMap<Species, Vec<[f64; 2]>> = BTreeMap::new();
        for r in self.records() {
            out.entry(r.species)
                .or_default()
                .push([r.value(pair.x()), r.value(pair.y())]);
        }
        out
    }
}

/// Apply all active constraints to the dataset.
///
/// A record passes when its species is selected and, if a numeric range is
/// present, the ranged field lies inside it. The feature pair never removes
/// rows. Order is preserved.
pub fn filter<'a>(dataset: &'a Dataset, constraints: &ConstraintSet) -> FilteredView<'a> {
    let indices = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| constraints.admits(rec))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rows() -> Dataset {
        Dataset::from_records(vec![
            Record::new([5.0, 3.4, 1.5, 0.2], Species::Setosa),
            Record::new([7.0, 3.2, 4.7, 1.4], Species::Versicolor),
        ])
        .unwrap()
    }

    #[test]
    fn degenerate_range_keeps_exact_match_only() {
        let ds = two_rows();
        let range = NumericRange::new(Field::SepalLength, 5.0, 5.0).unwrap();
        let view = filter(&ds, &ConstraintSet::all_species().with_range(range));
        assert_eq!(view.indices(), &[0]);
        assert_eq!(view.records().next().unwrap().sepal_length, 5.0);
    }

    #[test]
    fn empty_species_selection_yields_empty_view() {
        let ds = two_rows();
        let none = ConstraintSet::from_names::<&str>(&[]).unwrap();
        let view = filter(&ds, &none);
        assert!(view.is_empty());
        assert!(view.values(Field::PetalWidth).is_empty());
    }

    #[test]
    fn feature_pair_does_not_restrict_rows() {
        let ds = two_rows();
        let pair = FeaturePair::new(Field::PetalLength, Field::SepalWidth).unwrap();
        let view = filter(&ds, &ConstraintSet::all_species().with_feature_pair(pair));
        assert_eq!(view.len(), 2);

        let points = view.points(pair);
        assert_eq!(points[&Species::Setosa], vec![[1.5, 3.4]]);
        assert_eq!(points[&Species::Versicolor], vec![[4.7, 3.2]]);
        assert!(!points.contains_key(&Species::Virginica));
    }

    #[test]
    fn species_selection_filters_by_label() {
        let ds = two_rows();
        let only = ConstraintSet::from_names(&["versicolor"]).unwrap();
        let view = filter(&ds, &only);
        assert_eq!(view.indices(), &[1]);
        assert_eq!(view.species_values(Species::Versicolor, Field::SepalLength), vec![7.0]);
        assert!(view.species_values(Species::Setosa, Field::SepalLength).is_empty());
    }

    #[test]
    fn malformed_constraints_are_rejected() {
        assert!(matches!(
            NumericRange::new(Field::SepalLength, 6.0, 5.0),
            Err(FilterError::InvalidRange { .. })
        ));
        assert!(NumericRange::new(Field::SepalLength, f64::NAN, 5.0).is_err());
        assert_eq!(
            FeaturePair::new(Field::SepalWidth, Field::SepalWidth).unwrap_err(),
            FilterError::DuplicateFeature("sepal_width".into())
        );
        assert_eq!(
            ConstraintSet::from_names(&["setosa", "rose"]).unwrap_err(),
            FilterError::UnknownSpecies("rose".into())
        );
    }
}

use std::collections::{BTreeMap, BTreeSet};

use iris_explorer::color::ColorMap;
use iris_explorer::config::{AppConfig, DashboardVariant};
use iris_explorer::data::filter::{filter, ConstraintSet, FeaturePair, FilteredView, NumericRange};
use iris_explorer::data::model::{Dataset, Field, Species};
use iris_explorer::data::stats::{
    describe, describe_by_species, histogram, summarize, DescriptiveStats, Histogram, Summary,
};
use iris_explorer::data::FilterError;

/// Column the range slider acts on.
pub const RANGE_FIELD: Field = Field::SepalLength;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// One session's widget values and the views derived from them.
pub struct AppState {
    pub config: AppConfig,

    /// Loaded once at start-up, never mutated.
    pub dataset: Dataset,

    pub color_map: ColorMap,

    // ---- widget values ----
    pub selected_species: BTreeSet<Species>,
    /// Current `[min, max]` of the range slider.
    pub range: (f64, f64),
    /// Slider limits: observed range of [`RANGE_FIELD`].
    pub range_bounds: (f64, f64),
    pub feature_x: Field,
    pub feature_y: Field,
    pub show_raw: bool,

    // ---- derived on every interaction ----
    /// Last constraint set that validated.
    pub constraints: ConstraintSet,
    pub summary: Summary,
    pub stats: DescriptiveStats,
    pub stats_by_species: BTreeMap<Species, DescriptiveStats>,
    pub histogram: Option<Histogram>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start with everything selected and the full range.
    pub fn new(config: AppConfig, dataset: Dataset) -> Self {
        let range_bounds = dataset.field_range(RANGE_FIELD);

        let mut state = Self {
            config,
            dataset,
            color_map: ColorMap::default(),
            selected_species: Species::ALL.into_iter().collect(),
            range: range_bounds,
            range_bounds,
            feature_x: Field::SepalLength,
            feature_y: Field::PetalLength,
            show_raw: false,
            constraints: ConstraintSet::all_species(),
            summary: Summary::default(),
            stats: DescriptiveStats::default(),
            stats_by_species: BTreeMap::new(),
            histogram: None,
            status_message: None,
        };
        state.refilter();
        state
    }

    /// Build a fresh constraint set from the widget values.
    pub fn build_constraints(&self) -> Result<ConstraintSet, FilterError> {
        let mut constraints = ConstraintSet {
            selected_species: self.selected_species.clone(),
            numeric_range: None,
            feature_pair: None,
        };
        match self.config.variant {
            DashboardVariant::RangeFilter => {
                let range = NumericRange::new(RANGE_FIELD, self.range.0, self.range.1)?;
                constraints = constraints.with_range(range);
            }
            DashboardVariant::FeatureSelection => {
                let pair = FeaturePair::new(self.feature_x, self.feature_y)?;
                constraints = constraints.with_feature_pair(pair);
            }
        }
        Ok(constraints)
    }

    /// The current filtered view.
    pub fn view(&self) -> FilteredView<'_> {
        filter(&self.dataset, &self.constraints)
    }

    /// The pair shown in the main scatter plot.
    pub fn plotted_pair(&self) -> Option<FeaturePair> {
        match self.config.variant {
            DashboardVariant::RangeFilter => FeaturePair::new(Field::SepalLength, Field::PetalLength).ok(),
            DashboardVariant::FeatureSelection => self.constraints.feature_pair,
        }
    }

    /// Recompute the view and every aggregate from scratch.
    pub fn refilter(&mut self) {
        let constraints = match self.build_constraints() {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Ignoring selection: {e}");
                self.status_message = Some(e.to_string());
                return;
            }
        };
        self.constraints = constraints;
        self.status_message = None;

        let view = filter(&self.dataset, &self.constraints);
        self.summary = summarize(&view);
        self.stats = describe(&view);
        self.stats_by_species = describe_by_species(&view);
        self.histogram = match histogram(&view, Field::SepalLength, self.config.histogram_bins, None) {
            Ok(h) => Some(h),
            Err(e) => {
                log::warn!("Histogram unavailable: {e}");
                None
            }
        };
        log::debug!(
            "Filtered {} of {} rows ({:?})",
            self.summary.row_count,
            self.dataset.len(),
            self.summary.count_by_species
        );
    }

    // ---- interactions ----

    /// Toggle a single species in the selection.
    pub fn toggle_species(&mut self, species: Species) {
        if !self.selected_species.remove(&species) {
            self.selected_species.insert(species);
        }
        self.refilter();
    }

    pub fn select_all(&mut self) {
        self.selected_species = Species::ALL.into_iter().collect();
        self.refilter();
    }

    pub fn select_none(&mut self) {
        self.selected_species.clear();
        self.refilter();
    }

    /// Move the range slider. A malformed range is refused and reported.
    pub fn set_range(&mut self, min: f64, max: f64) {
        match NumericRange::new(RANGE_FIELD, min, max) {
            Ok(_) => {
                self.range = (min, max);
                self.refilter();
            }
            Err(e) => {
                log::warn!("Refusing range: {e}");
                self.status_message = Some(e.to_string());
            }
        }
    }

    pub fn set_feature_x(&mut self, field: Field) {
        self.set_pair(field, self.feature_y);
    }

    pub fn set_feature_y(&mut self, field: Field) {
        self.set_pair(self.feature_x, field);
    }

    /// Picking the same field on both axes is refused and reported.
    fn set_pair(&mut self, x: Field, y: Field) {
        match FeaturePair::new(x, y) {
            Ok(_) => {
                self.feature_x = x;
                self.feature_y = y;
                self.refilter();
            }
            Err(e) => {
                log::warn!("Refusing feature pair: {e}");
                self.status_message = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use iris_explorer::data::loader::load_bundled;

    use super::*;

    fn state(variant: DashboardVariant) -> AppState {
        let config = AppConfig {
            variant,
            ..AppConfig::default()
        };
        AppState::new(config, load_bundled().unwrap())
    }

    #[test]
    fn starts_with_identity_selection() {
        let s = state(DashboardVariant::RangeFilter);
        assert_eq!(s.summary.row_count, 150);
        assert_eq!(s.view().len(), 150);
        assert_eq!(s.histogram.as_ref().unwrap().total(), 150);
    }

    #[test]
    fn narrowing_the_range_recomputes() {
        let mut s = state(DashboardVariant::RangeFilter);
        s.set_range(5.0, 6.0);
        assert_eq!(s.summary.row_count, 67);
        assert_eq!(s.summary.count(Species::Setosa), 30);
        assert_eq!(s.summary.count(Species::Versicolor), 29);
        assert_eq!(s.summary.count(Species::Virginica), 8);
    }

    #[test]
    fn inverted_range_is_refused() {
        let mut s = state(DashboardVariant::RangeFilter);
        s.set_range(6.0, 5.0);
        assert!(s.status_message.is_some());
        assert_eq!(s.range, s.range_bounds);
        assert_eq!(s.summary.row_count, 150);
    }

    #[test]
    fn valid_interaction_clears_stale_error() {
        let mut s = state(DashboardVariant::RangeFilter);
        s.set_range(6.0, 5.0);
        assert!(s.status_message.is_some());

        s.toggle_species(Species::Setosa);
        assert!(s.status_message.is_none());
        assert_eq!(s.summary.row_count, 100);
    }

    #[test]
    fn new_state_is_fully_derived() {
        let s = state(DashboardVariant::FeatureSelection);
        assert_eq!(s.stats.field(Field::PetalWidth).count, 150);
        assert_eq!(s.stats_by_species.len(), 3);
        assert!(s.constraints.feature_pair.is_some());
    }

    #[test]
    fn deselecting_everything_empties_the_view() {
        let mut s = state(DashboardVariant::RangeFilter);
        s.select_none();
        assert_eq!(s.summary.row_count, 0);
        assert_eq!(s.summary.mean(Field::SepalLength), None);
        assert_eq!(s.histogram.as_ref().unwrap().bin_count(), 0);

        s.toggle_species(Species::Virginica);
        assert_eq!(s.summary.row_count, 50);
        s.select_all();
        assert_eq!(s.summary.row_count, 150);
    }

    #[test]
    fn same_feature_on_both_axes_is_refused() {
        let mut s = state(DashboardVariant::FeatureSelection);
        s.set_feature_x(Field::PetalLength);
        assert!(s.status_message.is_some());
        assert_eq!(s.feature_x, Field::SepalLength);

        s.set_feature_x(Field::PetalWidth);
        assert!(s.status_message.is_none());
        let pair = s.plotted_pair().unwrap();
        assert_eq!((pair.x(), pair.y()), (Field::PetalWidth, Field::PetalLength));
    }
}

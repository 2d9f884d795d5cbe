use std::collections::BTreeSet;

use approx::assert_relative_eq;
use iris_explorer::data::loader::load_bundled;
use iris_explorer::data::stats::quantile;
use iris_explorer::data::{
    describe, filter, summarize, ConstraintSet, Dataset, FeaturePair, Field, FilterError,
    NumericRange, Record, Species,
};

fn iris() -> Dataset {
    load_bundled().expect("bundled dataset loads")
}

/// Every subset of the species set, including the empty one.
fn species_subsets() -> Vec<BTreeSet<Species>> {
    (0u8..8)
        .map(|mask| {
            Species::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, s)| s)
                .collect()
        })
        .collect()
}

fn ranges() -> Vec<Option<NumericRange>> {
    vec![
        None,
        Some(NumericRange::new(Field::SepalLength, 5.0, 6.0).unwrap()),
        Some(NumericRange::new(Field::PetalWidth, 0.0, 0.2).unwrap()),
        Some(NumericRange::new(Field::PetalLength, 9.0, 10.0).unwrap()),
    ]
}

#[test]
fn filtered_records_are_an_ordered_subsequence() {
    let ds = iris();
    for selected_species in species_subsets() {
        for numeric_range in ranges() {
            let c = ConstraintSet {
                selected_species: selected_species.clone(),
                numeric_range,
                feature_pair: None,
            };
            let view = filter(&ds, &c);

            assert!(view.indices().windows(2).all(|w| w[0] < w[1]));
            for (&i, rec) in view.indices().iter().zip(view.records()) {
                assert_eq!(&ds.records()[i], rec);
                assert!(c.admits(rec));
            }
            let kept = view.len();
            let expected = ds.records().iter().filter(|r| c.admits(r)).count();
            assert_eq!(kept, expected);
        }
    }
}

#[test]
fn species_counts_always_sum_to_row_count() {
    let ds = iris();
    for selected_species in species_subsets() {
        for numeric_range in ranges() {
            let c = ConstraintSet {
                selected_species: selected_species.clone(),
                numeric_range,
                feature_pair: None,
            };
            let s = summarize(&filter(&ds, &c));
            assert_eq!(s.count_by_species.len(), Species::ALL.len());
            assert_eq!(s.count_by_species.values().sum::<usize>(), s.row_count);
        }
    }
}

#[test]
fn identity_filter_returns_whole_dataset() {
    let ds = iris();
    let view = filter(&ds, &ConstraintSet::all_species());
    assert_eq!(view.len(), ds.len());
    assert!(view.records().eq(ds.records().iter()));
}

#[test]
fn empty_selection_yields_no_rows_and_undefined_means() {
    let ds = iris();
    let c = ConstraintSet {
        selected_species: BTreeSet::new(),
        numeric_range: None,
        feature_pair: None,
    };
    let view = filter(&ds, &c);
    assert!(view.is_empty());

    let s = summarize(&view);
    assert_eq!(s.row_count, 0);
    for f in Field::ALL {
        assert_eq!(s.mean(f), None, "{f}");
    }
}

#[test]
fn range_bound_is_inclusive() {
    let ds = Dataset::from_records(vec![
        Record::new([5.0, 3.0, 1.4, 0.2], Species::Setosa),
        Record::new([7.0, 3.0, 4.7, 1.4], Species::Versicolor),
    ])
    .unwrap();
    let range = NumericRange::new(Field::SepalLength, 5.0, 5.0).unwrap();
    let view = filter(&ds, &ConstraintSet::all_species().with_range(range));
    let recs: Vec<_> = view.records().collect();
    assert_eq!(recs, vec![&ds.records()[0]]);
}

#[test]
fn feature_pair_never_drops_rows() {
    let ds = iris();
    let pair = FeaturePair::new(Field::PetalWidth, Field::SepalWidth).unwrap();
    let with_pair = filter(&ds, &ConstraintSet::all_species().with_feature_pair(pair));
    assert_eq!(with_pair.len(), 150);
    let points = with_pair.points(pair);
    assert_eq!(points.values().map(Vec::len).sum::<usize>(), 150);
}

#[test]
fn describe_matches_reference_table() {
    let ds = iris();
    let stats = describe(&filter(&ds, &ConstraintSet::all_species()));

    let sl = stats.field(Field::SepalLength);
    assert_eq!(sl.count, 150);
    assert_relative_eq!(sl.mean.unwrap(), 5.843333, epsilon = 1e-6);
    assert_relative_eq!(sl.std.unwrap(), 0.828066, epsilon = 1e-6);
    assert_relative_eq!(sl.min.unwrap(), 4.3);
    assert_relative_eq!(sl.q1.unwrap(), 5.1, epsilon = 1e-9);
    assert_relative_eq!(sl.median.unwrap(), 5.8, epsilon = 1e-9);
    assert_relative_eq!(sl.q3.unwrap(), 6.4, epsilon = 1e-9);
    assert_relative_eq!(sl.max.unwrap(), 7.9);

    let pl = stats.field(Field::PetalLength);
    assert_relative_eq!(pl.mean.unwrap(), 3.758, epsilon = 1e-9);
    assert_relative_eq!(pl.median.unwrap(), 4.35, epsilon = 1e-9);
    assert_relative_eq!(pl.std.unwrap(), 1.765298, epsilon = 1e-6);
}

#[test]
fn describe_on_one_setosa_subset() {
    let ds = iris();
    let setosa = ConstraintSet::from_names(&["setosa"]).unwrap();
    let sl = describe(&filter(&ds, &setosa)).field(Field::SepalLength);
    assert_eq!(sl.count, 50);
    assert_relative_eq!(sl.mean.unwrap(), 5.006, epsilon = 1e-9);
    assert_relative_eq!(sl.std.unwrap(), 0.352490, epsilon = 1e-6);
    assert_relative_eq!(sl.q1.unwrap(), 4.8, epsilon = 1e-9);
    assert_relative_eq!(sl.q3.unwrap(), 5.2, epsilon = 1e-9);
}

#[test]
fn describe_single_record_view() {
    let ds = Dataset::from_records(vec![Record::new([6.1, 2.8, 4.7, 1.2], Species::Versicolor)])
        .unwrap();
    let stats = describe(&filter(&ds, &ConstraintSet::all_species()));
    for f in Field::ALL {
        let s = stats.field(f);
        let v = ds.records()[0].value(f);
        assert_eq!(s.count, 1);
        assert_eq!(s.std, None);
        assert_eq!((s.q1, s.median, s.q3), (Some(v), Some(v), Some(v)));
    }
}

#[test]
fn quartile_of_four_values() {
    assert_relative_eq!(quantile(&[1.0, 2.0, 3.0, 4.0], 0.5).unwrap(), 2.5);
}

#[test]
fn malformed_input_is_invalid_argument() {
    assert!(matches!(
        "sepal_girth".parse::<Field>(),
        Err(FilterError::UnknownField(_))
    ));
    assert!(matches!(
        ConstraintSet::from_names(&["setosa", "lily"]),
        Err(FilterError::UnknownSpecies(_))
    ));
    assert!(matches!(
        NumericRange::new(Field::PetalLength, 3.0, 2.0),
        Err(FilterError::InvalidRange { .. })
    ));
}

#[test]
fn engine_is_shareable_across_threads() {
    let ds = std::sync::Arc::new(iris());
    let handles: Vec<_> = Species::ALL
        .into_iter()
        .map(|sp| {
            let ds = std::sync::Arc::clone(&ds);
            std::thread::spawn(move || {
                let c = ConstraintSet::from_names(&[sp.name()]).unwrap();
                summarize(&filter(&ds, &c)).count(sp)
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), 50);
    }
}

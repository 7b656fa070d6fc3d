//! Property-based tests for the filter engine.
//!
//! - Every derived view is a subset satisfying both predicates
//! - Derivation is deterministic
//! - Lowering the ceiling never grows the view

use std::collections::BTreeSet;
use std::sync::Arc;

use penguin_dash::data::filter::{derive, filtered_indices, FilterState};
use penguin_dash::data::model::{Dataset, Record, BILL_LENGTH};
use penguin_dash::Session;
use proptest::prelude::*;

const SPECIES: [&str; 3] = ["Adelie", "Gentoo", "Chinstrap"];

// ============================================================================
// Strategies
// ============================================================================

fn arb_record() -> impl Strategy<Value = Record> {
    (
        0..SPECIES.len(),
        proptest::option::weighted(0.9, 2000.0f64..6500.0),
        proptest::option::weighted(0.9, 30.0f64..60.0),
    )
        .prop_map(|(s, mass, bill)| Record {
            body_mass_g: mass,
            bill_length_mm: bill,
            ..Record::new(SPECIES[s], "Dream")
        })
}

fn arb_dataset() -> impl Strategy<Value = Dataset> {
    proptest::collection::vec(arb_record(), 0..60).prop_map(Dataset::from_records)
}

fn arb_selection() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::sample::subsequence(SPECIES.to_vec(), 0..=SPECIES.len())
        .prop_map(|v| v.into_iter().map(String::from).collect())
}

fn arb_filters() -> impl Strategy<Value = FilterState> {
    (2000.0f64..=6000.0, arb_selection()).prop_map(|(ceiling, selected)| FilterState {
        mass_ceiling: ceiling,
        selected_categories: selected,
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: every visible record satisfies both predicates
    #[test]
    fn prop_view_satisfies_filters(ds in arb_dataset(), filters in arb_filters()) {
        let view = derive(&ds, &filters);
        prop_assert!(view.len() <= ds.len());
        for r in view.iter() {
            prop_assert!(filters.selected_categories.contains(&r.species));
            let mass = r.body_mass_g;
            prop_assert!(mass.is_some_and(|m| m < filters.mass_ceiling));
            prop_assert!(ds.records().iter().any(|d| std::ptr::eq(d, r)));
        }
    }

    /// Property: no admissible record is left out
    #[test]
    fn prop_view_is_complete(ds in arb_dataset(), filters in arb_filters()) {
        let expected = ds.records().iter().filter(|r| filters.admits(r)).count();
        prop_assert_eq!(derive(&ds, &filters).len(), expected);
    }

    /// Property: derivation is deterministic
    #[test]
    fn prop_derive_deterministic(ds in arb_dataset(), filters in arb_filters()) {
        prop_assert_eq!(derive(&ds, &filters), derive(&ds, &filters));
        prop_assert_eq!(filtered_indices(&ds, &filters), filtered_indices(&ds, &filters));
    }

    /// Property: lowering the ceiling never increases the count
    #[test]
    fn prop_ceiling_monotonic(
        ds in arb_dataset(),
        selected in arb_selection(),
        a in 2000.0f64..=6000.0,
        b in 2000.0f64..=6000.0,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let mut session = Session::new(Arc::new(ds), FilterState {
            mass_ceiling: high,
            selected_categories: selected,
        });
        let high_count = session.count();
        session.set_mass_ceiling(low);
        prop_assert!(session.count() <= high_count);
    }

    /// Property: empty selection empties every projection
    #[test]
    fn prop_empty_selection(ds in arb_dataset(), ceiling in 2000.0f64..=6000.0) {
        let mut session = Session::new(Arc::new(ds), FilterState::new(ceiling, SPECIES));
        session.set_selected_categories(BTreeSet::new());
        prop_assert_eq!(session.count(), 0);
        prop_assert_eq!(session.mean_of(BILL_LENGTH), None);
        prop_assert!(session.project_for_plot().is_empty());
    }

    /// Property: the mean lies within the range of contributing values
    #[test]
    fn prop_mean_bounded(ds in arb_dataset(), filters in arb_filters()) {
        let view = derive(&ds, &filters);
        let values: Vec<f64> = view.iter().filter_map(|r| r.bill_length_mm).collect();
        match view.mean_of(BILL_LENGTH) {
            None => prop_assert!(values.is_empty()),
            Some(mean) => {
                let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(mean >= min - 1e-9 && mean <= max + 1e-9);
            }
        }
    }
}

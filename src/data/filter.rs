use std::collections::BTreeSet;

use super::model::{Dataset, Record};
use super::projection::FilteredView;

// ---------------------------------------------------------------------------
// Filter predicate: mass ceiling + selected species
// ---------------------------------------------------------------------------

/// The two live filter inputs.
///
/// An empty `selected_categories` is a legal selection that admits nothing;
/// it never falls back to "show all".
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Records must weigh strictly less than this (grams).
    pub mass_ceiling: f64,
    pub selected_categories: BTreeSet<String>,
}

impl FilterState {
    pub fn new<I, S>(mass_ceiling: f64, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterState {
            mass_ceiling,
            selected_categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a record passes both filters.
    ///
    /// A record with no recorded mass never compares below the ceiling and
    /// is therefore excluded.
    pub fn admits(&self, record: &Record) -> bool {
        self.selected_categories.contains(&record.species)
            && record.body_mass_g.is_some_and(|m| m < self.mass_ceiling)
    }
}

/// Return indices of records that pass the filters, in dataset order.
pub fn filtered_indices(dataset: &Dataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| filters.admits(r))
        .map(|(i, _)| i)
        .collect()
}

/// Derive the filtered view of `dataset` under `filters`.
pub fn derive<'a>(dataset: &'a Dataset, filters: &FilterState) -> FilteredView<'a> {
    dataset
        .records()
        .iter()
        .filter(|r| filters.admits(r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn penguin(species: &str, mass: Option<f64>) -> Record {
        Record {
            body_mass_g: mass,
            ..Record::new(species, "Dream")
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            penguin("Adelie", Some(3000.0)),
            penguin("Gentoo", Some(5000.0)),
            penguin("Chinstrap", Some(3700.0)),
            penguin("Adelie", None),
        ])
    }

    #[test]
    fn ceiling_is_strict() {
        let ds = dataset();
        let filters = FilterState::new(5000.0, ["Adelie", "Gentoo", "Chinstrap"]);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 2]);
    }

    #[test]
    fn missing_mass_is_excluded() {
        let ds = dataset();
        let filters = FilterState::new(f64::INFINITY, ["Adelie"]);
        assert_eq!(filtered_indices(&ds, &filters), vec![0]);
    }

    #[test]
    fn empty_selection_admits_nothing() {
        let ds = dataset();
        let filters = FilterState::new(6000.0, Vec::<String>::new());
        assert!(filtered_indices(&ds, &filters).is_empty());
        assert!(derive(&ds, &filters).is_empty());
    }

    #[test]
    fn unknown_category_is_harmless() {
        let ds = dataset();
        let filters = FilterState::new(6000.0, ["Emperor", "Gentoo"]);
        assert_eq!(filtered_indices(&ds, &filters), vec![1]);
    }

    #[test]
    fn derive_matches_indices() {
        let ds = dataset();
        let filters = FilterState::new(4000.0, ["Adelie", "Chinstrap"]);
        let view = derive(&ds, &filters);
        let by_index: Vec<&Record> = filtered_indices(&ds, &filters)
            .into_iter()
            .map(|i| &ds.records()[i])
            .collect();
        assert_eq!(view.records(), by_index.as_slice());
    }
}

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::data::filter::{filtered_indices, FilterState};
use crate::data::model::{Dataset, BILL_DEPTH, BILL_LENGTH};
use crate::data::projection::{ColumnSpec, FilteredView, PlotPoint, TableRow};

// ---------------------------------------------------------------------------
// Session – one dashboard's filter state over a shared dataset
// ---------------------------------------------------------------------------

/// Owns the filter inputs for one dashboard instance.
///
/// The dataset is shared read-only, so any number of sessions can point at
/// the same `Arc<Dataset>`. Every setter refreshes the cached visible rows
/// before returning, so reads always reflect the latest inputs.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Arc<Dataset>,
    filters: FilterState,
    defaults: FilterState,
    plot_x: String,
    plot_y: String,

    /// Indices of records passing the current filters (cached).
    visible_indices: Vec<usize>,
}

impl Session {
    pub fn new(dataset: Arc<Dataset>, defaults: FilterState) -> Self {
        let visible_indices = filtered_indices(&dataset, &defaults);
        Session {
            dataset,
            filters: defaults.clone(),
            defaults,
            plot_x: BILL_LENGTH.to_string(),
            plot_y: BILL_DEPTH.to_string(),
            visible_indices,
        }
    }

    /// Choose the numeric columns used by [`Session::project_for_plot`].
    pub fn with_plot_axes(mut self, x: &str, y: &str) -> Self {
        self.plot_x = x.to_string();
        self.plot_y = y.to_string();
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn plot_axes(&self) -> (&str, &str) {
        (&self.plot_x, &self.plot_y)
    }

    // -- inputs --

    /// Replace the mass ceiling. Out-of-range values are accepted as-is.
    pub fn set_mass_ceiling(&mut self, value: f64) {
        self.filters.mass_ceiling = value;
        self.refilter();
    }

    /// Replace the species selection. An empty set hides every record.
    pub fn set_selected_categories(&mut self, categories: BTreeSet<String>) {
        self.filters.selected_categories = categories;
        self.refilter();
    }

    /// Toggle a single species in the selection.
    pub fn toggle_category(&mut self, category: &str) {
        let selected = &mut self.filters.selected_categories;
        if !selected.remove(category) {
            selected.insert(category.to_string());
        }
        self.refilter();
    }

    /// Select every species present in the dataset or the default selection.
    pub fn select_all_categories(&mut self) {
        let all = self
            .dataset
            .species
            .iter()
            .chain(&self.defaults.selected_categories)
            .cloned()
            .collect();
        self.set_selected_categories(all);
    }

    pub fn select_no_categories(&mut self) {
        self.set_selected_categories(BTreeSet::new());
    }

    /// Restore the initial filter inputs.
    pub fn reset_filters(&mut self) {
        self.filters = self.defaults.clone();
        self.refilter();
    }

    /// Recompute `visible_indices` after a filter change.
    fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.filters);
        log::debug!(
            "Filters changed: mass < {}, species {:?} -> {} of {} visible",
            self.filters.mass_ceiling,
            self.filters.selected_categories,
            self.visible_indices.len(),
            self.dataset.len()
        );
    }

    // -- projections --

    pub fn filtered_view(&self) -> FilteredView<'_> {
        let records = self.dataset.records();
        self.visible_indices.iter().map(|&i| &records[i]).collect()
    }

    pub fn count(&self) -> usize {
        self.visible_indices.len()
    }

    pub fn mean_of(&self, column: &str) -> Option<f64> {
        self.filtered_view().mean_of(column)
    }

    pub fn project_for_plot(&self) -> Vec<PlotPoint> {
        self.filtered_view()
            .project_for_plot(&self.plot_x, &self.plot_y)
    }

    pub fn project_for_table(&self, columns: &[ColumnSpec]) -> Vec<TableRow> {
        self.filtered_view().project_for_table(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::derive;
    use crate::data::model::{Record, BODY_MASS, SPECIES};

    fn penguin(species: &str, mass: f64, bill: f64) -> Record {
        Record {
            body_mass_g: Some(mass),
            bill_length_mm: Some(bill),
            bill_depth_mm: Some(bill / 2.0),
            ..Record::new(species, "Biscoe")
        }
    }

    fn session() -> Session {
        let ds = Dataset::from_records(vec![
            penguin("A", 3000.0, 40.0),
            penguin("B", 5000.0, 45.0),
        ]);
        Session::new(Arc::new(ds), FilterState::new(6000.0, ["A", "B"]))
    }

    fn set(labels: &[&str]) -> BTreeSet<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_show_everything() {
        let s = session();
        assert_eq!(s.count(), 2);
        assert_eq!(s.mean_of(BILL_LENGTH), Some(42.5));
    }

    #[test]
    fn lowering_ceiling_hides_heavy_penguins() {
        let mut s = session();
        s.set_mass_ceiling(4000.0);
        assert_eq!(s.count(), 1);
        assert_eq!(s.mean_of(BILL_LENGTH), Some(40.0));
        assert_eq!(s.filtered_view().records()[0].body_mass_g, Some(3000.0));
    }

    #[test]
    fn single_category() {
        let mut s = session();
        s.set_selected_categories(set(&["B"]));
        assert_eq!(s.count(), 1);
        assert_eq!(s.filtered_view().records()[0].species, "B");
    }

    #[test]
    fn empty_selection_yields_empty_projections() {
        let mut s = session();
        s.select_no_categories();
        assert_eq!(s.count(), 0);
        assert_eq!(s.mean_of(BILL_LENGTH), None);
        assert_eq!(s.mean_of(BODY_MASS), None);
        assert!(s.project_for_plot().is_empty());
        assert!(s
            .project_for_table(&[ColumnSpec::new(SPECIES, "Species")])
            .is_empty());
    }

    #[test]
    fn toggle_and_reset() {
        let mut s = session();
        s.toggle_category("A");
        assert_eq!(s.filters().selected_categories, set(&["B"]));
        s.toggle_category("A");
        assert_eq!(s.filters().selected_categories, set(&["A", "B"]));

        s.set_mass_ceiling(2000.0);
        s.select_no_categories();
        s.reset_filters();
        assert_eq!(s.count(), 2);
        assert_eq!(s.filters().mass_ceiling, 6000.0);
    }

    #[test]
    fn select_all_after_none() {
        let mut s = session();
        s.select_no_categories();
        s.select_all_categories();
        assert_eq!(s.count(), 2);
    }

    #[test]
    fn cached_view_matches_derivation() {
        let mut s = session();
        s.set_mass_ceiling(4500.0);
        assert_eq!(s.filtered_view(), derive(s.dataset(), s.filters()));
    }

    #[test]
    fn plot_uses_configured_axes() {
        let s = session().with_plot_axes(BODY_MASS, BILL_LENGTH);
        let points = s.project_for_plot();
        assert_eq!(points.len(), 2);
        assert_eq!((points[1].x, points[1].y), (5000.0, 45.0));
        assert_eq!(points[1].group, "B");
    }

    #[test]
    fn sessions_are_independent() {
        let a = session();
        let mut b = Session::new(Arc::clone(&a.dataset), a.defaults.clone());
        b.set_mass_ceiling(2500.0);
        assert_eq!(a.count(), 2);
        assert_eq!(b.count(), 0);
    }
}

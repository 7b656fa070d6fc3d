use std::sync::Arc;

use penguin_dash::data::Dataset;
use penguin_dash::{DashboardConfig, Session};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Filter inputs and derived views for this window.
    pub session: Session,

    /// Species offered by the filter panel: configured ones first, then any
    /// extra labels found in the data.
    pub categories: Vec<String>,

    pub color_map: ColorMap,
}

impl AppState {
    pub fn new(config: DashboardConfig, dataset: Arc<Dataset>) -> Self {
        let mut categories = config.categories.clone();
        for species in &dataset.species {
            if !categories.contains(species) {
                categories.push(species.clone());
            }
        }

        let session = Session::new(dataset, config.initial_filters())
            .with_plot_axes(&config.plot_x, &config.plot_y);
        let color_map = ColorMap::new(&categories);

        Self {
            config,
            session,
            categories,
            color_map,
        }
    }
}

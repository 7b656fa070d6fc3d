use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::data::filter::FilterState;
use crate::data::model::{BILL_DEPTH, BILL_LENGTH, BODY_MASS, ISLAND, SPECIES};
use crate::data::projection::ColumnSpec;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup configuration. Every field has a default, so a config file only
/// needs to mention what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub title: String,
    pub data_path: PathBuf,
    /// Slider bounds `[min, max]` in grams; the initial ceiling is `max`.
    pub mass_range: [f64; 2],
    /// Species offered by the multi-select, all selected initially.
    pub categories: Vec<String>,
    pub plot_x: String,
    pub plot_y: String,
    pub table_columns: Vec<ColumnSpec>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            title: "Penguins Dashboard".to_string(),
            data_path: PathBuf::from("data/penguins.csv"),
            mass_range: [2000.0, 6000.0],
            categories: ["Adelie", "Gentoo", "Chinstrap"]
                .map(String::from)
                .to_vec(),
            plot_x: BILL_LENGTH.to_string(),
            plot_y: BILL_DEPTH.to_string(),
            table_columns: vec![
                ColumnSpec::new(SPECIES, "Species"),
                ColumnSpec::new(ISLAND, "Island"),
                ColumnSpec::new(BILL_LENGTH, "Bill Length (mm)"),
                ColumnSpec::new(BILL_DEPTH, "Bill Depth (mm)"),
                ColumnSpec::new(BODY_MASS, "Body Mass (g)"),
            ],
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let [min, max] = self.mass_range;
        if !(min.is_finite() && max.is_finite() && min < max) {
            bail!("mass_range must be two finite numbers with min < max, got [{min}, {max}]");
        }
        if self.table_columns.is_empty() {
            bail!("table_columns must name at least one column");
        }
        Ok(())
    }

    pub fn mass_min(&self) -> f64 {
        self.mass_range[0]
    }

    pub fn mass_max(&self) -> f64 {
        self.mass_range[1]
    }

    /// Filter inputs a fresh session starts with.
    pub fn initial_filters(&self) -> FilterState {
        FilterState::new(self.mass_max(), self.categories.iter().cloned())
    }
}

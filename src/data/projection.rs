use serde::{Deserialize, Serialize};

use super::model::{CellValue, Record};

// ---------------------------------------------------------------------------
// FilteredView – the records passing the current filters
// ---------------------------------------------------------------------------

/// Borrowed subsequence of a dataset, in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView<'a> {
    records: Vec<&'a Record>,
}

impl<'a> FromIterator<&'a Record> for FilteredView<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Record>>(iter: I) -> Self {
        FilteredView {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Arithmetic mean of a numeric column, skipping missing values.
    ///
    /// `None` when no record contributes a value: an empty view, an
    /// all-missing column, or a non-numeric column.
    pub fn mean_of(&self, column: &str) -> Option<f64> {
        let (sum, n) = self
            .iter()
            .filter_map(|r| r.numeric(column))
            .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
        (n > 0).then(|| sum / n as f64)
    }

    /// One point per record with both `x` and `y` present, grouped by species.
    pub fn project_for_plot(&self, x: &str, y: &str) -> Vec<PlotPoint> {
        self.iter()
            .filter_map(|r| {
                Some(PlotPoint {
                    x: r.numeric(x)?,
                    y: r.numeric(y)?,
                    group: r.species.clone(),
                })
            })
            .collect()
    }

    /// Select and rename columns in the caller's order.
    pub fn project_for_table(&self, columns: &[ColumnSpec]) -> Vec<TableRow> {
        self.iter()
            .map(|r| TableRow {
                cells: columns
                    .iter()
                    .map(|c| {
                        let value = r.value(&c.source).unwrap_or(CellValue::Null);
                        (c.display_name.clone(), value)
                    })
                    .collect(),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Plot projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    /// Category label used for colouring and the legend.
    pub group: String,
}

// ---------------------------------------------------------------------------
// Table projection
// ---------------------------------------------------------------------------

/// One output column: which record field to read and what to call it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub source: String,
    pub display_name: String,
}

impl ColumnSpec {
    pub fn new(source: &str, display_name: &str) -> Self {
        ColumnSpec {
            source: source.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

/// A projected row: `(display_name, value)` pairs in column-spec order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<(String, CellValue)>,
}

impl TableRow {
    pub fn get(&self, display_name: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == display_name)
            .map(|(_, v)| v)
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().map(|(_, v)| v)
    }
}

/// Data layer: core types, loading, filtering, and projections.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  Vec<Record>, species / island index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  mass ceiling + species → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ projection │  count, means, plot points, table rows
///   └────────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
pub mod projection;

pub use filter::{derive, FilterState};
pub use loader::load_file;
pub use model::{CellValue, Dataset, Record};
pub use projection::{ColumnSpec, FilteredView, PlotPoint, TableRow};

use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const SPECIES: &str = "species";
pub const ISLAND: &str = "island";
pub const BILL_LENGTH: &str = "bill_length_mm";
pub const BILL_DEPTH: &str = "bill_depth_mm";
pub const FLIPPER_LENGTH: &str = "flipper_length_mm";
pub const BODY_MASS: &str = "body_mass_g";
pub const SEX: &str = "sex";
pub const YEAR: &str = "year";

/// Every column a [`Record`] exposes, in source-file order.
pub const COLUMNS: [&str; 8] = [
    SPECIES,
    ISLAND,
    BILL_LENGTH,
    BILL_DEPTH,
    FLIPPER_LENGTH,
    BODY_MASS,
    SEX,
    YEAR,
];

// ---------------------------------------------------------------------------
// CellValue – a single cell addressed by column name
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, used wherever columns are picked by name
/// (table projection, generic means).
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.1}"),
            CellValue::Null => write!(f, "NA"),
        }
    }
}

impl From<Option<f64>> for CellValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(CellValue::Null, CellValue::Float)
    }
}

impl From<Option<i64>> for CellValue {
    fn from(v: Option<i64>) -> Self {
        v.map_or(CellValue::Null, CellValue::Integer)
    }
}

impl From<Option<&str>> for CellValue {
    fn from(v: Option<&str>) -> Self {
        v.map_or(CellValue::Null, |s| CellValue::String(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// A single observed penguin. Missing measurements are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub species: String,
    pub island: String,
    pub bill_length_mm: Option<f64>,
    pub bill_depth_mm: Option<f64>,
    pub flipper_length_mm: Option<f64>,
    pub body_mass_g: Option<f64>,
    pub sex: Option<String>,
    pub year: Option<i64>,
}

impl Record {
    /// Minimal constructor; the remaining measurements start out missing.
    pub fn new(species: &str, island: &str) -> Self {
        Record {
            species: species.to_string(),
            island: island.to_string(),
            bill_length_mm: None,
            bill_depth_mm: None,
            flipper_length_mm: None,
            body_mass_g: None,
            sex: None,
            year: None,
        }
    }

    /// Look up a column by name. Unknown columns yield `None`.
    pub fn value(&self, column: &str) -> Option<CellValue> {
        let v = match column {
            SPECIES => CellValue::String(self.species.clone()),
            ISLAND => CellValue::String(self.island.clone()),
            BILL_LENGTH => self.bill_length_mm.into(),
            BILL_DEPTH => self.bill_depth_mm.into(),
            FLIPPER_LENGTH => self.flipper_length_mm.into(),
            BODY_MASS => self.body_mass_g.into(),
            SEX => self.sex.as_deref().into(),
            YEAR => self.year.into(),
            _ => return None,
        };
        Some(v)
    }

    /// Numeric value of a column, `None` for nulls, text, or unknown columns.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            BILL_LENGTH => self.bill_length_mm,
            BILL_DEPTH => self.bill_depth_mm,
            FLIPPER_LENGTH => self.flipper_length_mm,
            BODY_MASS => self.body_mass_g,
            YEAR => self.year.map(|y| y as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded, read-only dataset with pre-computed category indices.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    /// Sorted distinct species.
    pub species: BTreeSet<String>,
    /// Sorted distinct islands.
    pub islands: BTreeSet<String>,
}

impl Dataset {
    /// Build category indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let species = records.iter().map(|r| r.species.clone()).collect();
        let islands = records.iter().map(|r| r.island.clone()).collect();
        Dataset {
            records,
            species,
            islands,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

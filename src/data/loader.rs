use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{
    Dataset, Record, BILL_DEPTH, BILL_LENGTH, BODY_MASS, FLIPPER_LENGTH, ISLAND, SEX, SPECIES,
    YEAR,
};
use crate::error::{LoadError, Result};

/// Columns a dataset must carry. `flipper_length_mm`, `sex` and `year` are optional.
pub const REQUIRED_COLUMNS: [&str; 5] = [SPECIES, ISLAND, BILL_LENGTH, BILL_DEPTH, BODY_MASS];

/// Cell spellings treated as a missing value in text formats.
const MISSING_MARKERS: [&str; 4] = ["", "NA", "NaN", "nan"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one penguin per line (`NA` or empty = missing)
/// * `.json`    – `[{ "species": "Adelie", "body_mass_g": 3750, ... }, ...]`
/// * `.parquet` – flat columns, strings as Utf8 and measurements as ints/floats
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => read_csv(File::open(path)?)?,
        "json" => read_json(File::open(path)?)?,
        "parquet" | "pq" => read_parquet(File::open(path)?)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} records from {} (species: {:?})",
        dataset.len(),
        path.display(),
        dataset.species
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV with a header row. Column order is free; unknown columns
/// (e.g. a pandas index) are ignored.
pub fn read_csv<R: Read>(source: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers()?.clone();

    let position = |name: &str| headers.iter().position(|h| h.trim() == name);
    let required = |name: &str| position(name).ok_or_else(|| LoadError::MissingColumn(name.into()));

    let species_idx = required(SPECIES)?;
    let island_idx = required(ISLAND)?;
    let bill_length_idx = required(BILL_LENGTH)?;
    let bill_depth_idx = required(BILL_DEPTH)?;
    let body_mass_idx = required(BODY_MASS)?;
    let flipper_idx = position(FLIPPER_LENGTH);
    let sex_idx = position(SEX);
    let year_idx = position(YEAR);

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let line = result?;
        let cell = |idx: usize| line.get(idx).unwrap_or("").trim();
        let optional_cell = |idx: Option<usize>| idx.map_or("", cell);

        records.push(Record {
            species: parse_label(cell(species_idx), row, SPECIES)?,
            island: parse_label(cell(island_idx), row, ISLAND)?,
            bill_length_mm: parse_f64(cell(bill_length_idx), row, BILL_LENGTH)?,
            bill_depth_mm: parse_f64(cell(bill_depth_idx), row, BILL_DEPTH)?,
            flipper_length_mm: parse_f64(optional_cell(flipper_idx), row, FLIPPER_LENGTH)?,
            body_mass_g: parse_f64(cell(body_mass_idx), row, BODY_MASS)?,
            sex: parse_text(optional_cell(sex_idx)),
            year: parse_i64(optional_cell(year_idx), row, YEAR)?,
        });
    }

    Ok(Dataset::from_records(records))
}

fn is_missing(s: &str) -> bool {
    MISSING_MARKERS.contains(&s)
}

fn parse_label(s: &str, row: usize, col: &str) -> Result<String> {
    if is_missing(s) {
        return Err(LoadError::invalid(row, col, "missing category label"));
    }
    Ok(s.to_string())
}

fn parse_text(s: &str) -> Option<String> {
    (!is_missing(s)).then(|| s.to_string())
}

fn parse_f64(s: &str, row: usize, col: &str) -> Result<Option<f64>> {
    if is_missing(s) {
        return Ok(None);
    }
    s.parse::<f64>()
        .map(|v| (!v.is_nan()).then_some(v))
        .map_err(|_| LoadError::invalid(row, col, format!("'{s}' is not a number")))
}

fn parse_i64(s: &str, row: usize, col: &str) -> Result<Option<i64>> {
    if is_missing(s) {
        return Ok(None);
    }
    if let Ok(i) = s.parse::<i64>() {
        return Ok(Some(i));
    }
    // pandas writes integer columns holding NA as floats ("2007.0")
    match s.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 => Ok(Some(f as i64)),
        _ => Err(LoadError::invalid(row, col, format!("'{s}' is not an integer"))),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "species": "Adelie", "island": "Torgersen", "bill_length_mm": 39.1,
///     "bill_depth_mm": 18.7, "flipper_length_mm": 181, "body_mass_g": 3750,
///     "sex": "male", "year": 2007 },
///   ...
/// ]
/// ```
pub fn read_json<R: Read>(source: R) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_reader(source)?;
    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::invalid(0, "<root>", "expected a top-level JSON array"))?;

    let mut records = Vec::with_capacity(rows.len());

    for (row, value) in rows.iter().enumerate() {
        let obj = value
            .as_object()
            .ok_or_else(|| LoadError::invalid(row, "<row>", "not a JSON object"))?;

        for col in REQUIRED_COLUMNS {
            if !obj.contains_key(col) {
                return Err(LoadError::MissingColumn(col.to_string()));
            }
        }

        records.push(Record {
            species: json_label(obj, row, SPECIES)?,
            island: json_label(obj, row, ISLAND)?,
            bill_length_mm: json_f64(obj, row, BILL_LENGTH)?,
            bill_depth_mm: json_f64(obj, row, BILL_DEPTH)?,
            flipper_length_mm: json_f64(obj, row, FLIPPER_LENGTH)?,
            body_mass_g: json_f64(obj, row, BODY_MASS)?,
            sex: obj.get(SEX).and_then(JsonValue::as_str).map(str::to_string),
            year: json_i64(obj, row, YEAR)?,
        });
    }

    Ok(Dataset::from_records(records))
}

fn json_label(obj: &Map<String, JsonValue>, row: usize, col: &str) -> Result<String> {
    match obj.get(col) {
        Some(JsonValue::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(LoadError::invalid(row, col, "expected a non-empty string")),
    }
}

fn json_f64(obj: &Map<String, JsonValue>, row: usize, col: &str) -> Result<Option<f64>> {
    match obj.get(col) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| LoadError::invalid(row, col, format!("{v} is not a number"))),
    }
}

fn json_i64(obj: &Map<String, JsonValue>, row: usize, col: &str) -> Result<Option<i64>> {
    match obj.get(col) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(v) => v
            .as_i64()
            .map(Some)
            .ok_or_else(|| LoadError::invalid(row, col, format!("{v} is not an integer"))),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): numeric columns may be any integer or
/// float width, text columns Utf8 or LargeUtf8.
pub fn read_parquet(file: File) -> Result<Dataset> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    // A file without row groups yields no batches, so check the schema up front.
    let schema = builder.schema();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| schema.index_of(col).is_err())
    {
        return Err(LoadError::MissingColumn(missing.to_string()));
    }

    let reader = builder.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let offset = records.len();

        let species = string_column(&batch, SPECIES, true)?;
        let island = string_column(&batch, ISLAND, true)?;
        let bill_length = float_column(&batch, BILL_LENGTH, true)?;
        let bill_depth = float_column(&batch, BILL_DEPTH, true)?;
        let flipper = float_column(&batch, FLIPPER_LENGTH, false)?;
        let body_mass = float_column(&batch, BODY_MASS, true)?;
        let sex = string_column(&batch, SEX, false)?;
        let year = int_column(&batch, YEAR)?;

        for row in 0..batch.num_rows() {
            let label = |values: &[Option<String>], col: &str| {
                values[row]
                    .clone()
                    .ok_or_else(|| LoadError::invalid(offset + row, col, "missing category label"))
            };

            records.push(Record {
                species: label(&species, SPECIES)?,
                island: label(&island, ISLAND)?,
                bill_length_mm: bill_length[row],
                bill_depth_mm: bill_depth[row],
                flipper_length_mm: flipper[row],
                body_mass_g: body_mass[row],
                sex: sex[row].clone(),
                year: year[row],
            });
        }
    }

    Ok(Dataset::from_records(records))
}

// -- Parquet / Arrow helpers --

/// Look up a column, returning `Ok(None)` for an absent optional column.
fn find_column<'a>(batch: &'a RecordBatch, name: &str, required: bool) -> Result<Option<&'a ArrayRef>> {
    match batch.schema().index_of(name) {
        Ok(idx) => Ok(Some(batch.column(idx))),
        Err(_) if required => Err(LoadError::MissingColumn(name.to_string())),
        Err(_) => Ok(None),
    }
}

/// Reject a column of unexpected type when required; skip it otherwise.
fn type_mismatch<T: Clone>(
    name: &str,
    data_type: &DataType,
    required: bool,
    rows: usize,
) -> Result<Vec<Option<T>>> {
    if required {
        return Err(LoadError::invalid(0, name, format!("unexpected column type {data_type:?}")));
    }
    log::warn!("Ignoring column '{name}' of unexpected type {data_type:?}");
    Ok(vec![None; rows])
}

fn string_column(batch: &RecordBatch, name: &str, required: bool) -> Result<Vec<Option<String>>> {
    let rows = batch.num_rows();
    let Some(col) = find_column(batch, name, required)? else {
        return Ok(vec![None; rows]);
    };

    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View | DataType::Dictionary(_, _) => {
            let utf8 = cast(col, &DataType::Utf8)?;
            Ok(utf8
                .as_string::<i32>()
                .iter()
                .map(|v| v.map(str::to_string))
                .collect())
        }
        other => type_mismatch(name, other, required, rows),
    }
}

fn is_numeric(data_type: &DataType) -> bool {
    data_type.is_integer() || data_type.is_floating() || *data_type == DataType::Null
}

fn float_column(batch: &RecordBatch, name: &str, required: bool) -> Result<Vec<Option<f64>>> {
    let rows = batch.num_rows();
    let Some(col) = find_column(batch, name, required)? else {
        return Ok(vec![None; rows]);
    };
    if !is_numeric(col.data_type()) {
        return type_mismatch(name, col.data_type(), required, rows);
    }

    let floats = cast(col, &DataType::Float64)?;
    Ok(floats
        .as_primitive::<Float64Type>()
        .iter()
        .map(|v| v.filter(|f| !f.is_nan()))
        .collect())
}

fn int_column(batch: &RecordBatch, name: &str) -> Result<Vec<Option<i64>>> {
    let rows = batch.num_rows();
    let Some(col) = find_column(batch, name, false)? else {
        return Ok(vec![None; rows]);
    };
    if !is_numeric(col.data_type()) {
        return type_mismatch(name, col.data_type(), false, rows);
    }

    let ints = cast(col, &DataType::Int64)?;
    Ok(ints.as_primitive::<Int64Type>().iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
rowid,species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year
1,Adelie,Torgersen,39.1,18.7,181,3750,male,2007
2,Adelie,Torgersen,NA,NA,NA,NA,NA,2007
3,Gentoo,Biscoe,46.1,13.2,211,4500,female,2007
";

    #[test]
    fn csv_reads_rows_and_missing_values() {
        let ds = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);

        let first = &ds.records()[0];
        assert_eq!(first.species, "Adelie");
        assert_eq!(first.bill_length_mm, Some(39.1));
        assert_eq!(first.flipper_length_mm, Some(181.0));
        assert_eq!(first.sex.as_deref(), Some("male"));
        assert_eq!(first.year, Some(2007));

        let missing = &ds.records()[1];
        assert_eq!(missing.bill_length_mm, None);
        assert_eq!(missing.body_mass_g, None);
        assert_eq!(missing.sex, None);

        assert_eq!(ds.species.len(), 2);
    }

    #[test]
    fn csv_optional_columns_may_be_absent() {
        let csv = "species,island,bill_length_mm,bill_depth_mm,body_mass_g\nChinstrap,Dream,46.5,17.9,3500\n";
        let ds = read_csv(csv.as_bytes()).unwrap();
        let r = &ds.records()[0];
        assert_eq!(r.flipper_length_mm, None);
        assert_eq!(r.year, None);
        assert_eq!(r.body_mass_g, Some(3500.0));
    }

    #[test]
    fn csv_missing_required_column_fails() {
        let csv = "species,island,bill_length_mm,bill_depth_mm\nAdelie,Dream,39.0,18.0\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == BODY_MASS));
    }

    #[test]
    fn csv_garbage_number_fails() {
        let csv = "species,island,bill_length_mm,bill_depth_mm,body_mass_g\nAdelie,Dream,long,18.0,3000\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidValue { row, column, .. } => {
                assert_eq!(row, 0);
                assert_eq!(column, BILL_LENGTH);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn csv_float_year_is_accepted() {
        assert_eq!(parse_i64("2008.0", 0, YEAR).unwrap(), Some(2008));
        assert!(parse_i64("2008.5", 0, YEAR).is_err());
    }

    #[test]
    fn json_reads_records() {
        let json = r#"[
            {"species": "Gentoo", "island": "Biscoe", "bill_length_mm": 50.0,
             "bill_depth_mm": 15.2, "body_mass_g": 5000, "sex": null, "year": 2009},
            {"species": "Adelie", "island": "Dream", "bill_length_mm": null,
             "bill_depth_mm": null, "body_mass_g": null}
        ]"#;
        let ds = read_json(json.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].body_mass_g, Some(5000.0));
        assert_eq!(ds.records()[0].year, Some(2009));
        assert_eq!(ds.records()[1].bill_length_mm, None);
    }

    #[test]
    fn json_requires_columns() {
        let json = r#"[{"species": "Gentoo", "island": "Biscoe"}]"#;
        assert!(matches!(
            read_json(json.as_bytes()),
            Err(LoadError::MissingColumn(_))
        ));
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("penguins.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref e) if e == "xlsx"));
    }

    #[test]
    fn unreachable_file_is_io_error() {
        let err = load_file(Path::new("/definitely/not/here/penguins.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}

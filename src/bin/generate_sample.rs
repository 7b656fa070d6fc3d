use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use penguin_dash::data::model::{
    CellValue, Record, BILL_DEPTH, BILL_LENGTH, BODY_MASS, COLUMNS, FLIPPER_LENGTH, ISLAND, SEX,
    SPECIES, YEAR,
};

#[derive(Parser, Debug)]
#[command(about = "Write a synthetic penguin dataset (.csv or .parquet)")]
struct Cli {
    #[arg(default_value = "data/penguins.csv")]
    output: PathBuf,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const LCG_MULTIPLIER: u64 = 6364136223846793005;

/// 2^-53: maps the top 53 bits of a draw onto [0, 1).
const UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// xoshiro256** generator; reproducible across platforms for a given seed.
struct Xoshiro256 {
    state: [u64; 4],
}

impl Xoshiro256 {
    /// Expand the seed into four words with an LCG.
    fn seeded(seed: u64) -> Self {
        let mut x = seed;
        let state = std::array::from_fn(|_| {
            x = x.wrapping_mul(LCG_MULTIPLIER).wrapping_add(1);
            x
        });
        Xoshiro256 { state }
    }

    fn next_word(&mut self) -> u64 {
        let [s0, s1, s2, s3] = self.state;
        let out = s1.wrapping_mul(5).rotate_left(7).wrapping_mul(9);

        let s2 = s2 ^ s0;
        let s3 = s3 ^ s1;
        self.state = [s0 ^ s3, s1 ^ s2, s2 ^ (s1 << 17), s3.rotate_left(45)];
        out
    }

    fn unit(&mut self) -> f64 {
        (self.next_word() >> 11) as f64 * UNIT
    }

    /// Normal draw via Box-Muller (cosine branch only).
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.unit().max(1e-15);
        let u2 = self.unit();
        let radius = (-2.0 * u1.ln()).sqrt();
        mean + std_dev * (radius * (std::f64::consts::TAU * u2).cos())
    }

    fn choose<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_word() % items.len() as u64) as usize]
    }
}

/// Per-species population: (mean, std-dev) for bill length, bill depth,
/// flipper length and body mass.
struct Population {
    species: &'static str,
    islands: &'static [&'static str],
    count: usize,
    bill_length: (f64, f64),
    bill_depth: (f64, f64),
    flipper: (f64, f64),
    mass: (f64, f64),
}

const POPULATIONS: [Population; 3] = [
    Population {
        species: "Adelie",
        islands: &["Torgersen", "Biscoe", "Dream"],
        count: 152,
        bill_length: (38.8, 2.7),
        bill_depth: (18.3, 1.2),
        flipper: (190.0, 6.5),
        mass: (3700.0, 460.0),
    },
    Population {
        species: "Gentoo",
        islands: &["Biscoe"],
        count: 124,
        bill_length: (47.5, 3.1),
        bill_depth: (15.0, 1.0),
        flipper: (217.0, 6.5),
        mass: (5076.0, 504.0),
    },
    Population {
        species: "Chinstrap",
        islands: &["Dream"],
        count: 68,
        bill_length: (48.8, 3.3),
        bill_depth: (18.4, 1.1),
        flipper: (196.0, 7.1),
        mass: (3733.0, 384.0),
    },
];

fn generate(rng: &mut Xoshiro256) -> Vec<Record> {
    let mut records = Vec::new();
    let mut row = 0usize;

    for pop in &POPULATIONS {
        for _ in 0..pop.count {
            let island = rng.choose(pop.islands);
            let male = rng.unit() < 0.5;
            // Males run slightly larger across every measurement.
            let scale = if male { 1.04 } else { 0.96 };
            let mut sample = |(mean, sd): (f64, f64), decimals: i32| {
                let p = 10f64.powi(decimals);
                (rng.normal(mean * scale, sd) * p).round() / p
            };

            let mut record = Record {
                bill_length_mm: Some(sample(pop.bill_length, 1)),
                bill_depth_mm: Some(sample(pop.bill_depth, 1)),
                flipper_length_mm: Some(sample(pop.flipper, 0)),
                body_mass_g: Some(((sample(pop.mass, 0) / 25.0).round() * 25.0).max(2700.0)),
                sex: Some(if male { "male" } else { "female" }.to_string()),
                year: Some(2007 + (row % 3) as i64),
                ..Record::new(pop.species, island)
            };

            // Sprinkle in the gaps field data always has.
            if row % 97 == 3 {
                record.bill_length_mm = None;
                record.bill_depth_mm = None;
                record.flipper_length_mm = None;
                record.body_mass_g = None;
            }
            if row % 31 == 7 {
                record.sex = None;
            }

            records.push(record);
            row += 1;
        }
    }
    records
}

fn write_csv(path: &Path, records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(COLUMNS)?;
    for r in records {
        let fields: Vec<String> = COLUMNS
            .iter()
            .map(|col| csv_field(r.value(col)))
            .collect();
        writer.write_record(&fields)?;
    }
    writer.flush()?;
    Ok(())
}

/// Text for one CSV cell. Floats keep full precision; the one-decimal
/// `Display` of `CellValue` is for the table only.
fn csv_field(value: Option<CellValue>) -> String {
    match value {
        Some(CellValue::Float(v)) => v.to_string(),
        Some(CellValue::Null) | None => "NA".to_string(),
        Some(other) => other.to_string(),
    }
}

fn write_parquet(path: &Path, records: &[Record]) -> Result<()> {
    let text = |f: fn(&Record) -> Option<&str>| -> ArrayRef {
        Arc::new(records.iter().map(f).collect::<StringArray>())
    };
    let float = |f: fn(&Record) -> Option<f64>| -> ArrayRef {
        Arc::new(records.iter().map(f).collect::<Float64Array>())
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new(SPECIES, DataType::Utf8, false),
        Field::new(ISLAND, DataType::Utf8, false),
        Field::new(BILL_LENGTH, DataType::Float64, true),
        Field::new(BILL_DEPTH, DataType::Float64, true),
        Field::new(FLIPPER_LENGTH, DataType::Float64, true),
        Field::new(BODY_MASS, DataType::Float64, true),
        Field::new(SEX, DataType::Utf8, true),
        Field::new(YEAR, DataType::Int64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(|r| Some(r.species.as_str())),
            text(|r| Some(r.island.as_str())),
            float(|r| r.bill_length_mm),
            float(|r| r.bill_depth_mm),
            float(|r| r.flipper_length_mm),
            float(|r| r.body_mass_g),
            text(|r| r.sex.as_deref()),
            Arc::new(records.iter().map(|r| r.year).collect::<Int64Array>()),
        ],
    )?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = Xoshiro256::seeded(cli.seed);
    let records = generate(&mut rng);

    if let Some(dir) = cli.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let is_parquet = cli
        .output
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));
    if is_parquet {
        write_parquet(&cli.output, &records)?;
    } else {
        write_csv(&cli.output, &records)?;
    }

    println!("Wrote {} penguins to {}", records.len(), cli.output.display());
    Ok(())
}

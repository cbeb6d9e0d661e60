use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One generated launch, serialised with the capstone CSV headers.
#[derive(Debug, Serialize)]
struct SampleLaunch {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

const SITES: [(&str, f64); 4] = [
    ("CCAFS LC-40", 0.55),
    ("VAFB SLC-4E", 0.65),
    ("KSC LC-39A", 0.80),
    ("CCAFS SLC-40", 0.60),
];

/// Booster eras in flight order: (category, last flight of the era, reliability bonus).
const ERAS: [(&str, i64, f64); 5] = [
    ("v1.0", 5, -0.5),
    ("v1.1", 20, -0.2),
    ("FT", 40, 0.1),
    ("B4", 48, 0.15),
    ("B5", 56, 0.3),
];

fn generate(rng: &mut SimpleRng) -> Vec<SampleLaunch> {
    (1..=ERAS[ERAS.len() - 1].1)
        .map(|flight| {
            let (category, _, bonus) = ERAS
                .iter()
                .copied()
                .find(|(_, last, _)| flight <= *last)
                .unwrap_or(ERAS[ERAS.len() - 1]);
            let (site, base) = SITES[(rng.next_u64() % SITES.len() as u64) as usize];
            let payload = (rng.next_f64() * 9600.0 * 10.0).round() / 10.0;
            let success = rng.next_f64() < (base + bonus).clamp(0.05, 0.95);

            SampleLaunch {
                flight_number: flight,
                site: site.to_string(),
                class: i64::from(success),
                payload_mass_kg: payload,
                booster_version: format!("F9 {category} B{:04}", 1000 + flight),
                booster_category: category.to_string(),
            }
        })
        .collect()
}

fn write_csv(path: &str, launches: &[SampleLaunch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for launch in launches {
        writer.serialize(launch).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, launches: &[SampleLaunch]) -> Result<()> {
    let strings = |f: fn(&SampleLaunch) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(launches.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight_number))),
            strings(|l| l.site.as_str()),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(
                launches.iter().map(|l| l.payload_mass_kg),
            )),
            strings(|l| l.booster_version.as_str()),
            strings(|l| l.booster_category.as_str()),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);

    write_csv("spacex_launch_dash.csv", &launches)?;
    write_parquet("spacex_launch_dash.parquet", &launches)?;

    println!(
        "Wrote {} launches across {} sites to spacex_launch_dash.{{csv,parquet}}",
        launches.len(),
        SITES.len()
    );
    Ok(())
}

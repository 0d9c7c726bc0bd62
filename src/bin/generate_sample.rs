use std::path::Path;

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::Serialize;

/// One row of the generated table, in the column order the report reads.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "Actual")]
    actual: f64,
    #[serde(rename = "Predicted")]
    predicted: f64,
}

/// Standard normal sample via the Box-Muller transform.
fn gauss(rng: &mut impl Rng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-15);
    let u2: f64 = rng.random();
    mean + std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Random-walk closing prices with a prediction that lags and adds noise.
fn generate_rows(n: usize, rng: &mut impl Rng) -> Vec<Row> {
    let mut price = 100.0;
    let mut previous = price;
    let mut rows = Vec::with_capacity(n);
    for _ in 0..n {
        price *= 1.0 + gauss(rng, 0.0005, 0.015);
        // Half-step toward today's price from yesterday's, plus model noise.
        let predicted = previous + 0.5 * (price - previous) + gauss(rng, 0.0, 0.8);
        rows.push(Row {
            actual: price,
            predicted,
        });
        previous = price;
    }
    rows
}

fn main() -> Result<()> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let rows = generate_rows(200, &mut rng);

    let output_path = Path::new("output/predictions.csv");
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).context("creating output directory")?;
    }

    let mut writer = csv::Writer::from_path(output_path).context("creating CSV")?;
    for row in &rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {} rows to {}", rows.len(), output_path.display());
    Ok(())
}

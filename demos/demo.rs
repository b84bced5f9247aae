// demos/demo.rs
use solarcalc::{daily_totals, ClimateDataLoader, SolarCalc};
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    // Set RUST_LOG=info (or debug) to see per-day sunrise, sunset and tau.
    env_logger::init();

    // Hudson Bay coast, northern Quebec.
    let calc = SolarCalc::builder()
        .longitude(-76.4687209)
        .latitude(56.5213541)
        .altitude(100.0)
        .build()?;

    let loader = ClimateDataLoader::new();
    let daily = match std::env::args().nth(1) {
        Some(path) => loader.read_daily_csv(&PathBuf::from(path))?,
        None => loader.demo_climate_data()?,
    };

    let hourly = calc.compute_frame(&daily)?;
    let df = hourly.collect()?;
    println!("Shape: {:?}", df.shape());
    println!("{}", df.head(Some(24)));

    for total in daily_totals(&hourly.collect_records()?) {
        println!(
            "{}: {:.3} MJ/m2, peak {:.2} W/m2, tau {:.3}",
            total.date, total.total, total.peak, total.tau
        );
    }

    if let Some(out) = std::env::args().nth(2) {
        loader.write_hourly_csv(&PathBuf::from(&out), &hourly)?;
        println!("Wrote hourly series to {}", out);
    }

    Ok(())
}

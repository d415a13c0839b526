use std::{env, process::ExitCode};

use cycle_sim::{CarnotCycle, CycleConfig, CycleLogger, SimError};
use tracing::error;
use tracing_subscriber::EnvFilter;

// Usage: cycle-sim [config.json] [log-output.json]
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "cycle simulation failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), SimError> {
    let mut args = env::args().skip(1);

    let config = match args.next() {
        Some(path) => CycleConfig::load(path)?,
        None => CycleConfig::default(),
    };
    let cycle = CarnotCycle::plan(config)?;

    println!("{}", "=".repeat(80));
    for corner in cycle.corners() {
        println!(
            "{:.1}L {:.1}bar {:.1}K",
            corner.volume_m3 * 1000.0,
            corner.pressure_pa / 100_000.0,
            corner.temperature_k
        );
    }
    println!("{}", "=".repeat(80));

    let start = cycle.corners()[0];
    println!(
        "Th: {}K, Tc: {}K, starting at T={:.1}K, P={:.1}kPa, V={:.1}L",
        cycle.config().hot_temperature_k,
        cycle.config().cold_temperature_k,
        start.temperature_k,
        start.pressure_pa / 1000.0,
        start.volume_m3 * 1000.0
    );

    let mut logger = CycleLogger::new();
    let report = cycle.run_logged(&mut logger)?;

    println!("Total work done 2->3 and 4->1: {:.1}", report.w_23 + report.w_41);
    println!("Total entropy: {:.1}", report.total_entropy);
    println!("Total work: {:.1}", report.total_work);
    println!("Total heat in: {:.1}", report.qh);
    println!("Total heat out: {:.1}", report.qc);
    println!("Efficiency using (W/Qh): {}", report.efficiency_work);
    println!("Efficiency using (1 - Qc/Qh): {}", report.efficiency_heat);
    println!("Efficiency using (1 - Tc/Th): {}", report.efficiency_carnot);

    if let Some(path) = args.next() {
        logger.dump_to_file(&path)?;
        println!("Saved stroke log to {}", path);
    }

    Ok(())
}

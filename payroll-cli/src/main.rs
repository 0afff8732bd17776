use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_core::BatchProcessor;
use payroll_data::{employees, tax_config, writer};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Monthly payroll processor.
///
/// Reads employee payroll records and a tax bracket configuration, computes
/// monthly gross pay, income tax, net pay and super contribution per
/// employee, and writes the results next to the input file as
/// `<input-basename>-out.csv`.
#[derive(Debug, Parser)]
#[command(name = "payroll", version)]
struct Cli {
    /// Employee payroll input file (CSV, no header:
    /// first_name,last_name,annual_salary,super_rate,pay_period).
    input: PathBuf,

    /// Tax bracket configuration file (CSV, no header:
    /// lower,upper,rate,lump_sum,threshold; empty upper on the top bracket).
    tax_config: PathBuf,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let table = tax_config::load_from_file(&cli.tax_config)
        .with_context(|| format!("failed to load tax config: {}", cli.tax_config.display()))?;
    info!("loaded {} tax brackets", table.len());

    let records = employees::load_from_file(&cli.input)
        .with_context(|| format!("failed to load payroll input: {}", cli.input.display()))?;
    info!("loaded {} payroll records", records.len());

    let rows = BatchProcessor::new(&table)
        .process_all(&records)
        .context("payroll calculation failed; no output written")?;

    let output_path = writer::output_path_for(&cli.input);
    writer::write_file(&output_path, &rows)
        .with_context(|| format!("failed to write output: {}", output_path.display()))?;
    info!("wrote {} rows to {}", rows.len(), output_path.display());

    Ok(())
}

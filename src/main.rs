//! Divergence kernel benchmark.
//!
//! Reads one element's velocity, metrics and differentiation matrix, times the
//! kernel and the reference oracle, and prints per-node errors against the
//! expected divergence followed by both timings.
//!
//! ```bash
//! spectral-div data/element_np4.txt --iterations 100000
//! spectral-div < data/element_np4.txt
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use spectral_div::{
    BenchmarkConfig, DirectOracle, KernelInput, PUBLISHED_DIVERGENCE_NP4, RECIPROCAL_TOLERANCE,
    RREARTH, ScalarField, ValidationReport, compare_against_reference, read_kernel_input,
    read_kernel_input_file,
};

const NP: usize = 4;

#[derive(Parser)]
#[command(name = "spectral-div")]
#[command(about = "Time and validate the spherical divergence kernel on one spectral element")]
struct Cli {
    /// Input file (reads standard input if omitted)
    input: Option<PathBuf>,

    /// Timed iterations per implementation
    #[arg(short = 'n', long, default_value_t = 100_000)]
    iterations: usize,
}

fn load_input(path: Option<&PathBuf>) -> Result<KernelInput<f64, NP>> {
    match path {
        Some(path) => read_kernel_input_file(path)
            .with_context(|| format!("failed to read kernel input from {}", path.display())),
        None => read_kernel_input(io::stdin().lock()).context("failed to read kernel input from stdin"),
    }
}

fn print_report(report: &ValidationReport<f64, NP>) -> io::Result<()> {
    let mut out = io::stdout().lock();

    writeln!(out, "Divergence Errors")?;
    for row in 0..NP {
        for col in 0..NP {
            writeln!(
                out,
                "{:e}    {:e}",
                report.kernel_errors.error_at(row, col),
                report.oracle_errors.error_at(row, col)
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Kernel Time:\n{:.6}", report.kernel_timing.total.as_secs_f64())?;
    writeln!(
        out,
        "\nReference ({}) Time:\n{:.6}",
        report.oracle_name,
        report.oracle_timing.total.as_secs_f64()
    )?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let input = load_input(cli.input.as_ref())?;

    if let Err(e) = input.metrics.check_reciprocal(RECIPROCAL_TOLERANCE) {
        warn!("input metrics fail the reciprocal check: {}", e);
    }
    if let Err(e) = input.metrics.check_nonsingular() {
        warn!("divergence will not be finite: {}", e);
    }

    let expected = match input.expected {
        Some(expected) => {
            info!("comparing against expected divergence from input");
            expected
        }
        None => {
            info!("comparing against published 4x4 divergence");
            ScalarField::from_array(PUBLISHED_DIVERGENCE_NP4)
        }
    };

    let config = BenchmarkConfig::default().with_iterations(cli.iterations);
    let report = compare_against_reference(&input, RREARTH, &DirectOracle::<f64>::new(), &expected, &config)?;

    print_report(&report)?;
    Ok(())
}

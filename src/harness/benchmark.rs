//! Timed comparison of the kernel against a reference oracle.
//!
//! Each implementation is first run `warmup_iterations` times untimed so cache
//! and branch-predictor state do not skew the result, then `iterations` times
//! inside a single stopwatch interval.

use std::hint::black_box;
use std::time::Duration;

use num_traits::Float;
use thiserror::Error;
use tracing::{debug, info};

use super::{ErrorReport, ReferenceOracle, Stopwatch};
use crate::element::ScalarField;
use crate::io::KernelInput;
use crate::operators::divergence_sphere;

/// Error type for harness configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HarnessError {
    /// A timed block needs at least one call
    #[error("benchmark requires at least one timed iteration")]
    ZeroIterations,
}

/// Iteration counts for a benchmark run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BenchmarkConfig {
    /// Timed calls per implementation
    pub iterations: usize,
    /// Untimed calls before the timed block
    pub warmup_iterations: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            iterations: 100_000,
            warmup_iterations: 100_000,
        }
    }
}

impl BenchmarkConfig {
    /// Set the timed iteration count; warm-up follows it.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self.warmup_iterations = iterations;
        self
    }

    /// Set the warm-up iteration count.
    pub fn with_warmup(mut self, warmup_iterations: usize) -> Self {
        self.warmup_iterations = warmup_iterations;
        self
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.iterations == 0 {
            return Err(HarnessError::ZeroIterations);
        }
        Ok(())
    }
}

/// Wall-clock time of one timed block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Time for the whole block
    pub total: Duration,
    /// Calls in the block
    pub iterations: usize,
}

impl Timing {
    /// Mean time per call.
    pub fn per_call(&self) -> Duration {
        self.total.div_f64(self.iterations.max(1) as f64)
    }
}

/// Run `f` for the warm-up count, then time `iterations` calls as one block.
pub fn time_iterations<F: FnMut()>(config: &BenchmarkConfig, mut f: F) -> Result<Timing, HarnessError> {
    config.validate()?;

    for _ in 0..config.warmup_iterations {
        f();
    }

    let mut stopwatch = Stopwatch::new();
    stopwatch.start();
    for _ in 0..config.iterations {
        f();
    }
    stopwatch.stop();

    debug!(
        iterations = config.iterations,
        warmup = config.warmup_iterations,
        elapsed_s = stopwatch.elapsed().as_secs_f64(),
        "timed block finished"
    );

    Ok(Timing {
        total: stopwatch.elapsed(),
        iterations: config.iterations,
    })
}

/// Outputs, errors and timings of a kernel-versus-oracle run.
#[derive(Clone, Debug)]
pub struct ValidationReport<T, const NP: usize> {
    /// Oracle label
    pub oracle_name: String,
    /// Kernel output
    pub kernel_output: ScalarField<T, NP>,
    /// Oracle output
    pub oracle_output: ScalarField<T, NP>,
    /// Kernel minus expected
    pub kernel_errors: ErrorReport<T, NP>,
    /// Oracle minus expected
    pub oracle_errors: ErrorReport<T, NP>,
    /// Kernel minus oracle
    pub kernel_vs_oracle: ErrorReport<T, NP>,
    /// Kernel timed block
    pub kernel_timing: Timing,
    /// Oracle timed block
    pub oracle_timing: Timing,
}

impl<T: Float, const NP: usize> ValidationReport<T, NP> {
    /// Whether kernel and oracle both match the expected output within `tolerance`.
    pub fn passed(&self, tolerance: T) -> bool {
        self.kernel_errors.within(tolerance) && self.oracle_errors.within(tolerance)
    }
}

/// Time the kernel and `oracle` on the same input and compare both to `expected`.
pub fn compare_against_reference<T, const NP: usize, O>(
    input: &KernelInput<T, NP>,
    rrearth: T,
    oracle: &O,
    expected: &ScalarField<T, NP>,
    config: &BenchmarkConfig,
) -> Result<ValidationReport<T, NP>, HarnessError>
where
    T: Float,
    O: ReferenceOracle<T, NP>,
{
    let mut kernel_output = ScalarField::zeros();
    let kernel_timing = time_iterations(config, || {
        divergence_sphere(
            black_box(&input.velocity),
            black_box(&input.derivative),
            black_box(&input.metrics),
            black_box(rrearth),
            black_box(&mut kernel_output),
        )
    })?;

    let mut oracle_output = ScalarField::zeros();
    let oracle_timing = time_iterations(config, || {
        oracle.divergence(
            black_box(&input.velocity),
            black_box(&input.derivative),
            black_box(&input.metrics),
            black_box(&mut oracle_output),
        )
    })?;

    let report = ValidationReport {
        oracle_name: oracle.name().to_string(),
        kernel_errors: ErrorReport::compute(&kernel_output, expected),
        oracle_errors: ErrorReport::compute(&oracle_output, expected),
        kernel_vs_oracle: ErrorReport::compute(&kernel_output, &oracle_output),
        kernel_output,
        oracle_output,
        kernel_timing,
        oracle_timing,
    };

    info!(
        oracle = %report.oracle_name,
        kernel_max_error = report.kernel_errors.max_abs_error().to_f64().unwrap_or(f64::NAN),
        oracle_max_error = report.oracle_errors.max_abs_error().to_f64().unwrap_or(f64::NAN),
        kernel_s = report.kernel_timing.total.as_secs_f64(),
        oracle_s = report.oracle_timing.total.as_secs_f64(),
        "validation run complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.iterations, 100_000);
        assert_eq!(config.warmup_iterations, 100_000);

        let config = BenchmarkConfig::default().with_iterations(10).with_warmup(3);
        assert_eq!(config.iterations, 10);
        assert_eq!(config.warmup_iterations, 3);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = BenchmarkConfig::default().with_iterations(0);
        assert_eq!(config.validate(), Err(HarnessError::ZeroIterations));
        assert_eq!(time_iterations(&config, || {}), Err(HarnessError::ZeroIterations));
    }

    #[test]
    fn test_warmup_and_timed_calls_counted() {
        let config = BenchmarkConfig::default().with_iterations(7).with_warmup(5);
        let mut calls = 0;
        let timing = time_iterations(&config, || calls += 1).unwrap();
        assert_eq!(calls, 12);
        assert_eq!(timing.iterations, 7);
        assert!(timing.per_call() <= timing.total);
    }
}

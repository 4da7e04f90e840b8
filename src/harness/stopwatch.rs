//! Wall-clock stopwatch.

use std::fmt;
use std::time::{Duration, Instant};

/// Accumulating wall-clock timer.
///
/// Each `start`/`stop` pair adds to the elapsed total. Stopping a stopwatch
/// that is not running has no effect.
#[derive(Clone, Debug, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
    elapsed: Duration,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing. Restarting a running stopwatch discards the open interval.
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Stop timing and add the open interval to the total.
    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed += started.elapsed();
        }
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Total of all completed intervals.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Clear the total and stop.
    pub fn reset(&mut self) {
        self.started = None;
        self.elapsed = Duration::ZERO;
    }
}

impl fmt::Display for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} s", self.elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_started() {
        let mut sw = Stopwatch::new();
        sw.stop();
        assert_eq!(sw.elapsed(), Duration::ZERO);
        assert!(!sw.is_running());
    }

    #[test]
    fn test_accumulates_intervals() {
        let mut sw = Stopwatch::new();
        sw.start();
        assert!(sw.is_running());
        std::thread::sleep(Duration::from_millis(2));
        sw.stop();
        let first = sw.elapsed();
        assert!(first >= Duration::from_millis(2));

        sw.start();
        std::thread::sleep(Duration::from_millis(2));
        sw.stop();
        assert!(sw.elapsed() >= first + Duration::from_millis(2));

        sw.reset();
        assert_eq!(sw.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_display_in_seconds() {
        let sw = Stopwatch::new();
        assert_eq!(sw.to_string(), "0.000000 s");
    }
}

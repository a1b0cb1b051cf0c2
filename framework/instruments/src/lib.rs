mod report;

use std::time::Duration;

pub use report::{InMemoryReporter, LogReporter, ReportCollector, ReportConfig, Reporter};

/// The measurements reported for one completed generation of a ramp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRecord {
    /// The target rate that the generation ran at, in requests per second.
    pub rate: u64,
    pub requests_originated: u64,
    pub requests_failed: u64,
    pub duration: Duration,
}

impl GenerationRecord {
    pub fn new(
        rate: u64,
        requests_originated: u64,
        requests_failed: u64,
        duration: Duration,
    ) -> Self {
        Self {
            rate,
            requests_originated,
            requests_failed,
            duration,
        }
    }

    /// The rate that was actually achieved, which can fall short of the target under load.
    pub fn achieved_rate(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }

        self.requests_originated as f64 / self.duration.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn achieved_rate_from_requests_and_duration() {
        let record = GenerationRecord::new(100, 250, 0, Duration::from_millis(2500));
        assert_eq!(100.0, record.achieved_rate());
    }

    #[test]
    fn achieved_rate_is_zero_for_empty_duration() {
        let record = GenerationRecord::new(100, 10, 0, Duration::ZERO);
        assert_eq!(0.0, record.achieved_rate());
    }
}

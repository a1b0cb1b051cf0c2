use std::time::Duration;

use rate_ramp_core::prelude::DelegatedShutdownListener;
use rate_ramp_instruments::GenerationRecord;

use crate::sequencer::RunConfig;
use crate::types::RampResult;

/// The workload that is run once for each generation of the ramp.
///
/// The implementation decides how requests are issued. It should spread them over
/// [RunConfig::threads] workers at [RunConfig::rate] requests per second until both
/// [RunConfig::minimum_measurements] and [RunConfig::minimum_window] are satisfied.
///
/// The `scope` is cancelled if the ramp is stopped. Implementations should return promptly once
/// that happens. The ramp also stops polling the returned future at that point, so any work that
/// outlives the future must watch the scope itself.
#[allow(async_fn_in_trait)]
pub trait Benchmark<C> {
    async fn benchmark(
        &self,
        scope: DelegatedShutdownListener,
        config: RunConfig,
        client: &C,
    ) -> RampResult<GenerationResult>;
}

/// The outcome of a single generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// The target rate the generation ran at.
    pub rate: u64,
    pub requests_originated: u64,
    pub requests_failed: u64,
    pub duration: Duration,
    /// The last request error seen during the generation, if any requests failed.
    pub last_error: Option<String>,
}

impl GenerationResult {
    pub fn new(rate: u64, requests_originated: u64, duration: Duration) -> Self {
        Self {
            rate,
            requests_originated,
            requests_failed: 0,
            duration,
            last_error: None,
        }
    }

    pub fn with_failures(mut self, requests_failed: u64, last_error: Option<String>) -> Self {
        self.requests_failed = requests_failed;
        self.last_error = last_error;
        self
    }
}

impl From<&GenerationResult> for GenerationRecord {
    fn from(result: &GenerationResult) -> Self {
        GenerationRecord::new(
            result.rate,
            result.requests_originated,
            result.requests_failed,
            result.duration,
        )
    }
}

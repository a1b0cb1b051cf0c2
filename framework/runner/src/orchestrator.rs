use std::sync::Arc;
use std::time::Duration;

use rate_ramp_core::prelude::{DelegatedShutdownListener, ShutdownSignalError};
use rate_ramp_instruments::{GenerationRecord, Reporter};

use crate::benchmark::{Benchmark, GenerationResult};
use crate::error::RampError;
use crate::sequencer::{RampParameters, RateSequencer};

/// The default pause between generations, so that load from the previous generation has settled
/// on the remote side before the next one starts.
pub const PAUSE_TIME_BETWEEN_BENCHMARKS: Duration = Duration::from_secs(5);

/// Runs each generation of a ramp in turn and collects the results.
#[derive(Debug)]
pub struct RunOrchestrator {
    reporter: Arc<Reporter>,
    pause_between_generations: Duration,
}

impl RunOrchestrator {
    pub fn new(reporter: Arc<Reporter>) -> Self {
        Self {
            reporter,
            pause_between_generations: PAUSE_TIME_BETWEEN_BENCHMARKS,
        }
    }

    pub fn with_pause_between_generations(mut self, pause: Duration) -> Self {
        self.pause_between_generations = pause;
        self
    }

    pub fn pause_between_generations(&self) -> Duration {
        self.pause_between_generations
    }

    /// Run the ramp to completion.
    ///
    /// Generations run one after another, never concurrently. Each one gets its own scope derived
    /// from `parent`, which is released once the generation is done. Cancelling `parent` stops the
    /// ramp during a pause or during a benchmark.
    ///
    /// The ramp stops at the first failed generation. The error carries the results of every
    /// generation that completed before it.
    pub async fn run<C, B>(
        &self,
        parent: &DelegatedShutdownListener,
        ramp: &RampParameters,
        benchmark: &B,
        client: &C,
    ) -> Result<Vec<GenerationResult>, RampError>
    where
        B: Benchmark<C>,
    {
        let mut sequencer = RateSequencer::new(ramp.clone())?;
        let mut results = Vec::new();

        while sequencer.advance() {
            let generation = results.len() + 1;
            let scope = parent.child_scope();
            let listener = scope.listener();

            if generation > 1 {
                log::debug!(
                    "Pausing for {:?} before generation {generation}",
                    self.pause_between_generations
                );

                tokio::select! {
                    biased;
                    _ = listener.wait_for_shutdown() => {
                        log::info!("Ramp cancelled before generation {generation}");
                        return Err(RampError::Execution {
                            generation,
                            rate: sequencer.current_rate().unwrap_or(ramp.lower_bound),
                            results,
                            source: ShutdownSignalError::default().into(),
                        });
                    }
                    _ = tokio::time::sleep(self.pause_between_generations) => {}
                }
            }

            let config = match sequencer.current_config() {
                Ok(config) => config,
                Err(e) => {
                    log::debug!("{e}, stopping after {} generations", results.len());
                    break;
                }
            };
            let rate = config.rate;

            log::debug!("Starting generation {generation} at {rate} req/s");
            let outcome = tokio::select! {
                biased;
                _ = listener.wait_for_shutdown() => {
                    Err(anyhow::Error::new(ShutdownSignalError::default()))
                }
                result = benchmark.benchmark(scope.listener(), config, client) => result,
            };

            match outcome {
                Ok(result) => {
                    self.reporter.add_generation(&GenerationRecord::from(&result));
                    results.push(result);
                }
                Err(source) => {
                    return Err(RampError::Execution {
                        generation,
                        rate,
                        results,
                        source,
                    });
                }
            }
        }

        Ok(results)
    }
}

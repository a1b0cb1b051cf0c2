use std::time::Duration;

/// The parameters of a linear ramp, from `lower_bound` to `upper_bound` in increments of `step`.
///
/// All rates are in requests per second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RampParameters {
    pub lower_bound: u64,
    pub upper_bound: u64,
    /// Must be greater than zero, this is checked when a [RateSequencer] is created.
    pub step: u64,
    /// The minimum number of measurements the benchmark should take in each generation.
    pub minimum_measurements: u64,
    /// The minimum time the benchmark should run for in each generation.
    pub minimum_window: Duration,
    /// The number of workers the benchmark may use to issue requests.
    pub threads: usize,
    /// The command that the benchmark runs for each request.
    pub command: Vec<String>,
}

impl RampParameters {
    /// The number of generations that will run with these parameters.
    ///
    /// Note that when `lower_bound > upper_bound` the sequencer still reports a first generation,
    /// but no config is produced for it so nothing runs. A ramp over the whole `u64` range at
    /// step 1 has one more generation than fits in a `u64`, so the count saturates.
    pub fn planned_generations(&self) -> u64 {
        if self.step == 0 || self.lower_bound > self.upper_bound {
            return 0;
        }

        ((self.upper_bound - self.lower_bound) / self.step).saturating_add(1)
    }

    pub(crate) fn validate(&self) -> Result<(), InvalidRampError> {
        if self.step == 0 {
            return Err(InvalidRampError::ZeroStep);
        }

        Ok(())
    }
}

/// The parameters for a single generation of the ramp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub rate: u64,
    pub minimum_measurements: u64,
    pub minimum_window: Duration,
    pub threads: usize,
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Unstarted,
    At(u64),
    /// Stepping past the last rate did not fit in a `u64`.
    Overflowed,
}

/// Steps through the rates of a linear ramp.
///
/// Call [RateSequencer::advance] to move to the next generation and then
/// [RateSequencer::current_config] to get the config to run it with.
#[derive(Debug)]
pub struct RateSequencer {
    params: RampParameters,
    cursor: Cursor,
}

impl RateSequencer {
    pub fn new(params: RampParameters) -> Result<Self, InvalidRampError> {
        params.validate()?;

        Ok(Self {
            params,
            cursor: Cursor::Unstarted,
        })
    }

    /// Move to the next generation, returning true if there is one to run.
    ///
    /// The first call always returns true, even if the lower bound is above the upper bound. In
    /// that case [RateSequencer::current_config] will fail for the first generation.
    pub fn advance(&mut self) -> bool {
        if self.cursor == Cursor::Unstarted {
            self.cursor = Cursor::At(self.params.lower_bound);
            return true;
        }

        // Once past the upper bound the cursor stays where it is.
        if let Cursor::At(rate) = self.cursor {
            if rate > self.params.upper_bound {
                return false;
            }

            self.cursor = match rate.checked_add(self.params.step) {
                Some(next) => Cursor::At(next),
                None => Cursor::Overflowed,
            };
        }

        matches!(self.cursor, Cursor::At(rate) if rate <= self.params.upper_bound)
    }

    /// The config for the current generation.
    ///
    /// Fails if the sequencer has stepped past the upper bound, or has not been advanced yet.
    pub fn current_config(&self) -> Result<RunConfig, ExhaustedError> {
        match self.cursor {
            Cursor::At(rate) if rate <= self.params.upper_bound => Ok(RunConfig {
                rate,
                minimum_measurements: self.params.minimum_measurements,
                minimum_window: self.params.minimum_window,
                threads: self.params.threads,
                command: self.params.command.clone(),
            }),
            _ => Err(ExhaustedError::default()),
        }
    }

    pub fn current_rate(&self) -> Option<u64> {
        match self.cursor {
            Cursor::At(rate) => Some(rate),
            _ => None,
        }
    }

    pub fn params(&self) -> &RampParameters {
        &self.params
    }
}

/// There are no more generations in the ramp.
#[derive(derive_more::Error, derive_more::Display, Debug)]
pub struct ExhaustedError {
    msg: String,
}

impl Default for ExhaustedError {
    fn default() -> Self {
        Self {
            msg: "No more generations".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRampError {
    #[error("Ramp step must be greater than zero")]
    ZeroStep,
}

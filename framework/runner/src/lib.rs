mod benchmark;
mod cli;
mod definition;
mod error;
mod init;
mod monitor;
mod orchestrator;
mod progress;
mod run;
mod sequencer;
mod shutdown;
mod types;

pub mod prelude {
    pub use crate::benchmark::{Benchmark, GenerationResult};
    pub use crate::cli::RampCli;
    pub use crate::definition::{RampDefinition, RampDefinitionBuilder};
    pub use crate::error::RampError;
    pub use crate::init::init;
    pub use crate::orchestrator::{RunOrchestrator, PAUSE_TIME_BETWEEN_BENCHMARKS};
    pub use crate::progress::ProgressReporter;
    pub use crate::run::run;
    pub use crate::sequencer::{
        ExhaustedError, InvalidRampError, RampParameters, RateSequencer, RunConfig,
    };
    pub use crate::types::RampResult;

    pub use rate_ramp_core::prelude::*;
    pub use rate_ramp_instruments::{
        GenerationRecord, InMemoryReporter, LogReporter, ReportCollector, ReportConfig, Reporter,
    };
}

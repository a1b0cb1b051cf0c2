use crate::cli::RampCli;
use clap::Parser;

/// Initialise the CLI and logging for the ramp runner.
pub fn init() -> RampCli {
    env_logger::init();

    RampCli::parse()
}

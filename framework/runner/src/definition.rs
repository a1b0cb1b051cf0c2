use std::time::Duration;

use crate::cli::RampCli;
use crate::sequencer::{InvalidRampError, RampParameters};

/// The builder for a ramp definition.
///
/// Start from the command line arguments, see [crate::init::init], and override anything that the
/// benchmark needs to control itself.
pub struct RampDefinitionBuilder {
    /// The name of the ramp, used in log output.
    ///
    /// Recommended value is `env!("CARGO_PKG_NAME")`.
    name: String,
    cli: RampCli,
    /// Overrides the pause from the command line.
    pause_between_generations: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct RampDefinition {
    pub name: String,
    pub ramp: RampParameters,
    pub pause_between_generations: Duration,
    pub no_progress: bool,
}

impl RampDefinitionBuilder {
    pub fn new(name: &str, cli: RampCli) -> Self {
        Self {
            name: name.to_string(),
            cli,
            pause_between_generations: None,
        }
    }

    /// Set the pause between generations, ignoring the value from the command line.
    pub fn with_pause_between_generations(mut self, pause: Duration) -> Self {
        self.pause_between_generations = Some(pause);
        self
    }

    pub fn build(self) -> Result<RampDefinition, InvalidRampError> {
        let ramp = RampParameters {
            lower_bound: self.cli.lower_bound,
            upper_bound: self.cli.upper_bound,
            step: self.cli.step,
            minimum_measurements: self.cli.minimum_measurements,
            minimum_window: Duration::from_secs(self.cli.minimum_window_s),
            threads: self.cli.threads,
            command: self.cli.command,
        };
        ramp.validate()?;

        if ramp.lower_bound > ramp.upper_bound {
            log::warn!(
                "Lower bound {} is above upper bound {}, no generations will run",
                ramp.lower_bound,
                ramp.upper_bound
            );
        }

        Ok(RampDefinition {
            name: self.name,
            ramp,
            pause_between_generations: self
                .pause_between_generations
                .unwrap_or(Duration::from_secs(self.cli.pause_s)),
            no_progress: self.cli.no_progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> RampCli {
        RampCli {
            lower_bound: 10,
            upper_bound: 30,
            step: 10,
            minimum_measurements: 50,
            minimum_window_s: 15,
            threads: 3,
            pause_s: 5,
            no_progress: true,
            command: vec!["ls".to_string()],
        }
    }

    #[test]
    fn build_from_cli() {
        let definition = RampDefinitionBuilder::new("build_from_cli", cli())
            .build()
            .unwrap();

        assert_eq!("build_from_cli", definition.name);
        assert_eq!(Duration::from_secs(5), definition.pause_between_generations);
        assert_eq!(Duration::from_secs(15), definition.ramp.minimum_window);
        assert_eq!(3, definition.ramp.planned_generations());
        assert!(definition.no_progress);
    }

    #[test]
    fn override_pause() {
        let definition = RampDefinitionBuilder::new("override_pause", cli())
            .with_pause_between_generations(Duration::ZERO)
            .build()
            .unwrap();

        assert_eq!(Duration::ZERO, definition.pause_between_generations);
    }

    #[test]
    fn zero_step_is_rejected() {
        let mut cli = cli();
        cli.step = 0;

        let result = RampDefinitionBuilder::new("zero_step_is_rejected", cli).build();

        assert_eq!(InvalidRampError::ZeroStep, result.unwrap_err());
    }
}

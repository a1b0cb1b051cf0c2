use rate_ramp_core::prelude::ShutdownSignalError;

use crate::benchmark::GenerationResult;
use crate::sequencer::InvalidRampError;

#[derive(Debug, thiserror::Error)]
pub enum RampError {
    #[error("Invalid ramp: {0}")]
    InvalidRamp(#[from] InvalidRampError),

    /// A generation failed, or the ramp was cancelled before it could complete.
    ///
    /// `results` holds every generation that completed before this one.
    #[error("Generation {generation} at {rate} req/s failed")]
    Execution {
        generation: usize,
        rate: u64,
        results: Vec<GenerationResult>,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to create Tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl RampError {
    /// The generations that completed before the ramp stopped.
    pub fn partial_results(&self) -> &[GenerationResult] {
        match self {
            RampError::Execution { results, .. } => results,
            _ => &[],
        }
    }

    pub fn into_partial_results(self) -> Vec<GenerationResult> {
        match self {
            RampError::Execution { results, .. } => results,
            _ => Vec::new(),
        }
    }

    /// True if the ramp stopped because its scope was cancelled rather than because the benchmark
    /// failed.
    pub fn is_cancelled(&self) -> bool {
        match self {
            RampError::Execution { source, .. } => source
                .chain()
                .any(|cause| cause.is::<ShutdownSignalError>()),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn execution_error_keeps_partial_results() {
        let err = RampError::Execution {
            generation: 2,
            rate: 20,
            results: vec![GenerationResult::new(10, 100, Duration::from_secs(10))],
            source: anyhow::anyhow!("connection refused"),
        };

        assert_eq!("Generation 2 at 20 req/s failed", err.to_string());
        assert_eq!(1, err.partial_results().len());
        assert!(!err.is_cancelled());
        assert_eq!(10, err.into_partial_results()[0].rate);
    }

    #[test]
    fn error_chain_shows_cause_once() {
        let err = RampError::Execution {
            generation: 2,
            rate: 20,
            results: vec![],
            source: anyhow::anyhow!("connection refused"),
        };

        assert_eq!(
            "Generation 2 at 20 req/s failed: connection refused",
            format!("{:#}", anyhow::Error::from(err))
        );
    }

    #[test]
    fn shutdown_signal_is_cancellation() {
        let err = RampError::Execution {
            generation: 1,
            rate: 10,
            results: vec![],
            source: ShutdownSignalError::default().into(),
        };

        assert!(err.is_cancelled());
    }

    #[test]
    fn invalid_ramp_has_no_partial_results() {
        let err = RampError::from(InvalidRampError::ZeroStep);

        assert!(err.partial_results().is_empty());
        assert!(!err.is_cancelled());
    }
}

use crate::report::ReportCollector;
use crate::GenerationRecord;

/// Writes a progress line to the log for every generation as it completes.
#[derive(Debug, Default)]
pub struct LogReporter;

impl ReportCollector for LogReporter {
    fn add_generation(&mut self, record: &GenerationRecord) {
        log::info!(
            "current generation requests: {}, duration: {:?}",
            record.requests_originated,
            record.duration
        );

        if record.requests_failed > 0 {
            log::warn!(
                "{} of {} requests failed at {} req/s",
                record.requests_failed,
                record.requests_originated,
                record.rate
            );
        }
    }

    fn finalize(&self) {
        // no-op because each record is logged as it arrives
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn log_generation_with_failed_requests() {
        let mut reporter = LogReporter;
        reporter.add_generation(&GenerationRecord::new(20, 200, 3, Duration::from_secs(10)));
        reporter.finalize();
    }
}

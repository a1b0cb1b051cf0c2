use indicatif::{ProgressBar, ProgressStyle};
use rate_ramp_instruments::{GenerationRecord, ReportCollector};

/// Displays a progress bar while the ramp is running to show the user how many generations are left.
pub struct ProgressReporter {
    pb: ProgressBar,
}

impl ProgressReporter {
    pub fn new(planned_generations: u64) -> Self {
        let pb = ProgressBar::new(planned_generations);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{wide_bar:.cyan/blue}] {pos}/{len} generations, {msg} [{elapsed_precise}]",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );

        Self { pb }
    }

    pub fn position(&self) -> u64 {
        self.pb.position()
    }
}

impl ReportCollector for ProgressReporter {
    fn add_generation(&mut self, record: &GenerationRecord) {
        self.pb
            .set_message(format!("{:.1} req/s achieved", record.achieved_rate()));
        self.pb.inc(1);
    }

    fn finalize(&self) {
        log::trace!("Progress bar finished");
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn advances_once_per_generation() {
        let mut progress = ProgressReporter::new(3);

        progress.add_generation(&GenerationRecord::new(10, 100, 0, Duration::from_secs(10)));
        progress.add_generation(&GenerationRecord::new(20, 200, 0, Duration::from_secs(10)));

        assert_eq!(2, progress.position());
        progress.finalize();
    }
}

mod in_memory_reporter;
mod log_reporter;

use parking_lot::Mutex;

use crate::GenerationRecord;

pub use in_memory_reporter::InMemoryReporter;
pub use log_reporter::LogReporter;

pub trait ReportCollector {
    /// Record a generation that completed successfully.
    fn add_generation(&mut self, record: &GenerationRecord);

    fn finalize(&self);
}

/// Choose which collectors a [Reporter] sends generation records to.
#[derive(Default)]
pub struct ReportConfig {
    enable_log: bool,
    collectors: Vec<Box<dyn ReportCollector + Send>>,
}

impl ReportConfig {
    /// Write one log line per generation.
    pub fn enable_log(mut self) -> Self {
        self.enable_log = true;
        self
    }

    /// Keep every generation record in memory. Hold on to a clone of the reporter to read them.
    pub fn enable_in_memory(self, reporter: InMemoryReporter) -> Self {
        self.with_collector(Box::new(reporter))
    }

    pub fn with_collector(mut self, collector: Box<dyn ReportCollector + Send>) -> Self {
        self.collectors.push(collector);
        self
    }

    pub fn init(self) -> Reporter {
        let mut collectors = self.collectors;
        if self.enable_log {
            collectors.insert(0, Box::new(LogReporter));
        }

        Reporter {
            collectors: Mutex::new(collectors),
        }
    }
}

/// Fans generation records out to every configured collector.
pub struct Reporter {
    collectors: Mutex<Vec<Box<dyn ReportCollector + Send>>>,
}

impl Reporter {
    pub fn add_generation(&self, record: &GenerationRecord) {
        for collector in self.collectors.lock().iter_mut() {
            collector.add_generation(record);
        }
    }

    pub fn finalize(&self) {
        for collector in self.collectors.lock().iter() {
            collector.finalize();
        }
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("collectors", &self.collectors.lock().len())
            .finish()
    }
}

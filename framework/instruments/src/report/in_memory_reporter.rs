use std::sync::Arc;

use parking_lot::Mutex;

use crate::report::ReportCollector;
use crate::GenerationRecord;

/// Keeps all of the generation records in memory so they can be read back after the ramp. Clones
/// share the same records.
#[derive(Debug, Default, Clone)]
pub struct InMemoryReporter {
    records: Arc<Mutex<Vec<GenerationRecord>>>,
}

impl InMemoryReporter {
    pub fn records(&self) -> Vec<GenerationRecord> {
        self.records.lock().clone()
    }
}

impl ReportCollector for InMemoryReporter {
    fn add_generation(&mut self, record: &GenerationRecord) {
        self.records.lock().push(record.clone());
    }

    fn finalize(&self) {
        let records = self.records.lock();
        let total_requests = records
            .iter()
            .map(|record| record.requests_originated)
            .sum::<u64>();
        let total_duration = records
            .iter()
            .map(|record| record.duration)
            .sum::<std::time::Duration>();

        log::debug!(
            "Collected {} generations, {} requests over {:?}",
            records.len(),
            total_requests,
            total_duration
        );
    }
}

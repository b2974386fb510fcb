use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use crate::engine::processor::RemovalResult;

/// Totals for one completed batch. Aborted batches never produce one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total_count: u64,
    pub strategy: String,
    /// Wall time of the whole batch, not the sum of per-file times.
    pub elapsed: Duration,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub skipped_chunks: usize,
    pub removed_names: BTreeSet<String>,
}

impl BatchSummary {
    pub fn new(strategy: String) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    /// Commutative: folding results in any order gives the same summary.
    pub fn record(&mut self, result: RemovalResult) {
        self.total_count += result.count;
        self.skipped_chunks += result.skipped_chunks;
        self.removed_names.extend(result.removed_names);
        self.files_processed += 1;
    }

    /// A rejected file contributes nothing but the skip itself.
    pub fn record_skipped(&mut self) {
        self.files_skipped += 1;
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Done!")?;
        writeln!(f, "Removed {} instances of {}", self.total_count, self.strategy)?;
        write!(f, "Took {:.3} seconds", self.elapsed.as_secs_f64())
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Outcome of cleaning one region file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalResult {
    /// Structure tags deleted across both collections of every chunk.
    pub count: u64,
    pub removed_names: BTreeSet<String>,
    pub elapsed: Duration,
    /// Present chunks that went through the removal pass.
    pub chunks: usize,
    /// Present chunks copied unchanged because their version was unknown.
    pub skipped_chunks: usize,
}

/// What to do with a chunk whose data version is newer than the adapter knows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownVersionPolicy {
    /// Abort the batch.
    #[default]
    Fail,
    /// Copy the chunk through untouched.
    Skip,
}

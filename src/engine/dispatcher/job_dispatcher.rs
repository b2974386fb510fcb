use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use crate::engine::dispatcher::batch_summary::BatchSummary;
use crate::engine::errors::CleanerError;
use crate::engine::processor::{RegionProcessor, RemovalResult};
use crate::engine::region::{AnvilStore, RegionStore};
use crate::engine::strategy::RemovalStrategy;

type TaskOutput = (PathBuf, Result<RemovalResult, CleanerError>);

/// Half the hardware threads, never fewer than one.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() / 2)
        .unwrap_or(1)
        .max(1)
}

/// Fans region files out to a bounded pool of blocking workers and folds
/// their results into a `BatchSummary`.
pub struct JobDispatcher<S = AnvilStore> {
    processor: Arc<RegionProcessor<S>>,
}

impl<S: RegionStore + 'static> JobDispatcher<S> {
    pub fn new(processor: RegionProcessor<S>) -> Self {
        Self {
            processor: Arc::new(processor),
        }
    }

    /// Cleans every entry of `source_dir` into `dest_dir`.
    ///
    /// Recoverable per-file errors are logged and counted as skipped. The
    /// first fatal error stops scheduling; tasks already running finish, and
    /// the error is returned instead of a summary.
    pub async fn run(
        &self,
        strategy: RemovalStrategy,
        source_dir: &Path,
        dest_dir: &Path,
        workers: usize,
    ) -> Result<BatchSummary, CleanerError> {
        let start = Instant::now();
        let candidates = candidates(source_dir, dest_dir)?;
        let workers = workers.max(1);

        info!(target: "job_dispatcher::run", source = %source_dir.display(), dest = %dest_dir.display(), files = candidates.len(), workers, mode = strategy.name(), "Starting batch");

        let strategy = Arc::new(strategy);
        let semaphore = Arc::new(Semaphore::new(workers));
        let abort = Arc::new(AtomicBool::new(false));
        let mut tasks: JoinSet<TaskOutput> = JoinSet::new();
        let mut summary = BatchSummary::new(strategy.describe());
        let mut fatal: Option<CleanerError> = None;

        for path in candidates {
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    fatal = Some(CleanerError::Worker(e.to_string()));
                    break;
                }
            };

            while let Some(joined) = tasks.try_join_next() {
                absorb(joined, &mut summary, &mut fatal);
            }
            if abort.load(Ordering::SeqCst) || fatal.is_some() {
                debug!(target: "job_dispatcher::run", "Fatal error seen, not scheduling further files");
                break;
            }

            let processor = Arc::clone(&self.processor);
            let strategy = Arc::clone(&strategy);
            let abort = Arc::clone(&abort);
            let dest_dir = dest_dir.to_path_buf();
            tasks.spawn_blocking(move || {
                let result = processor.process_file(&strategy, &path, &dest_dir);
                if matches!(&result, Err(e) if !e.is_recoverable()) {
                    abort.store(true, Ordering::SeqCst);
                }
                // Released only after the abort flag is visible.
                drop(permit);
                (path, result)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            absorb(joined, &mut summary, &mut fatal);
        }

        if let Some(e) = fatal {
            e.log_error();
            return Err(e);
        }

        summary.elapsed = start.elapsed();
        info!(
            target: "job_dispatcher::run",
            total = summary.total_count,
            processed = summary.files_processed,
            skipped = summary.files_skipped,
            elapsed = format!("{:.3}s", summary.elapsed.as_secs_f64()),
            "Batch complete"
        );
        Ok(summary)
    }
}

/// Entries of `source_dir`, materialised up front so files written during the
/// run are never picked up. Every entry is forwarded; the processor decides
/// what is a region file.
pub fn candidates(source_dir: &Path, dest_dir: &Path) -> Result<Vec<PathBuf>, CleanerError> {
    if !source_dir.is_dir() {
        return Err(CleanerError::SourceDirMissing {
            path: source_dir.to_path_buf(),
        });
    }

    if let (Ok(src), Ok(dst)) = (source_dir.canonicalize(), dest_dir.canonicalize()) {
        if src == dst {
            return Err(CleanerError::SameDirectory { path: dst });
        }
    }

    let read_error = |source| CleanerError::SourceRead {
        path: source_dir.to_path_buf(),
        source,
    };
    let mut paths = fs::read_dir(source_dir)
        .map_err(read_error)?
        .map(|entry| entry.map(|e| e.path()).map_err(read_error))
        .collect::<Result<Vec<_>, _>>()?;
    // Order carries no meaning; sorting keeps logs stable between runs.
    paths.sort();
    Ok(paths)
}

fn absorb(
    joined: Result<TaskOutput, JoinError>,
    summary: &mut BatchSummary,
    fatal: &mut Option<CleanerError>,
) {
    match joined {
        Ok((_, Ok(result))) => summary.record(result),
        Ok((path, Err(e))) if e.is_recoverable() => {
            warn!(target: "job_dispatcher::run", file = %path.display(), reason = %e, kind = e.kind(), "Skipping file");
            summary.record_skipped();
        }
        Ok((path, Err(e))) => {
            if fatal.is_none() {
                *fatal = Some(e);
            } else {
                error!(target: "job_dispatcher::run", file = %path.display(), error = %e, "Additional fatal error after abort");
            }
        }
        Err(join_error) => {
            error!(target: "job_dispatcher::run", error = %join_error, "Worker task failed");
            if fatal.is_none() {
                *fatal = Some(CleanerError::Worker(join_error.to_string()));
            }
        }
    }
}

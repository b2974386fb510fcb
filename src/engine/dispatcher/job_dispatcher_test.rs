use std::fs;
use tempfile::tempdir;
use tracing::Level;
use tracing::instrument::WithSubscriber;

use crate::engine::dispatcher::job_dispatcher::{JobDispatcher, candidates, default_workers};
use crate::engine::errors::CleanerError;
use crate::engine::processor::{RegionProcessor, UnknownVersionPolicy};
use crate::engine::strategy::RemovalStrategy;
use crate::engine::version::version_adapter::DEFAULT_MAX_DATA_VERSION;
use crate::logging::init_for_tests;
use crate::test_helpers::factory::Factory;
use crate::test_helpers::file_names;
use crate::test_helpers::log_capture::LogCapture;

const ICY: &str = "repurposed_structures:mineshaft_icy";
const END: &str = "repurposed_structures:mineshaft_end";
const RUN_TARGET: &str = "job_dispatcher::run";

fn dispatcher() -> JobDispatcher {
    JobDispatcher::new(RegionProcessor::default())
}

#[tokio::test]
async fn sums_counts_and_skips_empty_file() {
    init_for_tests();
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    Factory::region_file()
        .with_chunk(0, 0, Factory::chunk().with_starts(&["village", ICY]).create_chunk())
        .write_to(src.path());
    Factory::region_file()
        .with_coords(-1, 0)
        .with_chunk(1, 1, Factory::chunk().with_start(END).with_reference(END).create_chunk())
        .with_chunk(2, 2, Factory::chunk().modern().with_start(ICY).create_chunk())
        .write_to(src.path());
    fs::write(src.path().join("r.5.5.mca"), b"").unwrap();

    let logs = LogCapture::new();
    let summary = dispatcher()
        .run(RemovalStrategy::purge(), src.path(), dst.path(), 2)
        .with_subscriber(logs.subscriber())
        .await
        .unwrap();

    assert_eq!(summary.total_count, 4);
    assert_eq!(summary.files_processed, 2);
    assert_eq!(summary.files_skipped, 1);
    assert_eq!(summary.strategy, "non-vanilla structures");
    assert_eq!(file_names(dst.path()), vec!["r.-1.0.mca", "r.0.0.mca"]);

    let skips = logs.at(Level::WARN, RUN_TARGET);
    assert_eq!(skips.len(), 1, "{skips:?}");
    assert!(skips[0].field("file").ends_with("r.5.5.mca"), "{skips:?}");
    assert!(skips[0].field("reason").contains("is empty"), "{skips:?}");
    assert_eq!(skips[0].field("kind"), "empty_file");
}

#[tokio::test]
async fn unrelated_files_are_skipped_without_affecting_siblings() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    Factory::region_file()
        .with_chunk(0, 0, Factory::chunk().with_starts(&["village", ICY]).create_chunk())
        .write_to(src.path());
    fs::write(src.path().join("notes.txt"), b"remember to back up").unwrap();
    fs::create_dir(src.path().join("poi")).unwrap();

    let logs = LogCapture::new();
    let summary = dispatcher()
        .run(RemovalStrategy::list([ICY]), src.path(), dst.path(), 4)
        .with_subscriber(logs.subscriber())
        .await
        .unwrap();

    assert_eq!(summary.total_count, 1);
    assert_eq!(summary.files_skipped, 2);
    assert_eq!(file_names(dst.path()), vec!["r.0.0.mca"]);

    let skips = logs.at(Level::WARN, RUN_TARGET);
    assert_eq!(skips.len(), 2, "{skips:?}");
    let notes: Vec<_> = skips
        .iter()
        .filter(|e| e.field("file").ends_with("notes.txt"))
        .collect();
    assert_eq!(notes.len(), 1, "{skips:?}");
    assert!(notes[0].field("reason").contains("not a valid region file"), "{notes:?}");
    assert!(skips.iter().any(|e| e.field("file").ends_with("poi")), "{skips:?}");
}

#[tokio::test]
async fn zero_workers_still_runs() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    Factory::region_file()
        .with_chunk(0, 0, Factory::chunk().with_start(ICY).create_chunk())
        .write_to(src.path());

    let summary = dispatcher()
        .run(RemovalStrategy::purge(), src.path(), dst.path(), 0)
        .await
        .unwrap();
    assert_eq!(summary.total_count, 1);
}

#[tokio::test]
async fn corrupt_file_aborts_without_summary() {
    init_for_tests();
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    fs::write(src.path().join("r.0.0.mca"), b"not a region at all").unwrap();
    Factory::region_file()
        .with_coords(0, 1)
        .with_chunk(0, 0, Factory::chunk().with_start(ICY).create_chunk())
        .write_to(src.path());

    let logs = LogCapture::new();
    let err = dispatcher()
        .run(RemovalStrategy::purge(), src.path(), dst.path(), 1)
        .with_subscriber(logs.subscriber())
        .await
        .unwrap_err();

    assert!(matches!(err, CleanerError::CorruptRegion { .. }), "got {err:?}");
    // With one worker the corrupt file runs first and nothing else is scheduled.
    assert!(file_names(dst.path()).is_empty());

    // Reported once, by the dispatcher.
    let errors: Vec<_> = logs
        .events()
        .into_iter()
        .filter(|e| e.level == Level::ERROR)
        .collect();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert!(errors[0].field("message").contains("corrupt region file"), "{errors:?}");
}

#[tokio::test]
async fn unknown_version_aborts_under_strict_policy() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    Factory::region_file()
        .with_chunk(
            0,
            0,
            Factory::chunk()
                .modern()
                .with_data_version(DEFAULT_MAX_DATA_VERSION as i32 + 1)
                .create_chunk(),
        )
        .write_to(src.path());

    let err = dispatcher()
        .run(RemovalStrategy::purge(), src.path(), dst.path(), 2)
        .await
        .unwrap_err();
    assert!(matches!(err, CleanerError::UnsupportedVersion { .. }), "got {err:?}");
}

#[tokio::test]
async fn unknown_version_is_counted_under_skip_policy() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    Factory::region_file()
        .with_chunk(
            0,
            0,
            Factory::chunk()
                .modern()
                .with_data_version(DEFAULT_MAX_DATA_VERSION as i32 + 1)
                .create_chunk(),
        )
        .write_to(src.path());

    let summary = JobDispatcher::new(RegionProcessor::default().with_policy(UnknownVersionPolicy::Skip))
        .run(RemovalStrategy::purge(), src.path(), dst.path(), 2)
        .await
        .unwrap();
    assert_eq!(summary.skipped_chunks, 1);
    assert_eq!(summary.total_count, 0);
}

#[tokio::test]
async fn missing_source_is_fatal() {
    let dst = tempdir().unwrap();
    let err = dispatcher()
        .run(
            RemovalStrategy::purge(),
            &dst.path().join("no-such-world"),
            dst.path(),
            1,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CleanerError::SourceDirMissing { .. }), "got {err:?}");
}

#[test]
fn destination_equal_to_source_is_rejected() {
    let src = tempdir().unwrap();
    let err = candidates(src.path(), &src.path().join(".")).unwrap_err();
    assert!(matches!(err, CleanerError::SameDirectory { .. }), "got {err:?}");
}

#[test]
fn candidates_include_every_entry() {
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    fs::write(src.path().join("r.0.0.mca"), b"x").unwrap();
    fs::write(src.path().join("notes.txt"), b"x").unwrap();

    let found = candidates(src.path(), dst.path()).unwrap();
    assert_eq!(found.len(), 2);
}

#[test]
fn default_workers_is_positive() {
    assert!(default_workers() >= 1);
}

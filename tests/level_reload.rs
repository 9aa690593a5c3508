//! Integration tests for the runtime level-reload loop.

use levelswap::core::{LoggerHandle, Severity};
use levelswap::sink::MemorySink;
use levelswap::watch::LevelWatcher;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Short quantum so reloads land quickly in tests.
const QUANTUM: Duration = Duration::from_millis(20);

/// Write `contents` and force a modification time distinct from every
/// previous write, so the watcher always observes the change regardless of
/// filesystem timestamp granularity.
fn write_config(path: &Path, contents: &str) {
    static BUMP: AtomicU64 = AtomicU64::new(1);
    fs::write(path, contents).unwrap();
    let offset = BUMP.fetch_add(1, Ordering::SeqCst);
    let file = fs::OpenOptions::new().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() + Duration::from_secs(offset))
        .unwrap();
}

fn setup(initial: &str) -> (TempDir, PathBuf, LoggerHandle, MemorySink) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("log.conf");
    write_config(&path, initial);

    let logger = LoggerHandle::new();
    let sink = MemorySink::new();
    logger.attach_sink(sink.clone());
    (dir, path, logger, sink)
}

/// Poll `condition` until it holds or two seconds elapse.
async fn eventually(condition: impl Fn() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

#[tokio::test]
async fn test_every_valid_severity_applies_within_the_quantum() {
    let (_dir, path, logger, _sink) = setup("level=INFO\n");
    let task = LevelWatcher::new(&path, logger.clone())
        .unwrap()
        .with_quantum(QUANTUM)
        .spawn();

    for severity in Severity::ALL {
        write_config(&path, &format!("level={severity}\n"));
        assert!(
            eventually(|| logger.threshold() == severity).await,
            "threshold never became {severity}"
        );
    }

    task.shutdown().await;
}

#[tokio::test]
async fn test_invalid_token_falls_back_to_info_with_diagnostics() {
    let (_dir, path, logger, sink) = setup("level=DEBUG\n");
    logger.set_threshold(Severity::Debug);
    let task = LevelWatcher::new(&path, logger.clone())
        .unwrap()
        .with_quantum(QUANTUM)
        .spawn();

    write_config(&path, "level=garbage\n");

    assert!(eventually(|| logger.threshold() == Severity::Info).await);
    assert!(sink.contains("Level: garbage is not valid"));
    assert!(sink.contains("Level has been set to INFO"));

    task.shutdown().await;
}

#[tokio::test]
async fn test_missing_directive_has_a_distinct_diagnostic() {
    let (_dir, path, logger, sink) = setup("level=DEBUG\n");
    logger.set_threshold(Severity::Debug);
    let task = LevelWatcher::new(&path, logger.clone())
        .unwrap()
        .with_quantum(QUANTUM)
        .spawn();

    write_config(&path, "# nothing configured here\n");

    assert!(eventually(|| logger.threshold() == Severity::Info).await);
    assert!(sink.contains("There is no level configuration"));
    assert!(!sink.contains("is not valid"));

    task.shutdown().await;
}

#[tokio::test]
async fn test_debug_then_garbage_then_error_scenario() {
    let (_dir, path, logger, sink) = setup("level=DEBUG\n");
    // Initial synchronous apply, as initialize() would do it.
    levelswap::core::parse_level_file(&path)
        .unwrap()
        .apply_to(&logger, &path, levelswap::core::ApplyPhase::Startup);
    assert_eq!(logger.threshold(), Severity::Debug);
    assert!(sink.contains("Log level started as: DEBUG"));

    let task = LevelWatcher::new(&path, logger.clone())
        .unwrap()
        .with_quantum(QUANTUM)
        .spawn();

    write_config(&path, "level=garbage\n");
    assert!(eventually(|| logger.threshold() == Severity::Info).await);
    assert!(sink.contains("Level: garbage is not valid"));

    write_config(&path, "level=ERROR\n");
    assert!(eventually(|| logger.threshold() == Severity::Error).await);

    task.shutdown().await;
}

#[tokio::test]
async fn test_unchanged_mtime_triggers_no_activity() {
    let (_dir, path, logger, sink) = setup("level=DEBUG\n");
    logger.set_threshold(Severity::Debug);
    let original_mtime = fs::metadata(&path).unwrap().modified().unwrap();

    let task = LevelWatcher::new(&path, logger.clone())
        .unwrap()
        .with_quantum(QUANTUM)
        .spawn();

    // Rewrite the same directive, then restore the original mtime so the
    // change detector has nothing to see.
    fs::write(&path, "level=DEBUG\n").unwrap();
    let file = fs::OpenOptions::new().write(true).open(&path).unwrap();
    file.set_modified(original_mtime).unwrap();

    tokio::time::sleep(QUANTUM * 10).await;
    assert!(sink.is_empty(), "unexpected records: {:?}", sink.records());
    assert_eq!(logger.threshold(), Severity::Debug);

    task.shutdown().await;
}

#[tokio::test]
async fn test_deleted_file_keeps_level_until_it_reappears() {
    let (_dir, path, logger, sink) = setup("level=ERROR\n");
    logger.set_threshold(Severity::Error);
    let task = LevelWatcher::new(&path, logger.clone())
        .unwrap()
        .with_quantum(QUANTUM)
        .spawn();

    fs::remove_file(&path).unwrap();
    assert!(eventually(|| sink.contains("Conflict while getting mod time")).await);
    assert_eq!(logger.threshold(), Severity::Error);

    write_config(&path, "level=WARNING\n");
    assert!(eventually(|| logger.threshold() == Severity::Warning).await);

    task.shutdown().await;
}

#[tokio::test]
async fn test_first_directive_wins_on_reload() {
    let (_dir, path, logger, _sink) = setup("level=INFO\n");
    let task = LevelWatcher::new(&path, logger.clone())
        .unwrap()
        .with_quantum(QUANTUM)
        .spawn();

    write_config(&path, "level=WARNING\nlevel=ERROR\n");
    assert!(eventually(|| logger.threshold() == Severity::Warning).await);

    task.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_stops_the_loop() {
    let (_dir, path, logger, _sink) = setup("level=INFO\n");
    let task = LevelWatcher::new(&path, logger.clone())
        .unwrap()
        .with_quantum(QUANTUM)
        .spawn();

    assert!(task.is_running());
    task.shutdown().await;

    // Edits after shutdown are never applied.
    write_config(&path, "level=CRITICAL\n");
    tokio::time::sleep(QUANTUM * 10).await;
    assert_eq!(logger.threshold(), Severity::Info);
}

mod common;

use std::fs;

use chrono::{Duration, SubsecRound, Utc};
use common::write_log;
use logsweep::{RetentionEngine, RetentionSummary, RetentionWindow, TargetDirectory};

#[test]
fn test_thirty_day_window() {
    let tmp = tempfile::tempdir().unwrap();
    write_log(tmp.path(), "a.log", 1000, 31);
    write_log(tmp.path(), "b.log", 500, 10);

    let summary = RetentionEngine::new()
        .run(&[TargetDirectory::logs(tmp.path())], RetentionWindow::Thirty)
        .unwrap();

    assert_eq!(summary.files_deleted, 1);
    assert_eq!(summary.bytes_reclaimed, 1000);
    assert!(summary.errors.is_empty());
    assert!(!tmp.path().join("a.log").exists());
    assert!(tmp.path().join("b.log").exists());
}

#[test]
fn test_missing_primary_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let err = RetentionEngine::new()
        .run(
            &[TargetDirectory::logs(tmp.path().join("FFXIVLogs"))],
            RetentionWindow::Thirty,
        )
        .unwrap_err();

    assert!(err.is_directory_not_found());
}

#[test]
fn test_missing_secondary_contributes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let act = tmp.path().join("act");
    fs::create_dir(&act).unwrap();
    write_log(&act, "old.log", 2000, 45);

    let targets = [
        TargetDirectory::logs(&act),
        TargetDirectory::logs(tmp.path().join("iinact")),
    ];
    let summary = RetentionEngine::new()
        .run(&targets, RetentionWindow::Thirty)
        .unwrap();

    assert_eq!(summary.files_deleted, 1);
    assert_eq!(summary.bytes_reclaimed, 2000);
    assert!(summary.errors.is_empty());
}

#[test]
fn test_both_directories_are_cleaned() {
    let tmp = tempfile::tempdir().unwrap();
    let act = tmp.path().join("act");
    let capture = tmp.path().join("capture");
    fs::create_dir(&act).unwrap();
    fs::create_dir(&capture).unwrap();
    write_log(&act, "Network_1.log", 300, 20);
    write_log(&capture, "Network_2.LOG", 200, 20);
    write_log(&capture, "keep.log", 100, 3);
    write_log(&capture, "notes.txt", 999, 20);

    let targets = [TargetDirectory::logs(&act), TargetDirectory::logs(&capture)];
    let summary = RetentionEngine::new()
        .run(&targets, RetentionWindow::Fourteen)
        .unwrap();

    assert_eq!(summary.candidates, 2);
    assert_eq!(summary.files_deleted, 2);
    assert_eq!(summary.bytes_reclaimed, 500);
    assert!(capture.join("keep.log").exists());
    assert!(capture.join("notes.txt").exists());
}

#[test]
fn test_second_run_is_a_no_op() {
    let tmp = tempfile::tempdir().unwrap();
    write_log(tmp.path(), "a.log", 1000, 100);
    write_log(tmp.path(), "b.log", 1000, 1);

    let engine = RetentionEngine::new();
    let targets = [TargetDirectory::logs(tmp.path())];

    let first = engine.run(&targets, RetentionWindow::Ninety).unwrap();
    assert_eq!(first.files_deleted, 1);

    let second = engine.run(&targets, RetentionWindow::Ninety).unwrap();
    assert_eq!(second, RetentionSummary::default());
}

#[test]
fn test_boundary_is_not_selected() {
    let tmp = tempfile::tempdir().unwrap();
    let now = Utc::now().trunc_subsecs(0);

    for window in RetentionWindow::ALL {
        let dir = tmp.path().join(window.days().to_string());
        fs::create_dir(&dir).unwrap();

        let boundary = now - window.duration();
        for (name, modified) in [
            ("edge.log", boundary),
            ("past.log", boundary - Duration::seconds(1)),
        ] {
            fs::write(dir.join(name), b"x").unwrap();
            fs::File::options()
                .write(true)
                .open(dir.join(name))
                .unwrap()
                .set_modified(modified.into())
                .unwrap();
        }

        let summary = RetentionEngine::new()
            .run_at(&[TargetDirectory::logs(&dir)], window, now)
            .unwrap();

        assert_eq!(summary.files_deleted, 1, "window {}", window);
        assert!(dir.join("edge.log").exists(), "window {}", window);
        assert!(!dir.join("past.log").exists(), "window {}", window);
    }
}

#[test]
fn test_custom_pattern() {
    let tmp = tempfile::tempdir().unwrap();
    write_log(tmp.path(), "Network_2024.log", 10, 40);
    write_log(tmp.path(), "debug.log", 10, 40);

    let target = TargetDirectory::new(tmp.path(), "Network_*.log").unwrap();
    let summary = RetentionEngine::new()
        .run(&[target], RetentionWindow::Thirty)
        .unwrap();

    assert_eq!(summary.files_deleted, 1);
    assert!(tmp.path().join("debug.log").exists());
}

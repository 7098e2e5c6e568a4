//! Unit tests for the file-backed progress store.

use super::day;
use aiquest::catalog::LessonCatalog;
use aiquest::progress::LessonRun;
use aiquest::storage::config::AppConfig;
use aiquest::storage::{ProgressStore, DEFAULT_RECORD_KEY};
use aiquest::ProgressDocument;
use tempfile::tempdir;

#[test]
fn test_progress_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("progress.db");
    let today = day(2026, 10, 17);
    let catalog = LessonCatalog::builtin();

    let saved = {
        let store = ProgressStore::open_at(&path, DEFAULT_RECORD_KEY).unwrap();
        assert!(store.is_persistent());
        let doc = store.load(today).unwrap();
        let outcome = LessonRun::new(catalog.get("1-what-is-ai").unwrap()).finish(&doc, today);
        store.save(&outcome.document).unwrap();
        outcome.document
    };

    let store = ProgressStore::open_at(&path, DEFAULT_RECORD_KEY).unwrap();
    assert_eq!(store.load(today).unwrap(), saved);
}

#[test]
fn test_open_from_config_uses_data_dir() {
    let dir = tempdir().unwrap();
    let config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let today = day(2026, 10, 17);

    let store = ProgressStore::open(&config).unwrap();
    assert!(store.is_persistent());
    store.save(&ProgressDocument::new(today)).unwrap();
    assert!(dir.path().join("progress.db").exists());
}

#[test]
fn test_unopenable_path_falls_back_to_memory() {
    let dir = tempdir().unwrap();
    // A regular file where the data directory should be.
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let config = AppConfig {
        data_dir: blocker,
        ..Default::default()
    };

    let store = ProgressStore::open(&config).unwrap();
    assert!(!store.is_persistent());
    let today = day(2026, 10, 17);
    assert_eq!(store.load(today).unwrap(), ProgressDocument::new(today));
}

#[test]
fn test_separate_record_keys_do_not_collide() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("progress.db");
    let today = day(2026, 10, 17);

    let a = ProgressStore::open_at(&path, "learner-a").unwrap();
    assert_eq!(a.record_key(), "learner-a");
    let mut doc = ProgressDocument::new(today);
    doc.total_xp = 99;
    a.save(&doc).unwrap();

    let b = ProgressStore::open_at(&path, "learner-b").unwrap();
    assert_eq!(b.load(today).unwrap().total_xp, 0);
    assert_eq!(a.load(today).unwrap().total_xp, 99);
}

#[test]
fn test_next_day_load_keeps_stored_state() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("progress.db");
    let store = ProgressStore::open_at(&path, DEFAULT_RECORD_KEY).unwrap();

    let saturday = day(2026, 10, 17);
    let mut doc = ProgressDocument::new(saturday);
    doc.weekly_goal.completed_lesson_ids_this_week.insert("1-what-is-ai".to_string());
    doc.weekly_goal.completed_lessons = 1;
    store.save(&doc).unwrap();

    // Sunday is the same week; Monday is not.
    let sunday = store.load(day(2026, 10, 18)).unwrap();
    assert_eq!(sunday.weekly_goal.completed_lessons, 1);
    let monday = store.load(day(2026, 10, 19)).unwrap();
    assert_eq!(monday.weekly_goal.completed_lessons, 0);
    assert_eq!(monday.weekly_goal.week_start, day(2026, 10, 19));
}

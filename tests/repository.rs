//! Tests for flow repositories and debounced saving.
mod common;
use common::*;
use std::fs;
use std::time::{Duration, Instant};
use vejviser::prelude::*;
use vejviser::repository::SaveDebouncer;

#[test]
fn test_in_memory_repository_upserts() {
    let mut repository = InMemoryFlowRepository::new();
    assert!(repository.list().expect("list").is_empty());

    repository.put(create_abc_flow()).expect("put");
    repository.put(create_color_flow()).expect("put");

    let mut renamed = create_abc_flow();
    renamed.name = "Renamed".to_string();
    repository.put(renamed).expect("put");

    let flows = repository.list().expect("list");
    assert_eq!(flows.len(), 2);
    assert_eq!(flows[0].name, "Renamed");
    assert_eq!(
        repository.get("colors").expect("get").map(|f| f.name),
        Some("Colors".to_string())
    );
    assert_eq!(repository.get("missing").expect("get"), None);
}

#[test]
fn test_file_repository_persists_flows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("flows.json");

    let mut repository = JsonFileFlowRepository::new(&path);
    assert!(repository.list().expect("missing file is empty").is_empty());

    repository.put(create_abc_flow()).expect("put");
    repository.put(create_color_flow()).expect("put");

    let reopened = JsonFileFlowRepository::new(&path);
    let flows = reopened.list().expect("list");
    assert_eq!(flows.len(), 2);
    assert_eq!(flows[0], create_abc_flow());
    assert_eq!(reopened.get("colors").expect("get"), Some(create_color_flow()));
}

#[test]
fn test_file_repository_reports_corruption() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("flows.json");
    fs::write(&path, "{ broken").expect("write");

    let repository = JsonFileFlowRepository::new(&path);
    assert!(matches!(
        repository.list(),
        Err(RepositoryError::Corrupt { .. })
    ));
}

#[test]
fn test_empty_file_is_empty_store() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("flows.json");
    fs::write(&path, "").expect("write");

    let repository = JsonFileFlowRepository::new(&path);
    assert!(repository.list().expect("list").is_empty());
}

#[test]
fn test_debouncer_waits_for_quiet_period() {
    let mut debouncer = SaveDebouncer::with_delay(Duration::from_millis(100));
    let start = Instant::now();

    debouncer.touch(create_abc_flow(), start);
    assert!(debouncer.poll(start + Duration::from_millis(50)).is_none());

    let mut edited = create_abc_flow();
    edited.name = "Edited".to_string();
    debouncer.touch(edited, start + Duration::from_millis(80));
    // The second edit restarted the timer.
    assert!(debouncer.poll(start + Duration::from_millis(150)).is_none());

    let saved = debouncer
        .poll(start + Duration::from_millis(180))
        .expect("deadline passed");
    assert_eq!(saved.name, "Edited");
    assert!(!debouncer.is_pending());
}

#[test]
fn test_debouncer_saves_into_repository() {
    let mut repository = InMemoryFlowRepository::new();
    let mut debouncer = SaveDebouncer::new();
    let start = Instant::now();

    assert!(!debouncer.save_due(start, &mut repository).expect("nothing pending"));

    debouncer.touch(create_abc_flow(), start);
    assert!(!debouncer.save_due(start, &mut repository).expect("not yet due"));
    assert!(
        debouncer
            .save_due(start + Duration::from_secs(1), &mut repository)
            .expect("save")
    );
    assert_eq!(repository.list().expect("list").len(), 1);
}

#[test]
fn test_debouncer_flush() {
    let mut debouncer = SaveDebouncer::new();
    assert!(debouncer.flush().is_none());
    debouncer.touch(create_abc_flow(), Instant::now());
    assert_eq!(debouncer.flush(), Some(create_abc_flow()));
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-ZoneManager-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of zone-manager and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rstest::rstest;
use serde_json::{json, Value};

use super::{LoadOutcome, SaveOutcome, SpaceError, SpaceSummary, StorePhase, ZoneStore};
use crate::model::fixtures::{hallway_space, home_document};
use crate::model::{Document, Space, Zone, ZoneField, DATA_VERSION};
use crate::store::{DocumentFile, StoreError};

/// In-memory stand-in for the config file with optional delay and failure injection.
#[derive(Debug, Default)]
struct MemoryFile {
    contents: Mutex<Option<Value>>,
    writes: Mutex<Vec<Value>>,
    delay: Duration,
    fail_writes: bool,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MemoryFile {
    fn with_contents(raw: Value) -> Self {
        Self {
            contents: Mutex::new(Some(raw)),
            ..Self::default()
        }
    }

    fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn failing(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    fn contents(&self) -> Option<Value> {
        self.contents.lock().unwrap().clone()
    }

    fn writes(&self) -> Vec<Value> {
        self.writes.lock().unwrap().clone()
    }

    fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl DocumentFile for MemoryFile {
    fn path(&self) -> &Path {
        Path::new("memory://zone_manager.json")
    }

    fn read(&self) -> Option<Value> {
        self.enter();
        let raw = self.contents();
        self.leave();
        raw
    }

    fn write(&self, document: &Document) -> Result<(), StoreError> {
        self.enter();
        let result = if self.fail_writes {
            Err(StoreError::Io {
                path: PathBuf::from("memory://zone_manager.json"),
                source: std::io::Error::other("disk full"),
            })
        } else {
            let value = serde_json::to_value(document).unwrap();
            self.writes.lock().unwrap().push(value.clone());
            *self.contents.lock().unwrap() = Some(value);
            Ok(())
        };
        self.leave();
        result
    }
}

fn store_over(file: MemoryFile) -> (ZoneStore, Arc<MemoryFile>) {
    let file = Arc::new(file);
    let store = ZoneStore::from_shared(file.clone());
    (store, file)
}

fn canonical(document: &Document) -> Value {
    serde_json::to_value(document).unwrap()
}

#[tokio::test]
async fn load_without_file_creates_and_persists_empty_document() {
    let (store, file) = store_over(MemoryFile::default());
    assert_eq!(store.phase(), StorePhase::Unloaded);

    assert_eq!(store.load().await, LoadOutcome::Fresh);

    assert_eq!(store.phase(), StorePhase::Ready);
    assert_eq!(store.document(), Document::default());
    assert_eq!(file.contents(), Some(json!({"version": DATA_VERSION, "spaces": {}})));
}

#[tokio::test]
async fn load_canonical_file_does_not_rewrite_it() {
    let document = home_document();
    let (store, file) = store_over(MemoryFile::with_contents(canonical(&document)));

    assert_eq!(store.load().await, LoadOutcome::FromDisk);
    assert_eq!(store.document(), document);
    assert!(file.writes().is_empty());
}

#[tokio::test]
async fn load_repairs_and_rewrites_malformed_content() {
    let raw = json!({
        "version": "v0.1",
        "spaces": {
            "wing_a": {"zones": {"sensor.a": {"neighbors": ["sensor.b", "", 4]}}},
            "": {"zones": {}}
        },
        "stale": true
    });
    let (store, file) = store_over(MemoryFile::with_contents(raw));

    assert_eq!(store.load().await, LoadOutcome::Repaired);

    let document = store.document();
    let zone = &document.spaces()["wing_a"].zones()["sensor.a"];
    assert_eq!(zone.neighbors(), ["sensor.b"]);
    assert_eq!(file.writes().len(), 1);
    assert_eq!(file.contents(), Some(canonical(&store.document())));
}

#[tokio::test]
async fn load_is_idempotent_without_intervening_writes() {
    let (store, file) = store_over(MemoryFile::with_contents(canonical(&home_document())));

    store.load().await;
    let first = store.document();
    store.load().await;
    assert_eq!(store.document(), first);
    assert_eq!(store.list_spaces().len(), 2);
    assert!(file.writes().is_empty());
}

#[tokio::test]
async fn reload_discards_unsaved_in_memory_changes() {
    let (store, _file) = store_over(MemoryFile::with_contents(canonical(&home_document())));
    store.load().await;

    store.create_space("scratch").unwrap();
    assert!(store.get_space("scratch").is_some());

    assert_eq!(store.reload().await, LoadOutcome::FromDisk);
    assert!(store.get_space("scratch").is_none());
}

#[tokio::test]
async fn load_timeout_falls_back_to_empty_document() {
    let file =
        MemoryFile::with_contents(canonical(&home_document())).slow(Duration::from_millis(300));
    let (store, _file) = store_over(file);
    let store = store.with_io_timeout(Duration::from_millis(20));

    assert_eq!(store.load().await, LoadOutcome::Fresh);
    assert_eq!(store.document(), Document::default());
    assert_eq!(store.phase(), StorePhase::Ready);
}

#[tokio::test]
async fn save_timeout_keeps_in_memory_document() {
    let (store, _file) = store_over(MemoryFile::default().slow(Duration::from_millis(300)));
    let store = store.with_io_timeout(Duration::from_millis(20));
    store.save_space("wing_a", hallway_space()).unwrap();

    assert_eq!(store.save().await, SaveOutcome::TimedOut);
    assert_eq!(store.phase(), StorePhase::Ready);
    assert_eq!(store.get_space("wing_a"), Some(hallway_space()));
}

#[tokio::test]
async fn save_failure_is_reported_without_touching_memory() {
    let (store, file) = store_over(MemoryFile::default().failing());
    store.create_space("wing_a").unwrap();
    let before = store.document();

    assert_eq!(store.save().await, SaveOutcome::Failed);
    assert_eq!(store.document(), before);
    assert_eq!(store.phase(), StorePhase::Ready);
    assert!(file.contents().is_none());
}

#[tokio::test]
async fn save_persists_normalized_document() {
    let (store, file) = store_over(MemoryFile::default());
    store.create_space("wing_a").unwrap();

    assert!(store.save().await.is_saved());
    assert_eq!(
        file.contents(),
        Some(json!({"version": DATA_VERSION, "spaces": {"wing_a": {"zones": {}}}}))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_saves_never_overlap_their_io() {
    let (store, file) = store_over(MemoryFile::default().slow(Duration::from_millis(30)));
    let store = Arc::new(store);
    store.create_space("first").unwrap();

    let a = tokio::spawn({
        let store = store.clone();
        async move { store.save().await }
    });
    let b = tokio::spawn({
        let store = store.clone();
        async move {
            store.create_space("second").unwrap();
            store.save().await
        }
    });
    assert!(a.await.unwrap().is_saved());
    assert!(b.await.unwrap().is_saved());

    assert_eq!(file.max_in_flight.load(Ordering::SeqCst), 1);
    let only_first = json!({"version": DATA_VERSION, "spaces": {"first": {"zones": {}}}});
    let both = json!({
        "version": DATA_VERSION,
        "spaces": {"first": {"zones": {}}, "second": {"zones": {}}}
    });
    for written in file.writes() {
        assert!(written == only_first || written == both, "mixed payload: {written}");
    }
    assert_eq!(file.contents(), Some(both));
}

#[tokio::test]
async fn edit_during_save_is_not_lost() {
    let (store, _file) = store_over(MemoryFile::default().slow(Duration::from_millis(50)));
    let store = Arc::new(store);

    let saving = tokio::spawn({
        let store = store.clone();
        async move { store.save().await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    store.create_space("late").unwrap();

    assert!(saving.await.unwrap().is_saved());
    assert!(store.get_space("late").is_some());
}

#[test]
fn list_spaces_orders_case_insensitively_with_counts() {
    let (store, _file) = store_over(MemoryFile::default());
    store.create_space("beta").unwrap();
    store.save_space("Alpha", hallway_space()).unwrap();
    store.create_space("gamma").unwrap();
    store.create_space("Delta").unwrap();

    let spaces = store.list_spaces();
    let names = spaces.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["Alpha", "beta", "Delta", "gamma"]);
    assert_eq!(
        spaces[0],
        SpaceSummary {
            name: "Alpha".to_owned(),
            zones_count: 2
        }
    );
}

#[test]
fn create_existing_space_is_a_distinct_error() {
    let (store, _file) = store_over(MemoryFile::default());
    store.create_space("wing_a").unwrap();

    let err = store.create_space("wing_a").unwrap_err();
    assert_eq!(err, SpaceError::Exists { space: "wing_a".to_owned() });
    assert_eq!(err.code(), "space_exists");
}

#[test]
fn delete_missing_space_is_a_distinct_error() {
    let (store, _file) = store_over(MemoryFile::default());

    let err = store.delete_space("nowhere").unwrap_err();
    assert_eq!(err.code(), "space_not_found");
    assert_eq!(err.space(), "nowhere");
}

#[test]
fn delete_leaves_other_spaces_untouched() {
    let (store, _file) = store_over(MemoryFile::default());
    store.save_space("keep", hallway_space()).unwrap();
    store.create_space("drop").unwrap();

    store.delete_space("drop").unwrap();
    assert!(store.get_space("drop").is_none());
    assert_eq!(store.get_space("keep"), Some(hallway_space()));
}

#[rstest]
#[case::empty("")]
#[case::blank("   ")]
fn blank_space_names_are_rejected(#[case] name: &str) {
    let (store, _file) = store_over(MemoryFile::default());

    assert_eq!(store.create_space(name).unwrap_err().code(), "invalid_space_name");
    assert_eq!(store.save_space(name, Space::new()).unwrap_err().code(), "invalid_space_name");
    assert!(store.list_spaces().is_empty());
}

#[test]
fn save_space_replaces_and_normalizes() {
    let (store, _file) = store_over(MemoryFile::default());
    store.save_space("wing_a", hallway_space()).unwrap();

    let replacement = Space::new()
        .with_zone("sensor.x", Zone::new().with(ZoneField::LightGroup, ["light.x", " "]))
        .with_zone("", Zone::new());
    store.save_space("wing_a", replacement).unwrap();

    let stored = store.get_space("wing_a").unwrap();
    assert_eq!(stored.zones().keys().collect::<Vec<_>>(), ["sensor.x"]);
    assert_eq!(stored.zones()["sensor.x"].light_group(), ["light.x"]);
}

#[test]
fn find_zone_scans_spaces_in_listing_order() {
    let (store, _file) = store_over(MemoryFile::default());
    let shared = Zone::new().with(ZoneField::LightGroup, ["light.b"]);
    store.save_space("b_space", Space::new().with_zone("sensor.shared", shared)).unwrap();
    let first = Zone::new().with(ZoneField::LightGroup, ["light.a"]);
    store.save_space("A_space", Space::new().with_zone("sensor.shared", first.clone())).unwrap();

    let found = store.find_zone("sensor.shared").unwrap();
    assert_eq!(found.space, "A_space");
    assert_eq!(found.zone_key, "sensor.shared");
    assert_eq!(found.zone, first);
    assert!(store.find_zone("sensor.unknown").is_none());
}

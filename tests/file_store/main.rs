//! Integration tests for file-backed stores: restart round trips and
//! failure handling against a real JSON file.


use std::fs;
use std::sync::Arc;
use std::thread;

use note::Note;
use record_store::{
    ConfigParams, Configurable, FileStore, Identifiable, IdentifiableFileStore, PersistenceError,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn open_on_missing_file_is_empty_and_open() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let store = IdentifiableFileStore::<Note>::from_path(dir.path().join("notes.json"));

    store.open("open").unwrap();
    assert!(store.is_open());
    assert!(store.is_empty().unwrap());
}

#[test]
fn restart_reproduces_collection_in_order() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");

    let created: Vec<Note> = {
        let store = IdentifiableFileStore::<Note>::from_path(&path);
        store.open("restart").unwrap();
        let created = ["first", "second", "third"]
            .iter()
            .map(|text| store.create("restart", Note::new(text)).unwrap())
            .collect::<Vec<_>>();

        let mut second = created[1].clone();
        second.tags.push("edited".into());
        store.update("restart", second).unwrap().unwrap();
        store.close("restart").unwrap();
        created
    };

    let reopened = IdentifiableFileStore::<Note>::from_path(&path);
    reopened.open("restart").unwrap();
    let notes = reopened.get_list_by_filter("restart", None, None).unwrap();

    let keys: Vec<&str> = notes.iter().map(|note| note.id()).collect();
    let expected: Vec<&str> = created.iter().map(|note| note.id()).collect();
    assert_eq!(keys, expected);
    assert_eq!(notes[1].tags, vec!["edited".to_string()]);
}

#[test]
fn every_mutation_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    let store = IdentifiableFileStore::<Note>::from_path(&path);
    store.open("persist").unwrap();

    let note = store.create("persist", Note::new("kept")).unwrap();
    let on_disk: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk[0]["key"], note.key.as_str());
    assert_eq!(on_disk[0]["text"], "kept");

    store.delete_by_id("persist", &note.key).unwrap();
    let on_disk: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, serde_json::json!([]));
}

#[test]
fn clear_persists_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    let store = IdentifiableFileStore::<Note>::from_path(&path);
    store.open("clear").unwrap();
    store.create("clear", Note::new("gone")).unwrap();

    store.clear("clear").unwrap();
    store.clear("clear").unwrap();

    let reopened = IdentifiableFileStore::<Note>::from_path(&path);
    reopened.open("clear").unwrap();
    assert!(reopened.is_empty().unwrap());
}

#[test]
fn corrupt_file_fails_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    fs::write(&path, "not json").unwrap();

    let store = IdentifiableFileStore::<Note>::from_path(&path);
    assert!(matches!(store.open("corrupt"), Err(PersistenceError::Load(_))));
    assert!(!store.is_open());
}

#[test]
fn mismatched_records_fail_open_without_terminating() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    fs::write(&path, r#"[{"key": "1", "text": "ok"}, {"key": "2"}]"#).unwrap();

    let store = IdentifiableFileStore::<Note>::from_path(&path);
    let err = store.open("mismatch").unwrap_err();
    assert!(matches!(err, PersistenceError::Conversion { index: 1, .. }));
    assert!(!store.is_open());
    assert!(store.is_empty().unwrap());
}

#[test]
fn configured_path_and_page_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configured.json");
    let store = IdentifiableFileStore::<Note>::new(None);
    store
        .configure(&ConfigParams::from_tuples(&[
            ("path", path.to_str().unwrap()),
            ("options.max_page_size", "3"),
        ]))
        .unwrap();

    store.open("config").unwrap();
    for i in 0..5 {
        store.create("config", Note::new(&i.to_string())).unwrap();
    }
    let page = store.get_page_by_filter("config", None, None, None).unwrap();
    assert_eq!(page.data.len(), 3);
    store.close("config").unwrap();
    assert!(path.exists());
}

#[test]
fn plain_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lines.json");

    let store = FileStore::<String>::from_path(&path);
    store.open("plain").unwrap();
    store
        .with_items_mut("plain", |items| {
            items.push("alpha".to_string());
            items.push("beta".to_string());
        })
        .unwrap();
    store.close("plain").unwrap();
    assert!(!store.is_open());

    let reopened = FileStore::<String>::from_path(&path);
    reopened.open("plain").unwrap();
    assert_eq!(
        reopened.with_items(|items| items.to_vec()).unwrap(),
        vec!["alpha".to_string(), "beta".to_string()]
    );
}

#[test]
fn overlapping_saves_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lines.json");
    let store = FileStore::<String>::from_path(&path);
    store.open("overlap").unwrap();
    store
        .with_items_mut("overlap", |items| {
            items.extend((0..20_000).map(|i| format!("line {}", i)));
        })
        .unwrap();

    let shared = Arc::new(store.store().clone());
    for _ in 0..10 {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&shared);
                thread::spawn(move || store.save("overlap"))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }
    }

    let on_disk: Vec<String> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk.len(), 20_000);
    assert_eq!(on_disk[19_999], "line 19999");
}

//! Integration tests for IdentifiableStore (CRUD, paging, concurrency).

mod dummy;

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use dummy::{Dummy, DummyStore};
use record_store::{IdentifiableStore, InMemoryPersister, PagingParams};

#[test]
fn crud_scenario() {
    let store = DummyStore::new();
    store.open("123").unwrap();

    let created = store.create("123", Dummy::new("ABC", "first")).unwrap();
    assert!(!created.id.is_empty());
    store.create("123", Dummy::new("XYZ", "second")).unwrap();

    let page = store.get_page_by_name("123", Some("ABC"), None).unwrap();
    assert_eq!(page.data, vec![created.clone()]);

    let mut changed = created.clone();
    changed.content = "changed".into();
    let updated = store.update("123", changed).unwrap().unwrap();
    assert_eq!(updated.content, "changed");

    let removed = store.delete_by_id("123", &created.id).unwrap();
    assert_eq!(removed.map(|d| d.id), Some(created.id.clone()));
    assert!(store.get_one_by_id("123", &created.id).unwrap().is_none());

    store.close("123").unwrap();
}

#[test]
fn paging_matches_filter_then_slice() {
    let store = DummyStore::new();
    for i in 0..25 {
        let name = if i % 2 == 0 { "even" } else { "odd" };
        store
            .create("paging", Dummy::new(name, &i.to_string()))
            .unwrap();
    }

    let all_even: Vec<Dummy> = store
        .get_page_by_name("paging", Some("even"), None)
        .unwrap()
        .data;
    assert_eq!(all_even.len(), 13);

    for skip in [0, 5, 12, 13, 20] {
        for take in [0, 1, 4, 13] {
            let page = store
                .get_page_by_name(
                    "paging",
                    Some("even"),
                    Some(PagingParams::new(Some(skip), Some(take), true)),
                )
                .unwrap();
            let expected: Vec<Dummy> =
                all_even.iter().skip(skip).take(take).cloned().collect();
            assert_eq!(page.data.len(), take.min(13usize.saturating_sub(skip)));
            assert_eq!(page.data, expected);
            assert_eq!(page.total, Some(13));
        }
    }
}

#[test]
fn concurrent_creates_get_unique_ids() {
    let store = Arc::new(IdentifiableStore::<Dummy>::with_persister(Arc::new(
        InMemoryPersister::new(),
    )));
    store.open("concurrent").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                (0..50)
                    .map(|i| {
                        store
                            .create(
                                "concurrent",
                                Dummy::new(&format!("worker{}", worker), &i.to_string()),
                            )
                            .unwrap()
                            .id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id));
        }
    }

    assert_eq!(ids.len(), 400);
    assert_eq!(store.len().unwrap(), 400);
}

#[test]
fn readers_never_see_partial_batches() {
    let store = IdentifiableStore::<Dummy>::in_memory();
    for i in 0..10 {
        store.create("seed", Dummy::new("batch", &i.to_string())).unwrap();
    }

    let reader = {
        let store = store.clone();
        thread::spawn(move || {
            for _ in 0..200 {
                let count = store
                    .get_count_by_filter("reader", Some(&|d: &Dummy| d.name == "batch"))
                    .unwrap();
                assert!(count == 10 || count == 0, "observed {} items", count);
            }
        })
    };

    store
        .delete_by_filter("writer", &|d: &Dummy| d.name == "batch")
        .unwrap();
    reader.join().unwrap();
    assert!(store.is_empty().unwrap());
}

#[test]
fn ids_stay_unique_across_create_and_set() {
    let store = IdentifiableStore::<Dummy>::in_memory();
    let a = store.create("uniq", Dummy::new("a", "")).unwrap();
    let b = store.set("uniq", Dummy::new("b", "")).unwrap();
    let mut a2 = a.clone();
    a2.name = "a2".into();
    store.set("uniq", a2).unwrap();
    assert!(store.create("uniq", b.clone()).is_err());

    let all = store.get_list_by_filter("uniq", None, None).unwrap();
    let ids: HashSet<&str> = all.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(all.len(), 2);
    assert_eq!(ids.len(), 2);
    assert_eq!(all[0].name, "a2");
}

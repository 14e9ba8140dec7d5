//! Store Concurrency Tests
//!
//! Tests for the reader/writer facade:
//! - Concurrent inserts receive unique, contiguous identifiers
//! - Readers never observe a partially applied mutation
//! - Capacity holds under contention

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use skipdb::entity::{Task, TaskStatus};
use skipdb::store::{PageWindow, RecordStore, Store, StoreConfig, StoreError};

// =============================================================================
// Helper Functions
// =============================================================================

fn shared_store(max_entries: usize) -> Arc<Store<RecordStore<Task>>> {
    Arc::new(Store::new(StoreConfig::new(max_entries, 12)).unwrap())
}

// =============================================================================
// Identifier Tests
// =============================================================================

/// N callers inserting one record each get ids forming exactly [1, N].
#[test]
fn test_concurrent_inserts_contiguous_ids() {
    const CALLERS: usize = 64;

    let store = shared_store(512);
    let barrier = Arc::new(Barrier::new(CALLERS));

    let handles: Vec<_> = (0..CALLERS)
        .map(|i| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store
                    .insert(Task::new(format!("task-{}", i), TaskStatus::Incompleted))
                    .unwrap()
            })
        })
        .collect();

    let ids: HashSet<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let expected: HashSet<u64> = (1..=CALLERS as u64).collect();
    assert_eq!(ids, expected);
    assert_eq!(store.count(), CALLERS);
}

/// Every stored record carries the id its insert returned.
#[test]
fn test_concurrent_inserts_stamp_matching_ids() {
    let store = shared_store(1024);

    let handles: Vec<_> = (0..8)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                (0..50)
                    .map(|i| {
                        let name = format!("w{}-{}", w, i);
                        let id = store.insert(Task::new(name.clone(), TaskStatus::Incompleted)).unwrap();
                        (id, name)
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for (id, name) in handle.join().unwrap() {
            let stored = store.get(id).unwrap();
            assert_eq!(stored.id, id);
            assert_eq!(stored.name, name);
        }
    }
}

// =============================================================================
// Reader Consistency Tests
// =============================================================================

/// Paginated totals always agree with the items they were read with.
#[test]
fn test_readers_see_consistent_snapshots() {
    let store = shared_store(2048);
    let mut handles = Vec::new();

    for w in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..200 {
                let id = store
                    .insert(Task::new(format!("w{}-{}", w, i), TaskStatus::Incompleted))
                    .unwrap();
                if i % 3 == 0 {
                    store.delete(id).unwrap();
                }
            }
        }));
    }

    for _ in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for _ in 0..200 {
                let page = store.paginate(PageWindow::new(1, 2048).unwrap());
                assert_eq!(page.items.len(), page.total);
                assert!(page.items.windows(2).all(|w| w[0].id < w[1].id));
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.count(), 4 * (200 - 67));
    store.verify().unwrap();
}

/// Concurrent updates and deletes on disjoint ids leave the store valid.
#[test]
fn test_concurrent_updates_and_deletes() {
    let store = shared_store(512);
    for i in 0..400 {
        store
            .insert(Task::new(format!("t{}", i), TaskStatus::Incompleted))
            .unwrap();
    }

    let updater = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for id in (1..=400).filter(|id| id % 2 == 0) {
                store
                    .update(id, Task::new("done", TaskStatus::Completed))
                    .unwrap();
            }
        })
    };
    let deleter = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for id in (1..=400).filter(|id| id % 2 == 1) {
                store.delete(id).unwrap();
            }
        })
    };

    updater.join().unwrap();
    deleter.join().unwrap();

    let remaining = store.page(1, 400);
    assert_eq!(remaining.len(), 200);
    assert!(remaining.iter().all(|t| t.id % 2 == 0 && t.is_completed()));
    store.verify().unwrap();
}

// =============================================================================
// Capacity Tests
// =============================================================================

/// Under contention exactly `max_entries` inserts succeed.
#[test]
fn test_capacity_under_contention() {
    let store = shared_store(100);

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut ok = 0;
                let mut rejected = 0;
                for _ in 0..20 {
                    match store.insert(Task::new("t", TaskStatus::Incompleted)) {
                        Ok(_) => ok += 1,
                        Err(StoreError::CapacityExceeded { .. }) => rejected += 1,
                        Err(e) => panic!("unexpected error: {}", e),
                    }
                }
                (ok, rejected)
            })
        })
        .collect();

    let (ok, rejected) = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .fold((0, 0), |acc, (o, r)| (acc.0 + o, acc.1 + r));

    assert_eq!(ok, 100);
    assert_eq!(rejected, 100);
    assert_eq!(store.count(), 100);

    let ids: Vec<u64> = store.page(1, 100).iter().map(|t| t.id).collect();
    assert_eq!(ids, (1..=100).collect::<Vec<u64>>());

    let metrics = store.metrics();
    assert_eq!(metrics.inserts, 100);
    assert_eq!(metrics.inserts_rejected, 100);
}

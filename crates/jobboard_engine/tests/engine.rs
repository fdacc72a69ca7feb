use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use jobboard_core::Job;
use jobboard_engine::{
    BookmarkStore, EngineEvent, EngineHandle, FailureKind, FeedPage, FeedSource, FetchError,
    KeyValueStore, MemoryKeyValueStore, ToggleChange, BOOKMARKS_KEY,
};
use pretty_assertions::assert_eq;
use serde_json::Value;

const WAIT: Duration = Duration::from_secs(5);

/// Serves pages of the given sizes, then empty pages; page 0 is never valid.
struct ScriptedFeed {
    sizes: Vec<usize>,
    calls: AtomicUsize,
}

impl ScriptedFeed {
    fn new(sizes: Vec<usize>) -> Self {
        Self {
            sizes,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl FeedSource for ScriptedFeed {
    async fn fetch_page(&self, page: u32) -> Result<FeedPage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let Some(index) = (page as usize).checked_sub(1) else {
            return Err(FetchError {
                kind: FailureKind::HttpStatus(400),
                message: "page 0".to_string(),
            });
        };
        let size = self.sizes.get(index).copied().unwrap_or(0);
        let base = i64::from(page) * 1000;
        Ok(FeedPage {
            page,
            jobs: (0..size as i64)
                .map(|n| Job::new(base + n, "Acme", format!("Job {n}")))
                .collect(),
            skipped: 0,
        })
    }
}

fn engine_with(
    feed: Arc<ScriptedFeed>,
    memory: Arc<MemoryKeyValueStore>,
) -> EngineHandle {
    engine_logging::initialize_for_tests();
    EngineHandle::with_parts(feed, BookmarkStore::new(Box::new(memory))).expect("engine")
}

#[test]
fn fetch_page_reports_result_for_that_page() {
    let feed = Arc::new(ScriptedFeed::new(vec![10, 4]));
    let engine = engine_with(feed.clone(), Arc::new(MemoryKeyValueStore::new()));

    engine.fetch_page(2);
    match engine.recv_timeout(WAIT).expect("event") {
        EngineEvent::PageFetched { page, result } => {
            assert_eq!(page, 2);
            assert_eq!(result.unwrap().jobs.len(), 4);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(feed.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn fetch_failure_is_delivered_as_event() {
    let feed = Arc::new(ScriptedFeed::new(vec![1]));
    let engine = engine_with(feed, Arc::new(MemoryKeyValueStore::new()));

    engine.fetch_page(0);
    match engine.recv_timeout(WAIT).expect("event") {
        EngineEvent::PageFetched { result, .. } => {
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(400));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn back_to_back_toggles_are_applied_in_order_without_losing_updates() {
    let memory = Arc::new(MemoryKeyValueStore::new());
    let engine = engine_with(Arc::new(ScriptedFeed::new(Vec::new())), memory.clone());

    for id in 1..=20 {
        engine.toggle_bookmark(Job::new(id, "Acme", "Job"));
    }
    // Toggle one of them back off, also without waiting.
    engine.toggle_bookmark(Job::new(7, "Acme", "Job"));

    let mut changes = Vec::new();
    for _ in 0..21 {
        match engine.recv_timeout(WAIT).expect("event") {
            EngineEvent::BookmarkToggled { job_id, result } => {
                changes.push((job_id, result.expect("toggle ok").change));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert_eq!(changes.last(), Some(&(7, ToggleChange::Removed(1))));

    let raw = memory.get(BOOKMARKS_KEY).unwrap().unwrap();
    let stored: Vec<Value> = serde_json::from_str(&raw).unwrap();
    let ids: Vec<i64> = stored.iter().filter_map(|v| v["id"].as_i64()).collect();
    let expected: Vec<i64> = (1..=20).filter(|id| *id != 7).collect();
    assert_eq!(ids, expected);
}

#[test]
fn load_and_overwrite_round_trip_through_engine() {
    let memory = Arc::new(MemoryKeyValueStore::with_value(
        BOOKMARKS_KEY,
        r#"[{"id": 1}, {"id": 2}]"#,
    ));
    let engine = engine_with(Arc::new(ScriptedFeed::new(Vec::new())), memory.clone());

    engine.load_bookmarks();
    match engine.recv_timeout(WAIT).expect("event") {
        EngineEvent::BookmarksLoaded(outcome) => {
            assert_eq!(outcome.bookmarks.len(), 2);
            assert_eq!(outcome.diagnostic, None);
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.save_bookmarks(Vec::new());
    match engine.recv_timeout(WAIT).expect("event") {
        EngineEvent::BookmarksSaved { result } => assert!(result.unwrap().is_empty()),
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(memory.get(BOOKMARKS_KEY).unwrap().as_deref(), Some("[]"));
}

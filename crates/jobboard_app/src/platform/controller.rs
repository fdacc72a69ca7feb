use std::collections::VecDeque;

use engine_logging::engine_error;
use jobboard_core::{update, AppState, Msg};
use jobboard_engine::EngineHandle;

use super::effects::EffectRunner;

/// Owns the application state and drives it against the engine.
pub struct Controller {
    state: AppState,
    runner: EffectRunner,
}

impl Controller {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            state: AppState::new(),
            runner: EffectRunner::new(engine),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies `msg`, then keeps feeding engine results back in until nothing
    /// is outstanding. Returns whether anything visible changed.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        let mut inbox = VecDeque::from([msg]);
        loop {
            while let Some(msg) = inbox.pop_front() {
                self.apply(msg);
            }
            if !self.state.is_busy() {
                break;
            }
            match self.runner.next_msg() {
                Some(msg) => inbox.push_back(msg),
                None => {
                    engine_error!("Engine stopped while work was outstanding");
                    break;
                }
            }
        }
        self.state.consume_dirty()
    }

    fn apply(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use jobboard_core::Job;
    use jobboard_engine::{
        BookmarkStore, FailureKind, FeedPage, FeedSource, FetchError, MemoryKeyValueStore,
        BOOKMARKS_KEY,
    };

    use super::*;

    struct PagedFeed {
        sizes: Vec<usize>,
        calls: AtomicUsize,
        fail_next: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl FeedSource for PagedFeed {
        async fn fetch_page(&self, page: u32) -> Result<FeedPage, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_next.load(Ordering::SeqCst) > 0 {
                self.fail_next.fetch_sub(1, Ordering::SeqCst);
                return Err(FetchError {
                    kind: FailureKind::Network,
                    message: "connection reset".to_string(),
                });
            }
            let size = self.sizes.get(page as usize - 1).copied().unwrap_or(0);
            let base = i64::from(page) * 100;
            Ok(FeedPage {
                page,
                jobs: (0..size as i64)
                    .map(|n| Job::new(base + n, "Acme", format!("Job {n}")))
                    .collect(),
                skipped: 0,
            })
        }
    }

    fn controller(sizes: Vec<usize>, failures: usize, stored: &str) -> (Controller, Arc<PagedFeed>) {
        let feed = Arc::new(PagedFeed {
            sizes,
            calls: AtomicUsize::new(0),
            fail_next: AtomicUsize::new(failures),
        });
        let memory = MemoryKeyValueStore::with_value(BOOKMARKS_KEY, stored);
        let engine =
            EngineHandle::with_parts(feed.clone(), BookmarkStore::new(Box::new(memory))).unwrap();
        (Controller::new(engine), feed)
    }

    #[test]
    fn four_triggers_over_ten_ten_ten_zero_pages() {
        let (mut controller, feed) = controller(vec![10, 10, 10, 0], 0, "[]");

        assert!(controller.dispatch(Msg::FeedScreenMounted));
        for _ in 0..3 {
            controller.dispatch(Msg::ScrolledNearEnd);
        }
        assert_eq!(controller.state().jobs().len(), 30);
        assert!(!controller.state().has_more());
        assert_eq!(controller.state().next_page(), 4);
        assert_eq!(feed.calls.load(Ordering::SeqCst), 4);

        assert!(!controller.dispatch(Msg::ScrolledNearEnd));
        assert_eq!(controller.state().next_page(), 4);
        assert_eq!(controller.state().jobs().len(), 30);
        assert_eq!(feed.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn failed_page_is_retried_on_next_trigger() {
        let (mut controller, feed) = controller(vec![5], 1, "[]");

        controller.dispatch(Msg::FeedScreenMounted);
        assert!(controller.state().jobs().is_empty());
        assert!(controller.state().last_feed_error().is_some());
        assert_eq!(controller.state().next_page(), 1);

        controller.dispatch(Msg::ScrolledNearEnd);
        assert_eq!(controller.state().jobs().len(), 5);
        assert_eq!(feed.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn bookmark_toggle_round_trip_through_engine() {
        let (mut controller, _) = controller(vec![3], 0, "not json");

        controller.dispatch(Msg::FeedScreenMounted);
        assert!(controller.state().notice().is_some());
        assert!(controller.state().bookmarks().is_empty());

        controller.dispatch(Msg::BookmarkClicked { job_id: 101 });
        assert!(controller.state().bookmarks().contains(101));

        controller.dispatch(Msg::BookmarkClicked { job_id: 101 });
        assert!(!controller.state().bookmarks().contains(101));
        assert!(!controller.state().is_busy());
    }
}

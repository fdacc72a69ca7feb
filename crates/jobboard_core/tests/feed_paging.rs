use std::sync::Once;

use jobboard_core::{update, AppState, Effect, FeedFailure, Job, LoadedPage, Msg, FIRST_PAGE};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn page_of(page: u32, size: usize) -> LoadedPage {
    let base = i64::from(page) * 100;
    LoadedPage::new(
        (0..size as i64)
            .map(|n| Job::new(base + n, format!("Company {n}"), format!("Job {n}")))
            .collect(),
    )
}

/// Triggers a fetch and answers it with `result`, returning the effects of the trigger.
fn trigger_and_answer(
    state: AppState,
    result: impl FnOnce(u32) -> Result<LoadedPage, FeedFailure>,
) -> (AppState, Vec<Effect>) {
    let (state, effects) = update(state, Msg::ScrolledNearEnd);
    let page = effects.iter().find_map(|effect| match effect {
        Effect::FetchPage { page } => Some(*page),
        _ => None,
    });
    match page {
        Some(page) => {
            let (state, _) = update(
                state,
                Msg::PageLoaded {
                    page,
                    result: result(page),
                },
            );
            (state, effects)
        }
        None => (state, effects),
    }
}

#[test]
fn mount_requests_first_page_and_bookmarks() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::FeedScreenMounted);

    assert_eq!(
        effects,
        vec![Effect::LoadBookmarks, Effect::FetchPage { page: FIRST_PAGE }]
    );
    assert!(state.is_fetching());
    assert!(state.is_busy());
    assert!(state.view().feed.initial_loading);
    assert!(state.consume_dirty());
}

#[test]
fn pages_accumulate_until_an_empty_page() {
    init_logging();
    let sizes = [10, 10, 10, 0];
    let mut state = AppState::new();
    for size in sizes {
        let (next, effects) = trigger_and_answer(state, |page| Ok(page_of(page, size)));
        assert_eq!(effects.len(), 1);
        state = next;
    }

    assert_eq!(state.jobs().len(), 30);
    assert!(!state.has_more());
    assert_eq!(state.next_page(), 4);

    let (state, effects) = trigger_and_answer(state, |page| Ok(page_of(page, 10)));
    assert!(effects.is_empty());
    assert_eq!(state.next_page(), 4);
    assert_eq!(state.jobs().len(), 30);
    assert!(!state.is_busy());
}

#[test]
fn order_is_preserved_and_duplicates_are_kept() {
    init_logging();
    let (state, _) = trigger_and_answer(AppState::new(), |_| {
        Ok(LoadedPage::new(vec![Job::new(7, "A", "a"), Job::new(3, "B", "b")]))
    });
    let (state, _) = trigger_and_answer(state, |_| {
        Ok(LoadedPage::new(vec![Job::new(7, "A", "a again")]))
    });

    let ids: Vec<_> = state.jobs().iter().map(|job| job.id).collect();
    assert_eq!(ids, vec![7, 3, 7]);
}

#[test]
fn trigger_while_in_flight_is_ignored() {
    init_logging();
    let (state, first) = update(AppState::new(), Msg::ScrolledNearEnd);
    assert_eq!(first, vec![Effect::FetchPage { page: 1 }]);

    let (state, second) = update(state, Msg::ScrolledNearEnd);
    assert!(second.is_empty());
    assert_eq!(state.next_page(), 1);
    assert!(state.is_fetching());
}

#[test]
fn failure_keeps_cursor_and_allows_retry_of_same_page() {
    init_logging();
    let (state, _) = trigger_and_answer(AppState::new(), |page| Ok(page_of(page, 5)));
    let (state, _) = trigger_and_answer(state, |_| Err(FeedFailure::Timeout));

    assert_eq!(state.next_page(), 2);
    assert!(state.has_more());
    assert!(!state.is_fetching());
    assert_eq!(state.last_feed_error(), Some(&FeedFailure::Timeout));
    assert_eq!(
        state.view().feed.last_error.as_deref(),
        Some("page 2: request timed out")
    );

    let (state, effects) = trigger_and_answer(state, |page| Ok(page_of(page, 5)));
    assert_eq!(effects, vec![Effect::FetchPage { page: 2 }]);
    assert_eq!(state.jobs().len(), 10);
    assert_eq!(state.next_page(), 3);
    assert_eq!(state.last_feed_error(), None);
}

#[test]
fn page_of_only_undecodable_entries_does_not_end_the_feed() {
    init_logging();
    let (state, _) = trigger_and_answer(AppState::new(), |_| {
        Ok(LoadedPage {
            jobs: Vec::new(),
            skipped: 2,
        })
    });

    assert!(state.has_more());
    assert_eq!(state.next_page(), 2);
    assert!(state.jobs().is_empty());
}

#[test]
fn stale_page_result_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::PageLoaded {
            page: 1,
            result: Ok(page_of(1, 3)),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn rows_apply_fallbacks() {
    init_logging();
    let mut bare = Job::new(1, "", "");
    bare.company_name = None;
    let (state, _) = trigger_and_answer(AppState::new(), |_| Ok(LoadedPage::new(vec![bare])));

    let row = &state.view().feed.rows[0];
    assert_eq!(row.company, "No Name");
    assert_eq!(row.title, "No Title");
    assert_eq!(row.place, "N/A");
    assert_eq!(row.salary, "N/A");
    assert_eq!(row.phone, "N/A");
    assert!(!row.bookmarked);
}

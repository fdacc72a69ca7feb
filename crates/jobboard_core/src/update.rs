use crate::view_model::Route;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FeedScreenMounted => {
            state.clear_notice();
            state.navigate(Route::Feed);
            state.begin_storage_op();
            let mut effects = vec![Effect::LoadBookmarks];
            if let Some(page) = state.begin_fetch() {
                effects.push(Effect::FetchPage { page });
            }
            effects
        }
        Msg::FeedFocused => {
            state.navigate(Route::Feed);
            Vec::new()
        }
        Msg::ScrolledNearEnd => match state.begin_fetch() {
            Some(page) => vec![Effect::FetchPage { page }],
            None => Vec::new(),
        },
        Msg::PageLoaded { page, result } => {
            state.apply_page(page, result);
            Vec::new()
        }
        Msg::BookmarksScreenFocused => {
            state.clear_notice();
            state.navigate(Route::Bookmarks);
            state.begin_storage_op();
            vec![Effect::LoadBookmarks]
        }
        Msg::BookmarksLoaded {
            bookmarks,
            diagnostic,
        } => {
            state.apply_bookmarks_loaded(bookmarks, diagnostic);
            Vec::new()
        }
        Msg::BookmarkClicked { job_id } => match state.find_job(job_id).cloned() {
            Some(job) => {
                state.begin_storage_op();
                vec![Effect::ToggleBookmark { job }]
            }
            None => Vec::new(),
        },
        Msg::BookmarkToggled { result } | Msg::BookmarksSaved { result } => {
            state.apply_bookmarks_written(result);
            Vec::new()
        }
        Msg::ClearBookmarksClicked => {
            state.begin_storage_op();
            vec![Effect::SaveBookmarks {
                bookmarks: Vec::new(),
            }]
        }
        Msg::JobOpened { job_id } => {
            state.open_detail(job_id);
            Vec::new()
        }
        Msg::BackClicked => {
            state.navigate(Route::Feed);
            Vec::new()
        }
    };

    (state, effects)
}

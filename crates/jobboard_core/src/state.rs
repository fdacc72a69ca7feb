use crate::view_model::{
    AppViewModel, BookmarksViewModel, FeedViewModel, JobDetailParams, JobRowView, Route,
};
use crate::{BookmarkSet, FeedFailure, Job, JobId, LoadedPage};

/// First page requested from the feed.
pub const FIRST_PAGE: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
struct FeedState {
    jobs: Vec<Job>,
    next_page: u32,
    has_more: bool,
    fetching: bool,
    initial_loading: bool,
    last_error: Option<(u32, FeedFailure)>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            jobs: Vec::new(),
            next_page: FIRST_PAGE,
            has_more: true,
            fetching: false,
            initial_loading: true,
            last_error: None,
        }
    }
}

/// Everything the browser knows: accumulated feed, page cursor, bookmark
/// cache and current route. Owned by one controller and changed only through
/// [`crate::update`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    feed: FeedState,
    bookmarks: BookmarkSet,
    bookmarks_loaded: bool,
    storage_ops_in_flight: usize,
    route: Route,
    notice: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let feed_rows = self
            .feed
            .jobs
            .iter()
            .map(|job| JobRowView::from_job(job, self.bookmarks.contains(job.id)))
            .collect();
        let bookmark_rows: Vec<JobRowView> = self
            .bookmarks
            .records()
            .iter()
            .map(|job| JobRowView::from_job(job, true))
            .collect();

        AppViewModel {
            route: self.route.clone(),
            feed: FeedViewModel {
                rows: feed_rows,
                initial_loading: self.feed.initial_loading && self.feed.jobs.is_empty(),
                fetching_more: self.feed.fetching,
                has_more: self.feed.has_more,
                next_page: self.feed.next_page,
                last_error: self
                    .feed
                    .last_error
                    .as_ref()
                    .map(|(page, failure)| format!("page {page}: {failure}")),
            },
            bookmarks: BookmarksViewModel {
                loading: !self.bookmarks_loaded,
                empty: bookmark_rows.is_empty(),
                rows: bookmark_rows,
            },
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// A page request or a storage command is still outstanding.
    pub fn is_busy(&self) -> bool {
        self.feed.fetching || self.storage_ops_in_flight > 0
    }

    pub fn jobs(&self) -> &[Job] {
        &self.feed.jobs
    }

    pub fn next_page(&self) -> u32 {
        self.feed.next_page
    }

    pub fn has_more(&self) -> bool {
        self.feed.has_more
    }

    pub fn is_fetching(&self) -> bool {
        self.feed.fetching
    }

    pub fn last_feed_error(&self) -> Option<&FeedFailure> {
        self.feed.last_error.as_ref().map(|(_, failure)| failure)
    }

    pub fn bookmarks(&self) -> &BookmarkSet {
        &self.bookmarks
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Claims the fetch slot. Returns the page to request, or `None` while a
    /// fetch is in flight or once the feed has ended.
    pub(crate) fn begin_fetch(&mut self) -> Option<u32> {
        if self.feed.fetching || !self.feed.has_more {
            return None;
        }
        self.feed.fetching = true;
        self.mark_dirty();
        Some(self.feed.next_page)
    }

    pub(crate) fn apply_page(&mut self, page: u32, result: Result<LoadedPage, FeedFailure>) {
        if !self.feed.fetching || page != self.feed.next_page {
            return;
        }
        self.feed.fetching = false;
        self.feed.initial_loading = false;

        match result {
            Ok(loaded) if loaded.is_end_of_feed() => {
                self.feed.has_more = false;
                self.feed.last_error = None;
            }
            Ok(loaded) => {
                self.feed.jobs.extend(loaded.jobs);
                self.feed.next_page += 1;
                self.feed.last_error = None;
            }
            Err(failure) => {
                self.feed.last_error = Some((page, failure));
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn begin_storage_op(&mut self) {
        self.storage_ops_in_flight += 1;
    }

    fn finish_storage_op(&mut self) {
        self.storage_ops_in_flight = self.storage_ops_in_flight.saturating_sub(1);
    }

    pub(crate) fn apply_bookmarks_loaded(&mut self, records: Vec<Job>, diagnostic: Option<String>) {
        self.finish_storage_op();
        self.bookmarks = BookmarkSet::from_records(records);
        self.bookmarks_loaded = true;
        if diagnostic.is_some() {
            self.notice = diagnostic;
        }
        self.mark_dirty();
    }

    /// Result of a toggle or an overwrite: the list as it now sits in storage.
    pub(crate) fn apply_bookmarks_written(&mut self, result: Result<Vec<Job>, String>) {
        self.finish_storage_op();
        match result {
            Ok(records) => {
                self.bookmarks = BookmarkSet::from_records(records);
                self.bookmarks_loaded = true;
            }
            Err(message) => {
                self.notice = Some(format!("bookmarks not saved: {message}"));
            }
        }
        self.mark_dirty();
    }

    /// Finds a record by id in the feed first, then among the bookmarks.
    pub(crate) fn find_job(&self, id: JobId) -> Option<&Job> {
        self.feed
            .jobs
            .iter()
            .find(|job| job.id == id)
            .or_else(|| self.bookmarks.get(id))
    }

    pub(crate) fn navigate(&mut self, route: Route) {
        if self.route != route {
            self.route = route;
            self.mark_dirty();
        }
    }

    pub(crate) fn open_detail(&mut self, id: JobId) -> bool {
        let Some(params) = self
            .find_job(id)
            .map(|job| JobDetailParams::from_job(job).to_params())
        else {
            return false;
        };
        self.navigate(Route::Detail(params));
        true
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }
}

use std::fmt;

use crate::{Job, JobId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Job feed screen was entered.
    FeedScreenMounted,
    /// User went back to the feed screen without remounting it.
    FeedFocused,
    /// The visible part of the feed is close to its end.
    ScrolledNearEnd,
    /// Engine finished a page request.
    PageLoaded {
        page: u32,
        result: Result<LoadedPage, FeedFailure>,
    },
    /// Bookmarks screen gained focus.
    BookmarksScreenFocused,
    /// Engine read the stored bookmark list.
    BookmarksLoaded {
        bookmarks: Vec<Job>,
        diagnostic: Option<String>,
    },
    /// User tapped the bookmark icon of a job.
    BookmarkClicked { job_id: JobId },
    /// Engine finished a toggle; carries the list as written.
    BookmarkToggled { result: Result<Vec<Job>, String> },
    /// User asked to drop every bookmark.
    ClearBookmarksClicked,
    /// Engine finished a full-list overwrite.
    BookmarksSaved { result: Result<Vec<Job>, String> },
    /// User opened the detail view of a job.
    JobOpened { job_id: JobId },
    /// User left the detail view.
    BackClicked,
}

/// Records decoded from one feed page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedPage {
    pub jobs: Vec<Job>,
    /// Entries in the page that could not be decoded as jobs.
    pub skipped: usize,
}

impl LoadedPage {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs, skipped: 0 }
    }

    /// True only for a page that carried no entries at all; that marks the end of the feed.
    pub fn is_end_of_feed(&self) -> bool {
        self.jobs.is_empty() && self.skipped == 0
    }
}

/// Why a page request failed. Every variant is retryable by triggering the
/// same page again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedFailure {
    Network(String),
    Timeout,
    HttpStatus(u16),
    Malformed(String),
}

impl fmt::Display for FeedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedFailure::Network(message) => write!(f, "network error: {message}"),
            FeedFailure::Timeout => write!(f, "request timed out"),
            FeedFailure::HttpStatus(code) => write!(f, "server answered {code}"),
            FeedFailure::Malformed(message) => write!(f, "unreadable response: {message}"),
        }
    }
}

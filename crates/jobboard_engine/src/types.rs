use std::fmt;

use jobboard_core::{Job, JobId};

use crate::bookmarks::{LoadOutcome, ToggleOutcome};
use crate::storage::StoreError;

/// One decoded page of the remote feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    pub page: u32,
    pub jobs: Vec<Job>,
    /// Entries of the `results` array that did not decode as a job.
    pub skipped: usize,
}

impl FeedPage {
    pub fn empty(page: u32) -> Self {
        Self {
            page,
            jobs: Vec::new(),
            skipped: 0,
        }
    }
}

#[derive(Debug)]
pub enum EngineEvent {
    PageFetched {
        page: u32,
        result: Result<FeedPage, FetchError>,
    },
    BookmarksLoaded(LoadOutcome),
    BookmarkToggled {
        job_id: JobId,
        result: Result<ToggleOutcome, StoreError>,
    },
    BookmarksSaved {
        result: Result<Vec<Job>, StoreError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Parse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Parse => write!(f, "unparseable body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

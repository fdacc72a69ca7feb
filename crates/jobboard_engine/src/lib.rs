//! Jobboard engine: feed requests, bookmark storage and effect execution.
mod bookmarks;
mod engine;
mod fetch;
mod persist;
mod storage;
mod types;

pub use bookmarks::{
    BookmarkStore, LoadDiagnostic, LoadOutcome, ToggleChange, ToggleOutcome, BOOKMARKS_KEY,
};
pub use engine::{EngineConfig, EngineError, EngineHandle};
pub use fetch::{
    decode_feed_page, FeedSettings, FeedSource, ReqwestFeedSource, DEFAULT_FEED_URL,
};
pub use persist::{ensure_data_dir, AtomicFileWriter, PersistError};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StoreError};
pub use types::{EngineEvent, FailureKind, FeedPage, FetchError};

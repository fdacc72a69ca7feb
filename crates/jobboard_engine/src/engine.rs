use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use jobboard_core::{BookmarkSet, Job};
use thiserror::Error;

use crate::bookmarks::BookmarkStore;
use crate::fetch::{FeedSettings, FeedSource, ReqwestFeedSource};
use crate::storage::{FileKeyValueStore, StoreError};
use crate::{EngineEvent, FetchError};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub feed: FeedSettings,
    pub data_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("feed client setup failed: {0}")]
    Feed(#[from] FetchError),
    #[error("storage setup failed: {0}")]
    Storage(#[from] StoreError),
    #[error("engine worker failed to start: {0}")]
    Worker(#[from] io::Error),
}

enum EngineCommand {
    FetchPage { page: u32 },
    LoadBookmarks,
    ToggleBookmark { job: Job },
    SaveBookmarks { bookmarks: Vec<Job> },
}

/// Handle to the engine worker.
///
/// Page fetches run concurrently on the worker's runtime. Bookmark commands
/// run one after another on the worker thread in the order they were sent,
/// so every toggle sees the list written by the one before it.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        engine_info!(
            "Starting engine feed={} data_dir={:?}",
            config.feed.base_url,
            config.data_dir
        );
        let source = ReqwestFeedSource::new(config.feed)?;
        let store = FileKeyValueStore::new(config.data_dir)?;
        Self::with_parts(Arc::new(source), BookmarkStore::new(Box::new(store)))
    }

    pub fn with_parts(
        source: Arc<dyn FeedSource>,
        bookmarks: BookmarkStore,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("jobboard-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::FetchPage { page } => {
                            let source = source.clone();
                            let event_tx = event_tx.clone();
                            runtime.spawn(async move {
                                let result = source.fetch_page(page).await;
                                if let Err(err) = &result {
                                    engine_warn!("Feed page {} failed: {}", page, err);
                                }
                                let _ = event_tx.send(EngineEvent::PageFetched { page, result });
                            });
                        }
                        other => handle_storage_command(&bookmarks, other, &event_tx),
                    }
                }
                engine_debug!("Engine command channel closed; worker exiting");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_page(&self, page: u32) {
        self.send(EngineCommand::FetchPage { page });
    }

    pub fn load_bookmarks(&self) {
        self.send(EngineCommand::LoadBookmarks);
    }

    pub fn toggle_bookmark(&self, job: Job) {
        self.send(EngineCommand::ToggleBookmark { job });
    }

    pub fn save_bookmarks(&self, bookmarks: Vec<Job>) {
        self.send(EngineCommand::SaveBookmarks { bookmarks });
    }

    /// Blocks until the next event; `None` once the worker is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("Engine worker is gone; command dropped");
        }
    }
}

fn handle_storage_command(
    store: &BookmarkStore,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::LoadBookmarks => EngineEvent::BookmarksLoaded(store.load_all()),
        EngineCommand::ToggleBookmark { job } => {
            let job_id = job.id;
            EngineEvent::BookmarkToggled {
                job_id,
                result: store.toggle(job),
            }
        }
        EngineCommand::SaveBookmarks { bookmarks } => {
            let set = BookmarkSet::from_records(bookmarks);
            EngineEvent::BookmarksSaved {
                result: store.save_all(&set).map(|()| set.into_records()),
            }
        }
        EngineCommand::FetchPage { .. } => return,
    };
    let _ = event_tx.send(event);
}

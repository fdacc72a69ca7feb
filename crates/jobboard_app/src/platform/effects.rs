use engine_logging::{engine_info, engine_warn};
use jobboard_core::{Effect, FeedFailure, LoadedPage, Msg};
use jobboard_engine::{EngineEvent, EngineHandle, FailureKind, FetchError};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage { page } => {
                    engine_info!("FetchPage page={}", page);
                    self.engine.fetch_page(page);
                }
                Effect::LoadBookmarks => self.engine.load_bookmarks(),
                Effect::ToggleBookmark { job } => {
                    engine_info!("ToggleBookmark job_id={}", job.id);
                    self.engine.toggle_bookmark(job);
                }
                Effect::SaveBookmarks { bookmarks } => {
                    engine_info!("SaveBookmarks count={}", bookmarks.len());
                    self.engine.save_bookmarks(bookmarks);
                }
            }
        }
    }

    /// Blocks for the next engine event and turns it into a message.
    pub fn next_msg(&self) -> Option<Msg> {
        self.engine.recv().map(event_to_msg)
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { page, result } => Msg::PageLoaded {
            page,
            result: result
                .map(|fetched| LoadedPage {
                    jobs: fetched.jobs,
                    skipped: fetched.skipped,
                })
                .map_err(|err| map_failure(&err)),
        },
        EngineEvent::BookmarksLoaded(outcome) => Msg::BookmarksLoaded {
            bookmarks: outcome.bookmarks.into_records(),
            diagnostic: outcome.diagnostic.map(|diagnostic| diagnostic.to_string()),
        },
        EngineEvent::BookmarkToggled { job_id, result } => Msg::BookmarkToggled {
            result: result
                .map(|outcome| outcome.bookmarks.into_records())
                .map_err(|err| {
                    engine_warn!("Bookmark toggle for job {} failed: {}", job_id, err);
                    err.to_string()
                }),
        },
        EngineEvent::BookmarksSaved { result } => Msg::BookmarksSaved {
            result: result.map_err(|err| {
                engine_warn!("Bookmark overwrite failed: {}", err);
                err.to_string()
            }),
        },
    }
}

fn map_failure(err: &FetchError) -> FeedFailure {
    match &err.kind {
        FailureKind::Timeout => FeedFailure::Timeout,
        FailureKind::HttpStatus(code) => FeedFailure::HttpStatus(*code),
        FailureKind::Parse | FailureKind::TooLarge { .. } => {
            FeedFailure::Malformed(err.message.clone())
        }
        FailureKind::InvalidUrl | FailureKind::Network => FeedFailure::Network(err.message.clone()),
    }
}

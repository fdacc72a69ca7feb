//! Jobboard core: domain records, pure state machine and view-model helpers.
mod bookmarks;
mod effect;
mod job;
mod msg;
mod state;
mod update;
mod view_model;

pub use bookmarks::BookmarkSet;
pub use effect::Effect;
pub use job::{or_fallback, Job, JobId, PrimaryDetails, NOT_AVAILABLE, NO_COMPANY, NO_TITLE};
pub use msg::{FeedFailure, LoadedPage, Msg};
pub use state::{AppState, FIRST_PAGE};
pub use update::update;
pub use view_model::{
    AppViewModel, BookmarksViewModel, FeedViewModel, JobDetailParams, JobRowView, Route,
    RouteParams,
};

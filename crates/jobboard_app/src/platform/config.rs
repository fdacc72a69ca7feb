use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use jobboard_engine::{EngineConfig, FeedSettings, DEFAULT_FEED_URL};

use super::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(
    name = "jobboard",
    about = "Browse a paginated job feed and keep local bookmarks"
)]
pub struct Cli {
    /// Feed endpoint; `page=<n>` is appended to it
    #[arg(long, env = "JOBBOARD_FEED_URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Directory holding stored bookmarks and the log file
    #[arg(long, env = "JOBBOARD_DATA_DIR", default_value = "jobboard_data")]
    pub data_dir: PathBuf,

    /// Where log output goes
    #[arg(long, value_enum, env = "JOBBOARD_LOG", default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Max seconds to wait for a connection to the feed
    #[arg(long, env = "JOBBOARD_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    pub connect_timeout_secs: u64,

    /// Max seconds to wait for a whole feed page
    #[arg(long, env = "JOBBOARD_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive browser (default)
    Browse,
    /// Print the first pages of the feed
    Feed {
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Print stored bookmarks
    Bookmarks,
    /// Remove every stored bookmark
    ClearBookmarks,
}

impl Cli {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            feed: FeedSettings {
                base_url: self.feed_url.clone(),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                ..FeedSettings::default()
            },
            data_dir: self.data_dir.clone(),
        }
    }
}

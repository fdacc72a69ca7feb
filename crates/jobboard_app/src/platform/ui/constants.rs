pub const PROMPT: &str = "jobboard> ";
pub const BOOKMARKED_MARK: &str = "[*]";
pub const NOT_BOOKMARKED_MARK: &str = "[ ]";
pub const EMPTY_BOOKMARKS: &str = "No bookmarks found.";
pub const HELP: &str = "\
Commands:
  more          load the next page of the feed
  open <id>     show the details of a job
  back          return from the details to the feed
  save <id>     bookmark a job, or remove its bookmark
  saved         show bookmarked jobs
  feed          show the feed
  clear         remove every bookmark
  help          show this text
  quit          leave";

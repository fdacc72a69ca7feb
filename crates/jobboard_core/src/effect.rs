use crate::Job;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchPage { page: u32 },
    LoadBookmarks,
    ToggleBookmark { job: Job },
    SaveBookmarks { bookmarks: Vec<Job> },
}

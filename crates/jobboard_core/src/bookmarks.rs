use crate::{Job, JobId};

/// Bookmarked jobs in the order they were saved.
///
/// Each entry is a snapshot of the record at the moment it was bookmarked.
/// Membership is by `Job::id`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookmarkSet {
    records: Vec<Job>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a stored list as-is. Repeated ids are not collapsed here; the
    /// store's next toggle of that id removes all of them.
    pub fn from_records(records: Vec<Job>) -> Self {
        Self { records }
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.records.iter().any(|job| job.id == id)
    }

    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.records.iter().find(|job| job.id == id)
    }

    pub fn records(&self) -> &[Job] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Job> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

use std::fmt;

use engine_logging::{engine_info, engine_warn};
use jobboard_core::{BookmarkSet, Job};
use serde_json::Value;

use crate::storage::{KeyValueStore, StoreError};

/// Storage key holding the serialized bookmark list.
pub const BOOKMARKS_KEY: &str = "bookmarks";

/// What a toggle did to the stored list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleChange {
    Added,
    /// Number of entries dropped; more than one only if the stored list was
    /// already carrying duplicates.
    Removed(usize),
}

/// Non-fatal problem found while reading the stored list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadDiagnostic {
    ReadFailed(String),
    Unparseable(String),
    NotAList,
    SkippedRecords(usize),
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadDiagnostic::ReadFailed(message) => {
                write!(f, "could not read stored bookmarks: {message}")
            }
            LoadDiagnostic::Unparseable(message) => {
                write!(f, "stored bookmarks are unreadable: {message}")
            }
            LoadDiagnostic::NotAList => write!(f, "stored bookmarks are not a list"),
            LoadDiagnostic::SkippedRecords(count) => {
                write!(f, "skipped {count} unreadable stored bookmark(s)")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadOutcome {
    pub bookmarks: BookmarkSet,
    pub diagnostic: Option<LoadDiagnostic>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    pub change: ToggleChange,
    /// The list as written to storage.
    pub bookmarks: BookmarkSet,
}

/// Bookmark list persisted as one JSON array under a single key.
///
/// Every change is a read of the stored list, an in-memory edit and a write of
/// the whole list. Callers are expected to issue changes from one thread.
pub struct BookmarkStore {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl BookmarkStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: BOOKMARKS_KEY.to_string(),
        }
    }

    /// Reads the stored list. Never fails: anything unusable reads as an empty
    /// list with a diagnostic.
    pub fn load_all(&self) -> LoadOutcome {
        match self.store.get(&self.key) {
            Ok(None) => LoadOutcome::default(),
            Ok(Some(raw)) => decode_bookmarks(&raw),
            Err(err) => {
                engine_warn!("Failed to read bookmarks key {:?}: {}", self.key, err);
                LoadOutcome {
                    bookmarks: BookmarkSet::new(),
                    diagnostic: Some(LoadDiagnostic::ReadFailed(err.to_string())),
                }
            }
        }
    }

    /// Adds the job if no stored entry has its id, otherwise removes every such
    /// entry, then writes the whole list back.
    ///
    /// The edit runs on the stored JSON entries, so entries this build cannot
    /// decode are written back untouched. A failed read is returned as an error
    /// so the stored list is never replaced on the strength of a read that did
    /// not happen.
    pub fn toggle(&self, job: Job) -> Result<ToggleOutcome, StoreError> {
        let mut entries = match self.store.get(&self.key)? {
            Some(raw) => stored_entries(&raw),
            None => Vec::new(),
        };

        let job_id = job.id;
        let before = entries.len();
        entries.retain(|entry| entry.get("id").and_then(Value::as_i64) != Some(job_id));
        let removed = before - entries.len();
        let change = if removed > 0 {
            ToggleChange::Removed(removed)
        } else {
            entries.push(serde_json::to_value(&job)?);
            ToggleChange::Added
        };

        self.store.set(&self.key, &serde_json::to_string(&entries)?)?;
        let bookmarks = decode_entries(entries).bookmarks;
        engine_info!(
            "Bookmark toggle job_id={} change={:?} total={}",
            job_id,
            change,
            bookmarks.len()
        );
        Ok(ToggleOutcome { change, bookmarks })
    }

    /// Replaces the stored list.
    pub fn save_all(&self, bookmarks: &BookmarkSet) -> Result<(), StoreError> {
        let raw = serde_json::to_string(bookmarks.records())?;
        self.store.set(&self.key, &raw)
    }
}

/// Decodes a stored bookmark list, dropping entries that are not valid jobs.
fn decode_bookmarks(raw: &str) -> LoadOutcome {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            engine_warn!("Stored bookmarks are not valid JSON: {}", err);
            return LoadOutcome {
                bookmarks: BookmarkSet::new(),
                diagnostic: Some(LoadDiagnostic::Unparseable(err.to_string())),
            };
        }
    };

    let Value::Array(items) = value else {
        engine_warn!("Stored bookmarks are not a list; ignoring them");
        return LoadOutcome {
            bookmarks: BookmarkSet::new(),
            diagnostic: Some(LoadDiagnostic::NotAList),
        };
    };

    decode_entries(items)
}

/// Stored entries as raw JSON; anything but an array reads as no entries.
fn stored_entries(raw: &str) -> Vec<Value> {
    match serde_json::from_str(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            engine_warn!("Stored bookmarks are not a list; starting from an empty one");
            Vec::new()
        }
        Err(err) => {
            engine_warn!(
                "Stored bookmarks are not valid JSON ({}); starting from an empty one",
                err
            );
            Vec::new()
        }
    }
}

fn decode_entries(items: Vec<Value>) -> LoadOutcome {
    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0;
    for item in items {
        match serde_json::from_value::<Job>(item) {
            Ok(job) => records.push(job),
            Err(err) => {
                engine_warn!("Skipping stored bookmark: {}", err);
                skipped += 1;
            }
        }
    }

    LoadOutcome {
        bookmarks: BookmarkSet::from_records(records),
        diagnostic: (skipped > 0).then_some(LoadDiagnostic::SkippedRecords(skipped)),
    }
}

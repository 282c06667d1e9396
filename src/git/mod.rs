pub mod repo;

pub use repo::{Commits, HistoryReader, RepoCommit};

use crate::error::Result;
use crate::model::{CommitRecord, FileChange};
use chrono::{DateTime, FixedOffset};

/// What the aggregator needs to know about a commit.
///
/// `file_changes` may be expensive; callers only ask for it once the commit
/// has passed every cheaper check.
pub trait CommitEntry {
    fn author_name(&self) -> &str;
    fn author_email(&self) -> &str;
    fn timestamp(&self) -> DateTime<FixedOffset>;
    fn file_changes(&self) -> Result<Vec<FileChange>>;
}

impl CommitEntry for CommitRecord {
    fn author_name(&self) -> &str {
        &self.author_name
    }

    fn author_email(&self) -> &str {
        &self.author_email
    }

    fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    fn file_changes(&self) -> Result<Vec<FileChange>> {
        Ok(self.per_file_stats.clone())
    }
}

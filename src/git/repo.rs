use crate::error::{Result, StatsError};
use crate::model::{FileChange, ScanWindow};
use chrono::{DateTime, FixedOffset};
use gix::object::tree::diff::ChangeDetached;
use gix::{ObjectId, Repository};
use similar::{ChangeTag, TextDiff};
use std::collections::HashSet;
use std::path::Path;

use super::CommitEntry;

const BINARY_PROBE_LEN: usize = 8192;

pub struct HistoryReader {
    repo: Repository,
}

impl HistoryReader {
    /// Open the repository rooted exactly at `path`, without searching parents.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = gix::open(path).map_err(|_| StatsError::NotARepository(path.to_path_buf()))?;
        Ok(Self { repo })
    }

    pub fn is_repo<P: AsRef<Path>>(path: P) -> bool {
        gix::open(path.as_ref()).is_ok()
    }

    /// Commits reachable from HEAD whose time lies inside `window`.
    ///
    /// The walk is lazy and single-use; open the reader again to rescan.
    pub fn commits(&self, window: &ScanWindow) -> Result<Commits<'_>> {
        let mut head = self.repo.head()?;
        let stack = if head.is_unborn() {
            Vec::new()
        } else {
            vec![head.peel_to_commit_in_place()?.id]
        };

        Ok(Commits {
            reader: self,
            window: *window,
            seen: HashSet::new(),
            stack,
        })
    }

    fn diff_blobs(&self, old: Option<ObjectId>, new: Option<ObjectId>) -> Result<(u32, u32)> {
        let old = old.map(|id| self.repo.find_object(id)).transpose()?;
        let new = new.map(|id| self.repo.find_object(id)).transpose()?;
        let old_data = old.as_ref().map(|o| o.data.as_slice()).unwrap_or_default();
        let new_data = new.as_ref().map(|o| o.data.as_slice()).unwrap_or_default();

        if is_binary(old_data) || is_binary(new_data) {
            return Ok((0, 0));
        }
        Ok(line_delta(old_data, new_data))
    }

    /// Line statistics of one changed entry. Directories and submodule
    /// commits have none.
    fn file_change(&self, change: ChangeDetached) -> Result<Option<FileChange>> {
        let (path, modes, old, new) = match change {
            ChangeDetached::Addition {
                id,
                location,
                entry_mode,
                ..
            } => (location, [Some(entry_mode), None], None, Some(id)),
            ChangeDetached::Deletion {
                id,
                location,
                entry_mode,
                ..
            } => (location, [Some(entry_mode), None], Some(id), None),
            ChangeDetached::Modification {
                previous_id,
                previous_entry_mode,
                id,
                entry_mode,
                location,
            } => (
                location,
                [Some(previous_entry_mode), Some(entry_mode)],
                Some(previous_id),
                Some(id),
            ),
            ChangeDetached::Rewrite {
                source_id,
                source_entry_mode,
                id,
                entry_mode,
                location,
                ..
            } => (
                location,
                [Some(source_entry_mode), Some(entry_mode)],
                Some(source_id),
                Some(id),
            ),
        };
        if !modes.iter().flatten().all(|mode| mode.is_blob_or_symlink()) {
            return Ok(None);
        }

        let (additions, deletions) = self.diff_blobs(old, new)?;
        Ok(Some(FileChange {
            path: path.to_string(),
            additions,
            deletions,
        }))
    }
}

pub struct Commits<'r> {
    reader: &'r HistoryReader,
    window: ScanWindow,
    seen: HashSet<ObjectId>,
    stack: Vec<ObjectId>,
}

impl<'r> Commits<'r> {
    fn load(&mut self, commit_id: ObjectId) -> Result<Option<RepoCommit<'r>>> {
        let reader = self.reader;
        let commit = reader.repo.find_commit(commit_id)?;
        let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
        self.stack.extend(parents.iter().rev());

        let author = commit.author()?;
        let time = author.time()?;
        let timestamp = to_datetime(time.seconds, time.offset)?;
        if timestamp < self.window.begin_of_scan || timestamp > self.window.end_of_scan {
            return Ok(None);
        }

        Ok(Some(RepoCommit {
            reader,
            id: commit_id,
            first_parent: parents.first().copied(),
            author_name: author.name.to_string(),
            author_email: author.email.to_string(),
            timestamp,
        }))
    }
}

impl<'r> Iterator for Commits<'r> {
    type Item = Result<RepoCommit<'r>>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(commit_id) = self.stack.pop() {
            if !self.seen.insert(commit_id) {
                continue;
            }
            match self.load(commit_id) {
                Ok(Some(commit)) => return Some(Ok(commit)),
                Ok(None) => continue,
                Err(e) => {
                    self.stack.clear();
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

/// One commit of the walk; line statistics are computed on demand.
pub struct RepoCommit<'r> {
    reader: &'r HistoryReader,
    id: ObjectId,
    first_parent: Option<ObjectId>,
    author_name: String,
    author_email: String,
    timestamp: DateTime<FixedOffset>,
}

impl CommitEntry for RepoCommit<'_> {
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
        let repo = &self.reader.repo;
        let tree = repo.find_commit(self.id)?.tree()?;
        let parent_tree = match self.first_parent {
            Some(parent_id) => Some(repo.find_commit(parent_id)?.tree()?),
            None => None,
        };

        let changes: Vec<ChangeDetached> =
            repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;

        let mut stats = Vec::with_capacity(changes.len());
        for change in changes {
            if let Some(stat) = self.reader.file_change(change)? {
                stats.push(stat);
            }
        }
        Ok(stats)
    }
}

fn to_datetime(seconds: i64, offset: i32) -> Result<DateTime<FixedOffset>> {
    let zone = FixedOffset::east_opt(offset)
        .ok_or_else(|| StatsError::GitRepo(format!("Invalid time offset: {offset}")))?;
    DateTime::from_timestamp(seconds, 0)
        .map(|utc| utc.with_timezone(&zone))
        .ok_or_else(|| StatsError::GitRepo(format!("Invalid timestamp: {seconds}")))
}

fn is_binary(data: &[u8]) -> bool {
    data.iter().take(BINARY_PROBE_LEN).any(|&b| b == 0)
}

fn line_delta(old: &[u8], new: &[u8]) -> (u32, u32) {
    let old = String::from_utf8_lossy(old);
    let new = String::from_utf8_lossy(new);
    let diff = TextDiff::from_lines(old.as_ref(), new.as_ref());

    let mut added = 0u32;
    let mut deleted = 0u32;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => deleted += 1,
            ChangeTag::Equal => {}
        }
    }
    (added, deleted)
}

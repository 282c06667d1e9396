use crate::calendar::{day_index, week_start_offset};
use crate::error::Result;
use crate::git::{CommitEntry, HistoryReader};
use crate::model::{ScanWindow, StatsOptions, StatsResult};
use chrono::{Datelike, Timelike};
use indicatif::ProgressBar;
use std::path::Path;
use tracing::debug;

use super::filter::{AuthorFilter, PathFilter};

/// Folds commits of one scan unit into a [`StatsResult`].
#[derive(Debug, Clone)]
pub struct Aggregator {
    authors: Option<AuthorFilter>,
    paths: PathFilter,
    window: ScanWindow,
    offset: i64,
}

impl Aggregator {
    pub fn new(options: &StatsOptions, window: ScanWindow) -> Result<Self> {
        Ok(Self {
            authors: AuthorFilter::parse(options.email_or_username.as_deref()),
            paths: PathFilter::new(&options.pattern_to_exclude, &options.pattern_to_include)?,
            offset: week_start_offset(window.end_of_scan),
            window,
        })
    }

    /// Count one commit. Returns `false` when the commit was filtered out by
    /// author or fell outside the window; neither case touches `result`.
    pub fn ingest<C: CommitEntry>(&self, result: &mut StatsResult, commit: &C) -> Result<bool> {
        if let Some(authors) = &self.authors {
            if !authors.matches(commit.author_name(), commit.author_email()) {
                return Ok(false);
            }
        }

        let timestamp = commit.timestamp();
        let Some(raw_index) = day_index(timestamp, &self.window) else {
            return Ok(false);
        };
        let days_ago = raw_index + self.offset;

        for change in commit.file_changes()? {
            if !self.paths.keeps(&change.path) {
                continue;
            }
            let editions = result
                .authors_editions
                .entry(commit.author_name().to_string())
                .or_default();
            editions.additions += u64::from(change.additions);
            editions.deletions += u64::from(change.deletions);
        }

        if days_ago <= self.window.duration_in_days {
            *result.commits.entry(days_ago).or_insert(0) += 1;
            result.hours_commits[timestamp.hour() as usize] += 1;
            result.day_commits[timestamp.weekday().num_days_from_sunday() as usize] += 1;
        }
        Ok(true)
    }

    pub fn run<I, C>(&self, result: &mut StatsResult, commits: I, progress: &ProgressBar) -> Result<()>
    where
        I: IntoIterator<Item = Result<C>>,
        C: CommitEntry,
    {
        for commit in commits {
            if self.ingest(result, &commit?)? {
                progress.inc(1);
            }
        }
        Ok(())
    }

    /// Walk the repository at `folder` and fold its history into `result`.
    pub fn scan_folder(&self, result: &mut StatsResult, folder: &Path, progress: &ProgressBar) -> Result<()> {
        debug!(folder = %folder.display(), "scanning repository");
        let reader = HistoryReader::open(folder)?;
        self.run(result, reader.commits(&self.window)?, progress)
    }
}

use crate::error::StatsError;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_DURATION_IN_DAYS: i64 = 365;

/// Resolved bounds of one scan. `begin_of_scan` falls on the week-start day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWindow {
    pub begin_of_scan: DateTime<FixedOffset>,
    pub end_of_scan: DateTime<FixedOffset>,
    pub duration_in_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub additions: u32,
    pub deletions: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author_name: String,
    pub author_email: String,
    pub timestamp: DateTime<FixedOffset>,
    pub per_file_stats: Vec<FileChange>,
}

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub user: Option<String>,
    pub duration_in_weeks: u32,
    pub folders: Vec<PathBuf>,
    pub merge: bool,
    pub delta: String,
    pub dashboard: bool,
    pub pattern_to_exclude: Vec<String>,
    pub pattern_to_include: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsOptions {
    pub email_or_username: Option<String>,
    pub duration_param_in_weeks: u32,
    pub folders: Vec<PathBuf>,
    pub delta: String,
    pub silent: bool,
    pub pattern_to_exclude: Vec<String>,
    pub pattern_to_include: Vec<String>,
}

impl StatsOptions {
    pub fn for_folders(launch: &LaunchOptions, folders: Vec<PathBuf>) -> Self {
        Self {
            email_or_username: launch.user.clone(),
            duration_param_in_weeks: launch.duration_in_weeks,
            folders,
            delta: launch.delta.clone(),
            silent: launch.dashboard,
            pattern_to_exclude: launch.pattern_to_exclude.clone(),
            pattern_to_include: launch.pattern_to_include.clone(),
        }
    }

    pub fn identity_label(&self) -> &str {
        self.email_or_username.as_deref().unwrap_or("all")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Editions {
    pub additions: u64,
    pub deletions: u64,
}

impl Editions {
    pub fn total(&self) -> u64 {
        self.additions + self.deletions
    }
}

/// Aggregated output of one scan unit.
///
/// `commits` is keyed by day index shifted by the week-start offset, so key 1
/// is the last day of the final grid row.
#[derive(Debug, Default)]
pub struct StatsResult {
    pub options: StatsOptions,
    pub window: Option<ScanWindow>,
    pub folder: String,
    pub commits: BTreeMap<i64, u32>,
    pub hours_commits: [u32; 24],
    pub day_commits: [u32; 7],
    pub authors_editions: BTreeMap<String, Editions>,
    pub error: Option<StatsError>,
}

impl StatsResult {
    pub fn new(options: StatsOptions) -> Self {
        let folder = options
            .folders
            .iter()
            .map(|f| f.display().to_string())
            .collect::<Vec<_>>()
            .join(",");
        Self {
            options,
            folder,
            ..Default::default()
        }
    }

    /// Attach the window and zero every bucket in `1..=duration_in_days`.
    pub fn prepare(&mut self, window: ScanWindow) {
        self.commits = (1..=window.duration_in_days).map(|day| (day, 0)).collect();
        self.window = Some(window);
    }

    /// A scratch result sharing this result's options and window.
    pub fn scratch(&self) -> Self {
        let mut scratch = Self {
            options: self.options.clone(),
            folder: self.folder.clone(),
            ..Default::default()
        };
        if let Some(window) = self.window {
            scratch.prepare(window);
        }
        scratch
    }

    /// Sum every counter of `other` into `self`.
    pub fn absorb(&mut self, other: &StatsResult) {
        for (day, count) in &other.commits {
            *self.commits.entry(*day).or_insert(0) += count;
        }
        for (slot, count) in self.hours_commits.iter_mut().zip(other.hours_commits) {
            *slot += count;
        }
        for (slot, count) in self.day_commits.iter_mut().zip(other.day_commits) {
            *slot += count;
        }
        for (author, editions) in &other.authors_editions {
            let entry = self.authors_editions.entry(author.clone()).or_default();
            entry.additions += editions.additions;
            entry.deletions += editions.deletions;
        }
    }

    pub fn total_commits(&self) -> u64 {
        self.commits.values().map(|&c| c as u64).sum()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitReport {
    pub folder: String,
    pub identity: String,
    pub window: Option<ScanWindow>,
    pub total_commits: u64,
    pub days: BTreeMap<i64, u32>,
    pub hours: Vec<u32>,
    pub weekdays: Vec<u32>,
    pub authors: BTreeMap<String, Editions>,
    pub error: Option<String>,
}

impl From<&StatsResult> for UnitReport {
    fn from(result: &StatsResult) -> Self {
        Self {
            folder: result.folder.clone(),
            identity: result.options.identity_label().to_string(),
            window: result.window,
            total_commits: result.total_commits(),
            days: result
                .commits
                .iter()
                .filter(|(_, &count)| count > 0)
                .map(|(&day, &count)| (day, count))
                .collect(),
            hours: result.hours_commits.to_vec(),
            weekdays: result.day_commits.to_vec(),
            authors: result.authors_editions.clone(),
            error: result.error.as_ref().map(|e| e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<UnitReport>,
}

impl StatsOutput {
    pub fn new(results: &[StatsResult]) -> Self {
        Self {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            results: results.iter().map(UnitReport::from).collect(),
        }
    }
}

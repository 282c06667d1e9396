use crate::model::{ScanWindow, StatsResult};

/// Weekday labels of the bar chart, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub author: String,
    pub additions: u64,
    pub deletions: u64,
}

impl Contribution {
    pub fn total(&self) -> u64 {
        self.additions + self.deletions
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderCount {
    pub folder: String,
    pub commits: u64,
}

/// Numbers shown by the dashboard panels, derived from already aggregated
/// results. Failed units are left out.
#[derive(Debug)]
pub struct DashboardData {
    pub window: ScanWindow,
    pub identity: String,
    pub total_commits: u64,
    pub analyzed_repos: usize,
    pub failed_units: usize,
    /// Monday first.
    pub weekdays: [u64; 7],
    pub hours: [u64; 24],
    /// Sorted by additions plus deletions, largest first.
    pub contributions: Vec<Contribution>,
    /// Only folders with at least one commit.
    pub folders: Vec<FolderCount>,
    pub merged: StatsResult,
}

impl DashboardData {
    /// `None` when no result succeeded.
    pub fn from_results(results: &[StatsResult]) -> Option<Self> {
        let ok: Vec<&StatsResult> = results.iter().filter(|r| r.is_ok()).collect();
        let first = ok.first()?;
        let window = first.window?;

        let mut merged = StatsResult::new(first.options.clone());
        merged.folder.clear();
        merged.prepare(window);

        let mut weekdays = [0u64; 7];
        let mut hours = [0u64; 24];
        let mut folders = Vec::new();

        for result in &ok {
            merged.absorb(result);

            let commits = result.total_commits();
            if commits > 0 {
                folders.push(FolderCount {
                    folder: result.folder.clone(),
                    commits,
                });
            }
            for (sunday_first, count) in result.day_commits.iter().enumerate() {
                weekdays[(sunday_first + 6) % 7] += u64::from(*count);
            }
            for (hour, count) in result.hours_commits.iter().enumerate() {
                hours[hour] += u64::from(*count);
            }
        }

        let mut contributions: Vec<Contribution> = merged
            .authors_editions
            .iter()
            .map(|(author, editions)| Contribution {
                author: author.clone(),
                additions: editions.additions,
                deletions: editions.deletions,
            })
            .collect();
        contributions.sort_by(|a, b| b.total().cmp(&a.total()).then_with(|| a.author.cmp(&b.author)));

        Some(Self {
            window,
            identity: first.options.identity_label().to_string(),
            total_commits: merged.total_commits(),
            analyzed_repos: ok.iter().map(|r| r.options.folders.len()).sum(),
            failed_units: results.len() - ok.len(),
            weekdays,
            hours,
            contributions,
            folders,
            merged,
        })
    }

    pub fn weekday_series(&self) -> Vec<(&'static str, u64)> {
        WEEKDAY_LABELS.iter().copied().zip(self.weekdays).collect()
    }

    pub fn hour_labels() -> Vec<String> {
        (0..24).map(|hour| hour.to_string()).collect()
    }
}

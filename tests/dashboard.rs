use chrono::{FixedOffset, TimeZone};
use gitcontrib::calendar::resolve_window;
use gitcontrib::model::{Editions, ScanWindow, StatsOptions, StatsResult};
use gitcontrib::render::{Grid, TuiPalette};
use gitcontrib::tui::{heatmap_lines, weeks_fitting, Contribution, DashboardData, DashboardState, Focus, FolderCount};
use gitcontrib::StatsError;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn window() -> ScanWindow {
    let now = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2026, 10, 14, 12, 0, 0)
        .unwrap();
    resolve_window(now, "", 4).unwrap()
}

fn unit(folder: &str) -> StatsResult {
    let mut result = StatsResult::new(StatsOptions {
        email_or_username: Some("a@x.com".to_string()),
        duration_param_in_weeks: 4,
        folders: vec![PathBuf::from(folder)],
        ..Default::default()
    });
    result.prepare(window());
    result
}

fn sample() -> Vec<StatsResult> {
    let mut first = unit("/repos/one");
    first.commits.insert(12, 2);
    first.commits.insert(20, 1);
    first.hours_commits[9] = 3;
    first.day_commits = [1, 2, 0, 0, 0, 0, 0];
    first
        .authors_editions
        .insert("Alice".to_string(), Editions { additions: 10, deletions: 2 });
    first
        .authors_editions
        .insert("Bob".to_string(), Editions { additions: 1, deletions: 1 });

    let mut second = unit("/repos/two");
    second.commits.insert(12, 3);
    second.hours_commits[9] = 1;
    second.hours_commits[23] = 2;
    second.day_commits = [0, 0, 0, 0, 0, 0, 3];
    second
        .authors_editions
        .insert("Bob".to_string(), Editions { additions: 20, deletions: 0 });

    let empty = unit("/repos/empty");

    let mut failed = unit("/repos/broken");
    failed.error = Some(StatsError::NotARepository(PathBuf::from("/repos/broken")));
    failed.commits.insert(12, 99);

    vec![first, second, empty, failed]
}

#[test]
fn dashboard_merges_successful_results() {
    let data = DashboardData::from_results(&sample()).unwrap();

    assert_eq!(data.window, window());
    assert_eq!(data.identity, "a@x.com");
    assert_eq!(data.total_commits, 6);
    assert_eq!(data.analyzed_repos, 3);
    assert_eq!(data.failed_units, 1);
    assert_eq!(data.merged.commits.get(&12), Some(&5));
    assert_eq!(data.merged.commits.get(&20), Some(&1));
}

#[test]
fn weekdays_start_on_monday() {
    let data = DashboardData::from_results(&sample()).unwrap();

    assert_eq!(data.weekdays, [2, 0, 0, 0, 0, 3, 1]);
    assert_eq!(data.weekday_series()[0], ("Mo", 2));
    assert_eq!(data.weekday_series()[6], ("Su", 1));
}

#[test]
fn hours_are_summed() {
    let data = DashboardData::from_results(&sample()).unwrap();

    assert_eq!(data.hours[9], 4);
    assert_eq!(data.hours[23], 2);
    assert_eq!(data.hours.iter().sum::<u64>(), 6);
    assert_eq!(DashboardData::hour_labels().len(), 24);
}

#[test]
fn contributors_are_ranked_by_total_editions() {
    let data = DashboardData::from_results(&sample()).unwrap();

    assert_eq!(
        data.contributions,
        vec![
            Contribution {
                author: "Bob".to_string(),
                additions: 21,
                deletions: 1,
            },
            Contribution {
                author: "Alice".to_string(),
                additions: 10,
                deletions: 2,
            },
        ]
    );
}

#[test]
fn only_folders_with_commits_are_listed() {
    let data = DashboardData::from_results(&sample()).unwrap();

    assert_eq!(
        data.folders,
        vec![
            FolderCount {
                folder: "/repos/one".to_string(),
                commits: 3,
            },
            FolderCount {
                folder: "/repos/two".to_string(),
                commits: 3,
            },
        ]
    );
}

#[test]
fn no_successful_result_means_no_dashboard() {
    let mut failed = unit("/repos/broken");
    failed.error = Some(StatsError::NotARepository(PathBuf::from("/repos/broken")));

    assert!(DashboardData::from_results(&[failed]).is_none());
    assert!(DashboardData::from_results(&[]).is_none());
}

#[test]
fn scrolling_stays_inside_the_focused_list() {
    let mut state = DashboardState::new(2, 3);
    assert_eq!(state.focus, Focus::Contributors);
    assert_eq!(state.contributors.selected(), Some(0));

    state.scroll_down(2, 3);
    state.scroll_down(2, 3);
    assert_eq!(state.contributors.selected(), Some(1));

    state.switch_focus();
    assert_eq!(state.focus, Focus::Folders);
    state.scroll_up(2, 3);
    assert_eq!(state.folders.selected(), Some(0));
    state.scroll_down(2, 3);
    assert_eq!(state.folders.selected(), Some(1));
    assert_eq!(state.contributors.selected(), Some(1));
}

#[test]
fn heatmap_panel_fits_whole_weeks() {
    assert_eq!(weeks_fitting(0), 0);
    assert_eq!(weeks_fitting(22), 4);
    assert_eq!(weeks_fitting(25), 4);

    let data = DashboardData::from_results(&sample()).unwrap();
    let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
    let grid = Grid::build(&data.window, &data.merged.commits, today, Some(2));
    let lines = heatmap_lines(&grid, &TuiPalette::default());

    assert_eq!(lines.len(), 8);
    assert_eq!(lines[3].width(), 4 + 2 * 4);
}

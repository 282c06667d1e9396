use chrono::{DateTime, FixedOffset, Month, NaiveDate, TimeZone};
use gitcontrib::calendar::resolve_window;
use gitcontrib::model::{ScanWindow, StatsOptions, StatsResult};
use gitcontrib::render::{cell_class, cell_text, render_grid, write_result, CellClass, Grid, TextPalette};
use gitcontrib::StatsError;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn four_weeks() -> ScanWindow {
    resolve_window(at(2026, 10, 14, 12, 0), "", 4).unwrap()
}

#[test]
fn cells_are_four_columns_wide() {
    assert_eq!(cell_text(0), "  - ");
    assert_eq!(cell_text(3), "  3 ");
    assert_eq!(cell_text(12), " 12 ");
    assert_eq!(cell_text(123), "123 ");
}

#[test]
fn cell_class_puts_today_first() {
    let today = date(2026, 10, 14);

    assert_eq!(cell_class(today, 0, today), CellClass::Today);
    assert_eq!(cell_class(today, 12, today), CellClass::Today);
    assert_eq!(cell_class(date(2026, 10, 1), 7, today), CellClass::FirstOfMonth);
    assert_eq!(cell_class(date(2026, 10, 2), 0, today), CellClass::Empty);
    assert_eq!(cell_class(date(2026, 10, 2), 1, today), CellClass::Low);
    assert_eq!(cell_class(date(2026, 10, 2), 4, today), CellClass::Low);
    assert_eq!(cell_class(date(2026, 10, 2), 5, today), CellClass::Middle);
    assert_eq!(cell_class(date(2026, 10, 2), 9, today), CellClass::Middle);
    assert_eq!(cell_class(date(2026, 10, 2), 10, today), CellClass::High);
}

#[test]
fn grid_has_a_column_per_week_ending_on_the_last_day() {
    let window = four_weeks();
    let grid = Grid::build(&window, &BTreeMap::new(), date(2026, 10, 14), None);

    assert_eq!(
        grid.columns,
        vec![date(2026, 9, 21), date(2026, 9, 28), date(2026, 10, 5), date(2026, 10, 12)]
    );
    assert_eq!(grid.months, vec![None, None, Some(Month::October), None]);
    assert_eq!(grid.rows.len(), 7);
    assert_eq!(grid.rows[0].label, "Mo  ");
    assert_eq!(grid.rows[6].label, "Su  ");

    assert_eq!(grid.cell(0, 0), None);
    assert_eq!(grid.cell(0, 1).map(|c| c.date), Some(date(2026, 9, 22)));
    assert_eq!(grid.cell(3, 6).map(|c| c.date), Some(date(2026, 10, 18)));
}

#[test]
fn commits_land_on_their_calendar_day() {
    let window = four_weeks();
    let commits = BTreeMap::from([(12, 2), (13, 12)]);
    let grid = Grid::build(&window, &commits, date(2026, 10, 14), None);

    let wednesday = grid.cell(3, 2).unwrap();
    assert_eq!(wednesday.date, date(2026, 10, 14));
    assert_eq!(wednesday.value, 2);
    assert_eq!(wednesday.class, CellClass::Today);

    let tuesday = grid.cell(3, 1).unwrap();
    assert_eq!(tuesday.date, date(2026, 10, 13));
    assert_eq!(tuesday.text, " 12 ");
    assert_eq!(tuesday.class, CellClass::High);

    assert_eq!(grid.cell(1, 3).map(|c| c.class), Some(CellClass::FirstOfMonth));
}

#[test]
fn days_after_a_midweek_end_are_blank() {
    // Monday start: the window is not extended and ends on a Monday.
    let window = resolve_window(at(2026, 10, 12, 8, 0), "", 4).unwrap();
    let grid = Grid::build(&window, &BTreeMap::new(), date(2026, 10, 12), None);

    assert_eq!(grid.weeks(), 4);
    assert_eq!(grid.columns.last(), Some(&date(2026, 10, 12)));
    assert!(grid.cell(3, 0).is_some());
    for weekday in 1..7 {
        assert_eq!(grid.cell(3, weekday), None, "weekday {weekday}");
    }
}

#[test]
fn limit_keeps_only_the_latest_weeks() {
    let window = four_weeks();
    let grid = Grid::build(&window, &BTreeMap::new(), date(2026, 10, 14), Some(2));

    assert_eq!(grid.columns, vec![date(2026, 10, 5), date(2026, 10, 12)]);
    assert_eq!(grid.months, vec![None, None]);
    assert_eq!(grid.rows[0].cells.len(), 2);
}

#[test]
fn plain_rendering_lines_up_with_the_header() {
    console::set_colors_enabled(false);
    let window = four_weeks();
    let commits = BTreeMap::from([(12, 2), (13, 12)]);
    let grid = Grid::build(&window, &commits, date(2026, 10, 14), None);

    let rendered = render_grid(&grid, &TextPalette::default());
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], format!("{}Oct    ", " ".repeat(13)));
    assert_eq!(lines[1], "Mo        -   -   - ");
    assert_eq!(lines[2], "Tu    -   -   -  12 ");
    assert_eq!(lines[3], "We    -   -   -   2 ");
    assert!(lines.iter().skip(1).all(|line| line.len() == 4 + 4 * 4));
}

#[test]
fn result_header_names_folder_identity_and_range() {
    console::set_colors_enabled(false);
    let mut result = StatsResult::new(StatsOptions {
        folders: vec![PathBuf::from("/tmp/repo")],
        ..Default::default()
    });
    result.prepare(four_weeks());

    let mut out = Vec::new();
    write_result(&mut out, &result, &TextPalette::default(), date(2026, 10, 14)).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("/tmp/repo"));
    assert!(text.contains(
        "Scanning for all contributions from September 14, 2026 00:00:00 to October 18, 2026 23:59:59"
    ));
    assert!(text.contains("Su  "));
}

#[test]
fn silent_results_skip_the_folder_line() {
    console::set_colors_enabled(false);
    let mut result = StatsResult::new(StatsOptions {
        email_or_username: Some("a@x.com".to_string()),
        folders: vec![PathBuf::from("/tmp/repo")],
        silent: true,
        ..Default::default()
    });
    result.prepare(four_weeks());

    let mut out = Vec::new();
    write_result(&mut out, &result, &TextPalette::default(), date(2026, 10, 14)).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(!text.contains("/tmp/repo"));
    assert!(text.contains("Scanning for a@x.com contributions"));
}

#[test]
fn failed_results_print_the_error() {
    console::set_colors_enabled(false);
    let mut result = StatsResult::new(StatsOptions {
        folders: vec![PathBuf::from("/nope")],
        ..Default::default()
    });
    result.error = Some(StatsError::NotARepository(PathBuf::from("/nope")));

    let mut out = Vec::new();
    write_result(&mut out, &result, &TextPalette::default(), date(2026, 10, 14)).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Error scanning folder repository /nope: cannot get stat from folder (not a repository): /nope\n"
    );
}

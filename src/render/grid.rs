use crate::calendar::{date_for_key, key_for_date};
use crate::model::{ScanWindow, StatsResult};
use chrono::{Datelike, Duration, Month, NaiveDate, Weekday};
use std::collections::BTreeMap;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const DAY_LABELS: [&str; 7] = ["Mo  ", "Tu  ", "We  ", "Th  ", "Fr  ", "Sa  ", "Su  "];

/// Width of a cell, of a month label and of the weekday gutter.
pub const CELL_WIDTH: usize = 4;

const EMPTY_GLYPH: &str = "  - ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellClass {
    Today,
    FirstOfMonth,
    Empty,
    Low,
    Middle,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub date: NaiveDate,
    pub value: u32,
    pub text: String,
    pub class: CellClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub weekday: Weekday,
    pub label: &'static str,
    /// `None` for days of the first column that precede the window and days
    /// of the last column after its end.
    pub cells: Vec<Option<Cell>>,
}

/// Calendar heatmap: one column per week, oldest first, one row per weekday
/// starting on Monday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub columns: Vec<NaiveDate>,
    pub months: Vec<Option<Month>>,
    pub rows: Vec<GridRow>,
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub fn cell_text(value: u32) -> String {
    if value == 0 {
        EMPTY_GLYPH.to_string()
    } else {
        format!("{value:>3} ")
    }
}

pub fn cell_class(date: NaiveDate, value: u32, today: NaiveDate) -> CellClass {
    match value {
        _ if date == today => CellClass::Today,
        _ if date.day() == 1 => CellClass::FirstOfMonth,
        0 => CellClass::Empty,
        1..=4 => CellClass::Low,
        5..=9 => CellClass::Middle,
        _ => CellClass::High,
    }
}

impl Grid {
    pub fn from_result(result: &StatsResult, today: NaiveDate, limit_weeks: Option<usize>) -> Option<Self> {
        let window = result.window.as_ref()?;
        Some(Self::build(window, &result.commits, today, limit_weeks))
    }

    /// Lay `commits` out on the calendar of `window`. With `limit_weeks` only
    /// the most recent columns are kept.
    pub fn build(
        window: &ScanWindow,
        commits: &BTreeMap<i64, u32>,
        today: NaiveDate,
        limit_weeks: Option<usize>,
    ) -> Self {
        let duration = window.duration_in_days;
        if duration < 1 {
            return Self::empty();
        }

        let last = window.end_of_scan.date_naive();
        let first = date_for_key(window, duration);
        let first_monday = monday_of(first);
        let weeks = ((monday_of(last) - first_monday).num_days() / 7 + 1).max(0) as usize;
        let skip = match limit_weeks {
            Some(limit) if limit < weeks => weeks - limit,
            _ => 0,
        };

        let columns: Vec<NaiveDate> = (skip..weeks)
            .map(|col| first_monday + Duration::days(7 * col as i64))
            .collect();

        let mut months = Vec::with_capacity(columns.len());
        let mut current = columns.first().map(|monday| monday.month());
        for monday in &columns {
            if Some(monday.month()) != current {
                current = Some(monday.month());
                months.push(Month::try_from(monday.month() as u8).ok());
            } else {
                months.push(None);
            }
        }

        let rows = (0..7usize)
            .map(|row| {
                let cells = columns
                    .iter()
                    .map(|monday| {
                        let date = *monday + Duration::days(row as i64);
                        let key = key_for_date(window, date);
                        if date > last || key < 1 || key > duration {
                            return None;
                        }
                        let value = commits.get(&key).copied().unwrap_or(0);
                        Some(Cell {
                            date,
                            value,
                            text: cell_text(value),
                            class: cell_class(date, value, today),
                        })
                    })
                    .collect();
                GridRow {
                    weekday: WEEKDAYS[row],
                    label: DAY_LABELS[row],
                    cells,
                }
            })
            .collect();

        Self { columns, months, rows }
    }

    fn empty() -> Self {
        Self {
            columns: Vec::new(),
            months: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn weeks(&self) -> usize {
        self.columns.len()
    }

    /// Header line: the gutter, then a month abbreviation wherever the month
    /// changes from the previous column.
    pub fn month_header(&self) -> String {
        let mut out = " ".repeat(CELL_WIDTH);
        for month in &self.months {
            match month {
                Some(month) => out.push_str(&format!(" {}", &month.name()[..3])),
                None => out.push_str(&" ".repeat(CELL_WIDTH)),
            }
        }
        out
    }

    pub fn cell(&self, week: usize, weekday: usize) -> Option<&Cell> {
        self.rows.get(weekday)?.cells.get(week)?.as_ref()
    }
}

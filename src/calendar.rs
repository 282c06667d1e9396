use crate::error::{Result, StatsError};
use crate::model::{ScanWindow, DEFAULT_DURATION_IN_DAYS};
use chrono::{DateTime, Datelike, Days, Duration, FixedOffset, Months, NaiveDate, NaiveTime, Weekday};

/// Every rendered row starts on this day.
pub const WEEK_START: Weekday = Weekday::Mon;

const DELTA_FORMAT: &str = "invalid delta value use the format: <int>[y/m/w/d]";
const DELTA_NOT_A_NUMBER: &str = "error delta is not a number";

pub fn beginning_of_day(t: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    t.date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(*t.offset())
        .single()
        .unwrap_or(t)
}

pub fn end_of_day(t: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    t.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .and_then(|naive| naive.and_local_timezone(*t.offset()).single())
        .unwrap_or(t)
}

/// Move `now` back by a `<int><unit>` expression; an empty delta leaves it untouched.
///
/// The sign of the amount is ignored, the shift always goes into the past.
pub fn shift_by_delta(now: DateTime<FixedOffset>, delta: &str) -> Result<DateTime<FixedOffset>> {
    let delta = delta.trim();
    if delta.is_empty() {
        return Ok(now);
    }

    let pos = delta
        .find(['y', 'm', 'w', 'd'])
        .ok_or_else(|| StatsError::InvalidDelta(DELTA_FORMAT.to_string()))?;
    let amount: i64 = delta[..pos]
        .parse()
        .map_err(|_| StatsError::InvalidDelta(DELTA_NOT_A_NUMBER.to_string()))?;
    if pos + 1 != delta.len() {
        return Err(StatsError::InvalidDelta(DELTA_FORMAT.to_string()));
    }
    let amount = amount.unsigned_abs();

    let months = |n: u64| u32::try_from(n).ok().map(Months::new);
    let shifted = match &delta[pos..] {
        "y" => amount.checked_mul(12).and_then(months).and_then(|m| now.checked_sub_months(m)),
        "m" => months(amount).and_then(|m| now.checked_sub_months(m)),
        "w" => amount.checked_mul(7).and_then(|d| now.checked_sub_days(Days::new(d))),
        _ => now.checked_sub_days(Days::new(amount)),
    };

    shifted.ok_or_else(|| StatsError::InvalidDelta(format!("delta '{delta}' is out of range")))
}

/// Resolve the scan window ending `delta` before `now`.
///
/// `weeks` of zero selects the default duration. When the raw begin is not on
/// [`WEEK_START`], begin moves back to the Monday of its week and the end moves
/// forward to the following Sunday, lengthening the window by six days. A raw
/// begin on a Sunday therefore moves back six days, never forward one.
pub fn resolve_window(now: DateTime<FixedOffset>, delta: &str, weeks: u32) -> Result<ScanWindow> {
    let end = shift_by_delta(now, delta)?;
    let requested = if weeks > 0 {
        i64::from(weeks) * 7
    } else {
        DEFAULT_DURATION_IN_DAYS
    };
    let out_of_range = || StatsError::InvalidDelta(format!("a window of {requested} days is out of range"));
    let begin = end
        .checked_sub_days(Days::new(requested.unsigned_abs()))
        .ok_or_else(out_of_range)?;

    let lag = u64::from(begin.weekday().num_days_from_monday());
    if lag == 0 {
        return Ok(ScanWindow {
            begin_of_scan: beginning_of_day(begin),
            end_of_scan: end_of_day(end),
            duration_in_days: requested,
        });
    }

    let begin_of_scan = begin
        .checked_sub_days(Days::new(lag))
        .map(beginning_of_day)
        .ok_or_else(out_of_range)?;
    let end_of_scan = end
        .checked_add_days(Days::new(6 - lag))
        .map(end_of_day)
        .ok_or_else(out_of_range)?;
    Ok(ScanWindow {
        begin_of_scan,
        end_of_scan,
        duration_in_days: (end_of_scan - begin_of_scan).num_days(),
    })
}

/// Whole days from `date` to the end of the window's last day, counted by
/// stepping one day at a time. `None` when the date is after the window or
/// more than `duration_in_days` before its end.
pub fn day_index(date: DateTime<FixedOffset>, window: &ScanWindow) -> Option<i64> {
    let end = end_of_day(window.end_of_scan);
    if date > end {
        return None;
    }

    let mut cursor = date;
    let mut days = 0;
    while cursor < end {
        cursor += Duration::days(1);
        days += 1;
        if days > window.duration_in_days {
            return None;
        }
    }
    Some(days)
}

/// Days to add to a day index so the final row of the grid closes on a Sunday.
pub fn week_start_offset(end: DateTime<FixedOffset>) -> i64 {
    7 - i64::from(end.weekday().num_days_from_sunday())
}

/// Calendar date represented by a `commits` key of `window`.
pub fn date_for_key(window: &ScanWindow, key: i64) -> NaiveDate {
    let last = window.end_of_scan.date_naive();
    last + Duration::days(week_start_offset(window.end_of_scan) + 1 - key)
}

/// Inverse of [`date_for_key`].
pub fn key_for_date(window: &ScanWindow, date: NaiveDate) -> i64 {
    let last = window.end_of_scan.date_naive();
    (last - date).num_days() + week_start_offset(window.end_of_scan) + 1
}

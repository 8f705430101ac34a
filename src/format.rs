use std::time::Duration;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// The one day count that gets a different answer.
const COAL_DAYS: u64 = 46;

pub fn duration_from_millis(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// `HH:MM:SS`, zero padded. Hours keep counting past a day.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// "Tuesday, December 30, 1997"
pub fn format_date_full(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// "8/31/2021"
pub fn format_date_compact(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Days left until `then`, rounded up, as a chat line.
///
/// Returns an empty string once `then` has passed.
pub fn days_until(now: DateTime<FixedOffset>, then: DateTime<FixedOffset>) -> String {
    if then < now {
        return String::new();
    }

    let millis = u64::try_from(then.signed_duration_since(now).num_milliseconds()).unwrap_or(0);
    match millis.div_ceil(MILLIS_PER_DAY) {
        1 => "1 day".to_string(),
        COAL_DAYS => format!("{} days and the coal ran out", COAL_DAYS),
        days => format!("{} days", days),
    }
}

/// Whole days elapsed since `then`, rounded down.
pub fn days_since(now: DateTime<FixedOffset>, then: DateTime<FixedOffset>) -> i64 {
    now.signed_duration_since(then).num_days()
}

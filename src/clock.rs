use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, Offset, TimeZone, Utc};

use crate::error::AppError;

/// The time zone every "now" and "midnight of a show date" is computed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// The host's local zone, DST included.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl Clock {
    pub fn utc() -> Self {
        Clock::Fixed(Utc.fix())
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        match self {
            Clock::Local => Local::now().fixed_offset(),
            Clock::Fixed(offset) => Utc::now().with_timezone(offset),
        }
    }

    /// The first instant of `date` in this zone, or `None` when that instant
    /// falls outside the representable range.
    pub fn midnight(&self, date: NaiveDate) -> Option<DateTime<FixedOffset>> {
        let naive = date.and_time(NaiveTime::MIN);
        match self {
            Clock::Local => Some(
                Local
                    .from_local_datetime(&naive)
                    .earliest()
                    .map(|dt| dt.fixed_offset())
                    .unwrap_or_else(|| naive.and_utc().fixed_offset()),
            ),
            Clock::Fixed(offset) => naive
                .checked_sub_offset(*offset)
                .map(|utc| offset.from_utc_datetime(&utc)),
        }
    }
}

impl FromStr for Clock {
    type Err = AppError;

    /// Accepts `local`, `UTC`, or an offset such as `-05:00`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("local") {
            return Ok(Clock::Local);
        }
        if s.eq_ignore_ascii_case("utc") || s == "Z" {
            return Ok(Clock::utc());
        }

        s.parse::<FixedOffset>().map(Clock::Fixed).map_err(|_| {
            AppError::Config(format!(
                "BOT_TIMEZONE must be 'local', 'UTC' or an offset like -05:00, got '{}'",
                s
            ))
        })
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clock::Local => write!(f, "local"),
            Clock::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

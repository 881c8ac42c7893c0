//! Date range for querying events.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, Utc};

use crate::error::{CrmError, CrmResult};

/// Date range for filtering events.
/// None values mean unbounded in that direction. Both ends are inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn unbounded() -> Self {
        DateRange { from: None, to: None }
    }

    /// A single calendar day.
    pub fn day(date: NaiveDate) -> Self {
        Self::days(date, date)
    }

    /// Monday through Sunday of the week containing `date`.
    pub fn week(date: NaiveDate) -> Self {
        let (first, last) = week_bounds(date);
        Self::days(first, last)
    }

    /// Every day of the month containing `date`.
    pub fn month(date: NaiveDate) -> Self {
        let (first, last) = month_bounds(date);
        Self::days(first, last)
    }

    fn days(first: NaiveDate, last: NaiveDate) -> Self {
        DateRange {
            from: Some(start_of(first)),
            to: Some(end_of(last)),
        }
    }

    /// Parse command line / query string bounds.
    /// - `from`: "start" for unbounded, or YYYY-MM-DD
    /// - `to`: YYYY-MM-DD, unbounded if not specified
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> CrmResult<Self> {
        let from_dt = match from {
            Some("start") | None => None,
            Some(s) => Some(start_of(parse_date(s)?)),
        };

        let to_dt = match to {
            Some(s) => Some(end_of(parse_date(s)?)),
            None => None,
        };

        Ok(DateRange {
            from: from_dt,
            to: to_dt,
        })
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| *instant >= from) && self.to.is_none_or(|to| *instant <= to)
    }
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> CrmResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| CrmError::Parse(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s)))
}

/// First and last day of the Monday-based week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(date.weekday().num_days_from_monday());
    let first = date - Days::new(offset);
    (first, first + Days::new(6))
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);
    (first, last)
}

fn start_of(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of(date: NaiveDate) -> DateTime<Utc> {
    start_of(date) + Duration::days(1) - Duration::nanoseconds(1)
}

//! Local calendar-day boundaries.
//!
//! Every adherence metric buckets timestamps by the calendar day they fall
//! on in the process's local time zone. A day is the half-open interval from
//! one local midnight to the next, stored as UTC instants.

use chrono::{DateTime, Days, Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::engine::StatsError;

/// A half-open `[start, end)` interval of UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a range; `end` is exclusive.
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The local calendar day `date`.
    pub fn day(date: NaiveDate) -> Self {
        Self::days(date, date)
    }

    /// Local calendar days `first` through `last`, both inclusive.
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: local_midnight_to_utc(first),
            end: local_midnight_to_utc(last + Duration::days(1)),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// True when the range holds no instants.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Converts a local date at midnight to UTC.
/// Handles DST ambiguity by picking the earlier time.
pub fn local_midnight_to_utc(local_date: NaiveDate) -> DateTime<Utc> {
    let midnight = local_date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            // DST spring-forward gap at midnight; 1am local is the first valid instant
            let one_am = midnight + Duration::hours(1);
            Local.from_local_datetime(&one_am).earliest().map_or_else(
                || Utc.from_utc_datetime(&midnight),
                |dt| dt.with_timezone(&Utc),
            )
        }
    }
}

/// The local calendar date an instant falls on.
pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// The date `offset` days before `today`.
pub fn days_before(today: NaiveDate, offset: usize) -> NaiveDate {
    today - Days::new(offset as u64)
}

/// First day of `month` and first day of the following month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), StatsError> {
    if !(1..=12).contains(&month) {
        return Err(StatsError::InvalidParameter {
            name: "month",
            value: month.to_string(),
        });
    }
    let invalid_year = || StatsError::InvalidParameter {
        name: "year",
        value: year.to_string(),
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid_year)?;
    let next = if month == 12 {
        year.checked_add(1)
            .and_then(|next_year| NaiveDate::from_ymd_opt(next_year, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid_year)?;
    Ok((first, next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_range_spans_one_local_day() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 29).unwrap();
        let range = TimeRange::day(date);

        assert_eq!(local_date(range.start), date);
        assert_eq!(
            local_date(range.end),
            NaiveDate::from_ymd_opt(2025, 1, 30).unwrap()
        );
        assert!(range.contains(range.start));
        assert!(!range.contains(range.end));
        assert!(range.contains(range.end - Duration::milliseconds(1)));
    }

    #[test]
    fn days_range_is_inclusive_of_last_day() {
        let first = NaiveDate::from_ymd_opt(2025, 1, 27).unwrap();
        let last = NaiveDate::from_ymd_opt(2025, 2, 2).unwrap();
        let range = TimeRange::days(first, last);

        assert_eq!(local_date(range.start), first);
        assert_eq!(
            local_date(range.end),
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()
        );
        assert!(!range.is_empty());
    }

    #[test]
    fn month_bounds_rolls_over_december() {
        let (first, next) = month_bounds(2024, 12).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(next, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        let (first, next) = month_bounds(2024, 2).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(next, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn month_bounds_rejects_out_of_range_month() {
        for month in [0, 13] {
            let err = month_bounds(2025, month).unwrap_err();
            assert!(matches!(
                err,
                StatsError::InvalidParameter { name: "month", .. }
            ));
        }
    }

    #[test]
    fn month_bounds_rejects_unrepresentable_year() {
        let err = month_bounds(i32::MAX, 12).unwrap_err();
        assert!(matches!(
            err,
            StatsError::InvalidParameter { name: "year", .. }
        ));
    }
}

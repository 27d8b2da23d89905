//! Date ranges used in `created:` qualifiers and the range splitter

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while building or splitting date ranges
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("year {0} is outside the supported calendar")]
    InvalidYear(i32),

    #[error("range end {end} is before its start {start}")]
    Inverted { start: NaiveDate, end: NaiveDate },

    #[error("cannot split a range into zero slices")]
    ZeroSplit,

    #[error("range {0} spans zero days and cannot be split")]
    EmptyWindow(DateRange),

    #[error("range {range} has room for at most {max} slices, {requested} requested")]
    TooManySlices {
        range: DateRange,
        requested: usize,
        max: usize,
    },
}

/// Inclusive calendar-date interval, rendered `YYYY-MM-DD..YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Whole calendar year, cut at `today` when `year` is the current year.
    pub fn year(year: i32, today: NaiveDate) -> Result<Self, RangeError> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(RangeError::InvalidYear(year))?;
        let end = if year == today.year() {
            today
        } else {
            NaiveDate::from_ymd_opt(year, 12, 31).ok_or(RangeError::InvalidYear(year))?
        };
        Self::new(start, end)
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Calendar days between start and end (0 for a single-day range).
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Largest slice count [`split_range`] accepts for this range.
    #[must_use]
    pub fn max_slices(&self) -> usize {
        usize::try_from(self.days()).map_or(usize::MAX, |d| d.saturating_add(1))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// One entry of a query plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubRange {
    /// Everything created strictly before the date, rendered `<YYYY-MM-DD`.
    Before(NaiveDate),
    /// An inclusive interval
    Within(DateRange),
}

impl SubRange {
    /// Everything created before January 1st of `year`.
    pub fn before_year(year: i32) -> Result<Self, RangeError> {
        NaiveDate::from_ymd_opt(year, 1, 1)
            .map(SubRange::Before)
            .ok_or(RangeError::InvalidYear(year))
    }

    /// Search qualifier for `created:`
    #[must_use]
    pub fn qualifier(&self) -> String {
        format!("created:{self}")
    }
}

impl fmt::Display for SubRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubRange::Before(date) => write!(f, "<{}", date.format(DATE_FORMAT)),
            SubRange::Within(range) => range.fmt(f),
        }
    }
}

impl From<DateRange> for SubRange {
    fn from(range: DateRange) -> Self {
        SubRange::Within(range)
    }
}

/// Split `range` into `n` contiguous slices.
///
/// Every slice but the last spans `days / n` days past its start; the next
/// slice starts the following day. The last slice runs to the range end and
/// absorbs the remainder, so the slices tile the input exactly. When `n` is
/// close to the day count the slices shrink so the last one never inverts.
pub fn split_range(range: DateRange, n: usize) -> Result<Vec<DateRange>, RangeError> {
    if n == 0 {
        return Err(RangeError::ZeroSplit);
    }
    let days = range.days();
    if days == 0 {
        return Err(RangeError::EmptyWindow(range));
    }
    let max = range.max_slices();
    if n > max {
        return Err(RangeError::TooManySlices {
            range,
            requested: n,
            max,
        });
    }

    // n <= days + 1 here, so it fits in i64
    let n_days = n as i64;
    let mut step = days / n_days + 1;
    if (n_days - 1) * step > days {
        // slices of `days / n` would overrun the end; share the inclusive days evenly
        step = (days + 1) / n_days;
    }

    let mut slices = Vec::with_capacity(n);
    let mut start = range.start;
    for _ in 0..n - 1 {
        let end = start + Duration::days(step - 1);
        slices.push(DateRange { start, end });
        start = end + Duration::days(1);
    }
    slices.push(DateRange {
        start,
        end: range.end,
    });

    Ok(slices)
}

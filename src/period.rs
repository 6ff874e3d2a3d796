//! Calendar period resolution for the analytics queries.
//!
//! A period is either a calendar month or a full year, resolved from the
//! optional (month, year) selector on analytics requests into inclusive date
//! boundaries. Month and year values are validated by the request handlers
//! before resolution, so the functions here have no error paths.

use time::{Date, Month};

use crate::Error;

/// An inclusive range of calendar dates used as an aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// The first day of the period.
    pub start: Date,
    /// The last day of the period.
    pub end: Date,
}

/// A calendar month in a specific year, the dashboard's reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthOfYear {
    /// The month number, 1 (January) to 12 (December).
    pub month: u8,
    /// The calendar year.
    pub year: i32,
}

impl MonthOfYear {
    /// The month that `today` falls in.
    pub fn current(today: Date) -> Self {
        Self {
            month: u8::from(today.month()),
            year: today.year(),
        }
    }

    /// The immediately preceding month, wrapping January to December of the
    /// prior year.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                month: 12,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }

    /// The first and last calendar day of this month.
    pub fn bounds(self) -> DateRange {
        month_bounds(self.year, month_from_number(self.month))
    }
}

/// Resolve an optional (month, year) selector into date boundaries.
///
/// With both given the range covers that month; with only a year it covers
/// January 1 to December 31 of that year; otherwise it defaults to the
/// month that `today` falls in. A month given without a year is ignored.
pub fn resolve_range(month: Option<u8>, year: Option<i32>, today: Date) -> DateRange {
    match (month, year) {
        (Some(month), Some(year)) => month_bounds(year, month_from_number(month)),
        (None, Some(year)) => year_bounds(year),
        _ => MonthOfYear::current(today).bounds(),
    }
}

/// Check that `month` is a calendar month number.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `month` is outside 1-12.
pub fn validate_month(month: u8) -> Result<u8, Error> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(Error::InvalidMonth(month))
    }
}

/// Check that `year` is within the range the calendar types can represent.
///
/// # Errors
/// Returns [Error::InvalidYear] if `year` is outside 1-9999.
pub fn validate_year(year: i32) -> Result<i32, Error> {
    if (1..=9999).contains(&year) {
        Ok(year)
    } else {
        Err(Error::InvalidYear(year))
    }
}

fn month_bounds(year: i32, month: Month) -> DateRange {
    let start = Date::from_calendar_date(year, month, 1).expect("invalid month start date");
    let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))
        .expect("invalid month end date");

    DateRange { start, end }
}

fn year_bounds(year: i32) -> DateRange {
    DateRange {
        start: Date::from_calendar_date(year, Month::January, 1).expect("invalid year start date"),
        end: Date::from_calendar_date(year, Month::December, 31).expect("invalid year end date"),
    }
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if time::util::is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn month_from_number(month: u8) -> Month {
    match month {
        1 => Month::January,
        2 => Month::February,
        3 => Month::March,
        4 => Month::April,
        5 => Month::May,
        6 => Month::June,
        7 => Month::July,
        8 => Month::August,
        9 => Month::September,
        10 => Month::October,
        11 => Month::November,
        12 => Month::December,
        _ => unreachable!("month numbers are validated before period resolution"),
    }
}

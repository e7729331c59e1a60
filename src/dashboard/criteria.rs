//! The user-selected criteria for narrowing down the displayed transactions.

use time::Month;

use crate::Error;

/// The months that can be selected, in calendar order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// The years that can be selected.
pub const YEARS: [i32; 2] = [2021, 2022];

/// The search text, month and year chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// The lower-cased free-text search.
    pub search_text: String,
    pub month: Month,
    pub year: i32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            month: Month::March,
            year: 2022,
        }
    }
}

/// Parse an English month name such as "March". Case is ignored.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `name` is not a month name.
pub fn parse_month(name: &str) -> Result<Month, Error> {
    let name = name.trim();

    MONTHS
        .into_iter()
        .find(|month| month.to_string().eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::InvalidMonth(name.to_owned()))
}

/// Parse a year such as "2022" and check that it is one of [YEARS].
///
/// # Errors
/// Returns [Error::InvalidYear] if `year` is not a number or is not one of
/// the selectable years.
pub fn parse_year(year: &str) -> Result<i32, Error> {
    let year = year.trim();

    year.parse::<i32>()
        .ok()
        .filter(|parsed| YEARS.contains(parsed))
        .ok_or_else(|| Error::InvalidYear(year.to_owned()))
}

//! The sales record fetched from the remote API.

use serde::{Deserialize, Serialize};
use time::{Month, OffsetDateTime};
use time_tz::Tz;

use crate::timezone::to_local_date_time;

/// A single sale of a product.
///
/// Transactions are read-only: they are fetched once per page load and
/// never modified by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The product name.
    pub title: String,
    /// A longer description of the product.
    pub description: String,
    /// The sale price.
    pub price: f64,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// When the product was sold.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// The year recorded alongside the sale, if the remote API provides one.
    #[serde(default)]
    pub year: Option<i64>,
    /// Whether the product was sold, if the remote API provides it.
    #[serde(default)]
    pub sold: Option<bool>,
}

impl Transaction {
    /// Whether any of the searchable fields contain `needle`.
    ///
    /// `needle` must already be lower case. Title and description are lower
    /// cased before comparison, the remaining fields are compared on their
    /// default string form.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.price.to_string().contains(needle)
            || self.category.contains(needle)
            || self
                .year
                .is_some_and(|year| year.to_string().contains(needle))
    }

    /// Whether the sale happened in `month` of `year` in `timezone`.
    pub fn sold_in(&self, month: Month, year: i32, timezone: &Tz) -> bool {
        let local = to_local_date_time(self.date_of_sale, timezone);

        local.month() == month && local.year() == year
    }
}

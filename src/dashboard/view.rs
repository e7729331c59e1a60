//! The in-memory state behind the dashboard.
//!
//! [TransactionView] holds the fetched transactions and everything derived
//! from them. Every mutation that changes the filtered list goes through
//! [TransactionView::set_filtered], which recomputes the pagination, so the
//! derived state can never go stale.

use std::fmt;

use time::Month;
use time_tz::{TimeZone, Tz};

use crate::{
    Error,
    api::Statistics,
    dashboard::criteria::FilterCriteria,
    pagination::Pagination,
    transaction::Transaction,
};

/// A ticket for a statistics request issued by [TransactionView].
///
/// Only the most recently issued ticket may update the displayed statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsRequest {
    sequence: u64,
    pub month: Month,
    pub year: i32,
}

/// The transactions of one page load and the state derived from them.
pub struct TransactionView {
    transactions: Vec<Transaction>,
    /// Indices into `transactions`, in their original order.
    filtered: Vec<usize>,
    criteria: FilterCriteria,
    pagination: Pagination,
    statistics: Statistics,
    latest_statistics_request: u64,
    timezone: &'static Tz,
}

impl fmt::Debug for TransactionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionView")
            .field("transactions", &self.transactions.len())
            .field("filtered", &self.filtered.len())
            .field("criteria", &self.criteria)
            .field("pagination", &self.pagination)
            .field("statistics", &self.statistics)
            .field("latest_statistics_request", &self.latest_statistics_request)
            .field("timezone", &self.timezone.name())
            .finish()
    }
}

impl TransactionView {
    /// Create an empty view that matches sale dates against `timezone`.
    pub fn new(timezone: &'static Tz) -> Self {
        Self {
            transactions: Vec::new(),
            filtered: Vec::new(),
            criteria: FilterCriteria::default(),
            pagination: Pagination::new(0),
            statistics: Statistics::default(),
            latest_statistics_request: 0,
            timezone,
        }
    }

    /// Start a new page load with `transactions`.
    ///
    /// The criteria and statistics go back to their defaults and every
    /// filter is cleared. Statistics requests issued before the reload can
    /// no longer complete.
    pub fn load(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
        self.criteria = FilterCriteria::default();
        self.statistics = Statistics::default();
        self.latest_statistics_request += 1;
        self.set_filtered((0..self.transactions.len()).collect());
    }

    /// Filter the transactions by free text and go back to the first page.
    ///
    /// An empty search shows every transaction.
    pub fn handle_search(&mut self, text: &str) {
        let search_text = text.to_lowercase();

        let filtered = if search_text.is_empty() {
            (0..self.transactions.len()).collect()
        } else {
            self.indices_where(|transaction| transaction.matches_search(&search_text))
        };

        self.criteria.search_text = search_text;
        self.set_filtered(filtered);
    }

    /// Select the month and year used by [TransactionView::filter_by_month_year].
    pub fn set_month_year(&mut self, month: Month, year: i32) {
        self.criteria.month = month;
        self.criteria.year = year;
    }

    /// Show only the transactions sold in the selected month and year, and
    /// go back to the first page.
    ///
    /// This always starts from the full list of transactions and leaves the
    /// search text alone. Returns the ticket for the statistics of the same
    /// month and year.
    pub fn filter_by_month_year(&mut self) -> StatisticsRequest {
        let filtered = self.month_year_indices();
        self.set_filtered(filtered);

        self.begin_statistics_request()
    }

    /// Issue a ticket for the statistics of the selected month and year.
    ///
    /// Issuing a ticket makes every earlier ticket stale.
    pub fn begin_statistics_request(&mut self) -> StatisticsRequest {
        self.latest_statistics_request += 1;

        StatisticsRequest {
            sequence: self.latest_statistics_request,
            month: self.criteria.month,
            year: self.criteria.year,
        }
    }

    /// Store the outcome of the statistics request for `request`.
    ///
    /// A failed request zeroes the statistics. Returns `false`, leaving the
    /// statistics untouched, if a newer request has been issued since.
    pub fn complete_statistics_request(
        &mut self,
        request: StatisticsRequest,
        result: Result<Statistics, Error>,
    ) -> bool {
        if request.sequence != self.latest_statistics_request {
            tracing::debug!(
                "Discarding statistics for {} {} from stale request {} (latest is {})",
                request.month,
                request.year,
                request.sequence,
                self.latest_statistics_request
            );
            return false;
        }

        self.statistics = match result {
            Ok(statistics) => statistics,
            Err(error) => {
                tracing::warn!(
                    "Could not fetch statistics for {} {}: {error}",
                    request.month,
                    request.year
                );
                Statistics::default()
            }
        };

        true
    }

    /// Go to the next page. Does nothing on the last page.
    pub fn handle_next(&mut self) -> bool {
        self.pagination.next()
    }

    /// Go to the previous page. Does nothing on the first page.
    pub fn handle_previous(&mut self) -> bool {
        self.pagination.previous()
    }

    /// The filtered transactions on the current page.
    pub fn page_slice(&self) -> Vec<&Transaction> {
        self.filtered[self.pagination.row_range(self.filtered.len())]
            .iter()
            .map(|&index| &self.transactions[index])
            .collect()
    }

    pub fn filtered(&self) -> impl Iterator<Item = &Transaction> {
        self.filtered.iter().map(|&index| &self.transactions[index])
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Every transaction sold in the selected month and year, regardless of
    /// the active filter.
    pub fn transactions_in_month_year(&self) -> Vec<&Transaction> {
        self.month_year_indices()
            .into_iter()
            .map(|index| &self.transactions[index])
            .collect()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    pub fn timezone(&self) -> &'static Tz {
        self.timezone
    }

    fn set_filtered(&mut self, filtered: Vec<usize>) {
        self.pagination = Pagination::new(filtered.len());
        self.filtered = filtered;
    }

    fn month_year_indices(&self) -> Vec<usize> {
        let FilterCriteria { month, year, .. } = self.criteria;

        self.indices_where(|transaction| transaction.sold_in(month, year, self.timezone))
    }

    fn indices_where(&self, predicate: impl Fn(&Transaction) -> bool) -> Vec<usize> {
        self.transactions
            .iter()
            .enumerate()
            .filter(|(_, transaction)| predicate(transaction))
            .map(|(index, _)| index)
            .collect()
    }
}

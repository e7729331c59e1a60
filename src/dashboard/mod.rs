//! Dashboard module
//!
//! Provides the page for browsing transactions: a searchable, paginated
//! table alongside monthly statistics and charts for a selected month and year.

mod cards;
mod charts;
mod criteria;
mod handlers;
mod tables;
mod view;

pub use handlers::{
    filter_by_month_year, get_dashboard_page, next_page, previous_page, search_transactions,
    update_charts,
};
pub use view::TransactionView;

#[cfg(test)]
pub(crate) use handlers::{MonthYearForm, SearchForm};

//! The URIs of the pages and endpoints served by the dashboard.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The transaction dashboard page.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page describing the transaction data.
pub const ABOUT_VIEW: &str = "/about";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for searching transactions by free text.
pub const DASHBOARD_SEARCH: &str = "/api/dashboard/search";
/// The route for filtering transactions by month and year.
pub const DASHBOARD_FILTER: &str = "/api/dashboard/filter";
/// The route for redrawing the charts when the month or year changes.
pub const DASHBOARD_CHARTS: &str = "/api/dashboard/charts";
/// The route for moving to the next page of the transaction table.
pub const DASHBOARD_NEXT_PAGE: &str = "/api/dashboard/next";
/// The route for moving to the previous page of the transaction table.
pub const DASHBOARD_PREVIOUS_PAGE: &str = "/api/dashboard/previous";

/// The remote API route listing every transaction.
pub const REMOTE_ALL_TRANSACTIONS: &str = "/api/transaction/getAllTransactions";
/// The remote API route for the statistics of a month and year.
pub const REMOTE_STATISTICS: &str = "/api/transaction/getStatistics";

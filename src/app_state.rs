//! Implements a struct that holds the state of the dashboard server.

use std::sync::{Arc, Mutex};

use crate::{Error, api::ApiClient, dashboard::TransactionView, timezone::get_timezone};

/// The state of the dashboard server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client for the remote transaction API.
    pub api_client: ApiClient,

    /// The transactions shown on the dashboard, shared by every request.
    pub view: Arc<Mutex<TransactionView>>,
}

impl AppState {
    /// Create a new [AppState] that fetches its data with `api_client`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    /// Sale dates are grouped into months in this timezone.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezone] if `local_timezone` is not a known timezone.
    pub fn new(api_client: ApiClient, local_timezone: &str) -> Result<Self, Error> {
        let timezone = get_timezone(local_timezone).ok_or_else(|| {
            tracing::error!("Invalid timezone {}", local_timezone);
            Error::InvalidTimezone(local_timezone.to_owned())
        })?;

        Ok(Self {
            api_client,
            view: Arc::new(Mutex::new(TransactionView::new(timezone))),
        })
    }
}

//! A web dashboard for browsing sales transactions served by a remote API.
//!
//! The dashboard renders a searchable, filterable and paginated table of
//! transactions alongside aggregate statistics and charts for a selected
//! month and year. The data itself lives behind a remote HTTP API; this crate
//! only fetches it and serves the resulting HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod about;
mod alert;
mod api;
mod app_state;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod pagination;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use api::{ApiClient, Statistics};
pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::Transaction;

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    routing::get_internal_server_error_redirect,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request to the remote API could not be sent, timed out, or its
    /// body could not be decoded.
    ///
    /// The string holds the underlying error message.
    #[error("request to the remote API failed: {0}")]
    RemoteRequest(String),

    /// The remote API answered with a non-success status code.
    #[error("the remote API responded to {1} with status {0}")]
    RemoteStatus(u16, String),

    /// A month name that is not one of the twelve English month names.
    #[error("\"{0}\" is not a valid month")]
    InvalidMonth(String),

    /// A year that is not a number or is outside of the selectable years.
    #[error("\"{0}\" is not one of the selectable years")]
    InvalidYear(String),

    /// The lock around the transaction view was poisoned.
    #[error("could not acquire the transaction view lock")]
    ViewLockError,

    /// The configured timezone is not a canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::RemoteRequest(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezone(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get the timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::ViewLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    ///
    /// A poisoned view lock redirects the client to the error page instead.
    fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidMonth(month) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid month".to_owned(),
                    details: format!("\"{month}\" is not a month. Pick a month from the list."),
                },
            ),
            Error::InvalidYear(year) => (
                StatusCode::BAD_REQUEST,
                Alert {
                    message: "Invalid year".to_owned(),
                    details: format!("\"{year}\" is not available. Pick a year from the list."),
                },
            ),
            Error::ViewLockError => return get_internal_server_error_redirect(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

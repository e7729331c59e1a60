//! Client for the remote transaction API.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use time::Month;

use crate::{Error, endpoints, transaction::Transaction};

/// Aggregate sales figures for a month, computed by the remote API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the sale prices.
    pub total_sales_amount: f64,
    /// The number of items that were sold.
    pub total_sold_items: u64,
    /// The number of items that were not sold.
    pub total_not_sold_items: u64,
}

/// The body of the response listing all transactions.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TransactionsResponse {
    pub data: Vec<Transaction>,
}

/// Fetches transactions and statistics from the remote API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: HttpClient,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API hosted at `base_url`, e.g. "http://localhost:5001".
    ///
    /// Requests that take longer than `timeout` fail with [Error::RemoteRequest].
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Fetch every transaction.
    ///
    /// # Errors
    /// Returns an error if the request fails, the API responds with an error
    /// status, or the body is not a list of transactions.
    pub async fn get_all_transactions(&self) -> Result<Vec<Transaction>, Error> {
        let url = format!("{}{}", self.base_url, endpoints::REMOTE_ALL_TRANSACTIONS);
        tracing::debug!("Fetching transactions from {url}");

        let response = self.http_client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::RemoteStatus(status.as_u16(), url));
        }

        let body: TransactionsResponse = response.json().await?;
        tracing::debug!("Fetched {} transactions", body.data.len());

        Ok(body.data)
    }

    /// Fetch the statistics for `month` of `year`.
    ///
    /// The month is sent as its 1-based number.
    ///
    /// # Errors
    /// Returns an error if the request fails, the API responds with an error
    /// status, or the body is not a statistics object.
    pub async fn get_statistics(&self, month: Month, year: i32) -> Result<Statistics, Error> {
        let url = format!("{}{}", self.base_url, endpoints::REMOTE_STATISTICS);
        let month_number = u8::from(month);
        tracing::debug!("Fetching statistics for {month_number}/{year} from {url}");

        let response = self
            .http_client
            .get(&url)
            .query(&[("month", month_number.to_string()), ("year", year.to_string())])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::RemoteStatus(status.as_u16(), url));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    //! A stand-in for the remote API that serves canned responses on a local port.

    use std::{
        collections::HashMap,
        net::SocketAddr,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use axum::{
        Json, Router,
        extract::{Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
    };
    use tokio::net::TcpListener;

    use crate::{endpoints, transaction::Transaction};

    use super::{ApiClient, Statistics, TransactionsResponse};

    /// The canned responses of a [FakeApi].
    ///
    /// `None` makes the matching endpoint respond with a server error.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct FakeApiData {
        pub transactions: Option<Vec<Transaction>>,
        pub statistics: HashMap<(u8, i32), Statistics>,
    }

    #[derive(Debug, Clone)]
    pub(crate) struct FakeApi {
        pub address: SocketAddr,
        pub data: Arc<Mutex<FakeApiData>>,
    }

    impl FakeApi {
        pub(crate) async fn start(data: FakeApiData) -> Self {
            let data = Arc::new(Mutex::new(data));
            let router = Router::new()
                .route(endpoints::REMOTE_ALL_TRANSACTIONS, get(get_all_transactions))
                .route(endpoints::REMOTE_STATISTICS, get(get_statistics))
                .with_state(data.clone());

            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Could not bind fake API listener");
            let address = listener.local_addr().unwrap();

            tokio::spawn(async move {
                axum::serve(listener, router).await.unwrap();
            });

            Self { address, data }
        }

        pub(crate) fn base_url(&self) -> String {
            format!("http://{}", self.address)
        }

        pub(crate) fn client(&self) -> ApiClient {
            ApiClient::new(&self.base_url(), Duration::from_secs(5)).unwrap()
        }
    }

    async fn get_all_transactions(State(data): State<Arc<Mutex<FakeApiData>>>) -> Response {
        let transactions = data.lock().unwrap().transactions.clone();

        match transactions {
            Some(data) => Json(TransactionsResponse { data }).into_response(),
            None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }

    async fn get_statistics(
        State(data): State<Arc<Mutex<FakeApiData>>>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        let key: Option<(u8, i32)> = params
            .get("month")
            .and_then(|month| month.parse().ok())
            .zip(params.get("year").and_then(|year| year.parse().ok()));

        let statistics = key.and_then(|key| data.lock().unwrap().statistics.get(&key).copied());

        match statistics {
            Some(statistics) => Json(statistics).into_response(),
            None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, time::Duration};

    use time::{Month, macros::datetime};

    use crate::{Error, transaction::test_utils::build_transaction};

    use super::{
        ApiClient, Statistics,
        test_utils::{FakeApi, FakeApiData},
    };

    #[tokio::test]
    async fn fetches_all_transactions() {
        let want = vec![
            build_transaction("Shirt", "Blue Shirt", datetime!(2022-03-01 10:00 UTC)),
            build_transaction("Pants", "Denim", datetime!(2021-07-14 10:00 UTC)),
        ];
        let api = FakeApi::start(FakeApiData {
            transactions: Some(want.clone()),
            ..Default::default()
        })
        .await;

        let got = api.client().get_all_transactions().await.unwrap();

        assert_eq!(want, got);
    }

    #[tokio::test]
    async fn fetches_statistics_by_month_number() {
        let want = Statistics {
            total_sales_amount: 1234.5,
            total_sold_items: 7,
            total_not_sold_items: 3,
        };
        let api = FakeApi::start(FakeApiData {
            statistics: HashMap::from([((3, 2022), want)]),
            ..Default::default()
        })
        .await;

        let got = api
            .client()
            .get_statistics(Month::March, 2022)
            .await
            .unwrap();

        assert_eq!(want, got);
    }

    #[tokio::test]
    async fn error_status_is_an_error() {
        let api = FakeApi::start(FakeApiData::default()).await;

        let result = api.client().get_statistics(Month::March, 2022).await;

        assert!(
            matches!(result, Err(Error::RemoteStatus(500, _))),
            "want remote status error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unreachable_api_is_an_error() {
        let client = ApiClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();

        let result = client.get_all_transactions().await;

        assert!(
            matches!(result, Err(Error::RemoteRequest(_))),
            "want request error, got {result:?}"
        );
    }

    #[test]
    fn trailing_slash_is_removed_from_base_url() {
        let client = ApiClient::new("http://localhost:5001/", Duration::from_secs(1)).unwrap();

        assert_eq!(client.base_url, "http://localhost:5001");
    }
}

//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_htmx::HxRedirect;
use tower_http::services::ServeDir;

use crate::{
    AppState,
    about::get_about_page,
    dashboard::{
        filter_by_month_year, get_dashboard_page, next_page, previous_page, search_transactions,
        update_charts,
    },
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::ABOUT_VIEW, get(get_about_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(endpoints::DASHBOARD_SEARCH, post(search_transactions))
        .route(endpoints::DASHBOARD_FILTER, post(filter_by_month_year))
        .route(endpoints::DASHBOARD_CHARTS, post(update_charts))
        .route(endpoints::DASHBOARD_NEXT_PAGE, post(next_page))
        .route(endpoints::DASHBOARD_PREVIOUS_PAGE, post(previous_page))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

/// Get a response that will redirect the client to the internal server error 500 page.
///
/// **Note**: This redirect is intended to be served as a response to a POST request initiated by HTMX.
/// Route handlers using GET should use `axum::response::Redirect` to redirect via a response.
pub(crate) fn get_internal_server_error_redirect() -> Response {
    (
        HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
        .into_response()
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }
}

#[cfg(test)]
mod router_tests {
    use std::collections::HashMap;

    use axum_test::TestServer;
    use time::macros::datetime;

    use crate::{
        AppState,
        api::{
            Statistics,
            test_utils::{FakeApi, FakeApiData},
        },
        dashboard::{MonthYearForm, SearchForm},
        endpoints,
        transaction::test_utils::build_transaction,
    };

    use super::build_router;

    async fn get_test_server() -> (TestServer, FakeApi) {
        let api = FakeApi::start(FakeApiData {
            transactions: Some(vec![
                build_transaction("Shirt", "Blue Shirt", datetime!(2022-03-02 10:00 UTC)),
                build_transaction("Pants", "Denim", datetime!(2021-07-15 10:00 UTC)),
            ]),
            statistics: HashMap::from([(
                (3, 2022),
                Statistics {
                    total_sales_amount: 42.0,
                    total_sold_items: 1,
                    total_not_sold_items: 0,
                },
            )]),
        })
        .await;
        let state = AppState::new(api.client(), "Etc/UTC").unwrap();
        let server = TestServer::try_new(build_router(state)).expect("Could not create test server.");

        (server, api)
    }

    #[tokio::test]
    async fn dashboard_flow() {
        let (server, _api) = get_test_server().await;

        let page = server.get(endpoints::DASHBOARD_VIEW).await;
        page.assert_status_ok();
        assert!(page.text().contains("Blue Shirt"));
        assert!(page.text().contains("Denim"));

        let search = server
            .post(endpoints::DASHBOARD_SEARCH)
            .form(&SearchForm {
                search_text: "denim".to_owned(),
            })
            .await;
        search.assert_status_ok();
        assert!(search.text().contains("Pants"));
        assert!(!search.text().contains("Blue Shirt"));

        let filter = server
            .post(endpoints::DASHBOARD_FILTER)
            .form(&MonthYearForm {
                month: "March".to_owned(),
                year: "2022".to_owned(),
            })
            .await;
        filter.assert_status_ok();
        assert!(filter.text().contains("$42.00"));
        assert!(filter.text().contains("Blue Shirt"));
        assert!(!filter.text().contains("Denim"));

        server
            .post(endpoints::DASHBOARD_NEXT_PAGE)
            .await
            .assert_status_ok();
        server
            .post(endpoints::DASHBOARD_PREVIOUS_PAGE)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn month_and_year_dropdowns_redraw_charts() {
        let (server, _api) = get_test_server().await;
        server.get(endpoints::DASHBOARD_VIEW).await.assert_status_ok();

        let charts = server
            .post(endpoints::DASHBOARD_CHARTS)
            .form(&MonthYearForm {
                month: "July".to_owned(),
                year: "2021".to_owned(),
            })
            .await;

        charts.assert_status_ok();
        assert!(charts.text().contains("price-range-chart"));
        assert!(charts.text().contains("July 2021"));
        assert!(!charts.text().contains("Denim"));
    }

    #[tokio::test]
    async fn year_that_is_not_a_number_gets_an_alert() {
        let (server, _api) = get_test_server().await;
        server.get(endpoints::DASHBOARD_VIEW).await.assert_status_ok();

        for endpoint in [endpoints::DASHBOARD_FILTER, endpoints::DASHBOARD_CHARTS] {
            let response = server
                .post(endpoint)
                .form(&[("month", "March"), ("year", "twenty")])
                .await;

            response.assert_status_bad_request();
            assert!(response.text().contains("Invalid year"));
        }
    }

    #[tokio::test]
    async fn about_and_error_pages_are_served() {
        let (server, _api) = get_test_server().await;

        server.get(endpoints::ABOUT_VIEW).await.assert_status_ok();
        server
            .get(endpoints::INTERNAL_ERROR_VIEW)
            .await
            .assert_status_internal_server_error();
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (server, _api) = get_test_server().await;

        let response = server.get("/not-a-page").await;

        response.assert_status_not_found();
        assert!(response.text().contains("Something's missing."));
    }
}

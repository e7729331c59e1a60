//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for loading, searching, filtering, charting and paging the
//!   dashboard
//! - HTML view functions for rendering the dashboard UI
//! - State and form types used by the handlers
//!
//! Handlers never hold the view lock across a request to the remote API.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    AppState, Error,
    api::ApiClient,
    dashboard::{
        cards::statistics_cards,
        charts::{build_dashboard_charts, charts_inline_script, charts_script, charts_view},
        criteria::{MONTHS, YEARS, parse_month, parse_year},
        tables::{TRANSACTIONS_TABLE_ID, transactions_table},
        view::TransactionView,
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, base,
    },
    navigation::NavBar,
};

const ECHARTS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying and updating the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The client for fetching transactions and statistics.
    pub api_client: ApiClient,
    /// The transactions shown on the dashboard.
    pub view: Arc<Mutex<TransactionView>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api_client: state.api_client.clone(),
            view: state.view.clone(),
        }
    }
}

/// Form data for the free-text search box.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_text: String,
}

/// Form data for the month and year dropdowns.
#[derive(Debug, Serialize, Deserialize)]
pub struct MonthYearForm {
    /// An English month name, e.g. "March".
    pub month: String,
    /// A year such as "2022".
    pub year: String,
}

/// Display the dashboard with freshly fetched transactions.
///
/// Every page load starts over: the search, month and year go back to their
/// defaults. If the transactions cannot be fetched the dashboard is shown
/// without any.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let transactions = state
        .api_client
        .get_all_transactions()
        .await
        .unwrap_or_else(|error| {
            tracing::error!("Could not fetch transactions: {error}");
            Vec::new()
        });

    let mut view = lock_view(&state.view)?;
    view.load(transactions);

    Ok(dashboard_view(&view).into_response())
}

/// Filter the transaction table by free text.
pub async fn search_transactions(
    State(state): State<DashboardState>,
    Form(form): Form<SearchForm>,
) -> Response {
    let mut view = match lock_view(&state.view) {
        Ok(view) => view,
        Err(error) => return error.into_alert_response(),
    };

    view.handle_search(&form.search_text);
    tracing::debug!(
        "Search for {:?} matched {} transactions",
        view.criteria().search_text,
        view.filtered().count()
    );

    transactions_table(&view).into_response()
}

/// Show the transactions sold in the chosen month and year along with the
/// statistics for that month.
///
/// If the statistics cannot be fetched they are shown as zero. When several
/// requests overlap, only the most recent one updates the statistics.
pub async fn filter_by_month_year(
    State(state): State<DashboardState>,
    Form(form): Form<MonthYearForm>,
) -> Response {
    match update_month_year(&state, &form).await {
        Ok(content) => content.into_response(),
        Err(error) => error.into_alert_response(),
    }
}

async fn update_month_year(state: &DashboardState, form: &MonthYearForm) -> Result<Markup, Error> {
    let (month, year) = parse_month_year(form)?;

    let request = {
        let mut view = lock_view(&state.view)?;
        view.set_month_year(month, year);
        view.filter_by_month_year()
    };

    let result = state
        .api_client
        .get_statistics(request.month, request.year)
        .await;

    let mut view = lock_view(&state.view)?;
    view.complete_statistics_request(request, result);

    Ok(dashboard_content(&view, true))
}

fn parse_month_year(form: &MonthYearForm) -> Result<(Month, i32), Error> {
    Ok((parse_month(&form.month)?, parse_year(&form.year)?))
}

/// Redraw the charts for the month and year chosen in the dropdowns.
///
/// The statistics and the transaction table only change once the month and
/// year are submitted.
pub async fn update_charts(
    State(state): State<DashboardState>,
    Form(form): Form<MonthYearForm>,
) -> Response {
    let (month, year) = match parse_month_year(&form) {
        Ok(month_year) => month_year,
        Err(error) => return error.into_alert_response(),
    };

    let mut view = match lock_view(&state.view) {
        Ok(view) => view,
        Err(error) => return error.into_alert_response(),
    };

    view.set_month_year(month, year);

    charts_section(&view, true).into_response()
}

/// Show the next page of the transaction table.
pub async fn next_page(State(state): State<DashboardState>) -> Response {
    let mut view = match lock_view(&state.view) {
        Ok(view) => view,
        Err(error) => return error.into_alert_response(),
    };

    view.handle_next();

    transactions_table(&view).into_response()
}

/// Show the previous page of the transaction table.
pub async fn previous_page(State(state): State<DashboardState>) -> Response {
    let mut view = match lock_view(&state.view) {
        Ok(view) => view,
        Err(error) => return error.into_alert_response(),
    };

    view.handle_previous();

    transactions_table(&view).into_response()
}

fn lock_view(view: &Mutex<TransactionView>) -> Result<MutexGuard<'_, TransactionView>, Error> {
    view.lock()
        .inspect_err(|error| tracing::error!("could not acquire transaction view lock: {error}"))
        .map_err(|_| Error::ViewLockError)
}

/// Renders the full dashboard page.
fn dashboard_view(view: &TransactionView) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let charts = build_dashboard_charts(&view.transactions_in_month_year(), view.criteria());

    let content = html!(
        (nav_bar)

        div
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (controls_view(view))

            div id="dashboard-content" class="w-full"
            {
                (dashboard_content(view, false))
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}

/// Renders the search box and the month and year dropdowns.
fn controls_view(view: &TransactionView) -> Markup {
    let criteria = view.criteria();
    let table_target = format!("#{TRANSACTIONS_TABLE_ID}");

    html!(
        section class="w-full mb-4 grid grid-cols-1 md:grid-cols-2 gap-4"
        {
            div
            {
                label for="search_text" class=(FORM_LABEL_STYLE) { "Search transaction" }

                input
                    type="search"
                    id="search_text"
                    name="search_text"
                    value=(criteria.search_text)
                    placeholder="Title, description, price, category or year"
                    hx-post=(endpoints::DASHBOARD_SEARCH)
                    hx-trigger="input changed, search"
                    hx-target=(table_target)
                    hx-target-error="#alert-container"
                    hx-swap="outerHTML"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            form
                hx-post=(endpoints::DASHBOARD_FILTER)
                hx-target="#dashboard-content"
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                class="flex items-end gap-2"
            {
                div class="flex-1"
                {
                    label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                    select
                        id="month"
                        name="month"
                        hx-post=(endpoints::DASHBOARD_CHARTS)
                        hx-trigger="change"
                        hx-include="closest form"
                        hx-target="#charts"
                        hx-target-error="#alert-container"
                        hx-swap="outerHTML"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for month in MONTHS {
                            option value=(month) selected[month == criteria.month] { (month) }
                        }
                    }
                }

                div class="flex-1"
                {
                    label for="year" class=(FORM_LABEL_STYLE) { "Year" }

                    select
                        id="year"
                        name="year"
                        hx-post=(endpoints::DASHBOARD_CHARTS)
                        hx-trigger="change"
                        hx-include="closest form"
                        hx-target="#charts"
                        hx-target-error="#alert-container"
                        hx-swap="outerHTML"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for year in YEARS {
                            option value=(year) selected[year == criteria.year] { (year) }
                        }
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Search" }
            }
        }
    )
}

/// Renders the statistics, charts and transaction table.
///
/// Content swapped in by htmx must initialize its charts itself, so
/// `with_chart_script` should be set for partial responses.
fn dashboard_content(view: &TransactionView, with_chart_script: bool) -> Markup {
    html!(
        (statistics_cards(view.statistics(), view.criteria()))

        (charts_section(view, with_chart_script))

        section id="transactions" class="w-full mx-auto mb-8"
        {
            h3 class="text-xl font-semibold mb-4" { "Transactions" }

            (transactions_table(view))
        }
    )
}

/// Renders the charts for the selected month and year.
fn charts_section(view: &TransactionView, with_chart_script: bool) -> Markup {
    let charts = build_dashboard_charts(&view.transactions_in_month_year(), view.criteria());

    html!(
        section id="charts" class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                (charts_view(&charts))
            }

            @if with_chart_script {
                (charts_inline_script(&charts))
            }
        }
    )
}

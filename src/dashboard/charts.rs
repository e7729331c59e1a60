//! Chart generation and rendering for the dashboard.
//!
//! Both charts describe the transactions sold in the selected month and year:
//! - **Price Range Chart**: bar chart of the number of items per price range
//! - **Category Chart**: pie chart of the number of items per category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use std::collections::BTreeMap;

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::DataPointItem,
    element::{AxisPointer, AxisPointerType, AxisType, Orient, Tooltip, Trigger},
    series::{Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{dashboard::criteria::FilterCriteria, html::HeadElement, transaction::Transaction};

/// The width of each price range in the price range chart.
const PRICE_RANGE_WIDTH: f64 = 100.0;
/// The number of price ranges. The last range has no upper bound.
const PRICE_RANGE_COUNT: usize = 10;

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Builds the dashboard charts for `transactions`, which should be the
/// transactions sold in the month and year of `criteria`.
pub(super) fn build_dashboard_charts(
    transactions: &[&Transaction],
    criteria: &FilterCriteria,
) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "price-range-chart",
            options: price_range_chart(transactions, criteria).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            options: category_chart(transactions, criteria).to_string(),
        },
    ]
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        @for chart in charts {
            div
                id=(chart.id)
                class="min-h-[380px] rounded bg-white dark:bg-gray-100"
            {}
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
fn charts_init_script(charts: &[DashboardChart]) -> String {
    charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.getInstanceByDom(chartDom) || echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option, true);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The chart initialization script for a full page load.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        charts_init_script(charts)
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// The chart initialization script for content swapped in by htmx.
///
/// The page has already loaded, so the charts are initialized immediately.
pub(super) fn charts_inline_script(charts: &[DashboardChart]) -> Markup {
    html!(
        script { (PreEscaped(charts_init_script(charts))) }
    )
}

/// Index of the price range that `price` falls into.
///
/// Ranges are inclusive of their upper bound: 0-100, 101-200, ..., 801-900,
/// and everything above 900.
fn price_range_index(price: f64) -> usize {
    if price <= PRICE_RANGE_WIDTH {
        return 0;
    }

    let index = (price / PRICE_RANGE_WIDTH).ceil() as usize - 1;
    index.min(PRICE_RANGE_COUNT - 1)
}

fn price_range_labels() -> Vec<String> {
    (0..PRICE_RANGE_COUNT)
        .map(|index| {
            let lower = index * PRICE_RANGE_WIDTH as usize;
            let upper = lower + PRICE_RANGE_WIDTH as usize;

            match index {
                0 => format!("0-{upper}"),
                _ if index == PRICE_RANGE_COUNT - 1 => format!("{}-above", lower + 1),
                _ => format!("{}-{upper}", lower + 1),
            }
        })
        .collect()
}

/// The number of transactions in each price range.
fn count_by_price_range(transactions: &[&Transaction]) -> Vec<i64> {
    let mut counts = vec![0; PRICE_RANGE_COUNT];

    for transaction in transactions {
        counts[price_range_index(transaction.price)] += 1;
    }

    counts
}

/// The number of transactions per category, sorted by category name.
fn count_by_category<'a>(transactions: &[&'a Transaction]) -> BTreeMap<&'a str, i64> {
    let mut counts = BTreeMap::new();

    for transaction in transactions {
        *counts.entry(transaction.category.as_str()).or_insert(0) += 1;
    }

    counts
}

fn price_range_chart(transactions: &[&Transaction], criteria: &FilterCriteria) -> Chart {
    Chart::new()
        .title(
            Title::new()
                .text("Price Range")
                .subtext(format!("{} {}", criteria.month, criteria.year)),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(price_range_labels()),
        )
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(
            bar::Bar::new()
                .name("Items")
                .data(count_by_price_range(transactions)),
        )
}

fn category_chart(transactions: &[&Transaction], criteria: &FilterCriteria) -> Chart {
    let data = count_by_category(transactions)
        .into_iter()
        .map(|(category, count)| DataPointItem::new(count).name(category))
        .collect::<Vec<_>>();

    Chart::new()
        .title(
            Title::new()
                .text("Categories")
                .subtext(format!("{} {}", criteria.month, criteria.year)),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().orient(Orient::Vertical).left("left").top("20%"))
        .series(
            Pie::new()
                .name("Items")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

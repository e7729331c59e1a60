//! Card components for the monthly sales statistics.

use maud::{Markup, html};

use crate::{api::Statistics, dashboard::criteria::FilterCriteria, html::format_currency};

/// Renders the statistics for the month and year in `criteria`.
pub(super) fn statistics_cards(statistics: Statistics, criteria: &FilterCriteria) -> Markup {
    html! {
        section id="statistics" class="w-full mx-auto mb-4" {
            div class="flex justify-between items-baseline mb-4" {
                h3 class="text-xl font-semibold" { "Statistics" }
                span class="text-sm text-gray-600 dark:text-gray-400" {
                    (criteria.month) " " (criteria.year)
                }
            }

            div class="grid grid-cols-1 sm:grid-cols-3 gap-4" {
                (statistic_card("Total Sale", &format_currency(statistics.total_sales_amount)))
                (statistic_card("Total sold items", &statistics.total_sold_items.to_string()))
                (statistic_card("Total not sold items", &statistics.total_not_sold_items.to_string()))
            }
        }
    }
}

fn statistic_card(label: &str, value: &str) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
            data-statistic=(label)
        {
            div class="text-sm text-gray-600 dark:text-gray-400 mb-2" { (label) }
            div class="text-3xl font-bold" { (value) }
        }
    }
}

//! The paginated table of transactions.
//!
//! The table is rendered as a self-contained partial so that searching and
//! paging can swap it out without touching the rest of the dashboard.

use maud::{Markup, html};

use crate::{
    dashboard::view::TransactionView,
    endpoints,
    html::{
        BUTTON_PAGINATION_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency,
    },
    timezone::to_local_date_time,
    transaction::Transaction,
};

/// The ID of the element that wraps the table and its pagination controls.
pub(super) const TRANSACTIONS_TABLE_ID: &str = "transactions-table";

const COLUMN_COUNT: usize = 5;

/// Renders the current page of filtered transactions with pagination controls.
pub(super) fn transactions_table(view: &TransactionView) -> Markup {
    let rows = view.page_slice();
    let pagination = view.pagination();
    let target = format!("#{TRANSACTIONS_TABLE_ID}");

    html!(
        div id=(TRANSACTIONS_TABLE_ID) class="w-full"
        {
            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class="px-6 py-3 text-right" { "Price" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date of Sale" }
                        }
                    }

                    tbody
                    {
                        @for transaction in &rows {
                            (transaction_row(transaction, view))
                        }

                        @if rows.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td
                                    colspan=(COLUMN_COUNT)
                                    data-empty-state="true"
                                    class="px-6 py-4 text-center"
                                {
                                    "No transactions found."
                                }
                            }
                        }
                    }
                }
            }

            nav class="pagination flex items-center justify-between w-full py-4"
            {
                button
                    type="button"
                    hx-post=(endpoints::DASHBOARD_PREVIOUS_PAGE)
                    hx-target=(target)
                    hx-target-error="#alert-container"
                    hx-swap="outerHTML"
                    class=(BUTTON_PAGINATION_STYLE)
                    disabled[!pagination.has_previous()]
                {
                    "Previous"
                }

                span
                    aria-current="page"
                    class="text-sm font-semibold text-gray-900 dark:text-white"
                {
                    "Page " (pagination.current_page()) " of " (pagination.page_count())
                }

                button
                    type="button"
                    hx-post=(endpoints::DASHBOARD_NEXT_PAGE)
                    hx-target=(target)
                    hx-target-error="#alert-container"
                    hx-swap="outerHTML"
                    class=(BUTTON_PAGINATION_STYLE)
                    disabled[!pagination.has_next()]
                {
                    "Next"
                }
            }
        }
    )
}

fn transaction_row(transaction: &Transaction, view: &TransactionView) -> Markup {
    let date_of_sale = to_local_date_time(transaction.date_of_sale, view.timezone()).date();

    html!(
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class={ (TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white" }
            {
                (transaction.title)
            }
            td class=(TABLE_CELL_STYLE) title=(transaction.description)
            {
                (transaction.description)
            }
            td class="px-6 py-4 text-right" { (format_currency(transaction.price)) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(date_of_sale) { (date_of_sale) }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use scraper::{ElementRef, Html, Selector};
    use time::macros::datetime;

    use crate::{
        dashboard::view::TransactionView,
        test_utils::assert_valid_html,
        timezone::get_timezone,
        transaction::{Transaction, test_utils::build_transaction},
    };

    use super::transactions_table;

    fn render(view: &TransactionView) -> Html {
        let html = Html::parse_fragment(&transactions_table(view).into_string());
        assert_valid_html(&html);
        html
    }

    fn numbered_transactions(count: usize) -> Vec<Transaction> {
        (0..count)
            .map(|i| {
                build_transaction(
                    &format!("Item {i}"),
                    "",
                    datetime!(2022-03-01 12:00 UTC),
                )
            })
            .collect()
    }

    fn row_titles(html: &Html) -> Vec<String> {
        let row_selector = Selector::parse("tr[data-transaction-row] td:first-child").unwrap();

        html.select(&row_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect()
    }

    fn button<'a>(html: &'a Html, text: &str) -> ElementRef<'a> {
        let button_selector = Selector::parse("button").unwrap();

        html.select(&button_selector)
            .find(|button| button.text().collect::<String>().trim() == text)
            .unwrap_or_else(|| panic!("could not find button {text}"))
    }

    fn page_indicator(html: &Html) -> String {
        let selector = Selector::parse("span[aria-current=page]").unwrap();

        html.select(&selector)
            .next()
            .expect("could not find page indicator")
            .text()
            .collect()
    }

    #[test]
    fn renders_columns_and_rows() {
        let mut view = TransactionView::new(get_timezone("Etc/UTC").unwrap());
        view.load(vec![build_transaction(
            "Shirt",
            "Blue Shirt",
            datetime!(2022-03-01 12:00 UTC),
        )]);

        let html = render(&view);

        let header_selector = Selector::parse("th").unwrap();
        let headers = html
            .select(&header_selector)
            .map(|header| header.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(
            headers,
            ["Title", "Description", "Price", "Category", "Date of Sale"]
        );
        assert_eq!(row_titles(&html), ["Shirt"]);

        let cell_selector = Selector::parse("tr[data-transaction-row] td").unwrap();
        let cells = html
            .select(&cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(
            cells,
            ["Shirt", "Blue Shirt", "$10.00", "clothing", "2022-03-01"]
        );
    }

    #[test]
    fn first_page_disables_previous() {
        let mut view = TransactionView::new(get_timezone("Etc/UTC").unwrap());
        view.load(numbered_transactions(25));

        let html = render(&view);

        assert_eq!(row_titles(&html).len(), 10);
        assert_eq!(page_indicator(&html), "Page 1 of 3");
        assert!(button(&html, "Previous").attr("disabled").is_some());
        assert!(button(&html, "Next").attr("disabled").is_none());
    }

    #[test]
    fn last_page_disables_next() {
        let mut view = TransactionView::new(get_timezone("Etc/UTC").unwrap());
        view.load(numbered_transactions(25));
        view.handle_next();
        view.handle_next();

        let html = render(&view);

        assert_eq!(
            row_titles(&html),
            (20..25).map(|i| format!("Item {i}")).collect::<Vec<_>>()
        );
        assert_eq!(page_indicator(&html), "Page 3 of 3");
        assert!(button(&html, "Previous").attr("disabled").is_none());
        assert!(button(&html, "Next").attr("disabled").is_some());
    }

    #[test]
    fn empty_table_shows_single_page() {
        let view = TransactionView::new(get_timezone("Etc/UTC").unwrap());

        let html = render(&view);

        let empty_selector = Selector::parse("td[data-empty-state]").unwrap();
        assert!(html.select(&empty_selector).next().is_some());
        assert_eq!(page_indicator(&html), "Page 1 of 1");
        assert!(button(&html, "Previous").attr("disabled").is_some());
        assert!(button(&html, "Next").attr("disabled").is_some());
    }

    #[test]
    fn date_of_sale_uses_view_timezone() {
        let mut view = TransactionView::new(get_timezone("Pacific/Auckland").unwrap());
        view.load(vec![build_transaction(
            "Late sale",
            "",
            datetime!(2022-03-31 20:00 UTC),
        )]);

        let html = render(&view);

        let time_selector = Selector::parse("time").unwrap();
        let date = html
            .select(&time_selector)
            .next()
            .expect("could not find date of sale")
            .text()
            .collect::<String>();
        assert_eq!(date, "2022-04-01");
    }
}

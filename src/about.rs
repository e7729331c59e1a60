//! A page explaining where the dashboard's data comes from.

use axum::response::{IntoResponse, Response};
use maud::html;

use crate::{
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
};

/// Display the "About Transaction" page.
pub async fn get_about_page() -> Response {
    let nav_bar = NavBar::new(endpoints::ABOUT_VIEW).into_html();
    let dashboard_link = link(endpoints::DASHBOARD_VIEW, "dashboard");

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="max-w-screen-md space-y-4"
            {
                h2 class="text-xl font-bold" { "About Transaction" }

                p
                {
                    "Each transaction records an item listed for sale: its title,
                    description, price, category and the date it was sold.
                    The transactions are loaded from the transaction API every
                    time the " (dashboard_link) " is opened."
                }

                p
                {
                    "Search matches the title, description, price, category and
                    year of each transaction. Choosing a month and year shows the
                    items sold in that month along with the total sale amount and
                    the number of sold and unsold items."
                }
            }
        }
    );

    base("About Transaction", &[], &content).into_response()
}

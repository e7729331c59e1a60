//! Error alerts that htmx swaps into the page's alert container.

use maud::{Markup, html};

/// An error message shown to the user in a dismissible popup.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub details: String,
}

impl Alert {
    pub fn into_html(self) -> Markup {
        html!(
            div
                class="flex items-start p-4 mb-4 text-red-800 border border-red-300
                    rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400
                    dark:border-red-800 shadow-lg"
                role="alert"
            {
                div class="ms-3 text-sm"
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="mt-1" { (self.details) }
                    }
                }

                button
                    type="button"
                    class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex
                        items-center justify-center h-8 w-8 text-red-500
                        hover:bg-red-200 dark:hover:bg-gray-700"
                    aria-label="Close"
                    onclick="this.parentElement.remove()"
                {
                    span class="sr-only" { "Close" }
                    "✕"
                }
            }
        )
    }
}

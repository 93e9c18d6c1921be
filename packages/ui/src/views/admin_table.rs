//! Pieces shared by the two admin tables.

use dioxus::prelude::*;

use crate::icons::FaMagnifyingGlass;
use crate::Icon;

#[component]
pub(crate) fn TableSearch(value: String, placeholder: String, on_input: EventHandler<String>) -> Element {
    rsx! {
        label {
            class: "table-search",
            Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
            input {
                r#type: "search",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt: FormEvent| on_input.call(evt.value()),
            }
        }
    }
}

/// Clickable column header showing the sort arrow when it is the sorted column.
#[component]
pub(crate) fn SortHeader(label: &'static str, arrow: Option<&'static str>, on_sort: EventHandler<()>) -> Element {
    rsx! {
        th {
            class: "admin-table__sortable",
            onclick: move |_| on_sort.call(()),
            "{label}"
            if let Some(arrow) = arrow {
                span { class: "admin-table__arrow", " {arrow}" }
            }
        }
    }
}

/// Previous / numbered / next page buttons. Hidden for a single page.
#[component]
pub(crate) fn TablePager(page: usize, total_pages: usize, on_go: EventHandler<usize>) -> Element {
    if total_pages <= 1 {
        return rsx! {};
    }

    rsx! {
        div {
            class: "pager",
            button {
                class: "btn btn--ghost",
                disabled: page <= 1,
                onclick: move |_| on_go.call(page.saturating_sub(1)),
                "Previous"
            }
            for n in 1..=total_pages {
                button {
                    key: "{n}",
                    class: if n == page { "btn btn--page btn--page-active" } else { "btn btn--page" },
                    onclick: move |_| on_go.call(n),
                    "{n}"
                }
            }
            button {
                class: "btn btn--ghost",
                disabled: page >= total_pages,
                onclick: move |_| on_go.call(page + 1),
                "Next"
            }
        }
    }
}

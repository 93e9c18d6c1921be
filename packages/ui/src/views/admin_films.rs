//! Admin catalog table: search, sort, paging, inline edit, add and delete.
//!
//! The catalog is fetched once. Successful mutations patch the local rows
//! instead of refetching; failures leave them untouched.

use dioxus::prelude::*;
use store::admin::{FilmDraft, FilmField, FILM_STATUSES, RATING_LABELS};
use store::clock::{current_year, format_long_date};
use store::table::{remove_row, replace_row};
use store::{Film, TableState};

use super::admin_table::{SortHeader, TablePager, TableSearch};
use super::modal_overlay::ConfirmDialog;
use crate::client::{use_api, use_config};
use crate::components::{ErrorBanner, FlashNotice, Spinner};
use crate::hooks::{use_api_resource, use_flash, FetchState};
use crate::icons::{FaPenToSquare, FaPlus, FaTrash};
use crate::Icon;

#[component]
pub fn FilmsAdminView() -> Element {
    let config = use_config();
    let api = use_api();
    let flash = use_flash();

    let mut rows = use_signal(Vec::<Film>::new);
    let loader = use_api_resource(move |client| async move {
        let films = client.all_films().await?;
        rows.set(films);
        Ok(())
    });

    let page_size = config.catalog.admin_page_size;
    let mut grid = use_signal(move || TableState::new(FilmField::Id, page_size));
    let mut edit_draft = use_signal(|| FilmDraft::blank(current_year()));
    let mut add_draft = use_signal(|| FilmDraft::blank(current_year()));
    let mut show_add = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let handle_add = move |_| {
        let draft = add_draft();
        if let Err(message) = draft.validate(current_year()) {
            error.set(Some(message));
            return;
        }
        spawn(async move {
            busy.set(true);
            error.set(None);
            match api.client().create_film(&draft).await {
                Ok(film) => {
                    rows.write().push(film);
                    add_draft.set(FilmDraft::blank(current_year()));
                    show_add.set(false);
                    flash.show("Film added successfully");
                }
                Err(e) => {
                    tracing::error!("creating film failed: {}", e);
                    error.set(Some("Failed to add film".to_string()));
                }
            }
            busy.set(false);
        });
    };

    let handle_save = move |_| {
        let Some(id) = grid.peek().editing else {
            return;
        };
        let Some(original) = rows.peek().iter().find(|f| f.id == id).cloned() else {
            return;
        };
        let draft = edit_draft();
        if let Err(message) = draft.validate(current_year()) {
            error.set(Some(message));
            return;
        }
        let updated = draft.apply_to(&original);
        spawn(async move {
            busy.set(true);
            error.set(None);
            match api.client().update_film(&updated).await {
                Ok(()) => {
                    replace_row(&mut rows.write(), updated);
                    grid.write().end_edit();
                    flash.show("Film updated successfully");
                }
                Err(e) => {
                    tracing::error!("updating film {} failed: {}", id, e);
                    error.set(Some("Failed to update film".to_string()));
                }
            }
            busy.set(false);
        });
    };

    let handle_delete = move |_| {
        let Some(id) = grid.write().confirm_delete() else {
            return;
        };
        spawn(async move {
            error.set(None);
            match api.client().delete_film(id).await {
                Ok(()) => {
                    remove_row(&mut rows.write(), id);
                    flash.show("Film deleted successfully");
                }
                Err(e) => {
                    tracing::error!("deleting film {} failed: {}", id, e);
                    error.set(Some("Failed to delete film".to_string()));
                }
            }
        });
    };

    match FetchState::of(&loader, "Failed to load films") {
        FetchState::Loading => return rsx! { Spinner { label: "Loading films..." } },
        FetchState::Failed(message) => return rsx! { ErrorBanner { message } },
        FetchState::Ready(()) => {}
    }

    let state = grid();
    let page = state.view(&rows());
    let total = rows().len();
    let pending = state
        .pending_delete
        .and_then(|id| rows().iter().find(|f| f.id == id).map(|f| f.title.clone()));

    rsx! {
        section {
            class: "admin",
            div {
                class: "admin__header",
                h1 { "Manage Films" }
                button {
                    class: "btn btn--primary",
                    onclick: move |_| show_add.set(!show_add()),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    if show_add() { " Close" } else { " Add Film" }
                }
            }

            FlashNotice { flash }
            if let Some(message) = error() {
                ErrorBanner { message }
            }

            if show_add() {
                FilmForm {
                    draft: add_draft,
                    title: "Add New Film",
                    submit_label: "Add Film",
                    busy: busy(),
                    on_submit: handle_add,
                    on_cancel: move |_| show_add.set(false),
                }
            }

            TableSearch {
                value: state.query.clone(),
                placeholder: "Search films by title, description, rating or status...",
                on_input: move |query: String| grid.write().set_query(query),
            }

            if page.is_empty() {
                p {
                    class: "empty-state",
                    if total == 0 { "No films available" } else { "No films found matching your search" }
                }
            } else {
                table {
                    class: "admin-table",
                    thead {
                        tr {
                            for field in FilmField::ALL {
                                SortHeader {
                                    key: "{field.label()}",
                                    label: field.label(),
                                    arrow: state.arrow_for(field),
                                    on_sort: move |_| grid.write().toggle_sort(field),
                                }
                            }
                            th { "Actions" }
                        }
                    }
                    tbody {
                        for film in page.rows.clone() {
                            if state.editing == Some(film.id) {
                                tr {
                                    key: "{film.id}",
                                    class: "admin-table__editing",
                                    td {
                                        colspan: "8",
                                        FilmForm {
                                            draft: edit_draft,
                                            title: "Edit Film #{film.id}",
                                            submit_label: "Save",
                                            busy: busy(),
                                            on_submit: handle_save,
                                            on_cancel: move |_| grid.write().end_edit(),
                                        }
                                    }
                                }
                            } else {
                                FilmRow {
                                    key: "{film.id}",
                                    film: film.clone(),
                                    on_edit: move |film: Film| {
                                        edit_draft.set(FilmDraft::from_film(&film));
                                        grid.write().begin_edit(film.id);
                                    },
                                    on_delete: move |id| grid.write().request_delete(id),
                                }
                            }
                        }
                    }
                }
                p { class: "admin__count", "Showing {page.rows.len()} of {page.filtered_count} films" }
            }

            TablePager {
                page: page.page,
                total_pages: page.total_pages,
                on_go: move |n| grid.write().go_to(n),
            }

            if let Some(title) = pending {
                ConfirmDialog {
                    title: "Delete Film",
                    message: "Are you sure you want to delete \"{title}\"? This cannot be undone.",
                    on_confirm: handle_delete,
                    on_cancel: move |_| grid.write().cancel_delete(),
                }
            }
        }
    }
}

#[component]
fn FilmRow(film: Film, on_edit: EventHandler<Film>, on_delete: EventHandler<i64>) -> Element {
    let id = film.id;
    let created = film
        .created_at
        .as_deref()
        .map(format_long_date)
        .unwrap_or_default();

    rsx! {
        tr {
            td { "{film.id}" }
            td { class: "admin-table__title", "{film.title}" }
            td { "{film.release_year}" }
            td { "{film.duration} min" }
            td { "{film.rating}" }
            td {
                span { class: "badge badge--{film.status}", "{film.status}" }
            }
            td { "{created}" }
            td {
                class: "admin-table__actions",
                button {
                    class: "btn btn--icon",
                    aria_label: "Edit",
                    onclick: {
                        let film = film.clone();
                        move |_| on_edit.call(film.clone())
                    },
                    Icon { icon: FaPenToSquare, width: 14, height: 14 }
                }
                button {
                    class: "btn btn--icon btn--danger",
                    aria_label: "Delete",
                    onclick: move |_| on_delete.call(id),
                    Icon { icon: FaTrash, width: 14, height: 14 }
                }
            }
        }
    }
}

/// Every editable film field, used for both add and edit.
#[component]
fn FilmForm(
    draft: Signal<FilmDraft>,
    title: String,
    submit_label: String,
    busy: bool,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut draft = draft;
    let current = draft();
    let custom_rating = !RATING_LABELS.contains(&current.rating.as_str()) && !current.rating.is_empty();

    rsx! {
        form {
            class: "film-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                on_submit.call(());
            },
            h3 { "{title}" }
            div {
                class: "film-form__grid",
                label {
                    "Title"
                    input {
                        value: "{current.title}",
                        oninput: move |evt: FormEvent| draft.write().title = evt.value(),
                    }
                }
                label {
                    "Release Year"
                    input {
                        r#type: "number",
                        value: "{current.release_year}",
                        oninput: move |evt: FormEvent| {
                            draft.write().release_year = evt.value().parse().unwrap_or(0);
                        },
                    }
                }
                label {
                    "Duration (min)"
                    input {
                        r#type: "number",
                        min: "1",
                        value: "{current.duration}",
                        oninput: move |evt: FormEvent| {
                            draft.write().duration = evt.value().parse().unwrap_or(0);
                        },
                    }
                }
                label {
                    "Rating"
                    select {
                        onchange: move |evt: FormEvent| draft.write().rating = evt.value(),
                        if custom_rating {
                            option { value: "{current.rating}", selected: true, "{current.rating}" }
                        }
                        for rating in RATING_LABELS {
                            option { key: "{rating}", value: rating, selected: current.rating == rating, "{rating}" }
                        }
                    }
                }
                label {
                    "Status"
                    select {
                        onchange: move |evt: FormEvent| draft.write().status = evt.value(),
                        for status in FILM_STATUSES {
                            option { key: "{status}", value: status, selected: current.status == status, "{status}" }
                        }
                    }
                }
                label {
                    "Cover URL"
                    input {
                        r#type: "url",
                        value: "{current.cover_url}",
                        oninput: move |evt: FormEvent| draft.write().cover_url = evt.value(),
                    }
                }
                label {
                    "Video URL"
                    input {
                        value: "{current.video_url}",
                        oninput: move |evt: FormEvent| draft.write().video_url = evt.value(),
                    }
                }
                label {
                    class: "film-form__wide",
                    "Description"
                    textarea {
                        rows: "3",
                        value: "{current.description}",
                        oninput: move |evt: FormEvent| draft.write().description = evt.value(),
                    }
                }
            }
            div {
                class: "film-form__actions",
                button {
                    class: "btn btn--ghost",
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    class: "btn btn--primary",
                    r#type: "submit",
                    disabled: busy,
                    "{submit_label}"
                }
            }
        }
    }
}

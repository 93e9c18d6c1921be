use api::error_message;
use dioxus::prelude::*;
use store::admin::{NewUserDraft, UserDraft, UserField, USER_ROLES};
use store::clock::format_long_date;
use store::table::{remove_row, replace_row};
use store::{AdminUser, TableState};

use super::admin_table::{SortHeader, TablePager, TableSearch};
use super::modal_overlay::ConfirmDialog;
use crate::client::{use_api, use_config};
use crate::components::{ErrorBanner, FlashNotice, Spinner};
use crate::hooks::{use_api_resource, use_flash, FetchState};
use crate::icons::{FaPenToSquare, FaPlus, FaTrash};
use crate::Icon;

/// Admin user table. Rows are edited inline; new accounts go through
/// registration.
#[component]
pub fn UsersAdminView() -> Element {
    let config = use_config();
    let api = use_api();
    let flash = use_flash();

    let mut rows = use_signal(Vec::<AdminUser>::new);
    let loader = use_api_resource(move |client| async move {
        let users = client.users().await?;
        rows.set(users);
        Ok(())
    });

    let page_size = config.catalog.admin_page_size;
    let mut grid = use_signal(move || TableState::new(UserField::Id, page_size));
    let mut edit_draft = use_signal(UserDraft::default);
    let mut add_draft = use_signal(NewUserDraft::default);
    let mut show_add = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let handle_add = move |evt: FormEvent| {
        evt.prevent_default();
        let draft = add_draft();
        if let Err(message) = draft.validate() {
            error.set(Some(message));
            return;
        }
        let request = draft.to_request();
        spawn(async move {
            busy.set(true);
            error.set(None);
            match api.client().register(&request).await {
                Ok(created) => {
                    rows.write().push(AdminUser::from(created));
                    add_draft.set(NewUserDraft::default());
                    show_add.set(false);
                    flash.show("User added successfully");
                }
                Err(e) => {
                    tracing::error!("creating user {} failed: {}", request.email, e);
                    error.set(Some(error_message(&e, "Failed to add user")));
                }
            }
            busy.set(false);
        });
    };

    let handle_save = move |_| {
        let Some(id) = grid.peek().editing else {
            return;
        };
        let draft = edit_draft();
        if let Err(message) = draft.validate() {
            error.set(Some(message));
            return;
        }
        spawn(async move {
            busy.set(true);
            error.set(None);
            match api.client().update_user(id, &draft).await {
                Ok(updated) => {
                    replace_row(&mut rows.write(), updated);
                    grid.write().end_edit();
                    flash.show("User updated successfully");
                }
                Err(e) => {
                    tracing::error!("updating user {} failed: {}", id, e);
                    error.set(Some("Failed to update user".to_string()));
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
            match api.client().delete_user(id).await {
                Ok(()) => {
                    remove_row(&mut rows.write(), id);
                    flash.show("User deleted successfully");
                }
                Err(e) => {
                    tracing::error!("deleting user {} failed: {}", id, e);
                    error.set(Some("Failed to delete user".to_string()));
                }
            }
        });
    };

    match FetchState::of(&loader, "Failed to load users") {
        FetchState::Loading => return rsx! { Spinner { label: "Loading users..." } },
        FetchState::Failed(message) => return rsx! { ErrorBanner { message } },
        FetchState::Ready(()) => {}
    }

    let state = grid();
    let page = state.view(&rows());
    let total = rows().len();
    let pending = state
        .pending_delete
        .and_then(|id| rows().iter().find(|u| u.id == id).map(|u| u.email.clone()));
    let new_user = add_draft();
    let editing = edit_draft();

    rsx! {
        section {
            class: "admin",
            div {
                class: "admin__header",
                h1 { "Manage Users" }
                button {
                    class: "btn btn--primary",
                    onclick: move |_| show_add.set(!show_add()),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    if show_add() { " Close" } else { " Add User" }
                }
            }

            FlashNotice { flash }
            if let Some(message) = error() {
                ErrorBanner { message }
            }

            if show_add() {
                form {
                    class: "film-form",
                    onsubmit: handle_add,
                    h3 { "Add New User" }
                    div {
                        class: "film-form__grid",
                        label {
                            "Name"
                            input {
                                value: "{new_user.name}",
                                oninput: move |evt: FormEvent| add_draft.write().name = evt.value(),
                            }
                        }
                        label {
                            "Email"
                            input {
                                r#type: "email",
                                value: "{new_user.email}",
                                oninput: move |evt: FormEvent| add_draft.write().email = evt.value(),
                            }
                        }
                        label {
                            "Password"
                            input {
                                r#type: "password",
                                value: "{new_user.password}",
                                oninput: move |evt: FormEvent| add_draft.write().password = evt.value(),
                            }
                        }
                    }
                    div {
                        class: "film-form__actions",
                        button {
                            class: "btn btn--ghost",
                            r#type: "button",
                            onclick: move |_| show_add.set(false),
                            "Cancel"
                        }
                        button {
                            class: "btn btn--primary",
                            r#type: "submit",
                            disabled: busy(),
                            "Add User"
                        }
                    }
                }
            }

            TableSearch {
                value: state.query.clone(),
                placeholder: "Search users by name, email or role...",
                on_input: move |query: String| grid.write().set_query(query),
            }

            if page.is_empty() {
                p {
                    class: "empty-state",
                    if total == 0 { "No users available" } else { "No users found matching your search" }
                }
            } else {
                table {
                    class: "admin-table",
                    thead {
                        tr {
                            for field in UserField::ALL {
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
                        for user in page.rows.clone() {
                            if state.editing == Some(user.id) {
                                tr {
                                    key: "{user.id}",
                                    class: "admin-table__editing",
                                    td { "{user.id}" }
                                    td {
                                        input {
                                            value: "{editing.name}",
                                            oninput: move |evt: FormEvent| edit_draft.write().name = evt.value(),
                                        }
                                    }
                                    td {
                                        input {
                                            r#type: "email",
                                            value: "{editing.email}",
                                            oninput: move |evt: FormEvent| edit_draft.write().email = evt.value(),
                                        }
                                    }
                                    td {
                                        select {
                                            onchange: move |evt: FormEvent| edit_draft.write().role = evt.value(),
                                            for role in USER_ROLES {
                                                option {
                                                    key: "{role}",
                                                    value: role,
                                                    selected: editing.role.eq_ignore_ascii_case(role),
                                                    "{role}"
                                                }
                                            }
                                        }
                                    }
                                    td { "{format_long_date(&user.created_at)}" }
                                    td {
                                        class: "admin-table__actions",
                                        button {
                                            class: "btn btn--primary",
                                            disabled: busy(),
                                            onclick: handle_save,
                                            "Save"
                                        }
                                        button {
                                            class: "btn btn--ghost",
                                            onclick: move |_| grid.write().end_edit(),
                                            "Cancel"
                                        }
                                    }
                                }
                            } else {
                                UserRow {
                                    key: "{user.id}",
                                    user: user.clone(),
                                    on_edit: move |user: AdminUser| {
                                        edit_draft.set(UserDraft::from_user(&user));
                                        grid.write().begin_edit(user.id);
                                    },
                                    on_delete: move |id| grid.write().request_delete(id),
                                }
                            }
                        }
                    }
                }
                p { class: "admin__count", "Showing {page.rows.len()} of {page.filtered_count} users" }
            }

            TablePager {
                page: page.page,
                total_pages: page.total_pages,
                on_go: move |n| grid.write().go_to(n),
            }

            if let Some(email) = pending {
                ConfirmDialog {
                    title: "Delete User",
                    message: "Are you sure you want to delete {email}? This cannot be undone.",
                    on_confirm: handle_delete,
                    on_cancel: move |_| grid.write().cancel_delete(),
                }
            }
        }
    }
}

#[component]
fn UserRow(user: AdminUser, on_edit: EventHandler<AdminUser>, on_delete: EventHandler<i64>) -> Element {
    let id = user.id;

    rsx! {
        tr {
            td { "{user.id}" }
            td { "{user.name}" }
            td { "{user.email}" }
            td {
                span { class: "badge badge--{user.role}", "{user.role}" }
            }
            td { "{format_long_date(&user.created_at)}" }
            td {
                class: "admin-table__actions",
                button {
                    class: "btn btn--icon",
                    aria_label: "Edit",
                    onclick: {
                        let user = user.clone();
                        move |_| on_edit.call(user.clone())
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

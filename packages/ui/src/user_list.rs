use dioxus::prelude::*;
use store::UserRecord;

use crate::directory::{report, use_directory};
use crate::icons::{FaPen, FaRotate, FaTrash};
use crate::Icon;

/// The current snapshot, in server order.
#[component]
pub fn UserList() -> Element {
    let directory = use_directory();
    let state = directory.state.cloned();
    let controller = directory.controller;

    let on_refresh = move |_| {
        let controller = controller.clone();
        async move {
            report("refresh", &controller.request_refresh().await);
        }
    };

    rsx! {
        section {
            class: "card list-card",
            div {
                class: "list-header",
                h2 { "Users" }
                div { class: "meta", "{state.summary()}" }
                button {
                    class: "btn ghost small",
                    title: "Reload",
                    disabled: state.is_loading(),
                    onclick: on_refresh,
                    Icon { icon: FaRotate, width: 12, height: 12 }
                }
            }

            if let Some(error) = &state.last_error {
                div { class: "alert", "{error}" }
            }

            div {
                class: "users-grid",
                if state.is_empty() {
                    div { class: "empty", "No users registered" }
                }
                for record in state.records.iter() {
                    UserCard { key: "{record.id}", record: record.clone() }
                }
            }
        }
    }
}

#[component]
fn UserCard(record: UserRecord) -> Element {
    let controller = use_directory().controller;

    let on_edit = {
        let controller = controller.clone();
        let record = record.clone();
        move |_| {
            let controller = controller.clone();
            let record = record.clone();
            async move {
                report("edit", &controller.request_edit(record).await);
            }
        }
    };
    let on_delete = {
        let id = record.id.clone();
        move |_| {
            let controller = controller.clone();
            let id = id.clone();
            async move {
                report("delete", &controller.request_delete(id).await);
            }
        }
    };

    rsx! {
        article {
            class: "user-card",
            div {
                class: "user-top",
                div { class: "avatar", "{record.initial()}" }
                div {
                    div { class: "user-name", "{record.name}" }
                    div { class: "user-email", "{record.email}" }
                }
            }
            div {
                class: "user-bottom",
                div { class: "user-phone", "{record.phone_label()}" }
                div {
                    class: "user-actions",
                    button {
                        class: "btn small",
                        title: "Edit",
                        onclick: on_edit,
                        Icon { icon: FaPen, width: 12, height: 12 }
                    }
                    button {
                        class: "btn danger small",
                        title: "Delete",
                        onclick: on_delete,
                        Icon { icon: FaTrash, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}

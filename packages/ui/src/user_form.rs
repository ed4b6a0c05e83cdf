use dioxus::prelude::*;

use crate::directory::{report, use_directory};
use crate::icons::FaUserPlus;
use crate::Icon;

/// Create form bound to the controller's draft.
#[component]
pub fn UserForm() -> Element {
    let directory = use_directory();
    let draft = directory.draft;
    let controller = directory.controller;

    let on_name = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            let value = evt.value();
            controller.update_draft(|d| d.name = value);
        }
    };
    let on_email = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            let value = evt.value();
            controller.update_draft(|d| d.email = value);
        }
    };
    let on_phone = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            let value = evt.value();
            controller.update_draft(|d| d.phone = value);
        }
    };
    let on_submit = move |_| {
        let controller = controller.clone();
        async move {
            let outcome = controller.request_create(controller.draft()).await;
            report("create", &outcome);
        }
    };

    let form = draft.cloned();

    rsx! {
        section {
            class: "card form-card",
            h2 { "New user" }
            div {
                class: "form-grid",
                input {
                    class: "input",
                    r#type: "text",
                    placeholder: "Full name",
                    value: form.name,
                    oninput: on_name,
                }
                input {
                    class: "input",
                    r#type: "email",
                    placeholder: "Email address",
                    value: form.email,
                    oninput: on_email,
                }
                input {
                    class: "input",
                    r#type: "tel",
                    placeholder: "Phone number",
                    value: form.phone,
                    oninput: on_phone,
                }
                div {
                    class: "actions",
                    button {
                        class: "btn primary",
                        r#type: "button",
                        onclick: on_submit,
                        Icon { icon: FaUserPlus, width: 14, height: 14 }
                        " Add user"
                    }
                }
            }
        }
    }
}

use dioxus::prelude::*;
use store::{DraftForm, Prompt, Resolution, UserRecord};

use crate::directory::use_directory;
use crate::gate::DialogGate;
use crate::views::ModalOverlay;

/// Renders the open confirmation prompt, if any.
#[component]
pub fn GateDialog() -> Element {
    let gate = use_directory().gate;
    let Some(pending) = gate.pending() else {
        return rsx! {};
    };
    let dismiss = move |_: ()| gate.resolve(Resolution::Cancelled);

    match pending.prompt {
        Prompt::Notice { message } => rsx! {
            ModalOverlay {
                on_close: dismiss,
                div {
                    class: "dialog",
                    h2 { "Incomplete form" }
                    p { "{message}" }
                    div {
                        class: "dialog-actions",
                        button {
                            class: "btn primary",
                            onclick: move |_| gate.resolve(Resolution::Cancelled),
                            "OK"
                        }
                    }
                }
            }
        },
        Prompt::EditRecord { record } => rsx! {
            ModalOverlay {
                on_close: dismiss,
                EditDialog { key: "{record.id}", record: record.clone(), gate: gate }
            }
        },
        Prompt::ConfirmDelete { message, .. } => rsx! {
            ModalOverlay {
                on_close: dismiss,
                div {
                    class: "dialog",
                    h2 { "Delete user" }
                    p { "{message}" }
                    div {
                        class: "dialog-actions",
                        button {
                            class: "btn danger",
                            onclick: move |_| gate.resolve(Resolution::Approved),
                            "Delete"
                        }
                        button {
                            class: "btn ghost",
                            onclick: move |_| gate.resolve(Resolution::Cancelled),
                            "Cancel"
                        }
                    }
                }
            }
        },
    }
}

/// Edit form prefilled from `record`. Only "Save" yields a draft.
#[component]
fn EditDialog(record: UserRecord, gate: DialogGate) -> Element {
    let mut draft = use_signal(|| DraftForm::from(&record));

    rsx! {
        div {
            class: "dialog",
            h2 { "Edit user" }
            div {
                class: "form-grid",
                input {
                    class: "input",
                    r#type: "text",
                    placeholder: "Full name",
                    value: draft.read().name.clone(),
                    oninput: move |evt: FormEvent| draft.write().name = evt.value(),
                }
                input {
                    class: "input",
                    r#type: "email",
                    placeholder: "Email address",
                    value: draft.read().email.clone(),
                    oninput: move |evt: FormEvent| draft.write().email = evt.value(),
                }
                input {
                    class: "input",
                    r#type: "tel",
                    placeholder: "Phone number",
                    value: draft.read().phone.clone(),
                    oninput: move |evt: FormEvent| draft.write().phone = evt.value(),
                }
            }
            div {
                class: "dialog-actions",
                button {
                    class: "btn primary",
                    onclick: move |_| gate.resolve(Resolution::Edited(draft.cloned())),
                    "Save"
                }
                button {
                    class: "btn ghost",
                    onclick: move |_| gate.resolve(Resolution::Cancelled),
                    "Cancel"
                }
            }
        }
    }
}

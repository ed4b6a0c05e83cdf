use dioxus::prelude::*;

use crate::{GateDialog, UserForm, UserList};

/// The single page: create form, user list and the open prompt.
#[component]
pub fn DirectoryView() -> Element {
    rsx! {
        div {
            class: "app-root",
            header {
                class: "hero",
                div {
                    class: "hero-inner",
                    h1 { "User Directory" }
                    p { class: "subtitle", "Add, browse and manage your users." }
                }
            }
            main {
                class: "container",
                UserForm {}
                UserList {}
            }
            GateDialog {}
        }
    }
}

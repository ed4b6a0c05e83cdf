use dioxus::prelude::*;

/// Full-screen backdrop with a centered dialog card.
/// Clicking the backdrop or pressing Escape triggers `on_close`; clicks inside
/// the card do not. The backdrop takes focus on mount so Escape works without
/// a click first.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            tabindex: "-1",
            onmounted: move |evt: Event<MountedData>| async move {
                let _ = evt.set_focus(true).await;
            },
            onkeydown: move |evt: KeyboardEvent| {
                if closes_on(&evt.key()) {
                    on_close.call(());
                }
            },
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Keys that dismiss the dialog.
pub(crate) fn closes_on(key: &Key) -> bool {
    matches!(key, Key::Escape)
}

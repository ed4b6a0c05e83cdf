//! Directory context and hooks for the UI.

use std::rc::Rc;

use api::{ApiConfig, HttpGateway};
use dioxus::prelude::*;
use store::{DraftForm, IntentOutcome, SyncController, SyncState};

use crate::gate::DialogGate;

pub type Controller = SyncController<HttpGateway, DialogGate>;

/// Everything a component needs to render the directory and raise intents.
#[derive(Clone)]
pub struct Directory {
    pub controller: Rc<Controller>,
    /// Mirror of the controller's state, updated on every change.
    pub state: Signal<SyncState>,
    /// Mirror of the create-form draft.
    pub draft: Signal<DraftForm>,
    pub gate: DialogGate,
}

/// Get the directory provided by [`DirectoryProvider`].
pub fn use_directory() -> Directory {
    use_context::<Directory>()
}

/// Log the result of an intent. Failures are already in `last_error`.
pub fn report(intent: &str, outcome: &IntentOutcome) {
    match outcome {
        IntentOutcome::Completed => tracing::info!("{intent} completed"),
        IntentOutcome::Cancelled => tracing::debug!("{intent} cancelled"),
        IntentOutcome::Failed(err) => tracing::warn!("{intent} failed: {err}"),
    }
}

/// Provider component that owns the sync controller.
/// Expects an [`ApiConfig`] in context (see the `web` binary's launch).
#[component]
pub fn DirectoryProvider(children: Element) -> Element {
    let config = use_context::<ApiConfig>();
    let state = use_signal(SyncState::default);
    let draft = use_signal(DraftForm::default);
    let pending = use_signal(|| None);
    let gate = DialogGate::new(pending);

    let controller = use_hook(move || {
        let controller = SyncController::new(HttpGateway::new(&config), gate);
        controller.subscribe(move |snapshot| {
            let mut state = state;
            state.set(snapshot.clone());
        });
        controller.subscribe_draft(move |form| {
            let mut draft = draft;
            draft.set(form.clone());
        });
        Rc::new(controller)
    });

    // Load the list on mount
    let loader = controller.clone();
    let _ = use_resource(move || {
        let controller = loader.clone();
        async move {
            report("initial load", &controller.request_refresh().await);
        }
    });

    use_context_provider(|| Directory {
        controller,
        state,
        draft,
        gate,
    });

    rsx! {
        {children}
    }
}

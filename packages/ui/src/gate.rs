//! Dialog-backed [`ConfirmationGate`].
//!
//! `present` parks the prompt in a signal together with a oneshot sender and
//! waits on the receiver. [`crate::GateDialog`] renders whatever is parked and
//! calls [`DialogGate::resolve`] when the user answers. If the sender is
//! dropped without an answer the prompt counts as cancelled.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures::channel::oneshot;
use store::{ConfirmationGate, Prompt, Resolution};

/// A prompt waiting for the user.
#[derive(Clone, Debug)]
pub struct PendingPrompt {
    pub prompt: Prompt,
    reply: Rc<RefCell<Option<oneshot::Sender<Resolution>>>>,
}

impl PartialEq for PendingPrompt {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.reply, &other.reply)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialogGate {
    pending: Signal<Option<PendingPrompt>>,
}

impl DialogGate {
    pub fn new(pending: Signal<Option<PendingPrompt>>) -> Self {
        Self { pending }
    }

    /// The open prompt, if any. Reading subscribes the calling component.
    pub fn pending(&self) -> Option<PendingPrompt> {
        self.pending.cloned()
    }

    /// Answer the open prompt and close it. Does nothing when none is open.
    pub fn resolve(&self, resolution: Resolution) {
        let mut pending = self.pending;
        let Some(open) = pending.write().take() else {
            return;
        };
        if let Some(tx) = open.reply.borrow_mut().take() {
            // The receiver is gone only if the intent was dropped.
            let _ = tx.send(resolution);
        };
    }
}

impl ConfirmationGate for DialogGate {
    async fn present(&self, prompt: Prompt) -> Resolution {
        let (tx, rx) = oneshot::channel();
        let mut pending = self.pending;
        pending.set(Some(PendingPrompt {
            prompt,
            reply: Rc::new(RefCell::new(Some(tx))),
        }));
        rx.await.unwrap_or(Resolution::Cancelled)
    }
}

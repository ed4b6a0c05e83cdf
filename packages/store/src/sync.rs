//! # Sync controller — local snapshot of the remote user collection
//!
//! [`SyncController`] owns the only mutable copy of the directory held by the
//! client ([`SyncState`]), the create-form [`DraftForm`], a [`UserGateway`] and
//! a [`ConfirmationGate`]. Everything the presentation layer does goes through
//! the intent methods; it reads state back through [`SyncController::snapshot`]
//! or a subscription.
//!
//! ## Refresh
//!
//! [`refresh`](SyncController::refresh) marks the state `Loading`, clears the
//! last error and fetches the whole list. Success replaces `records` wholesale.
//! Failure records a message and leaves the previous `records` in place.
//! Overlapping refreshes are not fenced: whichever `list()` resolves last
//! decides `records`.
//!
//! ## Mutations
//!
//! `submit_create`, `submit_edit` and `submit_delete` call the gateway and, on
//! success, await a full refresh before returning. Nothing is applied locally
//! ahead of the server's answer. Drafts with blank fields fail locally without
//! a gateway call.
//!
//! ## Intents
//!
//! | Method | Gate prompt | Proceeds when |
//! |--------|-------------|---------------|
//! | [`request_create`](SyncController::request_create) | `Notice` if the draft is incomplete | draft complete |
//! | [`request_edit`](SyncController::request_edit) | `EditRecord` | gate returns `Edited` |
//! | [`request_delete`](SyncController::request_delete) | `ConfirmDelete` | gate returns `Approved` |
//! | [`request_refresh`](SyncController::request_refresh) | none | always |
//!
//! Only one prompt is open at a time; a second intent waits on the gate lock
//! until the first prompt resolves.

use std::cell::{Cell, RefCell};

use futures::lock::Mutex;
use tracing::{debug, info, warn};

use crate::error::{Operation, SyncError};
use crate::gate::{ConfirmationGate, Prompt};
use crate::gateway::UserGateway;
use crate::models::{DraftForm, UserId, UserRecord};

/// Fetch status of the snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncStatus {
    #[default]
    Idle,
    Loading,
    Error,
}

/// Read-only view handed to renderers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SyncState {
    /// Server order, never re-sorted.
    pub records: Vec<UserRecord>,
    pub status: SyncStatus,
    pub last_error: Option<String>,
}

impl SyncState {
    pub fn is_loading(&self) -> bool {
        self.status == SyncStatus::Loading
    }

    /// Header text for the list: a loading marker or the record count.
    pub fn summary(&self) -> String {
        match (self.is_loading(), self.records.len()) {
            (true, _) => "Loading...".to_string(),
            (false, 1) => "1 user".to_string(),
            (false, n) => format!("{n} users"),
        }
    }

    /// True when there is nothing to show and nothing on the way.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && !self.is_loading()
    }
}

/// Result of an intent as seen by the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum IntentOutcome {
    Completed,
    Cancelled,
    Failed(SyncError),
}

impl From<Result<(), SyncError>> for IntentOutcome {
    fn from(result: Result<(), SyncError>) -> Self {
        match result {
            Ok(()) => Self::Completed,
            Err(err) => Self::Failed(err),
        }
    }
}

type StateObserver = Box<dyn Fn(&SyncState)>;
type DraftObserver = Box<dyn Fn(&DraftForm)>;

/// Owner of the local directory snapshot.
pub struct SyncController<G: UserGateway, C: ConfirmationGate> {
    gateway: G,
    gate: C,
    state: RefCell<SyncState>,
    draft: RefCell<DraftForm>,
    in_flight: Cell<usize>,
    // Set when `last_error` came from a failed list, so a later successful
    // list can clear it without hiding a mutation error.
    list_failed: Cell<bool>,
    gate_lock: Mutex<()>,
    state_observers: RefCell<Vec<StateObserver>>,
    draft_observers: RefCell<Vec<DraftObserver>>,
}

impl<G: UserGateway, C: ConfirmationGate> SyncController<G, C> {
    pub fn new(gateway: G, gate: C) -> Self {
        Self {
            gateway,
            gate,
            state: RefCell::new(SyncState::default()),
            draft: RefCell::new(DraftForm::default()),
            in_flight: Cell::new(0),
            list_failed: Cell::new(false),
            gate_lock: Mutex::new(()),
            state_observers: RefCell::new(Vec::new()),
            draft_observers: RefCell::new(Vec::new()),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gate(&self) -> &C {
        &self.gate
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> SyncState {
        self.state.borrow().clone()
    }

    /// Call `observer` after every state change. Observers must not mutate the
    /// controller from inside the callback.
    pub fn subscribe(&self, observer: impl Fn(&SyncState) + 'static) {
        self.state_observers.borrow_mut().push(Box::new(observer));
    }

    /// Call `observer` whenever the create-form draft changes.
    pub fn subscribe_draft(&self, observer: impl Fn(&DraftForm) + 'static) {
        self.draft_observers.borrow_mut().push(Box::new(observer));
    }

    pub fn draft(&self) -> DraftForm {
        self.draft.borrow().clone()
    }

    pub fn set_draft(&self, draft: DraftForm) {
        self.update_draft(|d| *d = draft);
    }

    pub fn update_draft(&self, f: impl FnOnce(&mut DraftForm)) {
        f(&mut *self.draft.borrow_mut());
        let draft = self.draft.borrow();
        for observer in self.draft_observers.borrow().iter() {
            observer(&draft);
        }
    }

    fn mutate(&self, f: impl FnOnce(&mut SyncState)) {
        f(&mut *self.state.borrow_mut());
        let state = self.state.borrow();
        for observer in self.state_observers.borrow().iter() {
            observer(&state);
        }
    }

    fn record_failure(&self, op: Operation, err: &SyncError) {
        warn!(?op, error = %err, "directory operation failed");
        self.list_failed.set(false);
        let message = err.user_message(op);
        self.mutate(|s| s.last_error = Some(message));
    }

    /// Replace the snapshot with the server's current list.
    pub async fn refresh(&self) -> Result<(), SyncError> {
        self.in_flight.set(self.in_flight.get() + 1);
        self.list_failed.set(false);
        self.mutate(|s| {
            s.status = SyncStatus::Loading;
            s.last_error = None;
        });

        debug!("fetching user list");
        let result = self.gateway.list().await;

        let remaining = self.in_flight.get() - 1;
        self.in_flight.set(remaining);

        match result {
            Ok(records) => {
                debug!(count = records.len(), "user list replaced");
                let clear_error = self.list_failed.replace(false);
                self.mutate(|s| {
                    s.records = records;
                    if clear_error {
                        s.last_error = None;
                    }
                    if remaining == 0 {
                        s.status = SyncStatus::Idle;
                    }
                });
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "user list refresh failed");
                self.list_failed.set(true);
                let message = err.user_message(Operation::List);
                self.mutate(|s| {
                    s.last_error = Some(message);
                    if remaining == 0 {
                        s.status = SyncStatus::Error;
                    }
                });
                Err(err)
            }
        }
    }

    fn validate(&self, op: Operation, draft: &DraftForm) -> Result<(), SyncError> {
        let missing = draft.missing_fields();
        if missing.is_empty() {
            return Ok(());
        }
        let err = SyncError::Validation { missing };
        self.record_failure(op, &err);
        Err(err)
    }

    /// Create a user from `draft`. Clears the create-form draft and refreshes on success.
    pub async fn submit_create(&self, draft: DraftForm) -> Result<(), SyncError> {
        self.validate(Operation::Create, &draft)?;

        match self.gateway.create(&draft).await {
            Ok(record) => {
                info!(id = %record.id, "user created");
                self.update_draft(DraftForm::clear);
                // Refresh failures are already recorded in `last_error`.
                let _ = self.refresh().await;
                Ok(())
            }
            Err(err) => {
                self.record_failure(Operation::Create, &err);
                Err(err)
            }
        }
    }

    /// Update user `id` with `draft`, then refresh.
    pub async fn submit_edit(&self, id: &UserId, draft: DraftForm) -> Result<(), SyncError> {
        self.validate(Operation::Update, &draft)?;

        match self.gateway.update(id, &draft).await {
            Ok(record) => {
                info!(id = %record.id, "user updated");
                let _ = self.refresh().await;
                Ok(())
            }
            Err(err) => {
                self.record_failure(Operation::Update, &err);
                Err(err)
            }
        }
    }

    /// Delete user `id`, then refresh. Callers must have obtained approval first.
    pub async fn submit_delete(&self, id: &UserId) -> Result<(), SyncError> {
        match self.gateway.delete(id).await {
            Ok(()) => {
                info!(%id, "user deleted");
                let _ = self.refresh().await;
                Ok(())
            }
            Err(err) => {
                self.record_failure(Operation::Delete, &err);
                Err(err)
            }
        }
    }

    /// Create from `draft`, showing a blocking notice first when fields are blank.
    pub async fn request_create(&self, draft: DraftForm) -> IntentOutcome {
        if !draft.is_complete() {
            let _guard = self.gate_lock.lock().await;
            // A notice always ends in cancellation, whatever the gate answers.
            self.gate
                .present(Prompt::notice("Fill in all fields before adding a user"))
                .await;
        }
        self.submit_create(draft).await.into()
    }

    /// Open the edit dialog for `record` and submit the edited draft on confirm.
    pub async fn request_edit(&self, record: UserRecord) -> IntentOutcome {
        let resolution = {
            let _guard = self.gate_lock.lock().await;
            self.gate
                .present(Prompt::EditRecord {
                    record: record.clone(),
                })
                .await
        };
        match resolution.into_draft() {
            Some(draft) => self.submit_edit(&record.id, draft).await.into(),
            None => {
                debug!(id = %record.id, "edit cancelled");
                IntentOutcome::Cancelled
            }
        }
    }

    /// Ask for confirmation and delete `id` only when approved.
    pub async fn request_delete(&self, id: UserId) -> IntentOutcome {
        let resolution = {
            let _guard = self.gate_lock.lock().await;
            self.gate.present(Prompt::confirm_delete(id.clone())).await
        };
        if !resolution.approves() {
            debug!(%id, "delete cancelled");
            return IntentOutcome::Cancelled;
        }
        self.submit_delete(&id).await.into()
    }

    pub async fn request_refresh(&self) -> IntentOutcome {
        self.refresh().await.into()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::rc::Rc;

    use futures::channel::oneshot;

    use super::*;
    use crate::gate::Resolution;
    use crate::memory::MemoryGateway;

    /// Answers prompts from a fixed script; anything unscripted is cancelled.
    #[derive(Clone, Default)]
    struct ScriptedGate {
        answers: Rc<RefCell<VecDeque<Resolution>>>,
        prompts: Rc<RefCell<Vec<Prompt>>>,
    }

    impl ScriptedGate {
        fn answering(answers: Vec<Resolution>) -> Self {
            Self {
                answers: Rc::new(RefCell::new(answers.into())),
                ..Self::default()
            }
        }

        fn prompts(&self) -> Vec<Prompt> {
            self.prompts.borrow().clone()
        }
    }

    impl ConfirmationGate for ScriptedGate {
        async fn present(&self, prompt: Prompt) -> Resolution {
            self.prompts.borrow_mut().push(prompt);
            self.answers
                .borrow_mut()
                .pop_front()
                .unwrap_or(Resolution::Cancelled)
        }
    }

    fn user(id: u64, name: &str, email: &str, phone: &str) -> UserRecord {
        UserRecord {
            id: UserId::from(id),
            name: name.to_string(),
            email: email.to_string(),
            phone: Some(phone.to_string()),
        }
    }

    fn ana() -> UserRecord {
        user(1, "Ana", "ana@x.com", "555")
    }

    fn controller_with(
        records: Vec<UserRecord>,
        answers: Vec<Resolution>,
    ) -> SyncController<MemoryGateway, ScriptedGate> {
        SyncController::new(
            MemoryGateway::with_records(records),
            ScriptedGate::answering(answers),
        )
    }

    #[tokio::test]
    async fn test_refresh_is_idempotent() {
        let controller = controller_with(vec![ana()], vec![]);

        controller.refresh().await.unwrap();
        let first = controller.snapshot();
        controller.refresh().await.unwrap();
        let second = controller.snapshot();

        assert_eq!(first, second);
        assert_eq!(second.records, vec![ana()]);
        assert_eq!(second.status, SyncStatus::Idle);
    }

    #[tokio::test]
    async fn test_empty_collection_is_success() {
        let controller = controller_with(vec![], vec![]);
        controller.refresh().await.unwrap();

        let state = controller.snapshot();
        assert!(state.records.is_empty());
        assert!(state.last_error.is_none());
        assert!(state.is_empty());
        assert_eq!(state.summary(), "0 users");
    }

    #[tokio::test]
    async fn test_incomplete_draft_never_reaches_gateway() {
        let controller = controller_with(vec![ana()], vec![Resolution::Approved]);
        controller.refresh().await.unwrap();
        let before = controller.snapshot().records;
        let calls_before = controller.gateway().calls().len();

        let outcome = controller
            .request_create(DraftForm::new("", "x@y.com", "1"))
            .await;

        assert!(matches!(
            outcome,
            IntentOutcome::Failed(SyncError::Validation { ref missing }) if missing == &vec!["name"]
        ));
        assert_eq!(controller.gateway().calls().len(), calls_before);
        assert_eq!(controller.snapshot().records, before);
        assert_eq!(
            controller.snapshot().last_error.as_deref(),
            Some("Fill in all fields")
        );
        // The notice was shown even though the gate tried to approve it.
        assert!(matches!(
            controller.gate().prompts().as_slice(),
            [Prompt::Notice { .. }]
        ));
    }

    #[tokio::test]
    async fn test_create_adds_exactly_one_record() {
        let controller = controller_with(vec![ana()], vec![]);
        controller.refresh().await.unwrap();
        controller.set_draft(DraftForm::new("Bob", "bob@x.com", "556"));

        let outcome = controller.request_create(controller.draft()).await;
        assert_eq!(outcome, IntentOutcome::Completed);

        let state = controller.snapshot();
        assert_eq!(state.records.len(), 2);
        let bob = state.records.iter().find(|r| r.name == "Bob").unwrap();
        assert_eq!(bob.id, UserId::from(2));
        assert_eq!(controller.draft(), DraftForm::default());
        assert!(controller.gate().prompts().is_empty());
    }

    #[tokio::test]
    async fn test_failed_create_keeps_records_and_draft() {
        let controller = controller_with(vec![ana()], vec![]);
        controller.refresh().await.unwrap();
        let draft = DraftForm::new("Bob", "bob@x.com", "556");
        controller.set_draft(draft.clone());
        controller.gateway().fail_next(Operation::Create);

        let outcome = controller.request_create(draft.clone()).await;

        assert!(matches!(
            outcome,
            IntentOutcome::Failed(SyncError::Transport(_))
        ));
        let state = controller.snapshot();
        assert_eq!(state.records, vec![ana()]);
        assert_eq!(state.last_error.as_deref(), Some("Could not create the user"));
        assert_eq!(controller.draft(), draft);
    }

    #[tokio::test]
    async fn test_delete_requires_approval() {
        let controller = controller_with(vec![ana()], vec![Resolution::Cancelled]);
        controller.refresh().await.unwrap();

        let outcome = controller.request_delete(UserId::from(1)).await;

        assert_eq!(outcome, IntentOutcome::Cancelled);
        assert_eq!(controller.snapshot().records, vec![ana()]);
        assert_eq!(controller.gateway().records(), vec![ana()]);
        assert!(!controller.gateway().calls().contains(&Operation::Delete));
    }

    #[tokio::test]
    async fn test_mismatched_resolution_does_not_approve_delete() {
        let controller = controller_with(
            vec![ana()],
            vec![Resolution::Edited(DraftForm::default())],
        );

        let outcome = controller.request_delete(UserId::from(1)).await;

        assert_eq!(outcome, IntentOutcome::Cancelled);
        assert_eq!(controller.gateway().records().len(), 1);
    }

    #[tokio::test]
    async fn test_approved_delete_refreshes() {
        let bob = user(2, "Bob", "bob@x.com", "556");
        let controller = controller_with(vec![ana(), bob.clone()], vec![Resolution::Approved]);
        controller.refresh().await.unwrap();

        let outcome = controller.request_delete(UserId::from(1)).await;

        assert_eq!(outcome, IntentOutcome::Completed);
        assert_eq!(controller.snapshot().records, vec![bob]);
        assert!(matches!(
            controller.gate().prompts().as_slice(),
            [Prompt::ConfirmDelete { id, .. }] if id == &UserId::from(1)
        ));
    }

    #[tokio::test]
    async fn test_delete_of_vanished_record_is_reported() {
        let controller = controller_with(vec![ana()], vec![Resolution::Approved]);
        controller.refresh().await.unwrap();
        controller.gateway().remove_remotely(&UserId::from(1));

        let outcome = controller.request_delete(UserId::from(1)).await;

        assert_eq!(
            outcome,
            IntentOutcome::Failed(SyncError::NotFound(UserId::from(1)))
        );
        let state = controller.snapshot();
        assert_eq!(state.records, vec![ana()]);
        assert_eq!(state.last_error.as_deref(), Some("The user no longer exists"));
    }

    #[tokio::test]
    async fn test_edit_prefills_and_submits() {
        let edited = DraftForm::new("Ana Maria", "ana@x.com", "555");
        let controller = controller_with(vec![ana()], vec![Resolution::Edited(edited)]);
        controller.refresh().await.unwrap();
        controller.set_draft(DraftForm::new("half", "", ""));

        let outcome = controller.request_edit(ana()).await;

        assert_eq!(outcome, IntentOutcome::Completed);
        assert_eq!(controller.snapshot().records[0].name, "Ana Maria");
        assert_eq!(
            controller.gate().prompts()[0].prefill(),
            Some(DraftForm::new("Ana", "ana@x.com", "555"))
        );
        // The create form is untouched by an edit.
        assert_eq!(controller.draft(), DraftForm::new("half", "", ""));
    }

    #[tokio::test]
    async fn test_dismissed_edit_sends_nothing() {
        let controller = controller_with(vec![ana()], vec![Resolution::Cancelled]);

        let outcome = controller.request_edit(ana()).await;

        assert_eq!(outcome, IntentOutcome::Cancelled);
        assert!(!controller.gateway().calls().contains(&Operation::Update));
    }

    #[tokio::test]
    async fn test_edit_with_blank_field_fails_locally() {
        let controller = controller_with(
            vec![ana()],
            vec![Resolution::Edited(DraftForm::new("Ana", "", "555"))],
        );

        let outcome = controller.request_edit(ana()).await;

        assert!(matches!(
            outcome,
            IntentOutcome::Failed(SyncError::Validation { .. })
        ));
        assert!(!controller.gateway().calls().contains(&Operation::Update));
    }

    #[tokio::test]
    async fn test_create_succeeds_when_following_refresh_fails() {
        let controller = controller_with(vec![ana()], vec![]);
        controller.refresh().await.unwrap();
        controller.set_draft(DraftForm::new("Bob", "bob@x.com", "556"));
        // Create itself is accepted; only the list after it fails.
        controller.gateway().fail_next(Operation::List);

        let result = controller.submit_create(controller.draft()).await;

        assert_eq!(result, Ok(()));
        let state = controller.snapshot();
        assert_eq!(state.records, vec![ana()]);
        assert_eq!(state.status, SyncStatus::Error);
        assert_eq!(state.last_error.as_deref(), Some("Could not load users"));
        assert_eq!(controller.draft(), DraftForm::default());
        assert_eq!(controller.gateway().records().len(), 2);
        assert_eq!(
            controller.gateway().calls(),
            vec![Operation::List, Operation::Create, Operation::List]
        );
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_records() {
        let controller = controller_with(vec![ana()], vec![]);
        controller.refresh().await.unwrap();
        controller.gateway().fail_next(Operation::List);

        let outcome = controller.request_refresh().await;

        assert!(matches!(outcome, IntentOutcome::Failed(_)));
        let state = controller.snapshot();
        assert_eq!(state.records, vec![ana()]);
        assert_eq!(state.status, SyncStatus::Error);
        assert_eq!(state.last_error.as_deref(), Some("Could not load users"));

        // The next successful refresh clears the error.
        controller.refresh().await.unwrap();
        let state = controller.snapshot();
        assert_eq!(state.status, SyncStatus::Idle);
        assert!(state.last_error.is_none());
    }

    #[tokio::test]
    async fn test_end_to_end_keeps_server_order() {
        let controller = controller_with(vec![ana()], vec![]);
        controller.refresh().await.unwrap();
        assert_eq!(controller.snapshot().records, vec![ana()]);

        let outcome = controller
            .request_create(DraftForm::new("Bob", "bob@x.com", "556"))
            .await;
        assert_eq!(outcome, IntentOutcome::Completed);

        let records = controller.snapshot().records;
        assert_eq!(records.len(), 2);
        assert_eq!(records, controller.gateway().records());
        assert_eq!(records[0].name, "Ana");
        assert_eq!(records[1].name, "Bob");
        assert_eq!(
            controller.gateway().calls(),
            vec![Operation::List, Operation::Create, Operation::List]
        );
    }

    #[tokio::test]
    async fn test_observers_see_loading_then_idle() {
        let controller = controller_with(vec![ana()], vec![]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        controller.subscribe(move |state| log.borrow_mut().push(state.status));

        controller.refresh().await.unwrap();

        assert_eq!(*seen.borrow(), vec![SyncStatus::Loading, SyncStatus::Idle]);
    }

    #[tokio::test]
    async fn test_draft_observer_sees_reset_after_create() {
        let controller = controller_with(vec![], vec![]);
        let drafts = Rc::new(RefCell::new(Vec::new()));
        let log = drafts.clone();
        controller.subscribe_draft(move |draft| log.borrow_mut().push(draft.clone()));

        controller.set_draft(DraftForm::new("Bob", "bob@x.com", "556"));
        controller.submit_create(controller.draft()).await.unwrap();

        assert_eq!(drafts.borrow().last(), Some(&DraftForm::default()));
    }

    /// Gateway whose list responses are released by the test.
    struct HeldGateway {
        pending: RefCell<VecDeque<oneshot::Receiver<Vec<UserRecord>>>>,
    }

    impl UserGateway for HeldGateway {
        async fn list(&self) -> Result<Vec<UserRecord>, SyncError> {
            let rx = self
                .pending
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| SyncError::transport("no response queued"))?;
            rx.await.map_err(SyncError::transport)
        }

        async fn create(&self, _draft: &DraftForm) -> Result<UserRecord, SyncError> {
            Err(SyncError::transport("unsupported"))
        }

        async fn update(&self, id: &UserId, _draft: &DraftForm) -> Result<UserRecord, SyncError> {
            Err(SyncError::NotFound(id.clone()))
        }

        async fn delete(&self, id: &UserId) -> Result<(), SyncError> {
            Err(SyncError::NotFound(id.clone()))
        }
    }

    #[tokio::test]
    async fn test_last_resolved_list_wins() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let controller = SyncController::new(
            HeldGateway {
                pending: RefCell::new(VecDeque::from([first_rx, second_rx])),
            },
            ScriptedGate::default(),
        );
        let bob = user(2, "Bob", "bob@x.com", "556");

        let driver = async {
            // The later request answers first.
            second_tx.send(vec![ana(), bob.clone()]).unwrap();
            tokio::task::yield_now().await;
            assert_eq!(controller.snapshot().records.len(), 2);
            assert!(controller.snapshot().is_loading());
            first_tx.send(vec![ana()]).unwrap();
        };

        let (first, second, ()) =
            futures::join!(controller.refresh(), controller.refresh(), driver);
        assert!(first.is_ok() && second.is_ok());

        let state = controller.snapshot();
        assert_eq!(state.records, vec![ana()]);
        assert_eq!(state.status, SyncStatus::Idle);
    }

    /// Gate that stays open until the test answers.
    #[derive(Clone, Default)]
    struct HeldGate {
        open: Rc<RefCell<Vec<(Prompt, Option<oneshot::Sender<Resolution>>)>>>,
    }

    impl HeldGate {
        fn open_count(&self) -> usize {
            self.open.borrow().len()
        }

        fn answer(&self, index: usize, resolution: Resolution) {
            let tx = self.open.borrow_mut()[index].1.take().unwrap();
            tx.send(resolution).unwrap();
        }
    }

    impl ConfirmationGate for HeldGate {
        async fn present(&self, prompt: Prompt) -> Resolution {
            let (tx, rx) = oneshot::channel();
            self.open.borrow_mut().push((prompt, Some(tx)));
            rx.await.unwrap_or(Resolution::Cancelled)
        }
    }

    #[tokio::test]
    async fn test_second_prompt_waits_for_first() {
        let gate = HeldGate::default();
        let controller =
            SyncController::new(MemoryGateway::with_records(vec![ana()]), gate.clone());

        let driver = async {
            tokio::task::yield_now().await;
            assert_eq!(gate.open_count(), 1);
            assert!(matches!(gate.open.borrow()[0].0, Prompt::ConfirmDelete { .. }));

            gate.answer(0, Resolution::Cancelled);
            while gate.open_count() < 2 {
                tokio::task::yield_now().await;
            }
            assert!(matches!(gate.open.borrow()[1].0, Prompt::EditRecord { .. }));
            gate.answer(1, Resolution::Cancelled);
        };

        let (deleted, edited, ()) = futures::join!(
            controller.request_delete(UserId::from(1)),
            controller.request_edit(ana()),
            driver
        );

        assert_eq!(deleted, IntentOutcome::Cancelled);
        assert_eq!(edited, IntentOutcome::Cancelled);
        assert_eq!(controller.gateway().records(), vec![ana()]);
    }
}

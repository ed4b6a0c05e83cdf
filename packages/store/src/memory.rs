use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::error::{Operation, SyncError};
use crate::gateway::UserGateway;
use crate::models::{DraftForm, UserId, UserRecord};

#[derive(Debug, Default)]
struct Collection {
    records: Vec<UserRecord>,
    next_id: u64,
    fail_next: HashSet<Operation>,
    calls: Vec<Operation>,
}

/// In-memory UserGateway for testing and offline demos.
///
/// Clones share the same collection, so a test can keep a handle while the
/// controller owns another.
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    inner: Rc<RefCell<Collection>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection. New ids continue after the largest
    /// numeric id present.
    pub fn with_records(records: Vec<UserRecord>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| r.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            inner: Rc::new(RefCell::new(Collection {
                records,
                next_id,
                ..Collection::default()
            })),
        }
    }

    /// Current contents of the backing collection.
    pub fn records(&self) -> Vec<UserRecord> {
        self.inner.borrow().records.clone()
    }

    /// Every operation attempted so far, in call order.
    pub fn calls(&self) -> Vec<Operation> {
        self.inner.borrow().calls.clone()
    }

    /// Make the next call of `op` fail with a transport error.
    pub fn fail_next(&self, op: Operation) {
        self.inner.borrow_mut().fail_next.insert(op);
    }

    /// Remove a record behind the client's back, as another session would.
    pub fn remove_remotely(&self, id: &UserId) {
        self.inner.borrow_mut().records.retain(|r| &r.id != id);
    }

    fn begin(&self, op: Operation) -> Result<(), SyncError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(op);
        if inner.fail_next.remove(&op) {
            return Err(SyncError::transport(format!("injected {op:?} failure")));
        }
        Ok(())
    }
}

impl UserGateway for MemoryGateway {
    async fn list(&self) -> Result<Vec<UserRecord>, SyncError> {
        self.begin(Operation::List)?;
        Ok(self.records())
    }

    async fn create(&self, draft: &DraftForm) -> Result<UserRecord, SyncError> {
        self.begin(Operation::Create)?;
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let record = UserRecord {
            id: UserId::from(inner.next_id),
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: Some(draft.phone.clone()),
        };
        inner.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &UserId, draft: &DraftForm) -> Result<UserRecord, SyncError> {
        self.begin(Operation::Update)?;
        let mut inner = self.inner.borrow_mut();
        let record = inner
            .records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| SyncError::NotFound(id.clone()))?;
        record.name = draft.name.clone();
        record.email = draft.email.clone();
        record.phone = Some(draft.phone.clone());
        Ok(record.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), SyncError> {
        self.begin(Operation::Delete)?;
        let mut inner = self.inner.borrow_mut();
        let before = inner.records.len();
        inner.records.retain(|r| &r.id != id);
        if inner.records.len() == before {
            return Err(SyncError::NotFound(id.clone()));
        }
        Ok(())
    }
}

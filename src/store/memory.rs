use std::cell::RefCell;
use crate::models::{Lead, PipelineStage};
use crate::store::{LeadStore, StoreError};

/// In-memory lead store with injectable failures
///
/// Mirrors the SQLite store's ordering semantics (newest first). Tests use
/// `fail_next` to make the following call return a StoreError, which is how
/// the board's rollback path gets exercised without a real backend.
#[derive(Default)]
pub struct MemoryLeadStore {
    inner: RefCell<Inner>,
}

#[derive(Default)]
struct Inner {
    leads: Vec<Lead>,
    next_id: i64,
    fail_next: Option<String>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next store call fail with the given message
    pub fn fail_next(&self, message: &str) {
        self.inner.borrow_mut().fail_next = Some(message.to_string());
    }

    /// Number of leads currently held (test inspection)
    pub fn len(&self) -> usize {
        self.inner.borrow().leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn take_failure(inner: &mut Inner) -> Result<(), StoreError> {
        match inner.fail_next.take() {
            Some(message) => Err(StoreError::Database(message)),
            None => Ok(()),
        }
    }
}

impl LeadStore for MemoryLeadStore {
    fn list_leads(&self) -> Result<Vec<Lead>, StoreError> {
        let mut inner = self.inner.borrow_mut();
        Self::take_failure(&mut inner)?;
        let mut leads = inner.leads.clone();
        leads.sort_by(|a, b| {
            b.created_ts
                .cmp(&a.created_ts)
                .then(b.id.cmp(&a.id))
        });
        Ok(leads)
    }

    fn get_lead(&self, id: i64) -> Result<Option<Lead>, StoreError> {
        let mut inner = self.inner.borrow_mut();
        Self::take_failure(&mut inner)?;
        Ok(inner.leads.iter().find(|l| l.id == Some(id)).cloned())
    }

    fn insert_lead(&self, lead: &Lead) -> Result<Lead, StoreError> {
        let mut inner = self.inner.borrow_mut();
        Self::take_failure(&mut inner)?;
        inner.next_id += 1;
        let stored = Lead {
            id: Some(inner.next_id),
            ..lead.clone()
        };
        inner.leads.push(stored.clone());
        Ok(stored)
    }

    fn update_lead(&self, lead: &Lead) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        Self::take_failure(&mut inner)?;
        let id = lead.id.ok_or_else(|| StoreError::Database("lead has no id".to_string()))?;
        match inner.leads.iter_mut().find(|l| l.id == Some(id)) {
            Some(slot) => {
                *slot = lead.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn update_lead_stage(
        &self,
        id: i64,
        stage: PipelineStage,
        last_contacted_ts: i64,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        Self::take_failure(&mut inner)?;
        match inner.leads.iter_mut().find(|l| l.id == Some(id)) {
            Some(lead) => {
                lead.stage = stage;
                lead.last_contacted_ts = Some(last_contacted_ts);
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }
}

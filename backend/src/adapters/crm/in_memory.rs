//! In-memory CRM implementation for tests and local runs.
//!
//! Behaves like a CRM holding a fixed set of deal records: updates to
//! unknown records fail with `RecordNotFound`, accepted updates overwrite
//! the stored status string, and every accepted request is kept for
//! assertions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::CrmRecordId;
use crate::domain::sync::CrmUpdateRequest;
use crate::ports::{CrmSync, CrmSyncError};

/// In-memory CRM.
///
/// # Example
///
/// ```ignore
/// let crm = InMemoryCrm::new().with_record(record_id.clone());
/// crm.push_status(&record_id, &request).await?;
/// assert_eq!(crm.push_count(), 1);
/// ```
#[derive(Default)]
pub struct InMemoryCrm {
    statuses: RwLock<HashMap<CrmRecordId, Option<String>>>,
    pushed: RwLock<Vec<(CrmRecordId, CrmUpdateRequest)>>,
    unavailable: bool,
}

impl InMemoryCrm {
    /// Creates a CRM with no records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record with an empty status field.
    pub fn with_record(self, record_id: CrmRecordId) -> Self {
        self.write_status(record_id, None);
        self
    }

    /// Adds a record whose status field already holds `raw`.
    pub fn with_raw_status(self, record_id: CrmRecordId, raw: impl Into<String>) -> Self {
        self.write_status(record_id, Some(raw.into()));
        self
    }

    /// Makes every call fail with `Unavailable`.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    // === Test Helpers ===

    /// Returns all accepted update requests in arrival order.
    pub fn pushed_requests(&self) -> Vec<(CrmRecordId, CrmUpdateRequest)> {
        self.pushed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns count of accepted update requests.
    pub fn push_count(&self) -> usize {
        self.pushed.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns the stored status string of a record, if any.
    pub fn stored_status(&self, record_id: &CrmRecordId) -> Option<String> {
        self.statuses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(record_id)
            .cloned()
            .flatten()
    }

    fn write_status(&self, record_id: CrmRecordId, raw: Option<String>) {
        self.statuses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record_id, raw);
    }

    fn check_available(&self) -> Result<(), CrmSyncError> {
        if self.unavailable {
            return Err(CrmSyncError::Unavailable("in-memory CRM switched off".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CrmSync for InMemoryCrm {
    async fn push_status(
        &self,
        record_id: &CrmRecordId,
        request: &CrmUpdateRequest,
    ) -> Result<(), CrmSyncError> {
        self.check_available()?;

        let Some(update) = request.data.first() else {
            return Err(CrmSyncError::Rejected {
                record_id: record_id.clone(),
                reason: "request carries no data".to_string(),
            });
        };

        {
            let mut statuses = self.statuses.write().unwrap_or_else(PoisonError::into_inner);
            let Some(slot) = statuses.get_mut(record_id) else {
                return Err(CrmSyncError::RecordNotFound(record_id.clone()));
            };
            *slot = Some(update.discovery_status.as_str().to_string());
        }

        self.pushed
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((record_id.clone(), request.clone()));
        Ok(())
    }

    async fn fetch_status(&self, record_id: &CrmRecordId) -> Result<Option<String>, CrmSyncError> {
        self.check_available()?;

        self.statuses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(record_id)
            .cloned()
            .ok_or_else(|| CrmSyncError::RecordNotFound(record_id.clone()))
    }
}

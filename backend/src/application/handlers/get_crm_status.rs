//! GetCrmStatusHandler - Query handler for the stage stored on a CRM record.
//!
//! The stored string may be stale, hand-edited, or written by another
//! integration. Only strings that name one of the five stages are trusted.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::{CrmRecordId, DomainError};
use crate::domain::progress::{StageDescriptor, WorkflowStage, UNKNOWN_STAGE};
use crate::ports::CrmSync;

/// Query to read a record's stored discovery stage.
#[derive(Debug, Clone)]
pub struct GetCrmStatusQuery {
    pub record_id: CrmRecordId,
}

/// Result of reading a stored stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCrmStatusResult {
    /// The stage, when the stored string is a valid stage identifier.
    pub stage: Option<WorkflowStage>,
    /// Badge metadata; the unknown descriptor when `stage` is `None`.
    pub descriptor: StageDescriptor,
}

/// Handler for reading and validating the CRM-stored stage.
pub struct GetCrmStatusHandler {
    crm: Arc<dyn CrmSync>,
}

impl GetCrmStatusHandler {
    pub fn new(crm: Arc<dyn CrmSync>) -> Self {
        Self { crm }
    }

    pub async fn handle(&self, query: GetCrmStatusQuery) -> Result<GetCrmStatusResult, DomainError> {
        let raw = self.crm.fetch_status(&query.record_id).await?;

        let stage = raw.as_deref().and_then(|raw| match WorkflowStage::parse(raw) {
            Ok(stage) => Some(stage),
            Err(_) => {
                warn!(record_id = %query.record_id, raw, "Ignoring unrecognized CRM status");
                None
            }
        });

        Ok(GetCrmStatusResult {
            stage,
            descriptor: stage.map(|s| s.descriptor()).unwrap_or(UNKNOWN_STAGE),
        })
    }
}

//! CRM Sync Port - Interface for pushing discovery status to the CRM.
//!
//! The transport (HTTP, OAuth refresh, rate limiting) lives entirely in
//! the adapter. The core only hands over a finished update request and
//! reads back the raw status string the CRM has stored.

use async_trait::async_trait;

use crate::domain::foundation::{CrmRecordId, DomainError, ErrorCode};
use crate::domain::sync::CrmUpdateRequest;

/// Errors that can occur while talking to the CRM.
#[derive(Debug, thiserror::Error)]
pub enum CrmSyncError {
    #[error("CRM record not found: {0}")]
    RecordNotFound(CrmRecordId),

    #[error("CRM rejected update for {record_id}: {reason}")]
    Rejected { record_id: CrmRecordId, reason: String },

    #[error("CRM unavailable: {0}")]
    Unavailable(String),
}

impl From<CrmSyncError> for DomainError {
    fn from(err: CrmSyncError) -> Self {
        let (code, record_id) = match &err {
            CrmSyncError::RecordNotFound(id) => (ErrorCode::CrmRecordNotFound, Some(id.clone())),
            CrmSyncError::Rejected { record_id, .. } => {
                (ErrorCode::CrmRejected, Some(record_id.clone()))
            }
            CrmSyncError::Unavailable(_) => (ErrorCode::CrmUnavailable, None),
        };
        let domain = DomainError::new(code, err.to_string());
        match record_id {
            Some(id) => domain.with_detail("record_id", id.to_string()),
            None => domain,
        }
    }
}

/// Port for the CRM record that mirrors a meeting's discovery status.
#[async_trait]
pub trait CrmSync: Send + Sync {
    /// Push a status update to a CRM record.
    ///
    /// # Errors
    /// Returns `CrmSyncError::RecordNotFound` if the record does not exist,
    /// `Rejected` if the CRM refused the body, `Unavailable` on transport failure.
    async fn push_status(
        &self,
        record_id: &CrmRecordId,
        request: &CrmUpdateRequest,
    ) -> Result<(), CrmSyncError>;

    /// Read the raw status string stored on a CRM record.
    ///
    /// Returns `Ok(None)` when the record exists but the field is empty.
    /// The string is untrusted; callers validate it before use.
    async fn fetch_status(&self, record_id: &CrmRecordId) -> Result<Option<String>, CrmSyncError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn CrmSync) {}

    fn record_id() -> CrmRecordId {
        CrmRecordId::new("5725767000000423001").unwrap()
    }

    #[test]
    fn record_not_found_maps_to_domain_code() {
        let err: DomainError = CrmSyncError::RecordNotFound(record_id()).into();
        assert_eq!(err.code, ErrorCode::CrmRecordNotFound);
        assert!(err.message.contains("5725767000000423001"));
        assert_eq!(
            err.details.get("record_id").map(String::as_str),
            Some("5725767000000423001")
        );
    }

    #[test]
    fn rejected_carries_reason() {
        let err = CrmSyncError::Rejected {
            record_id: record_id(),
            reason: "INVALID_DATA".to_string(),
        };
        assert!(err.to_string().contains("INVALID_DATA"));
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::CrmRejected);
    }

    #[test]
    fn unavailable_maps_to_domain_code() {
        let err: DomainError = CrmSyncError::Unavailable("timeout".to_string()).into();
        assert_eq!(err.code, ErrorCode::CrmUnavailable);
        assert!(err.details.is_empty());
    }
}

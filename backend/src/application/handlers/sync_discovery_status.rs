//! SyncDiscoveryStatusHandler - Command handler that mirrors a meeting's
//! derived stage into its CRM record.
//!
//! Classification and payload are computed from one immutable snapshot
//! before anything is sent, so the update never mixes two record states.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::foundation::{CrmRecordId, DomainError, Timestamp};
use crate::domain::meeting::MeetingSnapshot;
use crate::domain::progress::{ModuleProgress, StageClassification, StatusClassifier};
use crate::domain::sync::{CrmFieldNames, CrmStatusUpdate, CrmUpdateRequest};
use crate::ports::CrmSync;

/// Command to sync one meeting snapshot to its CRM record.
#[derive(Debug, Clone)]
pub struct SyncDiscoveryStatusCommand {
    pub record_id: CrmRecordId,
    pub snapshot: MeetingSnapshot,
}

/// Result of a successful sync.
#[derive(Debug, Clone)]
pub struct SyncDiscoveryStatusResult {
    pub classification: StageClassification,
    pub progress: ModuleProgress,
    pub request: CrmUpdateRequest,
}

/// Handler for syncing discovery status.
pub struct SyncDiscoveryStatusHandler {
    crm: Arc<dyn CrmSync>,
    classifier: StatusClassifier,
    run_workflows: bool,
    field_names: CrmFieldNames,
}

impl SyncDiscoveryStatusHandler {
    pub fn new(crm: Arc<dyn CrmSync>, classifier: StatusClassifier, run_workflows: bool) -> Self {
        Self {
            crm,
            classifier,
            run_workflows,
            field_names: CrmFieldNames::default(),
        }
    }

    /// Writes to custom CRM field API names instead of the defaults.
    pub fn with_field_names(mut self, field_names: CrmFieldNames) -> Self {
        self.field_names = field_names;
        self
    }

    pub async fn handle(
        &self,
        cmd: SyncDiscoveryStatusCommand,
    ) -> Result<SyncDiscoveryStatusResult, DomainError> {
        // 1. Derive stage and module progress from the snapshot
        let classification = self.classifier.classify_snapshot(&cmd.snapshot);
        let progress = cmd
            .snapshot
            .record()
            .map(|r| ModuleProgress::from_record(r, self.classifier.policy()))
            .unwrap_or_else(ModuleProgress::empty);

        debug!(
            record_id = %cmd.record_id,
            stage = %classification.stage,
            reason = ?classification.reason,
            filled_modules = progress.filled_count(),
            "Classified meeting snapshot"
        );

        // 2. Build the outbound request
        let update = CrmStatusUpdate::build(&classification, &cmd.snapshot, Timestamp::now());
        let request = CrmUpdateRequest::single(update, self.run_workflows)
            .with_field_names(self.field_names.clone());

        // 3. Hand over to the CRM
        if let Err(e) = self.crm.push_status(&cmd.record_id, &request).await {
            warn!(record_id = %cmd.record_id, "CRM status sync failed: {}", e);
            return Err(e.into());
        }

        info!(
            record_id = %cmd.record_id,
            stage = %classification.stage,
            completion = %classification.percentage,
            "Synced discovery status"
        );

        Ok(SyncDiscoveryStatusResult {
            classification,
            progress,
            request,
        })
    }
}

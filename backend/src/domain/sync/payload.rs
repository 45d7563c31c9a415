//! CRM status update payload.
//!
//! Field names default to the custom fields defined on the CRM deal layout
//! and can be remapped per deployment. The record snapshot travels as a
//! JSON string because the CRM field is a multi-line text field, not a
//! JSON column.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::foundation::Timestamp;
use crate::domain::meeting::MeetingSnapshot;
use crate::domain::progress::{StageClassification, WorkflowStage};

/// Trigger name that makes the CRM run its workflow rules on update.
pub const WORKFLOW_TRIGGER: &str = "workflow";

/// API names of the CRM fields the update writes to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrmFieldNames {
    #[serde(default = "default_status_field")]
    pub status: String,

    #[serde(default = "default_completion_field")]
    pub completion: String,

    #[serde(default = "default_data_field")]
    pub data: String,

    #[serde(default = "default_last_sync_field")]
    pub last_sync: String,
}

impl CrmFieldNames {
    /// `(setting, api name)` pairs in payload order.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("status", self.status.as_str()),
            ("completion", self.completion.as_str()),
            ("data", self.data.as_str()),
            ("last_sync", self.last_sync.as_str()),
        ]
    }
}

impl Default for CrmFieldNames {
    fn default() -> Self {
        Self {
            status: default_status_field(),
            completion: default_completion_field(),
            data: default_data_field(),
            last_sync: default_last_sync_field(),
        }
    }
}

fn default_status_field() -> String {
    "Discovery_Status".to_string()
}

fn default_completion_field() -> String {
    "Discovery_Completion".to_string()
}

fn default_data_field() -> String {
    "Discovery_Data".to_string()
}

fn default_last_sync_field() -> String {
    "Discovery_Last_Sync".to_string()
}

/// One record's worth of discovery fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrmStatusUpdate {
    pub discovery_status: WorkflowStage,

    /// Completion with a trailing percent sign, e.g. `"60%"`.
    pub discovery_completion: String,

    /// Serialized meeting record.
    pub discovery_data: String,

    pub last_sync: String,
}

impl CrmStatusUpdate {
    /// Builds the update from a classification and the snapshot it was derived from.
    pub fn build(
        classification: &StageClassification,
        snapshot: &MeetingSnapshot,
        synced_at: Timestamp,
    ) -> Self {
        Self {
            discovery_status: classification.stage,
            discovery_completion: classification.percentage.to_string(),
            discovery_data: snapshot.to_json().to_string(),
            last_sync: synced_at.to_rfc3339(),
        }
    }
}

/// Request body for a record update: `{"data": [...], "trigger": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrmUpdateRequest {
    pub data: Vec<CrmStatusUpdate>,
    pub trigger: Vec<String>,
    pub field_names: CrmFieldNames,
}

impl CrmUpdateRequest {
    /// Wraps a single update, optionally asking the CRM to run workflow rules.
    pub fn single(update: CrmStatusUpdate, run_workflows: bool) -> Self {
        let trigger = if run_workflows {
            vec![WORKFLOW_TRIGGER.to_string()]
        } else {
            Vec::new()
        };
        Self {
            data: vec![update],
            trigger,
            field_names: CrmFieldNames::default(),
        }
    }

    /// Writes the updates under custom field API names.
    pub fn with_field_names(mut self, field_names: CrmFieldNames) -> Self {
        self.field_names = field_names;
        self
    }
}

struct NamedRecord<'a> {
    update: &'a CrmStatusUpdate,
    names: &'a CrmFieldNames,
}

impl Serialize for NamedRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(&self.names.status, &self.update.discovery_status)?;
        map.serialize_entry(&self.names.completion, &self.update.discovery_completion)?;
        map.serialize_entry(&self.names.data, &self.update.discovery_data)?;
        map.serialize_entry(&self.names.last_sync, &self.update.last_sync)?;
        map.end()
    }
}

impl Serialize for CrmUpdateRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let records: Vec<NamedRecord<'_>> = self
            .data
            .iter()
            .map(|update| NamedRecord {
                update,
                names: &self.field_names,
            })
            .collect();

        let len = if self.trigger.is_empty() { 1 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("data", &records)?;
        if !self.trigger.is_empty() {
            map.serialize_entry("trigger", &self.trigger)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::progress::StatusClassifier;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    fn fixed_time() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 6, 2, 8, 30, 0).unwrap())
    }

    fn update_for(doc: Value) -> CrmStatusUpdate {
        let snapshot = MeetingSnapshot::from_value(doc);
        let classification = StatusClassifier::default().classify_snapshot(&snapshot);
        CrmStatusUpdate::build(&classification, &snapshot, fixed_time())
    }

    #[test]
    fn build_carries_stage_and_percentage() {
        let update = update_for(json!({"modules": {"proposal": {"proposalSent": true}}}));
        assert_eq!(update.discovery_status, WorkflowStage::ProposalSent);
        assert_eq!(update.discovery_completion, "60%");
        assert_eq!(update.last_sync, "2024-06-02T08:30:00Z");
    }

    #[test]
    fn discovery_data_is_the_serialized_record() {
        let doc = json!({"status": "client_approved", "modules": {"overview": {"name": "מאפיית השכונה"}}});
        let update = update_for(doc.clone());
        let parsed: Value = serde_json::from_str(&update.discovery_data).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn uninitialized_snapshot_serializes_as_null() {
        let update = update_for(Value::Null);
        assert_eq!(update.discovery_status, WorkflowStage::DiscoveryStarted);
        assert_eq!(update.discovery_data, "null");
    }

    #[test]
    fn request_uses_crm_field_names() {
        let update = update_for(json!({"phase": "development"}));
        let body = serde_json::to_value(CrmUpdateRequest::single(update, true)).unwrap();

        let record = &body["data"][0];
        assert_eq!(record["Discovery_Status"], "implementation_started");
        assert_eq!(record["Discovery_Completion"], "90%");
        assert!(record["Discovery_Data"].is_string());
        assert_eq!(body["trigger"], json!(["workflow"]));
    }

    #[test]
    fn request_uses_configured_field_names() {
        let names = CrmFieldNames {
            status: "Intake_Stage".to_string(),
            completion: "Intake_Progress".to_string(),
            ..CrmFieldNames::default()
        };
        let update = update_for(json!({"status": "client_approved"}));
        let body = serde_json::to_value(CrmUpdateRequest::single(update, false).with_field_names(names))
            .unwrap();

        let record = &body["data"][0];
        assert_eq!(record["Intake_Stage"], "technical_details_collection");
        assert_eq!(record["Intake_Progress"], "80%");
        assert!(record.get("Discovery_Status").is_none());
        assert!(record["Discovery_Data"].is_string());
        assert_eq!(record["Discovery_Last_Sync"], "2024-06-02T08:30:00Z");
    }

    #[test]
    fn field_names_deserialize_with_defaults() {
        let names: CrmFieldNames = serde_json::from_str(r#"{"status": "Stage__c"}"#).unwrap();
        assert_eq!(names.status, "Stage__c");
        assert_eq!(names.data, "Discovery_Data");
    }

    #[test]
    fn request_omits_empty_trigger() {
        let update = update_for(json!({}));
        let body = serde_json::to_value(CrmUpdateRequest::single(update, false)).unwrap();
        assert!(body.get("trigger").is_none());
    }
}

//! End-to-end classification scenarios.
//!
//! Each scenario feeds a JSON document through snapshot parsing, the
//! classifier and the CRM sync handler, as the state store would.

use std::sync::Arc;

use serde_json::{json, Value};

use discovery_intake::adapters::InMemoryCrm;
use discovery_intake::application::{
    GetCrmStatusHandler, GetCrmStatusQuery, SyncDiscoveryStatusCommand, SyncDiscoveryStatusHandler,
};
use discovery_intake::domain::foundation::CrmRecordId;
use discovery_intake::domain::meeting::MeetingSnapshot;
use discovery_intake::domain::progress::{
    describe_stage, has_data, is_valid_stage, StatusClassifier, WorkflowStage,
};

fn classify(doc: Value) -> (WorkflowStage, u8) {
    let result = StatusClassifier::default().classify_snapshot(&MeetingSnapshot::from_value(doc));
    (result.stage, result.percentage.value())
}

// =============================================================================
// Scenarios A-E
// =============================================================================

#[test]
fn scenario_a_empty_modules() {
    assert_eq!(classify(json!({"modules": {}})), (WorkflowStage::DiscoveryStarted, 20));
}

#[test]
fn scenario_b_selected_service() {
    let doc = json!({"modules": {"proposal": {"selectedServices": [{"service": "x", "selected": true}]}}});
    assert_eq!(classify(doc), (WorkflowStage::Proposal, 40));
}

#[test]
fn scenario_c_proposal_sent() {
    let doc = json!({"modules": {"proposal": {"proposalSent": true}}});
    assert_eq!(classify(doc), (WorkflowStage::ProposalSent, 60));
}

#[test]
fn scenario_d_client_approved() {
    let doc = json!({"status": "client_approved", "modules": {}});
    assert_eq!(classify(doc), (WorkflowStage::TechnicalDetailsCollection, 80));
}

#[test]
fn scenario_e_development_phase() {
    assert_eq!(classify(json!({"phase": "development"})), (WorkflowStage::ImplementationStarted, 90));
}

// =============================================================================
// Priority, totality, emptiness
// =============================================================================

#[test]
fn development_phase_beats_filled_overview() {
    let doc = json!({"phase": "development", "modules": {"overview": {"businessName": "Acme"}}});
    assert_eq!(classify(doc).0, WorkflowStage::ImplementationStarted);
}

#[test]
fn null_and_scalar_documents_are_discovery_started() {
    for doc in [Value::Null, json!(42), json!("meeting"), json!([{"phase": "development"}])] {
        assert_eq!(classify(doc), (WorkflowStage::DiscoveryStarted, 20));
    }
}

#[test]
fn emptiness_regression_targets() {
    assert!(!has_data(Some(&json!({}))));
    assert!(!has_data(Some(&json!({"a": []}))));
    assert!(!has_data(Some(&json!({"a": {}}))));
    assert!(!has_data(Some(&json!({"a": {"b": []}}))));
    assert!(has_data(Some(&json!({"a": [1]}))));
    assert!(has_data(Some(&json!({"a": {"b": "x"}}))));
}

#[test]
fn descriptor_ordinals_match_workflow_positions() {
    for (index, stage) in WorkflowStage::all().iter().enumerate() {
        assert!(is_valid_stage(stage.as_str()));
        assert_eq!(describe_stage(stage.as_str()).ordinal as usize, index + 1);
    }
}

#[test]
fn percentages_strictly_increase() {
    let stages = WorkflowStage::all();
    for pair in stages.windows(2) {
        assert!(pair[0].percentage() < pair[1].percentage());
    }
}

// =============================================================================
// Sync round trip through the in-memory CRM
// =============================================================================

#[tokio::test]
async fn synced_stage_reads_back_as_valid() {
    let record_id = CrmRecordId::new("5725767000000423001").unwrap();
    let crm = Arc::new(InMemoryCrm::new().with_raw_status(record_id.clone(), "legacy_value"));

    let sync = SyncDiscoveryStatusHandler::new(crm.clone(), StatusClassifier::default(), false);
    let read = GetCrmStatusHandler::new(crm.clone());

    let before = read
        .handle(GetCrmStatusQuery { record_id: record_id.clone() })
        .await
        .unwrap();
    assert_eq!(before.stage, None);

    sync.handle(SyncDiscoveryStatusCommand {
        record_id: record_id.clone(),
        snapshot: MeetingSnapshot::from_value(json!({"modules": {"proposal": {"approvedBy": "Dana"}}})),
    })
    .await
    .unwrap();

    let after = read
        .handle(GetCrmStatusQuery { record_id: record_id.clone() })
        .await
        .unwrap();
    assert_eq!(after.stage, Some(WorkflowStage::TechnicalDetailsCollection));
    assert_eq!(after.descriptor.ordinal, 4);

    let pushed = crm.pushed_requests();
    assert_eq!(pushed.len(), 1);
    assert_eq!(pushed[0].1.data[0].discovery_completion, "80%");
}

//! ProposalState - typed view over the `proposal` module.
//!
//! The proposal module is filled by the wizard's proposal step and by
//! external approval actions. Every field is read leniently: a field with
//! the wrong JSON type is treated exactly like a missing one. The send
//! marker is the exception, since clients store it as an ISO string, an
//! epoch number, or a serialized `{seconds, nanoseconds}` object.

use serde::Serialize;
use serde_json::Value;

/// A service offered in the proposal, with the client's selection flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedService {
    pub service: String,
    pub selected: bool,
}

/// The proposal sub-state the classifier cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProposalState {
    selected_services: Vec<SelectedService>,
    proposal_sent: bool,
    proposal_sent_at: Option<Value>,
    approved_by: Option<String>,
}

impl ProposalState {
    /// Reads the proposal state out of the raw `proposal` module, if any.
    pub fn from_module(module: Option<&Value>) -> Self {
        let Some(fields) = module.and_then(Value::as_object) else {
            return Self::default();
        };

        let selected_services = fields
            .get("selectedServices")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(read_service).collect())
            .unwrap_or_default();

        Self {
            selected_services,
            proposal_sent: fields.get("proposalSent").and_then(Value::as_bool) == Some(true),
            proposal_sent_at: fields.get("proposalSentAt").and_then(read_marker),
            approved_by: fields
                .get("approvedBy")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    /// Services in proposal order.
    pub fn selected_services(&self) -> &[SelectedService] {
        &self.selected_services
    }

    /// Returns true if at least one service has `selected == true`.
    pub fn has_selected_service(&self) -> bool {
        self.selected_services.iter().any(|s| s.selected)
    }

    /// Returns true if the proposal was explicitly flagged as sent.
    pub fn proposal_sent(&self) -> bool {
        self.proposal_sent
    }

    /// The raw send marker, when one was recorded.
    pub fn proposal_sent_at(&self) -> Option<&Value> {
        self.proposal_sent_at.as_ref()
    }

    /// Name of the approving signatory, when present and non-empty.
    pub fn approved_by(&self) -> Option<&str> {
        self.approved_by.as_deref()
    }
}

fn read_service(entry: &Value) -> Option<SelectedService> {
    let fields = entry.as_object()?;
    Some(SelectedService {
        service: fields
            .get("service")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        selected: fields.get("selected").and_then(Value::as_bool) == Some(true),
    })
}

// Any non-null value marks the proposal as sent, except an empty string.
fn read_marker(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        marker => Some(marker.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_module_yields_default_state() {
        let state = ProposalState::from_module(None);
        assert_eq!(state, ProposalState::default());
        assert!(!state.has_selected_service());
    }

    #[test]
    fn reads_selected_services_in_order() {
        let module = json!({
            "selectedServices": [
                {"service": "crm-automation", "selected": false},
                {"service": "ai-agent", "selected": true}
            ]
        });
        let state = ProposalState::from_module(Some(&module));
        assert_eq!(state.selected_services().len(), 2);
        assert_eq!(state.selected_services()[1].service, "ai-agent");
        assert!(state.has_selected_service());
    }

    #[test]
    fn selected_must_be_boolean_true() {
        let module = json!({
            "selectedServices": [
                {"service": "a", "selected": "true"},
                {"service": "b", "selected": 1},
                {"service": "c"}
            ]
        });
        let state = ProposalState::from_module(Some(&module));
        assert_eq!(state.selected_services().len(), 3);
        assert!(!state.has_selected_service());
    }

    #[test]
    fn non_object_service_entries_are_skipped() {
        let module = json!({"selectedServices": ["ai-agent", null, {"service": "x", "selected": true}]});
        let state = ProposalState::from_module(Some(&module));
        assert_eq!(state.selected_services().len(), 1);
    }

    #[test]
    fn wrong_typed_fields_are_treated_as_absent() {
        let module = json!({
            "selectedServices": "everything",
            "proposalSent": "yes",
            "proposalSentAt": null,
            "approvedBy": 7
        });
        let state = ProposalState::from_module(Some(&module));
        assert_eq!(state, ProposalState::default());
    }

    #[test]
    fn sent_at_accepts_any_recorded_marker() {
        for marker in [
            json!("2024-05-01T09:00:00Z"),
            json!(1714554000000_u64),
            json!({"seconds": 1714554000, "nanoseconds": 0}),
            json!("   "),
        ] {
            let module = json!({"proposalSentAt": marker.clone()});
            assert_eq!(
                ProposalState::from_module(Some(&module)).proposal_sent_at(),
                Some(&marker)
            );
        }
    }

    #[test]
    fn empty_markers_are_absent() {
        let module = json!({"proposalSentAt": "", "approvedBy": ""});
        let state = ProposalState::from_module(Some(&module));
        assert_eq!(state.proposal_sent_at(), None);
        assert_eq!(state.approved_by(), None);
    }

    #[test]
    fn approved_by_is_kept_verbatim() {
        let module = json!({"approvedBy": "  דנה כהן "});
        let state = ProposalState::from_module(Some(&module));
        assert_eq!(state.approved_by(), Some("  דנה כהן "));

        let blank = json!({"approvedBy": "   "});
        assert_eq!(ProposalState::from_module(Some(&blank)).approved_by(), Some("   "));
    }
}

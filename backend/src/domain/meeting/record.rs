//! MeetingRecord - the aggregate a discovery interview is recorded into.
//!
//! Records arrive from the state store as untyped JSON documents that may
//! be partially filled, stale, or wrong-typed in places. Parsing never
//! fails: anything unreadable is treated as absent, and a document that is
//! not an object at all becomes [`MeetingSnapshot::Uninitialized`].

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::{ModuleName, ProposalState};
use crate::domain::foundation::Percentage;

/// Phase marker set once the engagement moves to development.
pub const DEVELOPMENT_PHASE: &str = "development";

/// Status marker written by the client-approval action.
pub const CLIENT_APPROVED_STATUS: &str = "client_approved";

/// A meeting record as handed over by the state store.
#[derive(Debug, Clone, PartialEq)]
pub enum MeetingSnapshot {
    /// The caller had no record yet (null or non-object document).
    Uninitialized,
    Record(MeetingRecord),
}

impl MeetingSnapshot {
    /// Interprets an arbitrary JSON document as a meeting snapshot.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => MeetingSnapshot::Record(MeetingRecord::from_fields(fields)),
            _ => MeetingSnapshot::Uninitialized,
        }
    }

    /// Returns the record, if one was supplied.
    pub fn record(&self) -> Option<&MeetingRecord> {
        match self {
            MeetingSnapshot::Uninitialized => None,
            MeetingSnapshot::Record(record) => Some(record),
        }
    }

    /// JSON rendering of the snapshot, `null` when uninitialized.
    pub fn to_json(&self) -> Value {
        self.record()
            .map(|r| Value::Object(r.raw.clone()))
            .unwrap_or(Value::Null)
    }
}

impl From<Option<Value>> for MeetingSnapshot {
    fn from(value: Option<Value>) -> Self {
        value.map(Self::from_value).unwrap_or(MeetingSnapshot::Uninitialized)
    }
}

/// Typed, read-only view of one meeting record.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingRecord {
    modules: BTreeMap<ModuleName, Value>,
    status: Option<String>,
    phase: Option<String>,
    implementation_completion: Option<Percentage>,
    proposal: ProposalState,
    raw: Map<String, Value>,
}

impl MeetingRecord {
    /// Builds the typed view over a JSON object.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let modules: BTreeMap<ModuleName, Value> = fields
            .get("modules")
            .and_then(Value::as_object)
            .map(|modules| {
                modules
                    .iter()
                    .filter_map(|(key, data)| {
                        key.parse::<ModuleName>().ok().map(|name| (name, data.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let implementation_completion = fields
            .get("implementationSpec")
            .and_then(|spec| spec.get("completionPercentage"))
            .and_then(Value::as_f64)
            .and_then(Percentage::from_json_number);

        let proposal = ProposalState::from_module(modules.get(&ModuleName::Proposal));

        Self {
            status: read_string(&fields, "status"),
            phase: read_string(&fields, "phase"),
            implementation_completion,
            proposal,
            modules,
            raw: fields,
        }
    }

    /// A record with no fields at all, as created for a new engagement.
    pub fn empty() -> Self {
        Self::from_fields(Map::new())
    }

    /// Raw data of a module, if the record carries it.
    pub fn module(&self, name: ModuleName) -> Option<&Value> {
        self.modules.get(&name)
    }

    /// Free-text workflow marker set by external approval actions.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Phase marker (discovery vs. downstream implementation).
    pub fn phase(&self) -> Option<&str> {
        self.phase.as_deref()
    }

    /// Completion of the implementation spec, when recorded and in range.
    pub fn implementation_completion(&self) -> Option<Percentage> {
        self.implementation_completion
    }

    /// Proposal sub-state read from `modules.proposal`.
    pub fn proposal(&self) -> &ProposalState {
        &self.proposal
    }

    pub fn is_development_phase(&self) -> bool {
        self.phase() == Some(DEVELOPMENT_PHASE)
    }

    pub fn is_client_approved(&self) -> bool {
        self.status() == Some(CLIENT_APPROVED_STATUS)
    }

    /// The document exactly as received.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }
}

fn read_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

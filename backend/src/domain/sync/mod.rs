//! Sync module - the outbound CRM status update built from a classification.

mod payload;

pub use payload::{CrmFieldNames, CrmStatusUpdate, CrmUpdateRequest, WORKFLOW_TRIGGER};

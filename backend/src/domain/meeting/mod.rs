//! Meeting module - the discovery meeting record and its typed views.

mod module_name;
mod proposal;
mod record;

pub use module_name::ModuleName;
pub use proposal::{ProposalState, SelectedService};
pub use record::{MeetingRecord, MeetingSnapshot, CLIENT_APPROVED_STATUS, DEVELOPMENT_PHASE};

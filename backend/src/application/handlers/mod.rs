//! Command and query handlers.

mod get_crm_status;
mod sync_discovery_status;

pub use get_crm_status::{GetCrmStatusHandler, GetCrmStatusQuery, GetCrmStatusResult};
pub use sync_discovery_status::{
    SyncDiscoveryStatusCommand, SyncDiscoveryStatusHandler, SyncDiscoveryStatusResult,
};

//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CrmSync` - Push derived status to the CRM and read back what it stored

mod crm_sync;

pub use crm_sync::{CrmSync, CrmSyncError};

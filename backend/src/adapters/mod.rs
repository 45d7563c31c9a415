//! Adapters - Implementations of port interfaces.
//!
//! - `crm` - CRM implementations (in-memory)

pub mod crm;

pub use crm::InMemoryCrm;

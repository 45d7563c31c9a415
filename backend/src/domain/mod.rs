//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `meeting` - The meeting record, its modules and the proposal sub-state
//! - `progress` - Fill detection, stage metadata and the status classifier
//! - `sync` - The outbound CRM status update

pub mod foundation;
pub mod meeting;
pub mod progress;
pub mod sync;

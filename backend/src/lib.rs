//! Discovery Intake - progress and workflow-status derivation
//!
//! This crate decides, for a partially filled business-discovery meeting
//! record, which sections hold real answers and which of five workflow
//! stages the engagement has reached, and builds the CRM update that
//! mirrors that stage.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

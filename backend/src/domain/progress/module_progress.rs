//! ModuleProgress value object - per-module fill snapshot for a meeting.
//!
//! Provides a read-only summary of which wizard sections hold data,
//! with helpers for counting progress and finding the next section to fill.

use std::collections::BTreeMap;

use serde::Serialize;

use super::fill::FillPolicy;
use crate::domain::meeting::{MeetingRecord, ModuleName};

/// Fill flags for every module, computed once from a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleProgress {
    filled: BTreeMap<ModuleName, bool>,
}

impl ModuleProgress {
    /// Evaluates every module of `record` under `policy`.
    pub fn from_record(record: &MeetingRecord, policy: &FillPolicy) -> Self {
        let filled = ModuleName::all()
            .iter()
            .map(|m| (*m, policy.module_filled(m.key(), record.module(*m))))
            .collect();
        Self { filled }
    }

    /// Progress of a record with nothing filled.
    pub fn empty() -> Self {
        Self {
            filled: ModuleName::all().iter().map(|m| (*m, false)).collect(),
        }
    }

    /// Returns true if `module` holds data.
    pub fn is_filled(&self, module: ModuleName) -> bool {
        self.filled.get(&module).copied().unwrap_or(false)
    }

    /// Number of filled modules, across all eleven.
    pub fn filled_count(&self) -> usize {
        self.filled.values().filter(|f| **f).count()
    }

    /// Number of filled discovery modules (excludes proposal and planning).
    pub fn discovery_count(&self) -> usize {
        ModuleName::discovery().filter(|m| self.is_filled(*m)).count()
    }

    /// Share of discovery modules that hold data (0-100, rounded down).
    pub fn percent_filled(&self) -> u8 {
        let total = ModuleName::discovery().count();
        ((self.discovery_count() * 100) / total) as u8
    }

    /// Returns true if at least one discovery module holds data.
    pub fn has_discovery_data(&self) -> bool {
        self.discovery_count() > 0
    }

    /// First discovery module in wizard order that is still empty.
    pub fn first_unfilled(&self) -> Option<ModuleName> {
        ModuleName::discovery().find(|m| !self.is_filled(*m))
    }

    /// Filled modules in wizard order.
    pub fn filled_modules(&self) -> Vec<ModuleName> {
        ModuleName::all()
            .iter()
            .copied()
            .filter(|m| self.is_filled(*m))
            .collect()
    }

    /// `(module, filled)` pairs in wizard order.
    pub fn module_statuses(&self) -> Vec<(ModuleName, bool)> {
        ModuleName::all()
            .iter()
            .map(|m| (*m, self.is_filled(*m)))
            .collect()
    }
}

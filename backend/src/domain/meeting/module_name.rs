//! ModuleName enum naming the fixed sections of a meeting record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The eleven wizard sections a meeting record is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleName {
    Overview,
    EssentialDetails,
    LeadsAndSales,
    CustomerService,
    Operations,
    Reporting,
    AiAgents,
    Systems,
    Roi,
    Proposal,
    Planning,
}

impl ModuleName {
    /// Returns all modules in wizard order.
    pub fn all() -> &'static [ModuleName] {
        &[
            ModuleName::Overview,
            ModuleName::EssentialDetails,
            ModuleName::LeadsAndSales,
            ModuleName::CustomerService,
            ModuleName::Operations,
            ModuleName::Reporting,
            ModuleName::AiAgents,
            ModuleName::Systems,
            ModuleName::Roi,
            ModuleName::Proposal,
            ModuleName::Planning,
        ]
    }

    /// Returns the modules whose content counts as discovery work.
    ///
    /// `proposal` and `planning` are filled after discovery and are
    /// judged by their own rules.
    pub fn discovery() -> impl Iterator<Item = ModuleName> {
        Self::all().iter().copied().filter(|m| m.is_discovery())
    }

    /// Returns true if this module's data counts toward `discovery_started`.
    pub fn is_discovery(&self) -> bool {
        !matches!(self, ModuleName::Proposal | ModuleName::Planning)
    }

    /// Returns the key used for this module inside the record's `modules` map.
    pub fn key(&self) -> &'static str {
        match self {
            ModuleName::Overview => "overview",
            ModuleName::EssentialDetails => "essentialDetails",
            ModuleName::LeadsAndSales => "leadsAndSales",
            ModuleName::CustomerService => "customerService",
            ModuleName::Operations => "operations",
            ModuleName::Reporting => "reporting",
            ModuleName::AiAgents => "aiAgents",
            ModuleName::Systems => "systems",
            ModuleName::Roi => "roi",
            ModuleName::Proposal => "proposal",
            ModuleName::Planning => "planning",
        }
    }

    /// Returns the English display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModuleName::Overview => "Overview",
            ModuleName::EssentialDetails => "Essential Details",
            ModuleName::LeadsAndSales => "Leads & Sales",
            ModuleName::CustomerService => "Customer Service",
            ModuleName::Operations => "Operations",
            ModuleName::Reporting => "Reporting",
            ModuleName::AiAgents => "AI Agents",
            ModuleName::Systems => "Systems",
            ModuleName::Roi => "ROI",
            ModuleName::Proposal => "Proposal",
            ModuleName::Planning => "Planning",
        }
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ModuleName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.key() == s)
            .ok_or_else(|| ValidationError::invalid_format("module", format!("unknown module '{}'", s)))
    }
}

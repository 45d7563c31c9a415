//! WorkflowStage enum and its static metadata table.
//!
//! Stage strings cross the CRM boundary in both directions, so every
//! string-level helper here is total: unknown strings produce an
//! "unknown" descriptor or `None`, never a panic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Percentage, StateMachine, ValidationError};

/// The five ordered stages a discovery engagement moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    DiscoveryStarted,
    Proposal,
    ProposalSent,
    TechnicalDetailsCollection,
    ImplementationStarted,
}

/// Display metadata for a stage badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageDescriptor {
    /// English description.
    pub text: &'static str,
    /// Hebrew description.
    pub localized_text: &'static str,
    /// 1-based position in workflow order; 0 for unknown stages.
    pub ordinal: u8,
    pub color_token: &'static str,
    pub icon_token: &'static str,
}

/// Descriptor returned for strings that are not a known stage.
pub const UNKNOWN_STAGE: StageDescriptor = StageDescriptor {
    text: "Unknown status",
    localized_text: "סטטוס לא ידוע",
    ordinal: 0,
    color_token: "gray",
    icon_token: "help-circle",
};

static STAGE_TABLE: [(WorkflowStage, StageDescriptor, Percentage); 5] = [
    (
        WorkflowStage::DiscoveryStarted,
        StageDescriptor {
            text: "Discovery started",
            localized_text: "גילוי צרכים התחיל",
            ordinal: 1,
            color_token: "blue",
            icon_token: "search",
        },
        Percentage::from_const(20),
    ),
    (
        WorkflowStage::Proposal,
        StageDescriptor {
            text: "Preparing proposal",
            localized_text: "הכנת הצעת מחיר",
            ordinal: 2,
            color_token: "purple",
            icon_token: "file-text",
        },
        Percentage::from_const(40),
    ),
    (
        WorkflowStage::ProposalSent,
        StageDescriptor {
            text: "Proposal sent",
            localized_text: "הצעת מחיר נשלחה",
            ordinal: 3,
            color_token: "orange",
            icon_token: "send",
        },
        Percentage::from_const(60),
    ),
    (
        WorkflowStage::TechnicalDetailsCollection,
        StageDescriptor {
            text: "Collecting technical details",
            localized_text: "איסוף פרטים טכניים",
            ordinal: 4,
            color_token: "cyan",
            icon_token: "clipboard-list",
        },
        Percentage::from_const(80),
    ),
    (
        WorkflowStage::ImplementationStarted,
        StageDescriptor {
            text: "Implementation started",
            localized_text: "היישום התחיל",
            ordinal: 5,
            color_token: "green",
            icon_token: "rocket",
        },
        Percentage::from_const(90),
    ),
];

impl WorkflowStage {
    /// Returns all stages in workflow order.
    pub fn all() -> &'static [WorkflowStage] {
        &[
            WorkflowStage::DiscoveryStarted,
            WorkflowStage::Proposal,
            WorkflowStage::ProposalSent,
            WorkflowStage::TechnicalDetailsCollection,
            WorkflowStage::ImplementationStarted,
        ]
    }

    /// Wire identifier, as stored in the CRM status field.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStage::DiscoveryStarted => "discovery_started",
            WorkflowStage::Proposal => "proposal",
            WorkflowStage::ProposalSent => "proposal_sent",
            WorkflowStage::TechnicalDetailsCollection => "technical_details_collection",
            WorkflowStage::ImplementationStarted => "implementation_started",
        }
    }

    fn entry(&self) -> &'static (WorkflowStage, StageDescriptor, Percentage) {
        &STAGE_TABLE[*self as usize]
    }

    /// Badge metadata for this stage.
    pub fn descriptor(&self) -> StageDescriptor {
        self.entry().1
    }

    /// Coarse completion value reported alongside the stage.
    pub fn percentage(&self) -> Percentage {
        self.entry().2
    }

    /// 1-based position in workflow order.
    pub fn ordinal(&self) -> u8 {
        self.entry().1.ordinal
    }

    /// The stage one step further along, if any.
    pub fn next(&self) -> Option<WorkflowStage> {
        Self::all().get(*self as usize + 1).copied()
    }

    /// Moves one step forward to `target`.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidFormat` when `target` skips a stage
    /// or moves backwards.
    pub fn advance_to(&self, target: WorkflowStage) -> Result<WorkflowStage, ValidationError> {
        self.transition_to(target)
    }

    /// Parses a wire identifier.
    pub fn parse(raw: &str) -> Result<WorkflowStage, ValidationError> {
        Self::all()
            .iter()
            .copied()
            .find(|s| s.as_str() == raw)
            .ok_or_else(|| {
                ValidationError::invalid_format("workflow_stage", format!("unknown stage '{}'", raw))
            })
    }
}

impl StateMachine for WorkflowStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.next() == Some(*target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        self.next().into_iter().collect()
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkflowStage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Returns true if `raw` is one of the five stage identifiers.
pub fn is_valid_stage(raw: &str) -> bool {
    WorkflowStage::parse(raw).is_ok()
}

/// Badge metadata for a raw stage string; [`UNKNOWN_STAGE`] if unrecognized.
pub fn describe_stage(raw: &str) -> StageDescriptor {
    WorkflowStage::parse(raw)
        .map(|s| s.descriptor())
        .unwrap_or(UNKNOWN_STAGE)
}

/// Stage following a raw stage string; `None` if unknown or last.
pub fn next_stage(raw: &str) -> Option<WorkflowStage> {
    WorkflowStage::parse(raw).ok().and_then(|s| s.next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_line_up_with_enum_order() {
        for (index, stage) in WorkflowStage::all().iter().enumerate() {
            assert_eq!(STAGE_TABLE[index].0, *stage);
            assert_eq!(stage.ordinal() as usize, index + 1);
        }
    }

    #[test]
    fn percentages_follow_table() {
        let values: Vec<u8> = WorkflowStage::all()
            .iter()
            .map(|s| s.percentage().value())
            .collect();
        assert_eq!(values, vec![20, 40, 60, 80, 90]);
    }

    #[test]
    fn percentages_strictly_increase_in_workflow_order() {
        for pair in WorkflowStage::all().windows(2) {
            assert!(
                pair[0].percentage() < pair[1].percentage(),
                "{} should be below {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn every_stage_is_valid_and_round_trips() {
        for stage in WorkflowStage::all() {
            assert!(is_valid_stage(stage.as_str()));
            assert_eq!(stage.as_str().parse::<WorkflowStage>().unwrap(), *stage);
            assert_eq!(describe_stage(stage.as_str()), stage.descriptor());
        }
    }

    #[test]
    fn unknown_strings_are_invalid() {
        for raw in ["", "Proposal", "proposal ", "client_approved", "done"] {
            assert!(!is_valid_stage(raw), "{:?} should be invalid", raw);
        }
    }

    #[test]
    fn describe_unknown_returns_unknown_descriptor() {
        let descriptor = describe_stage("archived");
        assert_eq!(descriptor, UNKNOWN_STAGE);
        assert_eq!(descriptor.ordinal, 0);
    }

    #[test]
    fn next_walks_the_workflow() {
        assert_eq!(
            WorkflowStage::DiscoveryStarted.next(),
            Some(WorkflowStage::Proposal)
        );
        assert_eq!(
            WorkflowStage::TechnicalDetailsCollection.next(),
            Some(WorkflowStage::ImplementationStarted)
        );
        assert_eq!(WorkflowStage::ImplementationStarted.next(), None);
    }

    #[test]
    fn next_stage_handles_raw_strings() {
        assert_eq!(next_stage("proposal_sent"), Some(WorkflowStage::TechnicalDetailsCollection));
        assert_eq!(next_stage("implementation_started"), None);
        assert_eq!(next_stage("bogus"), None);
    }

    #[test]
    fn transitions_move_one_step_forward_only() {
        assert!(WorkflowStage::Proposal
            .transition_to(WorkflowStage::ProposalSent)
            .is_ok());
        assert!(WorkflowStage::Proposal
            .transition_to(WorkflowStage::ImplementationStarted)
            .is_err());
        assert!(WorkflowStage::ProposalSent
            .transition_to(WorkflowStage::Proposal)
            .is_err());
        assert!(WorkflowStage::ImplementationStarted.is_terminal());
    }

    #[test]
    fn advance_to_accepts_only_the_next_stage() {
        assert_eq!(
            WorkflowStage::DiscoveryStarted.advance_to(WorkflowStage::Proposal),
            Ok(WorkflowStage::Proposal)
        );
        assert!(WorkflowStage::DiscoveryStarted
            .advance_to(WorkflowStage::ProposalSent)
            .is_err());
        assert!(WorkflowStage::ImplementationStarted
            .advance_to(WorkflowStage::ImplementationStarted)
            .is_err());
    }

    #[test]
    fn serializes_to_wire_identifier() {
        for stage in WorkflowStage::all() {
            assert_eq!(
                serde_json::to_string(stage).unwrap(),
                format!("\"{}\"", stage.as_str())
            );
        }
    }

    #[test]
    fn descriptors_carry_hebrew_text() {
        let descriptor = WorkflowStage::ProposalSent.descriptor();
        assert_eq!(descriptor.localized_text, "הצעת מחיר נשלחה");
        assert_eq!(descriptor.color_token, "orange");
    }
}

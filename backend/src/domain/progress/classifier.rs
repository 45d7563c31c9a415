//! Status classifier - derives the workflow stage of a meeting record.
//!
//! Rules are an ordered table evaluated first-match-wins, from the most
//! advanced stage down. A record therefore snaps to the furthest stage
//! it justifies, even when the conditions of earlier stages also hold.
//! The last rule always matches, so classification is total.

use serde::Serialize;

use super::fill::FillPolicy;
use super::stage::WorkflowStage;
use crate::domain::foundation::Percentage;
use crate::domain::meeting::{MeetingRecord, MeetingSnapshot, ModuleName};

/// Which rule decided the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageReason {
    /// `phase == "development"`.
    DevelopmentPhase,
    /// `implementationSpec.completionPercentage == 100`.
    ImplementationComplete,
    /// `status == "client_approved"`.
    ClientApproved,
    /// `modules.proposal.approvedBy` is present and non-empty.
    ApprovalSigned,
    /// `modules.proposal.proposalSent == true`.
    ProposalSent,
    /// `modules.proposal.proposalSentAt` is present.
    ProposalSentAt,
    /// At least one proposal service has `selected == true`.
    ServicesSelected,
    /// A discovery module has data.
    DiscoveryData,
    /// Nothing matched; a fresh record.
    Fallback,
    /// No record was supplied.
    Uninitialized,
}

/// Outcome of classifying one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageClassification {
    pub stage: WorkflowStage,
    pub percentage: Percentage,
    pub reason: StageReason,
}

impl StageClassification {
    fn new(stage: WorkflowStage, reason: StageReason) -> Self {
        Self {
            stage,
            percentage: stage.percentage(),
            reason,
        }
    }
}

type Predicate = fn(&MeetingRecord, &FillPolicy) -> bool;

/// One entry of the rule cascade.
pub struct StageRule {
    pub reason: StageReason,
    pub stage: WorkflowStage,
    predicate: Predicate,
}

impl StageRule {
    /// Returns true if the rule applies to `record`.
    pub fn matches(&self, record: &MeetingRecord, policy: &FillPolicy) -> bool {
        (self.predicate)(record, policy)
    }
}

/// The cascade, highest priority first.
pub const STAGE_RULES: &[StageRule] = &[
    StageRule {
        reason: StageReason::DevelopmentPhase,
        stage: WorkflowStage::ImplementationStarted,
        predicate: |r, _| r.is_development_phase(),
    },
    StageRule {
        reason: StageReason::ImplementationComplete,
        stage: WorkflowStage::ImplementationStarted,
        predicate: |r, _| r.implementation_completion().is_some_and(|p| p.is_complete()),
    },
    StageRule {
        reason: StageReason::ClientApproved,
        stage: WorkflowStage::TechnicalDetailsCollection,
        predicate: |r, _| r.is_client_approved(),
    },
    StageRule {
        reason: StageReason::ApprovalSigned,
        stage: WorkflowStage::TechnicalDetailsCollection,
        predicate: |r, _| r.proposal().approved_by().is_some(),
    },
    StageRule {
        reason: StageReason::ProposalSent,
        stage: WorkflowStage::ProposalSent,
        predicate: |r, _| r.proposal().proposal_sent(),
    },
    StageRule {
        reason: StageReason::ProposalSentAt,
        stage: WorkflowStage::ProposalSent,
        predicate: |r, _| r.proposal().proposal_sent_at().is_some(),
    },
    StageRule {
        reason: StageReason::ServicesSelected,
        stage: WorkflowStage::Proposal,
        predicate: |r, _| r.proposal().has_selected_service(),
    },
    StageRule {
        reason: StageReason::DiscoveryData,
        stage: WorkflowStage::DiscoveryStarted,
        predicate: |r, policy| {
            ModuleName::discovery().any(|m| policy.module_filled(m.key(), r.module(m)))
        },
    },
    StageRule {
        reason: StageReason::Fallback,
        stage: WorkflowStage::DiscoveryStarted,
        predicate: |_, _| true,
    },
];

/// Classifies snapshots under a fixed fill policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusClassifier {
    policy: FillPolicy,
}

impl StatusClassifier {
    pub fn new(policy: FillPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &FillPolicy {
        &self.policy
    }

    /// Classifies a record. Total: the fallback rule always matches.
    pub fn classify(&self, record: &MeetingRecord) -> StageClassification {
        STAGE_RULES
            .iter()
            .find(|rule| rule.matches(record, &self.policy))
            .map(|rule| StageClassification::new(rule.stage, rule.reason))
            .unwrap_or_else(|| {
                StageClassification::new(WorkflowStage::DiscoveryStarted, StageReason::Fallback)
            })
    }

    /// Classifies a snapshot; an uninitialized one is `discovery_started`.
    pub fn classify_snapshot(&self, snapshot: &MeetingSnapshot) -> StageClassification {
        match snapshot {
            MeetingSnapshot::Uninitialized => StageClassification::new(
                WorkflowStage::DiscoveryStarted,
                StageReason::Uninitialized,
            ),
            MeetingSnapshot::Record(record) => self.classify(record),
        }
    }
}

/// Classifies a record under the default fill policy.
pub fn classify(record: &MeetingRecord) -> StageClassification {
    StatusClassifier::default().classify(record)
}

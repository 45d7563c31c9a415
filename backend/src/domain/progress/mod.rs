//! Progress module - fill detection, stage metadata and the status classifier.
//!
//! Everything here is a pure function of its input: no I/O, no shared
//! state, safe to call concurrently from any number of recompute triggers.

mod classifier;
mod fill;
mod module_progress;
mod stage;

pub use classifier::{
    classify, StageClassification, StageReason, StageRule, StatusClassifier, STAGE_RULES,
};
pub use fill::{has_data, FillPolicy};
pub use module_progress::ModuleProgress;
pub use stage::{
    describe_stage, is_valid_stage, next_stage, StageDescriptor, WorkflowStage, UNKNOWN_STAGE,
};

//! Fill detection - decides whether a module holds any real answer.
//!
//! A module counts as filled iff its tree contains at least one meaningful
//! leaf. Null, empty strings, empty arrays, empty objects, and containers
//! holding only those never count, at any depth.
//!
//! Traversal uses an explicit work stack, so arbitrarily deep trees cannot
//! exhaust the call stack.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::ValidationError;

/// Rules for the leaves whose meaning is ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillPolicy {
    /// `false` is an explicit answer (an unanswered toggle is null or missing).
    #[serde(default = "default_true")]
    pub count_false_booleans: bool,

    /// `0` is an explicit answer ("zero leads per month").
    #[serde(default = "default_true")]
    pub count_zero_numbers: bool,

    /// Treat any non-empty array as filled without looking at its elements.
    #[serde(default)]
    pub count_non_empty_arrays: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FillPolicy {
    fn default() -> Self {
        Self {
            count_false_booleans: true,
            count_zero_numbers: true,
            count_non_empty_arrays: false,
        }
    }
}

impl FillPolicy {
    /// Returns true if `tree` contains at least one meaningful leaf.
    ///
    /// `None` (an absent module) is never filled. A bare scalar is judged
    /// as a single leaf.
    pub fn has_data(&self, tree: Option<&Value>) -> bool {
        let Some(root) = tree else {
            return false;
        };

        let mut pending = vec![root];
        while let Some(node) = pending.pop() {
            match node {
                Value::Array(items) if self.count_non_empty_arrays => {
                    if !items.is_empty() {
                        return true;
                    }
                }
                Value::Array(items) => pending.extend(items.iter()),
                Value::Object(fields) => pending.extend(fields.values()),
                leaf => {
                    if self.is_meaningful_leaf(leaf) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Strict variant for callers that must hand over a container.
    ///
    /// Scalars are rejected with [`ValidationError::NotATree`] instead of
    /// being judged as a leaf; `null` counts as an absent module.
    pub fn check_module(&self, field: &str, tree: &Value) -> Result<bool, ValidationError> {
        match tree {
            Value::Null => Ok(false),
            Value::Object(_) | Value::Array(_) => Ok(self.has_data(Some(tree))),
            Value::Bool(_) => Err(ValidationError::not_a_tree(field, "boolean")),
            Value::Number(_) => Err(ValidationError::not_a_tree(field, "number")),
            Value::String(_) => Err(ValidationError::not_a_tree(field, "string")),
        }
    }

    /// Fill check for a named module slot.
    ///
    /// A module holding a bare scalar has the wrong shape and is not filled.
    pub fn module_filled(&self, field: &str, tree: Option<&Value>) -> bool {
        tree.is_some_and(|tree| self.check_module(field, tree).unwrap_or(false))
    }

    fn is_meaningful_leaf(&self, leaf: &Value) -> bool {
        match leaf {
            Value::Null => false,
            Value::Bool(b) => *b || self.count_false_booleans,
            Value::Number(n) => self.count_zero_numbers || n.as_f64() != Some(0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => false,
        }
    }
}

/// Fill check under the default policy.
pub fn has_data(tree: Option<&Value>) -> bool {
    FillPolicy::default().has_data(tree)
}

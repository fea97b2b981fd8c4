//! Structural and semantic validation of workflow definitions.
//!
//! Two related but distinct contracts live here, and both are preserved
//! deliberately:
//!
//! - [`validate_definition`]: the permissive, definition-level shape check
//!   an editor runs on every save. Missing top-level fields are errors;
//!   a missing start node is merely a warning.
//! - [`validate_for_execution`]: the strict pre-execution gate. Start-node
//!   cardinality is enforced at exactly one, an empty graph is an error,
//!   and advisory suggestions are reported alongside errors and warnings.
//!
//! The two checkers grade several of the same conditions at different
//! severities. Callers depend on each path's existing behavior, so the
//! asymmetry must not be unified.
//!
//! Both checkers are pure: identical input always yields identical output,
//! nothing is mutated, and expected validation failures are data in the
//! result, never `Err`.

mod definition;
mod execution;

pub use definition::validate_definition;
pub use execution::validate_for_execution;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::definition::NodeSpec;

/// Outcome of the permissive definition-level check.
///
/// Invariant: `is_valid == errors.is_empty()`. Construct through
/// [`ValidationResult::from_parts`] to keep it that way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Conditions that make the definition unusable, in evaluation order.
    pub errors: Vec<String>,
    /// Conditions worth surfacing that do not block validity.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Assemble a result, deriving `is_valid` from the error list.
    pub fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Outcome of the strict execution-readiness check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReadiness {
    /// Conditions that block execution outright.
    pub errors: Vec<String>,
    /// Conditions the caller should surface but may execute through.
    pub warnings: Vec<String>,
    /// Advisory hints, independent of validity.
    pub suggestions: Vec<String>,
}

impl ExecutionReadiness {
    /// Returns `true` when nothing blocks execution.
    pub fn is_executable(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Ordered accumulator shared by both checkers.
///
/// Every applicable rule appends here; rules are never short-circuited on
/// the first failure.
#[derive(Debug, Default)]
pub(crate) struct Findings {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Findings {
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn suggestion(&mut self, message: impl Into<String>) {
        self.suggestions.push(message.into());
    }
}

/// Editor configs follow JavaScript truthiness: absent, `null`, `0`,
/// `false`, and `""` all mean "not configured".
pub(crate) fn config_value_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// A loop node with neither an iteration bound nor an exit condition can
/// run forever. Reported as a validation warning here and again as a risk
/// factor by the risk assessor; the duplication is intentional.
pub(crate) fn loop_lacks_bounds(node: &NodeSpec) -> bool {
    !config_value_present(node.config.get("maxIterations"))
        && !config_value_present(node.config.get("condition"))
}

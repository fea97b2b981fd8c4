//! Core types for the flowlens analysis engine.
//!
//! This module defines the vocabulary shared by every analysis pass: the
//! node-type enumeration used by workflow editors, and the severity/impact
//! scales attached to bottleneck and optimization findings.
//!
//! # Key Types
//!
//! - [`NodeType`]: the fixed set of workflow node types, with an
//!   [`Other`](NodeType::Other) fallback for forward compatibility
//! - [`Severity`]: low/medium/high scale for bottleneck findings
//! - [`Impact`]: low/medium/high scale for optimization suggestions
//!
//! # Examples
//!
//! ```rust
//! use flowlens::types::NodeType;
//!
//! let model = NodeType::parse("model");
//! assert_eq!(model, NodeType::Model);
//! assert!(model.is_known());
//!
//! // Unknown types round-trip without loss; validators downgrade them
//! // to warnings instead of rejecting the graph.
//! let custom = NodeType::parse("webhook");
//! assert_eq!(custom, NodeType::Other("webhook".to_string()));
//! assert!(!custom.is_known());
//! assert_eq!(custom.as_str(), "webhook");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of a node within a workflow graph.
///
/// Workflow editors attach one of a fixed set of type strings to each node.
/// Unrecognized strings are preserved in [`Other`](Self::Other) so that a
/// graph authored against a newer editor still validates (with a warning)
/// rather than failing outright.
///
/// The wire form is the camelCase string used by editors
/// (`"errorHandler"`, not `"error_handler"`); serialization goes through
/// [`parse`](Self::parse)/[`as_str`](Self::as_str).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    /// Entry point of a workflow. Strict validation requires exactly one.
    Start,
    /// An LLM model invocation.
    Model,
    /// An external tool call.
    Tool,
    /// Conversation/state memory access.
    Memory,
    /// Knowledge retrieval (search, RAG lookup).
    Retrieval,
    /// Branching on a condition.
    Conditional,
    /// Bounded or condition-terminated iteration.
    Loop,
    /// Variable read/write.
    Variable,
    /// Error recovery handler.
    ErrorHandler,
    /// Fixed-duration pause.
    Delay,
    /// Any type string outside the fixed set. Tolerated with a warning.
    Other(String),
}

impl NodeType {
    /// Parse a wire-form type string.
    ///
    /// Never fails: unrecognized strings become [`Other`](Self::Other).
    ///
    /// ```rust
    /// # use flowlens::types::NodeType;
    /// assert_eq!(NodeType::parse("errorHandler"), NodeType::ErrorHandler);
    /// assert_eq!(NodeType::parse("banana"), NodeType::Other("banana".into()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "start" => NodeType::Start,
            "model" => NodeType::Model,
            "tool" => NodeType::Tool,
            "memory" => NodeType::Memory,
            "retrieval" => NodeType::Retrieval,
            "conditional" => NodeType::Conditional,
            "loop" => NodeType::Loop,
            "variable" => NodeType::Variable,
            "errorHandler" => NodeType::ErrorHandler,
            "delay" => NodeType::Delay,
            other => NodeType::Other(other.to_string()),
        }
    }

    /// The wire-form string for this type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Start => "start",
            NodeType::Model => "model",
            NodeType::Tool => "tool",
            NodeType::Memory => "memory",
            NodeType::Retrieval => "retrieval",
            NodeType::Conditional => "conditional",
            NodeType::Loop => "loop",
            NodeType::Variable => "variable",
            NodeType::ErrorHandler => "errorHandler",
            NodeType::Delay => "delay",
            NodeType::Other(s) => s,
        }
    }

    /// Returns `true` if this is one of the fixed known types.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, NodeType::Other(_))
    }

    /// Returns `true` if this is a [`Start`](Self::Start) node.
    #[must_use]
    pub fn is_start(&self) -> bool {
        matches!(self, Self::Start)
    }
}

impl From<String> for NodeType {
    fn from(s: String) -> Self {
        NodeType::parse(&s)
    }
}

impl From<&str> for NodeType {
    fn from(s: &str) -> Self {
        NodeType::parse(s)
    }
}

impl From<NodeType> for String {
    fn from(kind: NodeType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of a bottleneck finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Expected impact of an optimization suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_round_trip() {
        for s in [
            "start",
            "model",
            "tool",
            "memory",
            "retrieval",
            "conditional",
            "loop",
            "variable",
            "errorHandler",
            "delay",
        ] {
            let kind = NodeType::parse(s);
            assert!(kind.is_known(), "{s} should be known");
            assert_eq!(kind.as_str(), s);
        }
    }

    #[test]
    fn unknown_type_preserved() {
        let kind = NodeType::parse("subflow");
        assert_eq!(kind, NodeType::Other("subflow".to_string()));
        assert_eq!(kind.as_str(), "subflow");
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&NodeType::ErrorHandler).unwrap();
        assert_eq!(json, "\"errorHandler\"");
        let back: NodeType = serde_json::from_str("\"loop\"").unwrap();
        assert_eq!(back, NodeType::Loop);
    }
}

//! Permissive, definition-level shape checking.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::{Findings, ValidationResult};
use crate::definition::{EdgeSpec, NodeSpec, WorkflowDefinition};

/// Longest accepted workflow name.
const MAX_NAME_LEN: usize = 255;

/// Check a workflow definition's overall shape.
///
/// This is the lenient contract editors run on every save: the three
/// top-level fields must be present, node ids must be unique, node types
/// must be present (unknown ones only warn), and edges must reference
/// known nodes. A missing start node is recommended against but allowed.
///
/// Every rule is evaluated; nothing short-circuits on the first failure.
///
/// # Examples
///
/// ```rust
/// use flowlens::definition::{NodeSpec, WorkflowDefinition};
/// use flowlens::validate_definition;
///
/// let def = WorkflowDefinition::new(
///     "triage",
///     vec![NodeSpec::new("a", "start")],
///     vec![],
/// );
/// let result = validate_definition(&def);
/// assert!(result.is_valid);
/// assert!(result.warnings.is_empty());
/// ```
pub fn validate_definition(definition: &WorkflowDefinition) -> ValidationResult {
    let mut findings = Findings::default();

    check_name(definition, &mut findings);

    match &definition.nodes {
        None => findings.error("Missing required field: nodes"),
        Some(nodes) => {
            if nodes.is_empty() {
                findings.warning("Workflow has no nodes");
            }
            check_nodes(nodes, &mut findings);
        }
    }

    match &definition.edges {
        None => findings.error("Missing required field: edges"),
        Some(edges) => {
            let known_ids: FxHashSet<&str> = definition
                .nodes
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .filter(|n| !n.id.is_empty())
                .map(|n| n.id.as_str())
                .collect();
            check_edges(edges, &known_ids, &mut findings);
        }
    }

    debug!(
        errors = findings.errors.len(),
        warnings = findings.warnings.len(),
        "definition validation complete"
    );
    ValidationResult::from_parts(findings.errors, findings.warnings)
}

fn check_name(definition: &WorkflowDefinition, findings: &mut Findings) {
    match definition.name.as_deref() {
        None | Some("") => findings.error("Missing required field: name"),
        Some(name) if name.chars().count() > MAX_NAME_LEN => {
            findings.error(format!(
                "Workflow name must be {MAX_NAME_LEN} characters or fewer"
            ));
        }
        Some(_) => {}
    }
}

fn check_nodes(nodes: &[NodeSpec], findings: &mut Findings) {
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    for (index, node) in nodes.iter().enumerate() {
        if node.id.is_empty() {
            findings.error(format!("Node at index {index} is missing an id"));
        } else if !seen.insert(node.id.as_str()) {
            findings.error(format!("Duplicate node id: {}", node.id));
        }

        match node.node_type() {
            None => findings.error(format!(
                "Node {} is missing a type",
                describe_node(index, node)
            )),
            Some(kind) if !kind.is_known() => findings.warning(format!(
                "Unknown node type '{}' on node {}",
                kind,
                describe_node(index, node)
            )),
            Some(_) => {}
        }
    }

    if !nodes.is_empty() && !nodes.iter().any(|n| n.node_type().is_some_and(|k| k.is_start())) {
        findings.warning("Workflow has no start node; adding one is recommended");
    }
}

fn check_edges(edges: &[EdgeSpec], known_ids: &FxHashSet<&str>, findings: &mut Findings) {
    for (index, edge) in edges.iter().enumerate() {
        if edge.id.is_empty() {
            findings.error(format!("Edge at index {index} is missing an id"));
        }

        if edge.source.is_empty() {
            findings.error(format!(
                "Edge {} is missing a source",
                describe_edge(index, edge)
            ));
        } else if !known_ids.contains(edge.source.as_str()) {
            findings.error(format!(
                "Edge {} references unknown source node '{}'",
                describe_edge(index, edge),
                edge.source
            ));
        }

        if edge.target.is_empty() {
            findings.error(format!(
                "Edge {} is missing a target",
                describe_edge(index, edge)
            ));
        } else if !known_ids.contains(edge.target.as_str()) {
            findings.error(format!(
                "Edge {} references unknown target node '{}'",
                describe_edge(index, edge),
                edge.target
            ));
        }
    }
}

fn describe_node(index: usize, node: &NodeSpec) -> String {
    if node.id.is_empty() {
        format!("at index {index}")
    } else {
        format!("'{}'", node.id)
    }
}

fn describe_edge(index: usize, edge: &EdgeSpec) -> String {
    if edge.id.is_empty() {
        format!("at index {index}")
    } else {
        format!("'{}'", edge.id)
    }
}

use flowlens::definition::{EdgeSpec, NodeSpec, WorkflowDefinition};

/// A start node chained serially through `extra` more model nodes.
pub fn linear_chain(extra: usize) -> (Vec<NodeSpec>, Vec<EdgeSpec>) {
    let mut nodes = vec![NodeSpec::new("n0", "start")];
    let mut edges = Vec::new();
    for i in 1..=extra {
        nodes.push(NodeSpec::new(format!("n{i}"), "model"));
        edges.push(EdgeSpec::new(
            format!("e{i}"),
            format!("n{}", i - 1),
            format!("n{i}"),
        ));
    }
    (nodes, edges)
}

/// A start node fanning out to `width` sink nodes of the given type.
pub fn fan_out(width: usize, kind: &str) -> (Vec<NodeSpec>, Vec<EdgeSpec>) {
    let mut nodes = vec![NodeSpec::new("s", "start")];
    let mut edges = Vec::new();
    for i in 0..width {
        nodes.push(NodeSpec::new(format!("c{i}"), kind));
        edges.push(EdgeSpec::new(format!("e{i}"), "s", format!("c{i}")));
    }
    (nodes, edges)
}

/// A complete definition wrapping the given graph under a fixed name.
pub fn definition_of(nodes: Vec<NodeSpec>, edges: Vec<EdgeSpec>) -> WorkflowDefinition {
    WorkflowDefinition::new("test-workflow", nodes, edges)
}

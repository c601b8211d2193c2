use crate::graph::{Graph, Node, NodeKind};
use ahash::AHashSet;

/// Formats a graph as an indented text outline, following edges down from the
/// project node.
pub struct OutlineFormatter;

impl OutlineFormatter {
    pub fn format(graph: &Graph) -> String {
        let mut output = String::new();
        let mut printed = AHashSet::new();

        // Editor-added nodes may not hang below the project node, so every node
        // without an incoming edge starts its own outline.
        let entry_points = graph
            .nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Root || !graph.edges.iter().any(|e| e.target == n.id));

        for node in entry_points {
            Self::format_recursive(graph, node, 0, &mut printed, &mut output);
        }
        output
    }

    fn format_recursive<'a>(
        graph: &'a Graph,
        node: &'a Node,
        depth: usize,
        printed: &mut AHashSet<&'a str>,
        output: &mut String,
    ) {
        let indent = "  ".repeat(depth);
        if !printed.insert(node.id.as_str()) {
            // Shared child or cycle: mention it, don't expand it twice.
            output.push_str(&format!("{}- {} (see above)\n", indent, node.label));
            return;
        }

        output.push_str(&format!("{}- {}\n", indent, Self::format_node(node)));
        for child in graph.children_of(&node.id) {
            Self::format_recursive(graph, child, depth + 1, printed, output);
        }
    }

    fn format_node(node: &Node) -> String {
        let details = &node.details;
        let mut line = node.label.clone();
        let figures: Vec<&str> = [details.duration.as_str(), details.cost.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !figures.is_empty() {
            line.push_str(&format!(" [{}]", figures.join(", ")));
        }
        if !details.bom.is_empty() {
            line.push_str(&format!(" materials: {}", details.bom));
        }
        line
    }
}

use super::{Edge, Graph, Node, NodeDetails, NodeKind, Position, WorkStatus};
use crate::error::EditError;
use ahash::AHashSet;

/// Label given to nodes added by hand.
pub const NEW_NODE_LABEL: &str = "New Node";
const ADDED_NODE_PREFIX: &str = "node:";

/// Edit operations the graph editor applies to its working copy.
///
/// Operations validate before mutating: a failed call leaves the graph unchanged.
impl Graph {
    /// Adds a blank work node and returns its id.
    pub fn add_work_node(&mut self, position: Position) -> String {
        let mut counter = self.nodes.len();
        let id = loop {
            let candidate = format!("{}{}", ADDED_NODE_PREFIX, counter);
            if !self.contains_node(&candidate) {
                break candidate;
            }
            counter += 1;
        };

        self.nodes.push(Node {
            id: id.clone(),
            kind: NodeKind::Work,
            position,
            label: NEW_NODE_LABEL.to_string(),
            details: NodeDetails {
                status: WorkStatus::Pending,
                ..NodeDetails::default()
            },
        });
        id
    }

    pub fn connect(&mut self, source: &str, target: &str) -> Result<&Edge, EditError> {
        if source == target {
            return Err(EditError::SelfLoop(source.to_string()));
        }
        for id in [source, target] {
            if !self.contains_node(id) {
                return Err(EditError::NodeNotFound(id.to_string()));
            }
        }
        if self.has_edge(source, target) {
            return Err(EditError::DuplicateEdge {
                source_id: source.to_string(),
                target_id: target.to_string(),
            });
        }

        self.edges.push(Edge::new(source, target));
        Ok(&self.edges[self.edges.len() - 1])
    }

    /// Removes the given nodes together with every edge touching them.
    pub fn remove_nodes(&mut self, ids: &[&str]) -> Result<Vec<Node>, EditError> {
        for id in ids {
            let node = self
                .node(id)
                .ok_or_else(|| EditError::NodeNotFound(id.to_string()))?;
            if node.kind == NodeKind::Root {
                return Err(EditError::ProtectedNode(id.to_string()));
            }
        }

        let doomed: AHashSet<&str> = ids.iter().copied().collect();
        let (removed, kept): (Vec<Node>, Vec<Node>) = std::mem::take(&mut self.nodes)
            .into_iter()
            .partition(|n| doomed.contains(n.id.as_str()));
        self.nodes = kept;
        self.edges
            .retain(|e| !doomed.contains(e.source.as_str()) && !doomed.contains(e.target.as_str()));
        Ok(removed)
    }

    pub fn remove_edges(&mut self, ids: &[&str]) -> Result<Vec<Edge>, EditError> {
        if let Some(missing) = ids.iter().find(|id| !self.edges.iter().any(|e| e.id == **id)) {
            return Err(EditError::EdgeNotFound(missing.to_string()));
        }

        let doomed: AHashSet<&str> = ids.iter().copied().collect();
        let (removed, kept): (Vec<Edge>, Vec<Edge>) = std::mem::take(&mut self.edges)
            .into_iter()
            .partition(|e| doomed.contains(e.id.as_str()));
        self.edges = kept;
        Ok(removed)
    }

    pub fn move_node(&mut self, id: &str, position: Position) -> Result<(), EditError> {
        self.existing_mut(id)?.position = position;
        Ok(())
    }

    pub fn set_label(&mut self, id: &str, label: &str) -> Result<(), EditError> {
        self.existing_mut(id)?.label = label.to_string();
        Ok(())
    }

    pub fn update_details(&mut self, id: &str, details: NodeDetails) -> Result<(), EditError> {
        self.existing_mut(id)?.details = details;
        Ok(())
    }

    fn existing_mut(&mut self, id: &str) -> Result<&mut Node, EditError> {
        self.node_mut(id)
            .ok_or_else(|| EditError::NodeNotFound(id.to_string()))
    }
}

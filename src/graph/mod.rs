//! The node/edge collection handed to the rendering collaborator.

pub mod edit;

use crate::payload::{BillOfMaterialsItem, WorkOrderId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Id of the synthetic project node. Work-order nodes live under [`WORK_NODE_PREFIX`],
/// so no id supplied by the service can ever collide with it.
pub const ROOT_NODE_ID: &str = "project:root";
/// Namespace of every node materialized from a work order.
pub const WORK_NODE_PREFIX: &str = "work:";

/// Graph node id for a work order.
pub fn work_node_id(id: &WorkOrderId) -> String {
    format!("{}{}", WORK_NODE_PREFIX, id)
}

/// Edge id for a `source -> target` connection.
///
/// Backslashes and `>` inside either endpoint are escaped with a backslash, so the only
/// unescaped `>` is the one in the separator and distinct pairs never share an id.
pub fn edge_id(source: &str, target: &str) -> String {
    format!("e:{}->{}", escape_endpoint(source), escape_endpoint(target))
}

fn escape_endpoint(id: &str) -> String {
    let mut escaped = String::with_capacity(id.len());
    for c in id.chars() {
        if matches!(c, '\\' | '>') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Formats an amount the way it is shown to users: integral values without a
/// fractional part (`5`, `1500`), everything else in shortest form (`2.5`).
/// Magnitudes from `1e21` up and below `1e-6` switch to exponent form (`1e+21`,
/// `1.5e-7`).
pub fn format_amount(amount: f64) -> String {
    let magnitude = amount.abs();
    if amount.is_nan() {
        "NaN".to_string()
    } else if amount.is_infinite() {
        (if amount > 0.0 { "Infinity" } else { "-Infinity" }).to_string()
    } else if magnitude >= 1e21 || (magnitude > 0.0 && magnitude < 1e-6) {
        let text = format!("{:e}", amount);
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => text,
        }
    } else if amount.fract() == 0.0 && magnitude < i64::MAX as f64 {
        format!("{}", amount as i64)
    } else {
        format!("{}", amount)
    }
}

pub fn format_duration(days: f64) -> String {
    format!("{} days", format_amount(days))
}

pub fn format_cost(cost: f64) -> String {
    format!("${}", format_amount(cost))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Root,
    Work,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Progress of a work node. Materialization always starts nodes `InProgress`;
/// only the editor changes it afterwards. Any status text the editor writes that
/// is not one of the known states is kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkStatus {
    #[default]
    #[serde(rename = "In Progress")]
    InProgress,
    Pending,
    Completed,
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkStatus::InProgress => write!(f, "In Progress"),
            WorkStatus::Pending => write!(f, "Pending"),
            WorkStatus::Completed => write!(f, "Completed"),
            WorkStatus::Other(status) => write!(f, "{}", status),
        }
    }
}

/// Display details shown by the details view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeDetails {
    /// Raw id of the work order this node was built from. `None` for the project
    /// node and for nodes added by the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_order_id: Option<WorkOrderId>,
    pub duration: String,
    pub cost: String,
    /// Comma-joined item names of the bill of materials.
    pub bom: String,
    /// Comma-joined stakeholder names.
    pub stakeholders: String,
    pub status: WorkStatus,
    #[serde(default)]
    pub bom_full: Vec<BillOfMaterialsItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub position: Position,
    pub label: String,
    pub details: NodeDetails,
}

/// A directed parent to child connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            id: edge_id(source, target),
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// The synthetic project node, if the graph still has one.
    pub fn root(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.kind == NodeKind::Root)
    }

    /// Node materialized from the work order with the given id.
    pub fn work_node(&self, id: &WorkOrderId) -> Option<&Node> {
        self.node(&work_node_id(id))
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target)
    }

    /// Targets of the edges leaving `id`, in edge order.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source == id)
            .filter_map(|e| self.node(&e.target))
    }

    /// Edges whose source or target is not a node of this graph.
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| !self.contains_node(&e.source) || !self.contains_node(&e.target))
            .collect()
    }
}

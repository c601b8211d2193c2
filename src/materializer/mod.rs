//! The work-order tree materializer.
//!
//! Turns a flat payload of id-referenced work orders into a positioned [`Graph`]
//! anchored on a synthetic project node, rolling cost and duration up into that node.
//!
//! The walk is an explicit depth-first work list with a visited set:
//! - every work order yields exactly one node, placed where it is first reached;
//! - a shared child reached from another parent only gains an incoming edge;
//! - edges are unique per `(source, target)` pair;
//! - references to missing orders are skipped or rejected per [`DanglingPolicy`].

mod aggregate;
mod index;
pub mod layout;

pub use aggregate::Totals;
pub use layout::{Layout, sibling_sequence};

use crate::error::{EnvelopeError, MaterializeError};
use crate::graph::{
    Edge, Graph, Node, NodeDetails, NodeKind, Position, ROOT_NODE_ID, WorkStatus, format_cost,
    format_duration, work_node_id,
};
use crate::options::{DanglingPolicy, MaterializeOptions};
use crate::payload::{Payload, WorkOrder};
use ahash::AHashSet;
use index::WorkOrderIndex;
use itertools::Itertools;
use tracing::{debug, warn};

/// A graph together with the numeric totals written into its project node.
#[derive(Debug, Clone, PartialEq)]
pub struct Materialization {
    pub graph: Graph,
    pub totals: Totals,
}

/// A pending step of the walk: an order, the node it hangs from, and where it goes.
struct Visit<'a> {
    order: &'a WorkOrder,
    parent: String,
    level: usize,
    x: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Materializer {
    options: MaterializeOptions,
}

pub struct MaterializerBuilder {
    options: MaterializeOptions,
}

impl MaterializerBuilder {
    pub fn new() -> Self {
        Self {
            options: MaterializeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MaterializeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn horizontal_spacing(mut self, pixels: f64) -> Self {
        self.options.horizontal_spacing = pixels;
        self
    }

    pub fn vertical_spacing(mut self, pixels: f64) -> Self {
        self.options.vertical_spacing = pixels;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = depth;
        self
    }

    pub fn dangling_policy(mut self, policy: DanglingPolicy) -> Self {
        self.options.dangling = policy;
        self
    }

    pub fn build(self) -> Materializer {
        Materializer {
            options: self.options,
        }
    }
}

impl Default for MaterializerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Materializer {
    pub fn new(options: MaterializeOptions) -> Self {
        Self { options }
    }

    pub fn builder() -> MaterializerBuilder {
        MaterializerBuilder::new()
    }

    pub fn options(&self) -> &MaterializeOptions {
        &self.options
    }

    pub fn materialize(&self, payload: &Payload, root_label: &str) -> Result<Graph, MaterializeError> {
        self.materialize_detailed(payload, root_label)
            .map(|run| run.graph)
    }

    /// Decodes `text` as a payload and materializes it.
    pub fn materialize_json(&self, text: &str, root_label: &str) -> Result<Graph, MaterializeError> {
        let payload = Payload::from_json(text)?;
        self.materialize(&payload, root_label)
    }

    /// Unwraps a service message, decodes it and materializes it.
    pub fn materialize_message(&self, message: &str, root_label: &str) -> Result<Graph, EnvelopeError> {
        let payload = Payload::from_message(message)?;
        Ok(self.materialize(&payload, root_label)?)
    }

    pub fn materialize_detailed(
        &self,
        payload: &Payload,
        root_label: &str,
    ) -> Result<Materialization, MaterializeError> {
        let index = WorkOrderIndex::build(payload)?;
        let layout = Layout::from(&self.options);

        let mut totals = Totals::default();
        let mut graph = Graph::default();
        let mut visited: AHashSet<String> = AHashSet::with_capacity(index.len());
        let mut edge_pairs: AHashSet<(String, String)> = AHashSet::new();

        let root_position = layout.root_position();
        graph.nodes.push(Node {
            id: ROOT_NODE_ID.to_string(),
            kind: NodeKind::Root,
            position: root_position,
            label: root_label.to_string(),
            details: NodeDetails::default(),
        });

        let roots = index.roots();
        totals.fold_sibling_group(roots.iter().map(|order| order.duration_days));

        // Pushed in reverse so the stack pops them in payload order.
        let mut stack: Vec<Visit> = roots
            .iter()
            .copied()
            .enumerate()
            .rev()
            .map(|(slot, order)| Visit {
                order,
                parent: ROOT_NODE_ID.to_string(),
                level: layout.root_level + 1,
                x: layout.child_x(root_position.x, slot, roots.len()),
            })
            .collect();

        while let Some(visit) = stack.pop() {
            let depth = visit.level - layout.root_level;
            if depth > self.options.max_depth {
                return Err(MaterializeError::DepthLimitExceeded {
                    id: visit.order.id.to_string(),
                    limit: self.options.max_depth,
                });
            }

            let node_id = work_node_id(&visit.order.id);
            if edge_pairs.insert((visit.parent.clone(), node_id.clone())) {
                graph.edges.push(Edge::new(&visit.parent, &node_id));
            }

            if !visited.insert(visit.order.id.key()) {
                debug!(
                    id = %visit.order.id,
                    parent = %visit.parent,
                    "work order already placed, linking additional parent only"
                );
                continue;
            }

            totals.add_cost(visit.order.estimated_cost);
            graph.nodes.push(work_node(
                visit.order,
                node_id.clone(),
                layout.position(visit.level, visit.x),
            ));

            let children = self.resolve_children(&index, visit.order)?;
            totals.fold_sibling_group(children.iter().map(|child| child.duration_days));

            let count = children.len();
            for (slot, child) in children.into_iter().enumerate().rev() {
                stack.push(Visit {
                    order: child,
                    parent: node_id.clone(),
                    level: visit.level + 1,
                    x: layout.child_x(visit.x, slot, count),
                });
            }
        }

        let root = &mut graph.nodes[0];
        root.details.duration = format_duration(totals.duration);
        root.details.cost = format_cost(totals.cost);

        debug!(
            work_orders = payload.work_orders.len(),
            roots = roots.len(),
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            cost = totals.cost,
            duration = totals.duration,
            "materialized work-order graph"
        );

        Ok(Materialization { graph, totals })
    }

    /// Looks up the children of `order`, dropping or rejecting missing ones.
    fn resolve_children<'a>(
        &self,
        index: &WorkOrderIndex<'a>,
        order: &'a WorkOrder,
    ) -> Result<Vec<&'a WorkOrder>, MaterializeError> {
        let mut children = Vec::with_capacity(order.child_work_orders.len());
        for child_id in &order.child_work_orders {
            match index.get(child_id) {
                Some(child) => children.push(child),
                None => match self.options.dangling {
                    DanglingPolicy::Skip => {
                        warn!(parent = %order.id, child = %child_id, "skipping reference to a missing work order");
                    }
                    DanglingPolicy::Error => {
                        return Err(MaterializeError::DanglingReference {
                            parent: order.id.to_string(),
                            child: child_id.to_string(),
                        });
                    }
                },
            }
        }
        Ok(children)
    }
}

fn work_node(order: &WorkOrder, id: String, position: Position) -> Node {
    Node {
        id,
        kind: NodeKind::Work,
        position,
        label: order.task.clone(),
        details: NodeDetails {
            work_order_id: Some(order.id.clone()),
            duration: format_duration(order.duration_days),
            cost: format_cost(order.estimated_cost),
            bom: order
                .bill_of_materials
                .iter()
                .map(|line| line.item.as_str())
                .join(", "),
            stakeholders: order.stakeholders.keys().join(", "),
            status: WorkStatus::InProgress,
            bom_full: order.bill_of_materials.clone(),
        },
    }
}

/// Materializes `payload` with the default options.
pub fn materialize(payload: &Payload, root_label: &str) -> Result<Graph, MaterializeError> {
    Materializer::default().materialize(payload, root_label)
}

//! # Workgraph - Work-Order Graph Materializer
//!
//! **Workgraph** turns the flat work-order list produced by a construction-planning
//! service into a project graph: one node for the project, fanning out into the
//! hierarchy of work orders, each positioned for rendering and the project node
//! carrying the rolled-up cost and duration.
//!
//! ## Core Workflow
//!
//! 1.  **Decode**: Parse the service response into a `Payload`, either from raw JSON
//!     (`Payload::from_json`) or from the fenced `message` envelope
//!     (`Payload::from_message`).
//! 2.  **Configure**: Use `Materializer::builder` to adjust spacing, depth limit and
//!     the handling of references to missing work orders.
//! 3.  **Materialize**: Call `materialize` to get a `Graph` of nodes and edges.
//! 4.  **Edit**: Hand the graph to an editor through a `ProjectSession`, which
//!     sequences submissions and accepts edits back through explicit commits.
//!
//! ## Quick Start
//!
//! ```rust
//! use workgraph::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let payload = Payload::from_value(json!({
//!         "work_orders": [
//!             { "id": 1, "task": "Foundation", "duration_days": 3, "estimated_cost": 1000,
//!               "child_work_orders": [2, 3] },
//!             { "id": 2, "task": "Excavation", "duration_days": 5, "estimated_cost": 400 },
//!             { "id": 3, "task": "Formwork", "duration_days": 8, "estimated_cost": 600 }
//!         ]
//!     }))?;
//!
//!     let materializer = Materializer::builder().horizontal_spacing(200.0).build();
//!     let graph = materializer.materialize(&payload, "Warehouse")?;
//!
//!     let root = graph.root().expect("project node");
//!     assert_eq!(root.details.cost, "$2000");
//!     assert_eq!(root.details.duration, "11 days");
//!     assert_eq!(graph.nodes.len(), 4);
//!     assert_eq!(graph.edges.len(), 3);
//!     Ok(())
//! }
//! ```

pub mod envelope;
pub mod error;
pub mod graph;
pub mod materializer;
pub mod options;
pub mod outline;
pub mod payload;
pub mod prelude;
pub mod session;

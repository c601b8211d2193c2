//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the workgraph crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use workgraph::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let message = std::fs::read_to_string("path/to/response.txt")?;
//! let payload = Payload::from_message(&message)?;
//! let graph = materialize(&payload, "Shopping mall in Delhi")?;
//!
//! print!("{}", OutlineFormatter::format(&graph));
//! # Ok(())
//! # }
//! ```

// Materialization
pub use crate::materializer::{Materialization, Materializer, MaterializerBuilder, Totals, materialize};
pub use crate::options::{DanglingPolicy, MaterializeOptions};

// Input model
pub use crate::envelope::ServiceResponse;
pub use crate::payload::{BillOfMaterialsItem, Payload, WorkOrder, WorkOrderId};

// Output model
pub use crate::graph::{Edge, Graph, Node, NodeDetails, NodeKind, Position, ROOT_NODE_ID, WorkStatus};

// Editing
pub use crate::session::{ProjectSession, Ticket, WorkingCopy};

// Error types
pub use crate::error::{EditError, EnvelopeError, MaterializeError, SessionError};

// Formatting
pub use crate::outline::OutlineFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

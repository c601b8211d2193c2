//! One-directional flow between the generation service, the materializer and the editor.
//!
//! A [`ProjectSession`] owns the current graph. Submissions are numbered; only the
//! newest one may replace the graph, so a slow stale response can never overwrite a
//! newer one. The editor checks out a [`WorkingCopy`], edits it freely and hands it
//! back with [`ProjectSession::commit`]; a commit based on an outdated revision is
//! rejected instead of silently merged.

use crate::error::{EnvelopeError, SessionError};
use crate::graph::Graph;
use crate::materializer::Materializer;
use crate::payload::Payload;
use tracing::{debug, warn};

/// Handle for one submission to the generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn number(self) -> u64 {
        self.0
    }
}

/// An editable copy of the session graph, tagged with the revision it came from.
#[derive(Debug, Clone)]
pub struct WorkingCopy {
    base_revision: u64,
    graph: Graph,
}

impl WorkingCopy {
    pub fn base_revision(&self) -> u64 {
        self.base_revision
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }
}

pub struct ProjectSession {
    materializer: Materializer,
    last_ticket: u64,
    in_flight: Option<u64>,
    graph: Option<Graph>,
    revision: u64,
}

impl ProjectSession {
    pub fn new(materializer: Materializer) -> Self {
        Self {
            materializer,
            last_ticket: 0,
            in_flight: None,
            graph: None,
            revision: 0,
        }
    }

    /// Starts a submission. Any submission still in flight is superseded.
    pub fn begin_submission(&mut self) -> Ticket {
        self.last_ticket += 1;
        if let Some(previous) = self.in_flight.replace(self.last_ticket) {
            debug!(previous, current = self.last_ticket, "superseding in-flight submission");
        }
        Ticket(self.last_ticket)
    }

    /// Whether a submission is awaiting its response. The submit trigger should be
    /// disabled while this holds.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Applies the service `message` for `ticket`, rebuilding the graph from scratch.
    ///
    /// The submission is finished whether or not the message decodes; on failure the
    /// previous graph is kept.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        message: &str,
        root_label: &str,
    ) -> Result<&Graph, SessionError> {
        self.settle(ticket)?;
        let payload = Payload::from_message(message)?;
        self.install(&payload, root_label)
    }

    /// Like [`complete`](Self::complete), for a response that is already decoded.
    pub fn complete_with_payload(
        &mut self,
        ticket: Ticket,
        payload: &Payload,
        root_label: &str,
    ) -> Result<&Graph, SessionError> {
        self.settle(ticket)?;
        self.install(payload, root_label)
    }

    /// Ends a submission whose request failed. The graph is left untouched.
    pub fn abandon(&mut self, ticket: Ticket) -> Result<(), SessionError> {
        self.settle(ticket)
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn checkout(&self) -> Result<WorkingCopy, SessionError> {
        let graph = self.graph.clone().ok_or(SessionError::NothingToCommit)?;
        Ok(WorkingCopy {
            base_revision: self.revision,
            graph,
        })
    }

    /// Publishes an edited working copy and returns the new revision.
    pub fn commit(&mut self, copy: WorkingCopy) -> Result<u64, SessionError> {
        if self.graph.is_none() {
            return Err(SessionError::NothingToCommit);
        }
        if copy.base_revision != self.revision {
            return Err(SessionError::RevisionConflict {
                expected: self.revision,
                found: copy.base_revision,
            });
        }
        self.graph = Some(copy.graph);
        self.revision += 1;
        Ok(self.revision)
    }

    fn settle(&mut self, ticket: Ticket) -> Result<(), SessionError> {
        if ticket.0 != self.last_ticket {
            warn!(
                ticket = ticket.0,
                latest = self.last_ticket,
                "discarding response of a superseded submission"
            );
            return Err(SessionError::StaleSubmission {
                ticket: ticket.0,
                latest: self.last_ticket,
            });
        }
        if self.in_flight.take().is_none() {
            return Err(SessionError::NoSubmissionInFlight);
        }
        Ok(())
    }

    fn install(&mut self, payload: &Payload, root_label: &str) -> Result<&Graph, SessionError> {
        let graph = self
            .materializer
            .materialize(payload, root_label)
            .map_err(EnvelopeError::from)?;
        self.revision += 1;
        Ok(&*self.graph.insert(graph))
    }
}

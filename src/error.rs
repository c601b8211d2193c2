use thiserror::Error;

/// Errors that can occur while turning a work-order payload into a graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterializeError {
    #[error("Malformed work-order payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("Work order '{parent}' references child '{child}', which is not in the payload")]
    DanglingReference { parent: String, child: String },

    #[error("Work order '{id}' is nested deeper than the configured limit of {limit} levels")]
    DepthLimitExceeded { id: String, limit: usize },
}

impl MaterializeError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        MaterializeError::MalformedPayload {
            reason: reason.into(),
        }
    }
}

/// Errors raised while unwrapping the text envelope returned by the generation service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvelopeError {
    #[error("Service message is too short to carry an envelope ({len} characters)")]
    TooShort { len: usize },

    #[error(transparent)]
    Payload(#[from] MaterializeError),
}

/// Errors raised by edit operations applied to a working copy of a graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Node '{0}' does not exist in the graph")]
    NodeNotFound(String),

    #[error("Edge '{0}' does not exist in the graph")]
    EdgeNotFound(String),

    #[error("An edge from '{source_id}' to '{target_id}' already exists")]
    DuplicateEdge { source_id: String, target_id: String },

    #[error("Node '{0}' cannot be connected to itself")]
    SelfLoop(String),

    #[error("Node '{0}' is the project root and cannot be removed")]
    ProtectedNode(String),
}

/// Errors raised by a `ProjectSession` when submissions or commits arrive out of order.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Submission #{ticket} was superseded by submission #{latest}")]
    StaleSubmission { ticket: u64, latest: u64 },

    #[error("No submission is in flight")]
    NoSubmissionInFlight,

    #[error("There is no graph to edit yet")]
    NothingToCommit,

    #[error("Working copy was checked out at revision {found}, but the graph is at revision {expected}")]
    RevisionConflict { expected: u64, found: u64 },

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Edit(#[from] EditError),
}

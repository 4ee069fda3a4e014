// SPDX-License-Identifier: MIT

//! Typed error handling for redux-nodes
//!
//! Node failures are per-invocation and never stop a flow; flow errors come
//! from building or driving a flow; `RuntimeError` wraps everything the
//! binary and the HTTP host can surface.

use thiserror::Error;

/// Failure of a single node invocation.
///
/// Reported to the flow's error sink. The failing message is not forwarded
/// and the node stays ready for the next one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NodeError {
    /// The configured data source field was not present on the message
    #[error("Message object did not contain field '{field}' specified in Data Source field")]
    MissingField { field: String },

    /// `substateName` or `substate` was absent
    #[error("Please use a Reducer Node as input for this Node.")]
    InvalidReducerInput,
}

impl NodeError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

/// Flow construction and dispatch errors
#[derive(Debug, Error)]
pub enum FlowError {
    /// Two nodes share an id
    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),

    /// Injection addressed a node that is not part of the flow
    #[error("Node '{0}' not found")]
    UnknownNode(String),

    /// A wire points at a node id that does not exist
    #[error("Node '{from}' is wired to unknown node '{to}'")]
    UnknownTarget { from: String, to: String },

    /// Wires declared for a port the node does not have
    #[error("Node '{node}' has {outputs} output(s) but wires declare port {port}")]
    PortOutOfRange {
        node: String,
        port: usize,
        outputs: usize,
    },

    /// ActionCreator configured without an action type
    #[error("Node '{0}' has an empty action type")]
    EmptyActionType(String),

    /// A single injection kept bouncing between nodes; `delivered` and
    /// `failed` count what was collected before the dispatch was dropped
    #[error("Hop limit of {limit} reached while dispatching message {msg_id} ({delivered} delivery(ies) and {failed} failure(s) discarded)")]
    HopLimit {
        limit: usize,
        msg_id: String,
        delivered: usize,
        failed: usize,
    },

    /// Flow file not found when loading
    #[error("Flow file not found: {0}")]
    FileNotFound(String),
}

/// Top-level error type for redux-nodes
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Flow-specific errors
    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    /// Configuration errors (invalid env vars, bad CLI input)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl RuntimeError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

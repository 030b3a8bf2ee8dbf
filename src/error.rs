//! Error types for the quiz core.
//!
//! Three distinct failure families, which must never blur into each other:
//! structural errors are fatal graph/data bugs, classification errors are
//! always recovered locally inside the [`crate::classifier`], and the undo
//! boundary is a benign caller-facing condition.

use std::time::Duration;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Structural error: {0}")]
    Structural(#[from] StructuralError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Graph construction errors — the content failed validation and the quiz
/// must not start.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Duplicate node id: {id}")]
    DuplicateNode { id: String },

    #[error("Node {node} references unknown node {target}")]
    DanglingEdge { node: String, target: String },

    #[error("Entry node {id} does not exist")]
    UnknownEntry { id: String },

    #[error("Classification node {id} must have exactly one direct edge")]
    BadClassificationNode { id: String },

    #[error("Terminal node {id} must not have outgoing edges")]
    TerminalWithEdges { id: String },

    #[error("Finals candidate {target} of node {node} is not a terminal node")]
    FinalsNotTerminal { node: String, target: String },

    #[error("Node {node} has an empty {what} set")]
    EmptyEdgeSet { node: String, what: String },

    #[error("Terminal node {id} has no profile attributes")]
    MissingProfile { id: String },
}

/// Runtime graph/data integrity failures. Fatal to the session — these are
/// surfaced to the caller, never substituted with a fallback.
#[derive(Debug, thiserror::Error)]
pub enum StructuralError {
    #[error("Unknown node id: {id}")]
    UnknownNode { id: String },

    #[error("Node {node} expects a choice selection but none was supplied")]
    MissingChoice { node: String },

    #[error("Node {node} has no choice with id {choice}")]
    UnknownChoice { node: String, choice: String },

    #[error("No terminal profile registered for {id}")]
    UnknownProfile { id: String },
}

/// Session/undo errors. Expected and benign — callers should disable the
/// back action when history is empty rather than rely on catching this.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No history to go back to")]
    NoHistory,
}

/// Remote classification failures. These never leave the classifier: every
/// variant is caught and converted to the deterministic local fallback.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("Classification request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("Classification request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Provider returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Malformed provider response: {reason}")]
    MalformedResponse { reason: String },

    #[error("Provider chose {returned}, not one of the candidates")]
    OutOfSet { returned: String },
}

/// Result type alias for the quiz core.
pub type Result<T> = std::result::Result<T, Error>;

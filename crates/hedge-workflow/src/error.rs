//! Error types for workflow assembly and execution

use thiserror::Error;

/// Result type alias for workflow operations
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Errors raised while building, compiling or executing a workflow graph
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Selection references a key outside the analyst registry
    #[error("Unknown analyst: '{key}'")]
    UnknownAnalyst { key: String },

    /// No entry point was set before compiling
    #[error("Workflow has no entry point")]
    MissingEntryPoint,

    /// Two nodes were registered under the same name
    #[error("Duplicate node: '{name}'")]
    DuplicateNode { name: String },

    /// An edge or entry point references a node that was never added
    #[error("Edge references unknown node: '{name}'")]
    UnknownNode { name: String },

    /// The graph contains a cycle
    #[error("Workflow graph contains a cycle")]
    CyclicGraph,

    /// A node cannot be reached from the entry point
    #[error("Node '{name}' is unreachable from the entry point")]
    Unreachable { name: String },

    /// The graph must terminate in exactly one node
    #[error("Workflow must have exactly one terminal node, found {found}")]
    TerminalCount { found: usize },

    /// A node failed during graph execution
    #[error("Node '{node}' failed: {source}")]
    NodeFailed {
        node: String,
        #[source]
        source: hedge_core::Error,
    },
}

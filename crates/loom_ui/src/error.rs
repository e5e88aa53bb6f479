//! # UI Error Types
//!
//! Errors from structural scene operations and configuration loading.
//! Routing itself never fails: stale references are cleared, not reported.

use thiserror::Error;

use crate::scene::NodeId;

/// Errors that can occur in the UI core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    /// The handle refers to a destroyed node.
    #[error("stale node handle {0:?}")]
    StaleNode(NodeId),

    /// The node already has a parent; detach or reparent it instead.
    #[error("node {0:?} is already attached to a parent")]
    AlreadyAttached(NodeId),

    /// Moving the node would make it its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// The node being moved.
        child: NodeId,
        /// The requested new parent.
        parent: NodeId,
    },

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("cannot read configuration {path}: {reason}")]
    ConfigIo {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;

//! Error types for graph construction and execution.

use blox_types::PortDirection;
use thiserror::Error;

use crate::{BlockId, SubscriptionId};

/// Errors raised while wiring, running or loading a graph
#[derive(Error, Debug)]
pub enum BloxError {
    #[error("{block}: invalid {direction} port '{port}'")]
    InvalidPort {
        block: BlockId,
        port: String,
        direction: PortDirection,
    },

    #[error("{block}: invalid parameter '{parameter}'")]
    InvalidParameter { block: BlockId, parameter: String },

    #[error("{block}: received input through {subscription}, which feeds {expected}")]
    SubscriberMismatch {
        block: BlockId,
        subscription: SubscriptionId,
        expected: BlockId,
    },

    #[error("unknown subscription {0}")]
    UnknownSubscription(SubscriptionId),

    #[error("{0} is not part of this graph")]
    UnknownBlock(BlockId),

    #[error("no block type registered as '{0}'")]
    UnknownBlockType(String),

    #[error("graph file refers to missing block record {0}")]
    UnknownBlockRef(usize),

    #[error("graph file has more than one block record with id {0}")]
    DuplicateBlockRef(usize),

    #[error("{block}: {reason}")]
    ValueType { block: BlockId, reason: String },

    #[error("run did not converge after {rounds} rounds")]
    RunDidNotConverge { rounds: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BloxError {
    /// Block that triggered the error, when there is one
    pub fn block(&self) -> Option<BlockId> {
        match self {
            BloxError::InvalidPort { block, .. }
            | BloxError::InvalidParameter { block, .. }
            | BloxError::SubscriberMismatch { block, .. }
            | BloxError::ValueType { block, .. } => Some(*block),
            BloxError::UnknownBlock(block) => Some(*block),
            _ => None,
        }
    }
}

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, BloxError>;

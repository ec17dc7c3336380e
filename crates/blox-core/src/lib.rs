//! Blox - round-based dataflow execution for block graphs
//!
//! Blocks declare named input and output ports and are wired by
//! subscriptions from an output port to an input port. A run processes the
//! blocks nothing feeds, pushes their outputs synchronously into subscriber
//! input buffers, and keeps processing whatever received input until a
//! round produces nothing.
//!
//! # Architecture
//!
//! - [`Block`]: behaviour of a block type, processed through a
//!   [`ProcessContext`]
//! - [`BlockNode`]: per-block state owned by the graph (ports, parameters,
//!   LIFO input buffers)
//! - [`Subscription`]: edges kept once in the graph and referenced by id
//!   from both ends
//! - [`Blox`]: the graph and its scheduler
//! - [`BlockRegistry`]: type tag to constructor, for loading saved graphs
//!
//! # Example
//!
//! ```rust,ignore
//! use blox_core::prelude::*;
//! use serde_json::json;
//!
//! let mut blox = Blox::new();
//! let seven = blox.add(Data::new(json!(7)));
//! let three = blox.add(Data::new(json!(3)));
//! let add = blox.add(Add);
//! blox.subscribe(add, Add::VALUES, seven, Data::OUTPUT)?;
//! blox.subscribe(add, Add::VALUES, three, Data::OUTPUT)?;
//! blox.run()?; // Add emits 10 in the second round
//! ```

pub mod block;
pub mod blocks;
pub mod context;
pub mod error;
pub mod graph;
pub mod node;
pub mod observer;
mod persistence;
pub mod registry;
pub mod subscription;

pub use block::{Block, BlockId, BlockType};
pub use blocks::*;
pub use context::ProcessContext;
pub use error::{BloxError, Result};
pub use graph::{Blox, RunReport};
pub use node::BlockNode;
pub use observer::{BloxObserver, TracingObserver};
pub use registry::{BlockFactory, BlockRegistry};
pub use subscription::{Subscription, SubscriptionId};

pub use blox_types::{
    BlockCategory, BlockTypeDefinition, GraphFile, ParamDefinition, PortConfig, PortDirection,
    RunSettings, Value,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::block::{Block, BlockId, BlockType};
    pub use crate::blocks::*;
    pub use crate::context::ProcessContext;
    pub use crate::error::{BloxError, Result};
    pub use crate::graph::{Blox, RunReport};
    pub use crate::observer::{BloxObserver, TracingObserver};
    pub use crate::registry::BlockRegistry;
    pub use blox_types::{BlockCategory, BlockTypeDefinition, PortConfig, RunSettings, Value};
}

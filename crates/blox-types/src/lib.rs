//! Shared types for Blox dataflow graphs.
//!
//! This crate defines the data structures used by the engine and by
//! anything that stores or inspects graphs:
//! - Port and parameter definitions of block types
//! - The saved graph file format
//! - Run settings
//! - The dynamic value type flowing through ports

mod block;
mod connection;
mod graph;
mod node;
mod port;
mod settings;
mod value;

pub use block::*;
pub use connection::*;
pub use graph::*;
pub use node::*;
pub use port::*;
pub use settings::*;
pub use value::*;

/// Name of the default input port of a block
pub const DEFAULT_INPUT: &str = "In";

/// Name of the default output port of a block
pub const DEFAULT_OUTPUT: &str = "Out";

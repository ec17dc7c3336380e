//! Core Block trait
//!
//! A block is split in two halves: the behaviour implementing [`Block`],
//! and the [`BlockNode`](crate::BlockNode) state (ports, parameters, input
//! buffers, wiring) that the owning graph keeps for it.

use std::fmt;

use blox_types::BlockTypeDefinition;

use crate::context::ProcessContext;
use crate::error::Result;

/// Identity of a block within one graph
///
/// Ids are handed out by [`Blox::add`](crate::Blox::add) and are never
/// reused by the same graph, so a stale id can only fail lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub(crate) usize);

impl BlockId {
    /// Position of the block in the graph's arena
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block#{}", self.0)
    }
}

/// Behaviour of a block
///
/// # Design
///
/// - `definition` declares the ports and the only parameters the block
///   accepts; the graph builds the block's node state from it
/// - `process` consumes buffered input through the context and emits
///   results with [`ProcessContext::output`]
/// - referencing an undeclared port or parameter is an error, never ignored
///
/// # Example
///
/// ```ignore
/// #[derive(Default)]
/// struct Negate;
///
/// impl Block for Negate {
///     fn type_name(&self) -> &'static str {
///         "Negate"
///     }
///
///     fn definition(&self) -> BlockTypeDefinition {
///         BlockTypeDefinition::new("Negate", "Negates numbers", BlockCategory::Math)
///     }
///
///     fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
///         if let Some(v) = ctx.pop_value("In")? {
///             ctx.output("Out", json!(-v.as_f64().unwrap_or(0.0)))?;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Block {
    /// Registered type tag of this block
    fn type_name(&self) -> &'static str;

    /// Ports and parameters of this block
    fn definition(&self) -> BlockTypeDefinition;

    /// Handle the values buffered for this round
    ///
    /// Call [`ProcessContext::set_waiting`] to be scheduled again next round
    /// with the remaining buffered values kept.
    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()>;
}

/// A block type that can be created by name from a registry
pub trait BlockType: Block + Default + 'static {
    /// Type tag used in registries and saved graphs
    const TYPE_NAME: &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_id_display() {
        assert_eq!(BlockId(3).to_string(), "block#3");
        assert_eq!(BlockId(3).index(), 3);
    }
}

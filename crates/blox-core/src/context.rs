//! The view of the graph a block gets while it is processed.

use blox_types::Value;

use crate::error::{BloxError, Result};
use crate::{BlockId, BlockNode, Blox};

/// Handed to [`Block::process`](crate::Block::process)
///
/// Reads go to the processed block's own buffers and parameters; `output`
/// delivers synchronously to every current subscriber before returning.
pub struct ProcessContext<'a> {
    blox: &'a mut Blox,
    block: BlockId,
    waiting: bool,
}

impl<'a> ProcessContext<'a> {
    pub(crate) fn new(blox: &'a mut Blox, block: BlockId) -> Self {
        Self {
            blox,
            block,
            waiting: false,
        }
    }

    /// Id of the block being processed
    pub fn block_id(&self) -> BlockId {
        self.block
    }

    /// The owning graph
    pub fn blox(&self) -> &Blox {
        &*self.blox
    }

    /// State of the block being processed
    pub fn node(&self) -> Result<&BlockNode> {
        self.blox.node(self.block)
    }

    pub fn has_value(&self, port: &str) -> Result<bool> {
        self.node()?.has_value(port)
    }

    pub fn peek_value(&self, port: &str) -> Result<Option<&Value>> {
        self.node()?.peek_value(port)
    }

    pub fn pop_value(&mut self, port: &str) -> Result<Option<Value>> {
        self.blox.node_mut(self.block)?.pop_value(port)
    }

    pub fn parameter(&self, name: &str) -> Result<&Value> {
        self.node()?.parameter(name)
    }

    /// Send `value` to every subscriber of `port`
    pub fn output(&mut self, port: &str, value: Value) -> Result<()> {
        self.blox.output(self.block, port, value)
    }

    /// Blocks processed this round that can still feed this block
    pub fn incoming(&self) -> Vec<BlockId> {
        self.blox.incoming(self.block)
    }

    /// Keep the buffered values and process this block again next round
    pub fn set_waiting(&mut self) {
        self.waiting = true;
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.blox.variable(name)
    }

    pub fn set_variable(&mut self, name: &str, value: Value) {
        self.blox.set_variable(name, value);
    }

    /// Error for a value this block cannot handle
    pub fn value_error(&self, reason: impl Into<String>) -> BloxError {
        BloxError::ValueType {
            block: self.block,
            reason: reason.into(),
        }
    }
}

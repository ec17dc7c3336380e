//! The plain block: forwards one value per round from `In` to `Out`

use blox_types::{BlockCategory, BlockTypeDefinition, DEFAULT_INPUT, DEFAULT_OUTPUT};

use crate::block::{Block, BlockType};
use crate::context::ProcessContext;
use crate::error::Result;

/// Forwards the most recent `In` value to `Out`
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Block for PassThrough {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn definition(&self) -> BlockTypeDefinition {
        BlockTypeDefinition::new(
            Self::TYPE_NAME,
            "Forwards its input unchanged",
            BlockCategory::General,
        )
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        if let Some(value) = ctx.pop_value(DEFAULT_INPUT)? {
            ctx.output(DEFAULT_OUTPUT, value)?;
        }
        Ok(())
    }
}

impl BlockType for PassThrough {
    const TYPE_NAME: &'static str = "Block";
}

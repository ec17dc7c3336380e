//! Arithmetic blocks

use blox_types::{add_values, BlockCategory, BlockTypeDefinition, PortConfig};

use crate::block::{Block, BlockType};
use crate::context::ProcessContext;
use crate::error::Result;

/// Sums every value buffered on `Values` and emits the total once on `Result`
///
/// Values are popped most recent first; numbers add, strings concatenate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Add;

impl Add {
    pub const VALUES: &'static str = "Values";
    pub const RESULT: &'static str = "Result";
}

impl Block for Add {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn definition(&self) -> BlockTypeDefinition {
        BlockTypeDefinition::new(Self::TYPE_NAME, "Adds its inputs together", BlockCategory::Math)
            .with_ports(PortConfig::new(&[Self::VALUES], &[Self::RESULT]))
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        let Some(mut total) = ctx.pop_value(Self::VALUES)? else {
            return Ok(());
        };
        while let Some(value) = ctx.pop_value(Self::VALUES)? {
            total = add_values(&total, &value)
                .ok_or_else(|| ctx.value_error(format!("cannot add {total} and {value}")))?;
        }
        ctx.output(Self::RESULT, total)
    }
}

impl BlockType for Add {
    const TYPE_NAME: &'static str = "Add";
}

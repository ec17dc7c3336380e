//! Comparison blocks

use std::cmp::Ordering;

use blox_types::{compare_values, BlockCategory, BlockTypeDefinition, PortConfig};

use crate::block::{Block, BlockType};
use crate::context::ProcessContext;
use crate::error::Result;

/// Routes each `Values` entry to one of three outputs by comparing it with
/// the paired `Compare to` entry
///
/// Pairs are formed by popping one value from each input until either runs
/// dry. Values that cannot be ordered against their partner count as equal.
/// If one side is left over while a block processed this round can still
/// feed this one, the block waits for the next round with its buffers kept.
///
/// # Ports
/// - Input `Values`: values to route
/// - Input `Compare to`: values to compare against
/// - Outputs `Less than`, `Equal to`, `Greater than`
#[derive(Debug, Clone, Copy, Default)]
pub struct Compare;

impl Compare {
    pub const VALUES: &'static str = "Values";
    pub const COMPARE_TO: &'static str = "Compare to";
    pub const LESS_THAN: &'static str = "Less than";
    pub const EQUAL_TO: &'static str = "Equal to";
    pub const GREATER_THAN: &'static str = "Greater than";
}

impl Block for Compare {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn definition(&self) -> BlockTypeDefinition {
        BlockTypeDefinition::new(
            Self::TYPE_NAME,
            "Routes values by comparing them with a second input",
            BlockCategory::Logic,
        )
        .with_ports(PortConfig::new(
            &[Self::VALUES, Self::COMPARE_TO],
            &[Self::LESS_THAN, Self::EQUAL_TO, Self::GREATER_THAN],
        ))
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        while ctx.has_value(Self::VALUES)? && ctx.has_value(Self::COMPARE_TO)? {
            let (Some(value), Some(other)) = (
                ctx.pop_value(Self::VALUES)?,
                ctx.pop_value(Self::COMPARE_TO)?,
            ) else {
                break;
            };
            let port = match compare_values(&value, &other) {
                Some(Ordering::Less) => Self::LESS_THAN,
                Some(Ordering::Greater) => Self::GREATER_THAN,
                _ => Self::EQUAL_TO,
            };
            ctx.output(port, value)?;
        }

        let unmatched = ctx.has_value(Self::VALUES)? || ctx.has_value(Self::COMPARE_TO)?;
        if unmatched && !ctx.incoming().is_empty() {
            ctx.set_waiting();
        }
        Ok(())
    }
}

impl BlockType for Compare {
    const TYPE_NAME: &'static str = "Compare";
}

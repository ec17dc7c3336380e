//! Alert block: surfaces messages to the user

use std::fmt;

use blox_types::{BlockCategory, BlockTypeDefinition, PortConfig, Value};

use crate::block::{Block, BlockType};
use crate::context::ProcessContext;
use crate::error::Result;

/// Receives each message an [`Alert`] block shows
pub type AlertHandler = Box<dyn FnMut(&Value)>;

/// Shows one `Message` value per round through its handler
///
/// The default handler logs on the `blox::alert` target.
pub struct Alert {
    handler: AlertHandler,
}

impl Alert {
    pub const MESSAGE: &'static str = "Message";

    pub fn with_handler(handler: impl FnMut(&Value) + 'static) -> Self {
        Self {
            handler: Box::new(handler),
        }
    }
}

impl Default for Alert {
    fn default() -> Self {
        Self::with_handler(|message| {
            tracing::info!(target: "blox::alert", %message, "alert");
        })
    }
}

impl fmt::Debug for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alert").finish_non_exhaustive()
    }
}

impl Block for Alert {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn definition(&self) -> BlockTypeDefinition {
        BlockTypeDefinition::new(Self::TYPE_NAME, "Shows a message", BlockCategory::Output)
            .with_ports(PortConfig::new(&[Self::MESSAGE], &[]))
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        if let Some(message) = ctx.pop_value(Self::MESSAGE)? {
            (self.handler)(&message);
        }
        Ok(())
    }
}

impl BlockType for Alert {
    const TYPE_NAME: &'static str = "Alert";
}

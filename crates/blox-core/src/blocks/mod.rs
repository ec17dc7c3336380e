//! Built-in block types

mod alert;
mod logic;
mod math;
mod passthrough;
mod sources;

pub use alert::{Alert, AlertHandler};
pub use logic::Compare;
pub use math::Add;
pub use passthrough::PassThrough;
pub use sources::Data;

use crate::registry::BlockRegistry;

/// Register every built-in block type
pub fn register_builtins(registry: &mut BlockRegistry) {
    registry.register::<PassThrough>();
    registry.register::<Data>();
    registry.register::<Add>();
    registry.register::<Alert>();
    registry.register::<Compare>();
}

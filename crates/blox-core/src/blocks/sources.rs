//! Source blocks (no inputs)

use blox_types::{BlockCategory, BlockTypeDefinition, ParamDefinition, PortConfig, Value};

use crate::block::{Block, BlockType};
use crate::context::ProcessContext;
use crate::error::Result;

/// Emits its `Data` parameter on the `Data` output every time it runs
///
/// # Example
///
/// ```ignore
/// let mut blox = Blox::new();
/// let seven = blox.add(Data::new(json!(7)));
/// // or set it after construction
/// blox.set_parameter(seven, Data::PARAM, json!(8))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Data {
    initial: Value,
}

impl Data {
    /// Name of both the parameter and the output port
    pub const PARAM: &'static str = "Data";
    pub const OUTPUT: &'static str = "Data";

    /// Data block whose parameter starts as `value`
    pub fn new(value: Value) -> Self {
        Self { initial: value }
    }
}

impl Block for Data {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn definition(&self) -> BlockTypeDefinition {
        BlockTypeDefinition::new(Self::TYPE_NAME, "Outputs a fixed value", BlockCategory::Sources)
            .with_param(
                Self::PARAM,
                ParamDefinition::any("Value to output").with_default(self.initial.clone()),
            )
            .with_ports(PortConfig::new(&[], &[Self::OUTPUT]))
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        let value = ctx.parameter(Self::PARAM)?.clone();
        ctx.output(Self::OUTPUT, value)
    }
}

impl BlockType for Data {
    const TYPE_NAME: &'static str = "Data";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Blox;
    use serde_json::json;

    #[test]
    fn emits_current_parameter() {
        let mut blox = Blox::new();
        let data = blox.add(Data::new(json!(7)));
        let sink = blox.add(crate::blocks::PassThrough);
        blox.subscribe(sink, "In", data, Data::OUTPUT).unwrap();

        blox.set_parameter(data, Data::PARAM, json!("hello")).unwrap();
        blox.process_block(data).unwrap();
        assert_eq!(blox.node(sink).unwrap().buffered("In").unwrap(), &[json!("hello")]);
    }

    #[test]
    fn default_data_is_null() {
        let mut blox = Blox::new();
        let data = blox.add(Data::default());
        assert_eq!(blox.node(data).unwrap().parameter(Data::PARAM).unwrap(), &Value::Null);
        assert!(blox.node(data).unwrap().inputs().is_empty());
    }
}

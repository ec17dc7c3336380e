//! Per-block state kept by the graph: ports, parameters, input buffers and
//! wiring.

use std::collections::{BTreeMap, HashMap};

use blox_types::{BlockTypeDefinition, Meta, PortDirection, Value};

use crate::error::{BloxError, Result};
use crate::{BlockId, SubscriptionId};

/// State of a block inside a graph
///
/// Input buffers are stacks: the most recently pushed value is the first
/// one popped.
#[derive(Debug, Clone)]
pub struct BlockNode {
    id: BlockId,
    type_name: String,
    inputs: Vec<String>,
    outputs: Vec<String>,
    parameters: BTreeMap<String, Value>,
    values: HashMap<String, Vec<Value>>,
    /// Subscriptions feeding each input port
    subscriptions: HashMap<String, Vec<SubscriptionId>>,
    /// Subscriptions fed by each output port
    subscribers: HashMap<String, Vec<SubscriptionId>>,
    /// Opaque metadata, passed through persistence unchanged
    pub meta: Meta,
}

impl BlockNode {
    /// Build the state for a block from its definition
    ///
    /// Duplicate port names collapse to their first declaration.
    pub(crate) fn new(id: BlockId, definition: &BlockTypeDefinition) -> Self {
        Self {
            id,
            type_name: definition.name.clone(),
            inputs: unique(definition.ports.input_names()),
            outputs: unique(definition.ports.output_names()),
            parameters: definition.default_values(),
            values: HashMap::new(),
            subscriptions: HashMap::new(),
            subscribers: HashMap::new(),
            meta: Meta::new(),
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Declared input ports, in declaration order
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Declared output ports, in declaration order
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn has_input(&self, port: &str) -> bool {
        self.inputs.iter().any(|p| p == port)
    }

    pub fn has_output(&self, port: &str) -> bool {
        self.outputs.iter().any(|p| p == port)
    }

    pub(crate) fn check_input(&self, port: &str) -> Result<()> {
        if self.has_input(port) {
            Ok(())
        } else {
            Err(self.invalid_port(port, PortDirection::Input))
        }
    }

    pub(crate) fn check_output(&self, port: &str) -> Result<()> {
        if self.has_output(port) {
            Ok(())
        } else {
            Err(self.invalid_port(port, PortDirection::Output))
        }
    }

    fn invalid_port(&self, port: &str, direction: PortDirection) -> BloxError {
        BloxError::InvalidPort {
            block: self.id,
            port: port.to_string(),
            direction,
        }
    }

    /// Whether the input port has at least one buffered value
    pub fn has_value(&self, port: &str) -> Result<bool> {
        self.check_input(port)?;
        Ok(self.values.get(port).is_some_and(|v| !v.is_empty()))
    }

    /// Most recently pushed value of an input port, left in place
    pub fn peek_value(&self, port: &str) -> Result<Option<&Value>> {
        self.check_input(port)?;
        Ok(self.values.get(port).and_then(|v| v.last()))
    }

    /// Remove and return the most recently pushed value of an input port
    pub fn pop_value(&mut self, port: &str) -> Result<Option<Value>> {
        self.check_input(port)?;
        Ok(self.values.get_mut(port).and_then(|v| v.pop()))
    }

    /// Buffer a value on an input port
    pub fn push_value(&mut self, port: &str, value: Value) -> Result<()> {
        self.check_input(port)?;
        self.values.entry(port.to_string()).or_default().push(value);
        Ok(())
    }

    /// Values buffered on an input port, oldest first
    pub fn buffered(&self, port: &str) -> Result<&[Value]> {
        self.check_input(port)?;
        Ok(self.values.get(port).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Drop every buffered input value
    pub fn clear_values(&mut self) {
        self.values.clear();
    }

    pub fn parameter(&self, name: &str) -> Result<&Value> {
        self.parameters
            .get(name)
            .ok_or_else(|| self.invalid_parameter(name))
    }

    /// Set a declared parameter
    pub fn set_parameter(&mut self, name: &str, value: Value) -> Result<()> {
        match self.parameters.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(self.invalid_parameter(name)),
        }
    }

    fn invalid_parameter(&self, name: &str) -> BloxError {
        BloxError::InvalidParameter {
            block: self.id,
            parameter: name.to_string(),
        }
    }

    pub fn parameters(&self) -> &BTreeMap<String, Value> {
        &self.parameters
    }

    /// Subscriptions feeding an input port, in registration order
    pub fn subscriptions(&self, input: &str) -> &[SubscriptionId] {
        self.subscriptions
            .get(input)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Subscriptions fed by an output port, in registration order
    pub fn subscribers(&self, output: &str) -> &[SubscriptionId] {
        self.subscribers
            .get(output)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether anything feeds this block
    pub fn is_subscriber(&self) -> bool {
        self.subscriptions.values().any(|s| !s.is_empty())
    }

    /// Every subscription touching this block, on either side
    pub(crate) fn edges(&self) -> Vec<SubscriptionId> {
        let mut edges: Vec<SubscriptionId> = self
            .subscriptions
            .values()
            .chain(self.subscribers.values())
            .flatten()
            .copied()
            .collect();
        edges.sort();
        edges.dedup();
        edges
    }

    pub(crate) fn attach_subscription(&mut self, input: &str, id: SubscriptionId) {
        self.subscriptions
            .entry(input.to_string())
            .or_default()
            .push(id);
    }

    pub(crate) fn attach_subscriber(&mut self, output: &str, id: SubscriptionId) {
        self.subscribers
            .entry(output.to_string())
            .or_default()
            .push(id);
    }

    pub(crate) fn detach_subscription(&mut self, input: &str, id: SubscriptionId) {
        detach(&mut self.subscriptions, input, id);
    }

    pub(crate) fn detach_subscriber(&mut self, output: &str, id: SubscriptionId) {
        detach(&mut self.subscribers, output, id);
    }
}

fn detach(lists: &mut HashMap<String, Vec<SubscriptionId>>, port: &str, id: SubscriptionId) {
    if let Some(list) = lists.get_mut(port) {
        list.retain(|s| *s != id);
        if list.is_empty() {
            lists.remove(port);
        }
    }
}

fn unique<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use blox_types::{BlockCategory, ParamDefinition, PortConfig};
    use serde_json::json;

    fn node() -> BlockNode {
        let def = BlockTypeDefinition::new("Test", "", BlockCategory::General)
            .with_param("Gain", ParamDefinition::number("Gain", 1.0))
            .with_ports(PortConfig::new(&["In", "In", "Aux"], &["Out"]));
        BlockNode::new(BlockId(0), &def)
    }

    #[test]
    fn buffers_are_lifo() {
        let mut n = node();
        for v in [1, 2, 3] {
            n.push_value("In", json!(v)).unwrap();
        }
        assert_eq!(n.peek_value("In").unwrap(), Some(&json!(3)));
        assert_eq!(n.pop_value("In").unwrap(), Some(json!(3)));
        assert_eq!(n.pop_value("In").unwrap(), Some(json!(2)));
        assert_eq!(n.pop_value("In").unwrap(), Some(json!(1)));
        assert_eq!(n.pop_value("In").unwrap(), None);
        assert!(!n.has_value("In").unwrap());
    }

    #[test]
    fn undeclared_ports_are_rejected() {
        let mut n = node();
        assert!(matches!(
            n.has_value("Out"),
            Err(BloxError::InvalidPort { direction: PortDirection::Input, .. })
        ));
        assert!(n.push_value("Nope", json!(1)).is_err());
        assert!(n.peek_value("Nope").is_err());
        assert!(n.pop_value("Nope").is_err());
    }

    #[test]
    fn duplicate_port_names_collapse() {
        assert_eq!(node().inputs(), &["In".to_string(), "Aux".to_string()]);
    }

    #[test]
    fn only_declared_parameters_can_be_set() {
        let mut n = node();
        assert_eq!(n.parameter("Gain").unwrap(), &json!(1.0));
        n.set_parameter("Gain", json!(4)).unwrap();
        assert_eq!(n.parameter("Gain").unwrap(), &json!(4));
        assert!(matches!(
            n.set_parameter("Offset", json!(0)),
            Err(BloxError::InvalidParameter { .. })
        ));
        assert!(n.parameter("Offset").is_err());
    }

    #[test]
    fn clear_values_empties_every_port() {
        let mut n = node();
        n.push_value("In", json!(1)).unwrap();
        n.push_value("Aux", json!(2)).unwrap();
        n.clear_values();
        assert!(!n.has_value("In").unwrap());
        assert!(n.buffered("Aux").unwrap().is_empty());
    }
}

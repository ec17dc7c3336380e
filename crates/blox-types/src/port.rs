//! Port types for block inputs and outputs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DEFAULT_INPUT, DEFAULT_OUTPUT};

/// Direction of a port (input or output)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    Input,
    Output,
}

impl PortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
        }
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port definition in a block type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDefinition {
    /// Port name, unique among the ports of the same direction
    pub name: String,

    /// Direction
    pub direction: PortDirection,
}

impl PortDefinition {
    pub fn input(name: &str) -> Self {
        Self {
            name: name.to_string(),
            direction: PortDirection::Input,
        }
    }

    pub fn output(name: &str) -> Self {
        Self {
            name: name.to_string(),
            direction: PortDirection::Output,
        }
    }
}

/// Port configuration for a block type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortConfig {
    /// Input port definitions, in declaration order
    #[serde(default)]
    pub inputs: Vec<PortDefinition>,

    /// Output port definitions, in declaration order
    #[serde(default)]
    pub outputs: Vec<PortDefinition>,
}

impl PortConfig {
    /// Ports built from plain names
    pub fn new(inputs: &[&str], outputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|n| PortDefinition::input(n)).collect(),
            outputs: outputs.iter().map(|n| PortDefinition::output(n)).collect(),
        }
    }

    /// Input port names in declaration order
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(|p| p.name.as_str())
    }

    /// Output port names in declaration order
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|p| p.name.as_str())
    }

    /// Whether `name` is a declared port of the given direction
    pub fn has_port(&self, direction: PortDirection, name: &str) -> bool {
        let ports = match direction {
            PortDirection::Input => &self.inputs,
            PortDirection::Output => &self.outputs,
        };
        ports.iter().any(|p| p.name == name)
    }
}

impl Default for PortConfig {
    fn default() -> Self {
        Self::new(&[DEFAULT_INPUT], &[DEFAULT_OUTPUT])
    }
}

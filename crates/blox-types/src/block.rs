//! Block type definitions and metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{PortConfig, Value};

/// Category of a block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockCategory {
    Sources,
    Math,
    Logic,
    Output,
    General,
}

impl BlockCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockCategory::Sources => "Sources",
            BlockCategory::Math => "Math",
            BlockCategory::Logic => "Logic",
            BlockCategory::Output => "Output",
            BlockCategory::General => "General",
        }
    }
}

/// Parameter type for block configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Number,
    Any,
}

/// Parameter definition for a block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDefinition {
    /// Parameter type
    #[serde(rename = "type")]
    pub param_type: ParamType,

    /// Value the parameter holds until it is set
    #[serde(default)]
    pub default: Value,

    /// Description of the parameter
    #[serde(default)]
    pub description: String,
}

impl ParamDefinition {
    pub fn any(description: &str) -> Self {
        Self {
            param_type: ParamType::Any,
            default: Value::Null,
            description: description.to_string(),
        }
    }

    pub fn number(description: &str, default: f64) -> Self {
        Self {
            param_type: ParamType::Number,
            default: Value::from(default),
            description: description.to_string(),
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = default;
        self
    }
}

/// Definition of a block type: its ports and the only parameters it accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTypeDefinition {
    /// Block type name (e.g., "Compare")
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Category
    pub category: BlockCategory,

    /// Parameter definitions
    #[serde(default)]
    pub params: BTreeMap<String, ParamDefinition>,

    /// Port configuration
    #[serde(default)]
    pub ports: PortConfig,
}

impl BlockTypeDefinition {
    /// Create a block type with the default `In`/`Out` ports and no parameters
    pub fn new(name: &str, description: &str, category: BlockCategory) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            category,
            params: BTreeMap::new(),
            ports: PortConfig::default(),
        }
    }

    /// Add a parameter to this block type
    pub fn with_param(mut self, name: &str, param: ParamDefinition) -> Self {
        self.params.insert(name.to_string(), param);
        self
    }

    /// Set the port configuration
    pub fn with_ports(mut self, ports: PortConfig) -> Self {
        self.ports = ports;
        self
    }

    /// Parameter values before anything has been set
    pub fn default_values(&self) -> BTreeMap<String, Value> {
        self.params
            .iter()
            .map(|(name, def)| (name.clone(), def.default.clone()))
            .collect()
    }
}

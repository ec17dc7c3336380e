//! Complete file format for saving and loading graphs.

use serde::{Deserialize, Serialize};

use crate::{BlockRecord, Meta, RunSettings};

/// A saved graph: its blocks, metadata, variables and run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphFile {
    /// File format version
    pub version: String,

    /// Blocks in graph insertion order
    #[serde(default)]
    pub blocks: Vec<BlockRecord>,

    /// Graph metadata passed through unchanged
    #[serde(default)]
    pub meta: Meta,

    /// Graph variables at the time of saving
    #[serde(default)]
    pub variables: Meta,

    /// Run settings
    #[serde(default)]
    pub settings: RunSettings,
}

impl Default for GraphFile {
    fn default() -> Self {
        Self {
            version: Self::VERSION.to_string(),
            blocks: Vec::new(),
            meta: Meta::new(),
            variables: Meta::new(),
            settings: RunSettings::default(),
        }
    }
}

impl GraphFile {
    /// Current file format version
    pub const VERSION: &'static str = "1.0.0";

    /// Create an empty graph file
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a block record by its id
    pub fn block(&self, id: usize) -> Option<&BlockRecord> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Load from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

//! Saved form of a single block.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{SubscriberRecord, Value};

/// Opaque metadata attached to blocks and graphs (positions, labels, ...)
pub type Meta = serde_json::Map<String, Value>;

/// A block as stored in a graph file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Reference used by other records to point at this block
    pub id: usize,

    /// Registered block type (e.g., "Data", "Compare")
    #[serde(rename = "type")]
    pub block_type: String,

    /// Parameter values
    #[serde(default)]
    pub values: BTreeMap<String, Value>,

    /// Subscribers per output port, in registration order
    #[serde(default)]
    pub subscribers: BTreeMap<String, Vec<SubscriberRecord>>,

    /// Metadata passed through unchanged
    #[serde(default)]
    pub meta: Meta,
}

impl BlockRecord {
    /// Create a record with no values, subscribers or metadata
    pub fn new(id: usize, block_type: &str) -> Self {
        Self {
            id,
            block_type: block_type.to_string(),
            values: BTreeMap::new(),
            subscribers: BTreeMap::new(),
            meta: Meta::new(),
        }
    }

    /// Set a parameter value
    pub fn with_value(mut self, name: &str, value: Value) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    /// Add a subscriber to one of this block's outputs
    pub fn with_subscriber(mut self, output: &str, subscriber: SubscriberRecord) -> Self {
        self.subscribers
            .entry(output.to_string())
            .or_default()
            .push(subscriber);
        self
    }
}

//! Saving and loading graphs through [`GraphFile`].
//!
//! Loading builds in two phases: every block is created from the registry
//! first, then parameters, metadata and subscriptions are filled in, so a
//! subscription may point at a record that appears later in the file.

use std::collections::HashMap;
use std::path::Path;

use blox_types::{BlockRecord, GraphFile, SubscriberRecord};

use crate::error::{BloxError, Result};
use crate::registry::BlockRegistry;
use crate::{BlockId, Blox};

impl Blox {
    /// Capture blocks, wiring, metadata, variables and settings
    ///
    /// Record ids are positions in insertion order.
    pub fn to_file(&self) -> GraphFile {
        let index: HashMap<BlockId, usize> = self
            .block_ids()
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();

        let blocks = self
            .block_ids()
            .iter()
            .enumerate()
            .filter_map(|(i, id)| {
                let node = self.node(*id).ok()?;
                let mut record = BlockRecord::new(i, node.type_name());
                record.values = node.parameters().clone();
                record.meta = node.meta.clone();
                for output in node.outputs() {
                    let subscribers: Vec<SubscriberRecord> = node
                        .subscribers(output)
                        .iter()
                        .filter_map(|sub| self.subscription(*sub))
                        .filter_map(|edge| {
                            let block = *index.get(&edge.subscriber)?;
                            Some(SubscriberRecord::new(block, &edge.input))
                        })
                        .collect();
                    if !subscribers.is_empty() {
                        record.subscribers.insert(output.clone(), subscribers);
                    }
                }
                Some(record)
            })
            .collect();

        GraphFile {
            version: GraphFile::VERSION.to_string(),
            blocks,
            meta: self.meta.clone(),
            variables: self.variables().clone(),
            settings: self.settings().clone(),
        }
    }

    /// Rebuild a graph from a saved file, creating blocks from `registry`
    pub fn from_file(file: &GraphFile, registry: &BlockRegistry) -> Result<Self> {
        let mut blox = Blox::with_settings(file.settings.clone());

        let mut ids: HashMap<usize, BlockId> = HashMap::with_capacity(file.blocks.len());
        for record in &file.blocks {
            if ids.contains_key(&record.id) {
                return Err(BloxError::DuplicateBlockRef(record.id));
            }
            let block = registry.create(&record.block_type)?;
            ids.insert(record.id, blox.add_boxed(block));
        }

        for record in &file.blocks {
            let id = ids[&record.id];
            let node = blox.node_mut(id)?;
            for (name, value) in &record.values {
                node.set_parameter(name, value.clone())?;
            }
            node.meta = record.meta.clone();
        }

        for record in &file.blocks {
            let publisher = ids[&record.id];
            for (output, subscribers) in &record.subscribers {
                for subscriber in subscribers {
                    let target = *ids
                        .get(&subscriber.block)
                        .ok_or(BloxError::UnknownBlockRef(subscriber.block))?;
                    blox.publish(publisher, output, target, &subscriber.input)?;
                }
            }
        }

        blox.meta = file.meta.clone();
        *blox.variables_mut() = file.variables.clone();

        tracing::debug!(
            blocks = blox.len(),
            subscriptions = blox.subscription_count(),
            "graph loaded"
        );
        Ok(blox)
    }

    /// Read a JSON graph file
    pub fn load(path: impl AsRef<Path>, registry: &BlockRegistry) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let file = GraphFile::from_json(&text)?;
        Self::from_file(&file, registry)
    }

    /// Write this graph as a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = self.to_file().to_json()?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

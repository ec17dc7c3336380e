//! Registry of block types, used to create blocks by type tag
//!
//! Saved graphs name their blocks by type tag only, so loading one needs a
//! mapping from tag to constructor. Each built-in type registers itself
//! through [`register_builtins`](crate::blocks::register_builtins); user
//! types are added with [`BlockRegistry::register`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use blox_types::BlockTypeDefinition;

use crate::blocks::register_builtins;
use crate::error::{BloxError, Result};
use crate::{Block, BlockType};

/// Constructor for a registered block type
pub type BlockFactory = fn() -> Box<dyn Block>;

struct RegistryEntry {
    factory: BlockFactory,
    definition: BlockTypeDefinition,
}

/// Mapping from type tag to block constructor
///
/// # Example
///
/// ```ignore
/// let mut registry = BlockRegistry::with_builtins();
/// registry.register::<MyBlock>();
/// let block = registry.create("MyBlock")?;
/// ```
#[derive(Default)]
pub struct BlockRegistry {
    entries: BTreeMap<String, RegistryEntry>,
}

fn construct<T: BlockType>() -> Box<dyn Block> {
    Box::new(T::default())
}

impl BlockRegistry {
    /// Registry without any types
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in type
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }

    /// Process-wide registry of the built-in types, initialised on first use
    pub fn global() -> &'static BlockRegistry {
        static GLOBAL: OnceLock<BlockRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::with_builtins)
    }

    /// Register `T` under its type tag, replacing any previous entry
    pub fn register<T: BlockType>(&mut self) {
        self.register_factory(T::TYPE_NAME, construct::<T>);
    }

    /// Register a custom constructor under `name`
    pub fn register_factory(&mut self, name: &str, factory: BlockFactory) {
        let definition = factory().definition();
        self.entries
            .insert(name.to_string(), RegistryEntry { factory, definition });
    }

    /// Create a new block of the named type
    pub fn create(&self, name: &str) -> Result<Box<dyn Block>> {
        self.entries
            .get(name)
            .map(|entry| (entry.factory)())
            .ok_or_else(|| BloxError::UnknownBlockType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn definition(&self, name: &str) -> Option<&BlockTypeDefinition> {
        self.entries.get(name).map(|entry| &entry.definition)
    }

    /// Definitions of every registered type, sorted by tag
    pub fn definitions(&self) -> impl Iterator<Item = &BlockTypeDefinition> {
        self.entries.values().map(|entry| &entry.definition)
    }

    /// Registered tags, sorted
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{Add, Compare};

    #[test]
    fn builtins_are_registered() {
        let registry = BlockRegistry::global();
        let names: Vec<&str> = registry.type_names().collect();
        assert_eq!(names, vec!["Add", "Alert", "Block", "Compare", "Data"]);
    }

    #[test]
    fn create_by_tag() {
        let registry = BlockRegistry::with_builtins();
        let block = registry.create("Compare").unwrap();
        assert_eq!(block.type_name(), Compare::TYPE_NAME);
        assert_eq!(
            registry.definition("Add").unwrap().ports.input_names().collect::<Vec<_>>(),
            vec![Add::VALUES]
        );
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let registry = BlockRegistry::new();
        assert!(matches!(
            registry.create("Add"),
            Err(BloxError::UnknownBlockType(name)) if name == "Add"
        ));
    }
}

//! Loading and running graph files through the `blox` facade

use blox::prelude::*;
use blox::types::{BlockRecord, GraphFile, SubscriberRecord};
use serde_json::json;
use tempfile::tempdir;

/// Stores its input in the `captured` variable
#[derive(Default)]
struct Capture;

impl Block for Capture {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn definition(&self) -> BlockTypeDefinition {
        BlockTypeDefinition::new(Self::TYPE_NAME, "Stores its input", BlockCategory::Output)
    }

    fn process(&mut self, ctx: &mut ProcessContext<'_>) -> Result<()> {
        if let Some(value) = ctx.pop_value("In")? {
            ctx.set_variable("captured", value);
        }
        Ok(())
    }
}

impl BlockType for Capture {
    const TYPE_NAME: &'static str = "Capture";
}

/// Data(5) and a relayed Data(3) meet at Compare; the larger value is captured
fn comparison_file() -> GraphFile {
    let mut file = GraphFile::new();
    file.blocks = vec![
        BlockRecord::new(0, "Data")
            .with_value("Data", json!(5))
            .with_subscriber("Data", SubscriberRecord::new(3, "Values")),
        BlockRecord::new(1, "Data")
            .with_value("Data", json!(3))
            .with_subscriber("Data", SubscriberRecord::new(2, "In")),
        BlockRecord::new(2, "Block").with_subscriber("Out", SubscriberRecord::new(3, "Compare to")),
        BlockRecord::new(3, "Compare")
            .with_subscriber("Greater than", SubscriberRecord::new(4, "In")),
        BlockRecord::new(4, "Capture"),
    ];
    file
}

#[test]
fn test_file_with_custom_block_runs_to_quiescence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("compare.json");
    std::fs::write(&path, comparison_file().to_json().unwrap()).unwrap();

    let mut registry = BlockRegistry::with_builtins();
    registry.register::<Capture>();
    let mut graph = Blox::load(&path, &registry).unwrap();

    let report = graph.run().unwrap();

    assert_eq!(report.rounds, 4);
    assert_eq!(graph.variable("captured"), Some(&json!(5)));
}

#[test]
fn test_round_limit_from_file_settings() {
    let mut file = GraphFile::new();
    file.settings.max_rounds = Some(1);
    file.blocks = vec![
        BlockRecord::new(0, "Data")
            .with_value("Data", json!(1))
            .with_subscriber("Data", SubscriberRecord::new(1, "In")),
        BlockRecord::new(1, "Block"),
    ];

    let dir = tempdir().unwrap();
    let path = dir.path().join("limited.json");
    std::fs::write(&path, file.to_json().unwrap()).unwrap();

    let mut graph = Blox::load(&path, BlockRegistry::global()).unwrap();
    assert!(matches!(
        graph.run(),
        Err(BloxError::RunDidNotConverge { rounds: 1 })
    ));
}

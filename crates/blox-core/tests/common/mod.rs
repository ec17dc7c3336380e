//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use blox_core::{BlockId, BloxObserver, RunReport, Subscription, Value};

/// Everything a run reported to its observer
#[derive(Debug, Default)]
pub struct Log {
    pub rounds: Vec<Vec<BlockId>>,
    pub outputs: Vec<(BlockId, String, Value)>,
    pub inputs: Vec<(BlockId, String, Value)>,
    pub finished: Option<RunReport>,
}

impl Log {
    /// Values emitted by `block` on `port`, in emission order
    pub fn emitted(&self, block: BlockId, port: &str) -> Vec<Value> {
        self.outputs
            .iter()
            .filter(|(b, p, _)| *b == block && p == port)
            .map(|(_, _, v)| v.clone())
            .collect()
    }
}

/// Observer writing into a shared [`Log`]
#[derive(Clone, Default)]
pub struct Recorder(pub Rc<RefCell<Log>>);

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> std::cell::Ref<'_, Log> {
        self.0.borrow()
    }
}

impl BloxObserver for Recorder {
    fn round_started(&mut self, _round: usize, blocks: &[BlockId]) {
        self.0.borrow_mut().rounds.push(blocks.to_vec());
    }

    fn block_output(&mut self, block: BlockId, port: &str, value: &Value) {
        self.0
            .borrow_mut()
            .outputs
            .push((block, port.to_string(), value.clone()));
    }

    fn block_input(&mut self, block: BlockId, subscription: &Subscription, value: &Value) {
        self.0
            .borrow_mut()
            .inputs
            .push((block, subscription.input.clone(), value.clone()));
    }

    fn run_finished(&mut self, report: &RunReport) {
        self.0.borrow_mut().finished = Some(*report);
    }
}

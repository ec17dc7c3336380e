//! Observers of graph activity.
//!
//! Observers are registered on one graph instance and see every round start,
//! every emitted value and every delivery. They cannot change the run.

use blox_types::Value;

use crate::{BlockId, RunReport, Subscription};

/// Hooks called by a graph while it runs
///
/// Every method has an empty default, so an observer only implements the
/// events it cares about.
pub trait BloxObserver {
    /// A round is about to process `blocks`, in this order
    fn round_started(&mut self, _round: usize, _blocks: &[BlockId]) {}

    /// `block` emitted `value` on its `port`, before delivery to subscribers
    fn block_output(&mut self, _block: BlockId, _port: &str, _value: &Value) {}

    /// `block` received `value` through `subscription`
    fn block_input(&mut self, _block: BlockId, _subscription: &Subscription, _value: &Value) {}

    /// A run reached quiescence
    fn run_finished(&mut self, _report: &RunReport) {}
}

/// Observer that logs graph activity through `tracing`
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    trace_values: bool,
}

impl TracingObserver {
    /// Log events only
    pub fn new() -> Self {
        Self::default()
    }

    /// Log events and the values they carry
    pub fn with_values() -> Self {
        Self { trace_values: true }
    }
}

impl BloxObserver for TracingObserver {
    fn round_started(&mut self, round: usize, blocks: &[BlockId]) {
        tracing::debug!(round, blocks = blocks.len(), "round started");
    }

    fn block_output(&mut self, block: BlockId, port: &str, value: &Value) {
        if self.trace_values {
            tracing::trace!(%block, port, %value, "output");
        } else {
            tracing::trace!(%block, port, "output");
        }
    }

    fn block_input(&mut self, block: BlockId, subscription: &Subscription, value: &Value) {
        if self.trace_values {
            tracing::trace!(%block, edge = %subscription, %value, "input");
        } else {
            tracing::trace!(%block, edge = %subscription, "input");
        }
    }

    fn run_finished(&mut self, report: &RunReport) {
        tracing::debug!(
            rounds = report.rounds,
            processed = report.processed,
            "run finished"
        );
    }
}

//! The block graph and its round scheduler.

use std::collections::HashSet;
use std::fmt;

use blox_types::{Meta, RunSettings, Value};

use crate::context::ProcessContext;
use crate::error::{BloxError, Result};
use crate::observer::BloxObserver;
use crate::subscription::SubscriptionArena;
use crate::{Block, BlockId, BlockNode, Subscription, SubscriptionId};

/// Summary of a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Rounds executed
    pub rounds: usize,
    /// Block invocations over all rounds
    pub processed: usize,
}

struct BlockEntry {
    /// Taken out while the block is being processed
    behavior: Option<Box<dyn Block>>,
    node: BlockNode,
}

/// A graph of blocks wired by subscriptions
///
/// # Scheduling
///
/// `run` starts with every block that nothing feeds, in insertion order.
/// Each round processes the queued blocks once, in queue order. Any block
/// that receives a value during a round, or asks to wait, is queued for the
/// next round. The run ends when a round queues nothing.
///
/// # Example
///
/// ```ignore
/// let mut blox = Blox::new();
/// let seven = blox.add(Data::new(json!(7)));
/// let three = blox.add(Data::new(json!(3)));
/// let add = blox.add(Add::default());
/// blox.subscribe(add, "Values", seven, "Data")?;
/// blox.subscribe(add, "Values", three, "Data")?;
/// let report = blox.run()?;
/// assert_eq!(report.rounds, 2);
/// ```
pub struct Blox {
    blocks: Vec<Option<BlockEntry>>,
    order: Vec<BlockId>,
    subscriptions: SubscriptionArena,
    processing: Vec<BlockId>,
    receivers: Vec<BlockId>,
    variables: Meta,
    /// Opaque metadata, passed through persistence unchanged
    pub meta: Meta,
    settings: RunSettings,
    observers: Vec<Box<dyn BloxObserver>>,
}

impl fmt::Debug for Blox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blox")
            .field("blocks", &self.order)
            .field("subscriptions", &self.subscriptions.len())
            .field("processing", &self.processing)
            .field("receivers", &self.receivers)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Default for Blox {
    fn default() -> Self {
        Self::new()
    }
}

impl Blox {
    /// Create an empty graph with default settings
    pub fn new() -> Self {
        Self::with_settings(RunSettings::default())
    }

    pub fn with_settings(settings: RunSettings) -> Self {
        Self {
            blocks: Vec::new(),
            order: Vec::new(),
            subscriptions: SubscriptionArena::new(),
            processing: Vec::new(),
            receivers: Vec::new(),
            variables: Meta::new(),
            meta: Meta::new(),
            settings,
            observers: Vec::new(),
        }
    }

    /// Register an observer on this graph
    pub fn with_observer(mut self, observer: impl BloxObserver + 'static) -> Self {
        self.add_observer(observer);
        self
    }

    pub fn add_observer(&mut self, observer: impl BloxObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut RunSettings {
        &mut self.settings
    }

    // ------------------------------------------------------------------
    // Blocks
    // ------------------------------------------------------------------

    /// Add a block; its node is built from the block's definition
    pub fn add(&mut self, block: impl Block + 'static) -> BlockId {
        self.add_boxed(Box::new(block))
    }

    pub fn add_boxed(&mut self, block: Box<dyn Block>) -> BlockId {
        let id = BlockId(self.blocks.len());
        let node = BlockNode::new(id, &block.definition());
        self.blocks.push(Some(BlockEntry {
            behavior: Some(block),
            node,
        }));
        self.order.push(id);
        id
    }

    /// Remove a block, tearing down every subscription touching it
    pub fn remove(&mut self, id: BlockId) -> Result<Box<dyn Block>> {
        let edges = self.node(id)?.edges();
        for edge in edges {
            self.remove_subscription(edge);
        }
        let entry = self
            .blocks
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(BloxError::UnknownBlock(id))?;
        self.order.retain(|b| *b != id);
        self.processing.retain(|b| *b != id);
        self.receivers.retain(|b| *b != id);
        entry.behavior.ok_or(BloxError::UnknownBlock(id))
    }

    pub fn contains(&self, id: BlockId) -> bool {
        matches!(self.blocks.get(id.0), Some(Some(_)))
    }

    /// Blocks in insertion order
    pub fn block_ids(&self) -> &[BlockId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn node(&self, id: BlockId) -> Result<&BlockNode> {
        match self.blocks.get(id.0) {
            Some(Some(entry)) => Ok(&entry.node),
            _ => Err(BloxError::UnknownBlock(id)),
        }
    }

    pub fn node_mut(&mut self, id: BlockId) -> Result<&mut BlockNode> {
        match self.blocks.get_mut(id.0) {
            Some(Some(entry)) => Ok(&mut entry.node),
            _ => Err(BloxError::UnknownBlock(id)),
        }
    }

    /// Behaviour of a block, unless it is being processed right now
    pub fn block(&self, id: BlockId) -> Option<&dyn Block> {
        match self.blocks.get(id.0) {
            Some(Some(entry)) => entry.behavior.as_deref(),
            _ => None,
        }
    }

    pub fn set_parameter(&mut self, id: BlockId, name: &str, value: Value) -> Result<()> {
        self.node_mut(id)?.set_parameter(name, value)
    }

    pub fn push_value(&mut self, id: BlockId, port: &str, value: Value) -> Result<()> {
        self.node_mut(id)?.push_value(port, value)
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Feed `subscriber.input` from `publisher.output`
    ///
    /// Subscribing the same edge twice keeps the first subscription.
    pub fn subscribe(
        &mut self,
        subscriber: BlockId,
        input: &str,
        publisher: BlockId,
        output: &str,
    ) -> Result<SubscriptionId> {
        self.node(subscriber)?.check_input(input)?;
        self.node(publisher)?.check_output(output)?;

        let edge = Subscription::new(publisher, output, subscriber, input);
        let (id, added) = self.subscriptions.insert(edge);
        if added {
            self.node_mut(subscriber)?.attach_subscription(input, id);
            self.node_mut(publisher)?.attach_subscriber(output, id);
            tracing::trace!(%publisher, output, %subscriber, input, "subscribed");
        }
        Ok(id)
    }

    /// Publisher-side spelling of [`subscribe`](Self::subscribe)
    pub fn publish(
        &mut self,
        publisher: BlockId,
        output: &str,
        subscriber: BlockId,
        input: &str,
    ) -> Result<SubscriptionId> {
        self.subscribe(subscriber, input, publisher, output)
    }

    /// Remove the subscriptions feeding `block.input`, optionally only those
    /// from `publisher` (and its `output`). Returns how many were removed.
    pub fn unsubscribe(
        &mut self,
        block: BlockId,
        input: &str,
        publisher: Option<BlockId>,
        output: Option<&str>,
    ) -> Result<usize> {
        let node = self.node(block)?;
        node.check_input(input)?;
        let doomed: Vec<SubscriptionId> = node
            .subscriptions(input)
            .iter()
            .copied()
            .filter(|id| {
                self.subscriptions
                    .get(*id)
                    .is_some_and(|s| s.matches(publisher, output))
            })
            .collect();
        for id in &doomed {
            self.remove_subscription(*id);
        }
        Ok(doomed.len())
    }

    /// Remove one subscription from the arena and from both adjacency lists
    pub fn remove_subscription(&mut self, id: SubscriptionId) -> Option<Subscription> {
        let edge = self.subscriptions.remove(id)?;
        if let Ok(node) = self.node_mut(edge.publisher) {
            node.detach_subscriber(&edge.output, id);
        }
        if let Ok(node) = self.node_mut(edge.subscriber) {
            node.detach_subscription(&edge.input, id);
        }
        tracing::trace!(edge = %edge, "unsubscribed");
        Some(edge)
    }

    /// Whether `block` is fed by anything, optionally only by `publisher`
    /// (and its `output`)
    pub fn is_subscriber(
        &self,
        block: BlockId,
        publisher: Option<BlockId>,
        output: Option<&str>,
    ) -> Result<bool> {
        let node = self.node(block)?;
        Ok(node.inputs().iter().any(|input| {
            node.subscriptions(input).iter().any(|id| {
                self.subscriptions
                    .get(*id)
                    .is_some_and(|s| s.matches(publisher, output))
            })
        }))
    }

    pub fn subscription(&self, id: SubscriptionId) -> Option<&Subscription> {
        self.subscriptions.get(id)
    }

    /// Every subscription, in no particular order
    pub fn subscriptions(&self) -> impl Iterator<Item = (SubscriptionId, &Subscription)> {
        self.subscriptions.iter()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    // ------------------------------------------------------------------
    // Delivery
    // ------------------------------------------------------------------

    /// Emit `value` from `block.port` to every current subscriber, in
    /// registration order
    pub fn output(&mut self, block: BlockId, port: &str, value: Value) -> Result<()> {
        let node = self.node(block)?;
        node.check_output(port)?;
        let targets = node.subscribers(port).to_vec();

        for observer in self.observers.iter_mut() {
            observer.block_output(block, port, &value);
        }

        for id in targets {
            let subscriber = self
                .subscriptions
                .get(id)
                .ok_or(BloxError::UnknownSubscription(id))?
                .subscriber;
            self.input(subscriber, id, value.clone())?;
        }
        Ok(())
    }

    /// Deliver `value` to `block` through `subscription`
    ///
    /// The block is queued for the next round.
    pub fn input(
        &mut self,
        block: BlockId,
        subscription: SubscriptionId,
        value: Value,
    ) -> Result<()> {
        let edge = self
            .subscriptions
            .get(subscription)
            .ok_or(BloxError::UnknownSubscription(subscription))?;
        if edge.subscriber != block {
            return Err(BloxError::SubscriberMismatch {
                block,
                subscription,
                expected: edge.subscriber,
            });
        }
        self.node(block)?.check_input(&edge.input)?;

        for observer in self.observers.iter_mut() {
            observer.block_input(block, edge, &value);
        }

        let input = edge.input.clone();
        self.queue(block);
        self.node_mut(block)?.push_value(&input, value)
    }

    fn queue(&mut self, block: BlockId) {
        if !self.receivers.contains(&block) {
            self.receivers.push(block);
        }
    }

    // ------------------------------------------------------------------
    // Incoming analysis
    // ------------------------------------------------------------------

    /// Blocks processed in the current round, other than `target`, from
    /// which `target` is reachable through subscriptions
    pub fn incoming(&self, target: BlockId) -> Vec<BlockId> {
        self.processing
            .iter()
            .copied()
            .filter(|&from| from != target && self.reaches(from, target))
            .collect()
    }

    /// Depth-first search over subscriber edges, visiting each edge once
    fn reaches(&self, from: BlockId, target: BlockId) -> bool {
        let mut visited: HashSet<SubscriptionId> = HashSet::new();
        let mut stack = vec![from];

        while let Some(current) = stack.pop() {
            let Ok(node) = self.node(current) else {
                continue;
            };
            for output in node.outputs() {
                for &id in node.subscribers(output) {
                    if !visited.insert(id) {
                        continue;
                    }
                    let Some(edge) = self.subscriptions.get(id) else {
                        continue;
                    };
                    if edge.subscriber == target {
                        return true;
                    }
                    stack.push(edge.subscriber);
                }
            }
        }
        false
    }

    /// Blocks of the round in progress
    pub fn processing(&self) -> &[BlockId] {
        &self.processing
    }

    /// Blocks queued for the next round
    pub fn receivers(&self) -> &[BlockId] {
        &self.receivers
    }

    // ------------------------------------------------------------------
    // Variables
    // ------------------------------------------------------------------

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn set_variable(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    pub fn variables(&self) -> &Meta {
        &self.variables
    }

    pub(crate) fn variables_mut(&mut self) -> &mut Meta {
        &mut self.variables
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    /// Process blocks round by round until no block is queued
    ///
    /// Every run starts with empty input buffers. Any error aborts the run
    /// and drops whatever was still buffered; the graph stays usable.
    pub fn run(&mut self) -> Result<RunReport> {
        self.variables.clear();
        self.clear_buffers();
        self.receivers = self
            .order
            .iter()
            .copied()
            .filter(|id| self.node(*id).is_ok_and(|n| !n.is_subscriber()))
            .collect();

        let mut report = RunReport::default();
        let result = self.run_rounds(&mut report);
        self.processing.clear();

        match result {
            Ok(()) => {
                for observer in self.observers.iter_mut() {
                    observer.run_finished(&report);
                }
                Ok(report)
            }
            Err(err) => {
                self.receivers.clear();
                self.clear_buffers();
                tracing::warn!(
                    block = ?err.block(),
                    rounds = report.rounds,
                    error = %err,
                    "run aborted"
                );
                Err(err)
            }
        }
    }

    /// Drop the buffered input of every block
    fn clear_buffers(&mut self) {
        for entry in self.blocks.iter_mut().flatten() {
            entry.node.clear_values();
        }
    }

    fn run_rounds(&mut self, report: &mut RunReport) -> Result<()> {
        while !self.receivers.is_empty() {
            if let Some(max) = self.settings.max_rounds {
                if report.rounds >= max {
                    return Err(BloxError::RunDidNotConverge {
                        rounds: report.rounds,
                    });
                }
            }

            self.processing = std::mem::take(&mut self.receivers);
            report.rounds += 1;
            for observer in self.observers.iter_mut() {
                observer.round_started(report.rounds, &self.processing);
            }

            let round = self.processing.clone();
            for id in round {
                let waiting = self.invoke(id)?;
                report.processed += 1;
                if waiting {
                    self.queue(id);
                } else {
                    self.node_mut(id)?.clear_values();
                }
            }
        }
        Ok(())
    }

    /// Process a single block outside of a run
    ///
    /// Returns whether the block asked to wait; its buffers are cleared
    /// otherwise.
    pub fn process_block(&mut self, id: BlockId) -> Result<bool> {
        let waiting = self.invoke(id);
        self.receivers.clear();
        let waiting = waiting?;
        if !waiting {
            self.node_mut(id)?.clear_values();
        }
        Ok(waiting)
    }

    fn invoke(&mut self, id: BlockId) -> Result<bool> {
        let mut behavior = match self.blocks.get_mut(id.0) {
            Some(Some(entry)) => entry.behavior.take(),
            _ => None,
        }
        .ok_or(BloxError::UnknownBlock(id))?;

        let mut ctx = ProcessContext::new(self, id);
        let result = behavior.process(&mut ctx);
        let waiting = ctx.is_waiting();

        if let Some(Some(entry)) = self.blocks.get_mut(id.0) {
            entry.behavior = Some(behavior);
        }
        result.map(|()| waiting)
    }
}

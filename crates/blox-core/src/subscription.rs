//! Subscriptions: directed edges from a publisher's output port to a
//! subscriber's input port.
//!
//! Every subscription lives once in the graph's [`SubscriptionArena`]. Block
//! nodes only hold [`SubscriptionId`]s, so adding or removing an edge touches
//! both adjacency lists through the same key.

use std::collections::HashMap;
use std::fmt;

use crate::BlockId;

/// Stable identity of a subscription within one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// Edge binding `publisher.output` to `subscriber.input`
///
/// Two subscriptions are the same edge when all four fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub publisher: BlockId,
    pub output: String,
    pub subscriber: BlockId,
    pub input: String,
}

impl Subscription {
    pub fn new(publisher: BlockId, output: &str, subscriber: BlockId, input: &str) -> Self {
        Self {
            publisher,
            output: output.to_string(),
            subscriber,
            input: input.to_string(),
        }
    }

    /// Whether the edge comes from `publisher` (and its `output`), when given
    pub fn matches(&self, publisher: Option<BlockId>, output: Option<&str>) -> bool {
        publisher.map_or(true, |p| p == self.publisher)
            && output.map_or(true, |o| o == self.output)
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{}",
            self.publisher, self.output, self.subscriber, self.input
        )
    }
}

/// Owner of every subscription of a graph
#[derive(Debug, Default)]
pub(crate) struct SubscriptionArena {
    next_id: u64,
    entries: HashMap<SubscriptionId, Subscription>,
    by_edge: HashMap<Subscription, SubscriptionId>,
}

impl SubscriptionArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of an identical edge, if one is registered
    pub fn find(&self, edge: &Subscription) -> Option<SubscriptionId> {
        self.by_edge.get(edge).copied()
    }

    /// Register an edge; an identical edge keeps its existing id
    pub fn insert(&mut self, edge: Subscription) -> (SubscriptionId, bool) {
        if let Some(id) = self.find(&edge) {
            return (id, false);
        }
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.by_edge.insert(edge.clone(), id);
        self.entries.insert(id, edge);
        (id, true)
    }

    pub fn get(&self, id: SubscriptionId) -> Option<&Subscription> {
        self.entries.get(&id)
    }

    pub fn remove(&mut self, id: SubscriptionId) -> Option<Subscription> {
        let edge = self.entries.remove(&id)?;
        self.by_edge.remove(&edge);
        Some(edge)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubscriptionId, &Subscription)> {
        self.entries.iter().map(|(id, s)| (*id, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_edges_share_an_id() {
        let mut arena = SubscriptionArena::new();
        let edge = Subscription::new(BlockId(0), "Out", BlockId(1), "In");
        let (a, added) = arena.insert(edge.clone());
        assert!(added);
        let (b, added) = arena.insert(edge);
        assert!(!added);
        assert_eq!(a, b);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn removal_forgets_the_edge() {
        let mut arena = SubscriptionArena::new();
        let edge = Subscription::new(BlockId(0), "Out", BlockId(1), "In");
        let (id, _) = arena.insert(edge.clone());
        assert_eq!(arena.remove(id), Some(edge.clone()));
        assert_eq!(arena.find(&edge), None);
        assert_eq!(arena.remove(id), None);
        // ids are not reused
        let (again, _) = arena.insert(edge);
        assert_ne!(again, id);
    }

    #[test]
    fn filters() {
        let edge = Subscription::new(BlockId(0), "Out", BlockId(1), "In");
        assert!(edge.matches(None, None));
        assert!(edge.matches(Some(BlockId(0)), None));
        assert!(edge.matches(Some(BlockId(0)), Some("Out")));
        assert!(!edge.matches(Some(BlockId(2)), None));
        assert!(!edge.matches(None, Some("Other")));
    }
}

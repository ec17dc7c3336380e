//! Saved form of a subscription, as seen from the publishing block.

use serde::{Deserialize, Serialize};

/// One subscriber of a publisher's output port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberRecord {
    /// `id` of the subscribing block's record within the same file
    pub block: usize,

    /// Input port of the subscribing block
    pub input: String,
}

impl SubscriberRecord {
    pub fn new(block: usize, input: &str) -> Self {
        Self {
            block,
            input: input.to_string(),
        }
    }
}

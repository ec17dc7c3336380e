//! Run settings.

use serde::{Deserialize, Serialize};

/// Settings applied to every run of a graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Abort a run that is still scheduling blocks after this many rounds.
    /// `None` runs until no block is scheduled.
    pub max_rounds: Option<usize>,

    /// Include port values in trace logging
    pub trace_values: bool,
}

impl RunSettings {
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = Some(rounds);
        self
    }
}

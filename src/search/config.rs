use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Search tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Explore first placements on the rayon pool.
    pub parallel: bool,

    /// Give up and swap after this long. Only the background search honors it.
    pub timeout_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            timeout_ms: None,
        }
    }
}

impl SearchConfig {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

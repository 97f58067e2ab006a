//! Queue configuration.

use serde::{Deserialize, Serialize};

/// Construction parameters for a `FixedSizeQueue`.
///
/// Every field has a default, so a partial document deserializes fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Label used in error messages and logs.
    pub name: String,

    /// Most tasks that may wait in the buffer. Values below 1 become 1.
    pub capacity: usize,

    /// Most actions running at the same time.
    pub max_concurrency: usize,
}

impl QueueConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Capacity after the lower clamp.
    pub fn effective_capacity(&self) -> usize {
        self.capacity.max(1)
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            name: "fsq".to_string(),
            capacity: 1,
            max_concurrency: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: QueueConfig = serde_json::from_str(r#"{ "capacity": 8 }"#).unwrap();
        assert_eq!(config.name, "fsq");
        assert_eq!(config.capacity, 8);
        assert_eq!(config.max_concurrency, 1);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let config = QueueConfig::new("q").with_capacity(0).with_max_concurrency(3);
        assert_eq!(config.effective_capacity(), 1);
        assert_eq!(config.max_concurrency, 3);
    }
}

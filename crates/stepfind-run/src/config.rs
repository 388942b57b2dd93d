//! Run configuration.

use std::time::Duration;

use stepfind_paths::Strategy;

/// Default delay between two animated steps.
pub const DEFAULT_PACING: Duration = Duration::from_millis(20);

/// Configuration for creating a [`Session`](crate::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Pause after every step that did not reach the target. Purely visual.
    pub pacing: Duration,
    /// Strategy a new session starts with.
    pub strategy: Strategy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            pacing: DEFAULT_PACING,
            strategy: Strategy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = RunConfig::default();
        assert_eq!(c.pacing, Duration::from_millis(20));
        assert_eq!(c.strategy, Strategy::Greedy);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let c: RunConfig = serde_json::from_str(r#"{"strategy":"breadth"}"#).unwrap();
        assert_eq!(c.strategy, Strategy::Breadth);
        assert_eq!(c.pacing, DEFAULT_PACING);
    }
}

//! This module defines `MachineConfig`, the immutable configuration value that every
//! machine instance owns. Symbol conventions and size ceilings live here rather than
//! in globals so that independent machines with different conventions can coexist.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default maximum number of distinct states in a transition table.
pub const DEFAULT_MAX_STATES: usize = 1024;
/// Default maximum length of a state label, in characters.
pub const DEFAULT_MAX_STATE_LEN: usize = 32;
/// Default maximum initial tape length, in symbols.
pub const DEFAULT_MAX_TAPE_LEN: usize = 1 << 20;
/// Default maximum number of transition rules per rule set.
pub const DEFAULT_MAX_RULES: usize = 710_000;
/// Default step ceiling for a run, the safety bound against non-termination.
pub const DEFAULT_MAX_STEPS: usize = 1_000_000;
/// Default delay between auto-run batches, in milliseconds.
pub const DEFAULT_AUTORUN_DELAY_MS: u64 = 300;

/// Configuration for a single machine instance.
///
/// Covers the symbol conventions of the rule text format (direction symbols, blank
/// symbol, state labels, comment prefix) and the resource ceilings enforced by the
/// parser, table builder, tape, and run loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Symbol denoting a head move to the left.
    pub left: char,
    /// Symbol denoting a head move to the right.
    pub right: char,
    /// The blank symbol, never stored in the sparse tape.
    pub blank: char,
    /// Label of the state the machine starts in.
    pub initial_state: String,
    /// Label of the terminal state.
    pub halting_state: String,
    /// Prefix starting a comment that runs to end-of-line.
    pub comment_prefix: String,
    /// Maximum number of distinct state labels in a table.
    pub max_states: usize,
    /// Maximum length of a state label.
    pub max_state_len: usize,
    /// Maximum length of an initial tape string.
    pub max_tape_len: usize,
    /// Maximum number of transition rules.
    pub max_rules: usize,
    /// Maximum steps a run executes before stopping as a safety bound.
    pub max_steps: usize,
    /// Delay between auto-run batches, in milliseconds.
    pub autorun_delay_ms: u64,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            left: 'L',
            right: 'R',
            blank: '_',
            initial_state: "INIT".to_string(),
            halting_state: "HALT".to_string(),
            comment_prefix: "//".to_string(),
            max_states: DEFAULT_MAX_STATES,
            max_state_len: DEFAULT_MAX_STATE_LEN,
            max_tape_len: DEFAULT_MAX_TAPE_LEN,
            max_rules: DEFAULT_MAX_RULES,
            max_steps: DEFAULT_MAX_STEPS,
            autorun_delay_ms: DEFAULT_AUTORUN_DELAY_MS,
        }
    }
}

impl MachineConfig {
    /// Returns the auto-run pacing delay as a `Duration`.
    pub fn autorun_delay(&self) -> Duration {
        Duration::from_millis(self.autorun_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_conventions() {
        let config = MachineConfig::default();
        assert_eq!(config.left, 'L');
        assert_eq!(config.right, 'R');
        assert_eq!(config.blank, '_');
        assert_eq!(config.initial_state, "INIT");
        assert_eq!(config.halting_state, "HALT");
        assert_eq!(config.comment_prefix, "//");
    }

    #[test]
    fn test_default_ceilings() {
        let config = MachineConfig::default();
        assert_eq!(config.max_states, 1024);
        assert_eq!(config.max_state_len, 32);
        assert_eq!(config.max_tape_len, 1_048_576);
        assert_eq!(config.max_rules, 710_000);
        assert_eq!(config.max_steps, 1_000_000);
        assert_eq!(config.autorun_delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = MachineConfig {
            blank: '.',
            initial_state: "start".to_string(),
            ..MachineConfig::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let restored: MachineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}

//! This module defines the core data structures and types used throughout the engine:
//! transition rules, head directions, run outcomes, and the error taxonomy.

use crate::config::MachineConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents the two legal head displacements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Returns the signed head displacement for this direction.
    pub fn shift(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    /// Renders this direction using the symbols of the given configuration.
    pub fn symbol(self, config: &MachineConfig) -> char {
        match self {
            Direction::Left => config.left,
            Direction::Right => config.right,
        }
    }
}

/// A single validated transition rule, the 5-tuple
/// (current state, read symbol, next state, write symbol, direction).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRule {
    /// The state this rule fires in.
    pub state: String,
    /// The symbol read under the head for this rule to apply.
    pub read: char,
    /// The successor state.
    pub next_state: String,
    /// The replacement symbol written at the head position.
    pub write: char,
    /// The head displacement taken after writing.
    pub direction: Direction,
}

/// The outcome half of a transition: what to write, where to go, which way to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The successor state.
    pub next_state: String,
    /// The replacement symbol.
    pub write: char,
    /// The head displacement.
    pub direction: Direction,
}

/// How a run stopped.
///
/// Reaching the step ceiling is a deliberate, resumable stopping condition, not an
/// error; halting is unsolvable in general, so the ceiling is the only guarantee a
/// run terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The machine reached the halting state.
    Halted,
    /// The step ceiling was reached with the machine still running.
    StepLimitReached,
}

/// Summary of an execution, matching what the machine reports after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// The tape content between the outermost non-blank cells.
    pub tape: String,
    /// Total steps executed so far.
    pub steps: usize,
    /// Number of rules in the loaded rule set.
    pub rule_count: usize,
}

/// Errors surfaced by rule parsing, table construction, tape initialization,
/// execution, history seeking, and persistence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// A rule line did not yield exactly 5 tokens.
    #[error("malformed rule \"{line}\": expected 5 fields, got {count}")]
    MalformedRule { line: String, count: usize },
    /// The direction token was neither the left nor the right symbol.
    #[error("invalid direction {token:?} in \"{line}\"")]
    InvalidDirection { line: String, token: String },
    /// A symbol token was not exactly one character.
    #[error("invalid symbol {token:?} in \"{line}\": must be a single character")]
    InvalidSymbolLength { line: String, token: String },
    /// A state label exceeded the configured length bound.
    #[error("state label \"{state}\" is {len} characters, limit is {max}")]
    InvalidStateLength {
        state: String,
        len: usize,
        max: usize,
    },
    /// The rule text contained no valid rule lines.
    #[error("no valid transition rules found")]
    EmptyRuleSet,
    /// The rule count exceeded the configured ceiling.
    #[error("too many rules: {count}, maximum is {max}")]
    TooManyRules { count: usize, max: usize },
    /// Two rules shared the same (state, symbol) key.
    #[error("duplicate transition for state {state} and symbol {symbol}")]
    DuplicateTransition { state: String, symbol: char },
    /// The number of distinct states exceeded the configured ceiling.
    #[error("too many states: {count}, maximum is {max}")]
    TooManyStates { count: usize, max: usize },
    /// The configured initial state never appears as a rule's current state.
    #[error("initial state {state} not found in the transitions")]
    InitialStateMissing { state: String },
    /// No rule's successor state equals the configured halting state.
    #[error("halt state {state} not found in the transitions")]
    HaltingStateUnreachable { state: String },
    /// The input tape exceeded the configured length ceiling.
    #[error("input tape length is {len}, maximum is {max}")]
    TapeTooLong { len: usize, max: usize },
    /// The input tape contained a space character.
    #[error("input tape must not contain spaces")]
    InvalidTapeContent,
    /// No transition covers the current (state, symbol) configuration.
    #[error("no transition for symbol {symbol:?} in state {state} at position {position} after {steps} steps")]
    StuckMachine {
        state: String,
        symbol: char,
        position: i64,
        steps: usize,
    },
    /// A step was requested while the machine was already in the halting state.
    #[error("machine already halted")]
    AlreadyHalted,
    /// A history seek index was outside the recorded range.
    #[error("history index {index} out of range 0..{len}")]
    OutOfRange { index: usize, len: usize },
    /// A file could not be read.
    #[error("file error: {0}")]
    File(String),
    /// A saved machine snapshot could not be decoded.
    #[error("snapshot error: {0}")]
    Persist(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_shift() {
        assert_eq!(Direction::Left.shift(), -1);
        assert_eq!(Direction::Right.shift(), 1);
    }

    #[test]
    fn test_direction_symbol_follows_config() {
        let config = MachineConfig::default();
        assert_eq!(Direction::Left.symbol(&config), 'L');
        assert_eq!(Direction::Right.symbol(&config), 'R');

        let custom = MachineConfig {
            left: '<',
            right: '>',
            ..MachineConfig::default()
        };
        assert_eq!(Direction::Left.symbol(&custom), '<');
        assert_eq!(Direction::Right.symbol(&custom), '>');
    }

    #[test]
    fn test_direction_serialization() {
        let left_json = serde_json::to_string(&Direction::Left).unwrap();
        let right_json = serde_json::to_string(&Direction::Right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left: Direction = serde_json::from_str(&left_json).unwrap();
        let right: Direction = serde_json::from_str(&right_json).unwrap();
        assert_eq!(left, Direction::Left);
        assert_eq!(right, Direction::Right);
    }

    #[test]
    fn test_error_display_carries_context() {
        let error = MachineError::StuckMachine {
            state: "INIT".to_string(),
            symbol: 'b',
            position: 0,
            steps: 7,
        };

        let msg = error.to_string();
        assert!(msg.contains("INIT"));
        assert!(msg.contains('b'));
        assert!(msg.contains('7'));
    }

    #[test]
    fn test_malformed_rule_display() {
        let error = MachineError::MalformedRule {
            line: "INIT | HALT".to_string(),
            count: 3,
        };
        let msg = error.to_string();
        assert!(msg.contains("INIT | HALT"));
        assert!(msg.contains("got 3"));
    }
}

//! This module builds the transition lookup table from parsed rules and enforces the
//! global invariants of a rule set: no duplicate (state, symbol) keys, state count
//! within the ceiling, initial state present, halting state reachable as a target.

use crate::config::MachineConfig;
use crate::types::{Action, MachineError, TransitionRule};
use std::collections::HashMap;

/// A two-level lookup from state label to read symbol to transition outcome.
///
/// Built once per rule-text load and immutable thereafter. An incomplete table is
/// legal; a missing entry only matters if execution actually visits that
/// (state, symbol) configuration, where it surfaces as a stuck machine.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    entries: HashMap<String, HashMap<char, Action>>,
    rule_count: usize,
}

impl TransitionTable {
    /// Builds a table from an ordered rule sequence, validating global invariants.
    ///
    /// Each rule was already validated in isolation by the parser; this pass checks
    /// the properties that only the whole set determines.
    ///
    /// # Errors
    ///
    /// * `DuplicateTransition` if two rules share a (state, symbol) key, even when
    ///   their outcomes differ. Ambiguity is rejected, not resolved by first match.
    /// * `TooManyStates` if distinct state labels exceed the configured ceiling.
    /// * `InitialStateMissing` if no rule fires in the configured initial state.
    /// * `HaltingStateUnreachable` if no rule's successor is the halting state.
    ///   This is a syntactic check on rule targets, not a semantic reachability
    ///   analysis; it does not guarantee the machine halts.
    pub fn build(
        rules: &[TransitionRule],
        config: &MachineConfig,
    ) -> Result<Self, MachineError> {
        let mut entries: HashMap<String, HashMap<char, Action>> = HashMap::new();
        let mut targets_halt = false;

        for rule in rules {
            let state_entries = entries.entry(rule.state.clone()).or_default();
            if state_entries.contains_key(&rule.read) {
                return Err(MachineError::DuplicateTransition {
                    state: rule.state.clone(),
                    symbol: rule.read,
                });
            }

            state_entries.insert(
                rule.read,
                Action {
                    next_state: rule.next_state.clone(),
                    write: rule.write,
                    direction: rule.direction,
                },
            );

            if rule.next_state == config.halting_state {
                targets_halt = true;
            }
        }

        if entries.len() > config.max_states {
            return Err(MachineError::TooManyStates {
                count: entries.len(),
                max: config.max_states,
            });
        }

        if !entries.contains_key(&config.initial_state) {
            return Err(MachineError::InitialStateMissing {
                state: config.initial_state.clone(),
            });
        }

        if !targets_halt {
            return Err(MachineError::HaltingStateUnreachable {
                state: config.halting_state.clone(),
            });
        }

        Ok(Self {
            entries,
            rule_count: rules.len(),
        })
    }

    /// Looks up the transition for the given (state, symbol) pair.
    pub fn lookup(&self, state: &str, symbol: char) -> Option<&Action> {
        self.entries.get(state).and_then(|actions| actions.get(&symbol))
    }

    /// Returns the number of distinct source states in the table.
    pub fn state_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of rules the table was built from.
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }
}

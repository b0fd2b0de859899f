//! This module implements the save/restore contract: a serializable snapshot of a
//! whole machine (configuration, rule text, tapes, position, state, history) that
//! external collaborators persist and the engine can reconstruct a live machine
//! from. Also provides JSON and JSON-lines codecs over that structure.

use crate::history::{History, Snapshot};
use crate::machine::Machine;
use crate::tape::Tape;
use crate::types::{Direction, MachineError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::MachineConfig;

/// The persisted form of a machine.
///
/// The transition table is not stored; it is rebuilt from `rules_text` on restore.
/// Everything else is restored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMachine {
    /// Configuration the machine was created with.
    pub config: MachineConfig,
    /// Raw rule text the table was built from.
    pub rules_text: String,
    /// Input tape string of the last load.
    pub initial_tape: String,
    /// Current sparse tape cells.
    pub cells: HashMap<i64, char>,
    /// Current head position.
    pub head: i64,
    /// Current state label.
    pub state: String,
    /// Steps executed since the last load.
    pub step_count: usize,
    /// Whether the machine considered itself running.
    pub running: bool,
    /// Direction of the most recent move.
    pub last_move: Option<Direction>,
    /// Full execution history.
    pub history: Vec<Snapshot>,
}

impl Machine {
    /// Captures the full machine state for persistence.
    pub fn save(&self) -> SavedMachine {
        SavedMachine {
            config: self.config().clone(),
            rules_text: self.rules_text().to_string(),
            initial_tape: self.input_tape().to_string(),
            cells: self.tape().cells().clone(),
            head: self.head(),
            state: self.state().to_string(),
            step_count: self.step_count(),
            running: self.is_running(),
            last_move: self.last_move(),
            history: self.history().entries().to_vec(),
        }
    }

    /// Reconstructs a live machine from a saved snapshot.
    ///
    /// The table is rebuilt from the saved rule text under the saved
    /// configuration; tape, head, state, step counter, and history are restored
    /// verbatim.
    pub fn restore(saved: &SavedMachine) -> Result<Self, MachineError> {
        let mut machine = Machine::new(&saved.rules_text, saved.config.clone())?;
        machine.restore_parts(
            saved.initial_tape.clone(),
            Tape::from_cells(saved.cells.clone(), saved.config.blank),
            saved.head,
            saved.state.clone(),
            saved.step_count,
            saved.running,
            saved.last_move,
            History::from_entries(saved.history.clone()),
        );
        Ok(machine)
    }
}

/// Serializes a saved machine as pretty JSON.
pub fn to_json(saved: &SavedMachine) -> Result<String, MachineError> {
    serde_json::to_string_pretty(saved).map_err(|e| MachineError::Persist(e.to_string()))
}

/// Deserializes a saved machine from JSON.
pub fn from_json(json: &str) -> Result<SavedMachine, MachineError> {
    serde_json::from_str(json).map_err(|e| MachineError::Persist(e.to_string()))
}

/// Metadata line of the JSON-lines format: everything except the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Metadata {
    config: MachineConfig,
    rules_text: String,
    initial_tape: String,
    cells: HashMap<i64, char>,
    head: i64,
    state: String,
    step_count: usize,
    running: bool,
    last_move: Option<Direction>,
}

/// Serializes a saved machine as JSON lines: metadata on the first line, then one
/// history entry per line. Keeps arbitrarily long histories streamable.
pub fn to_json_lines(saved: &SavedMachine) -> Result<String, MachineError> {
    let metadata = Metadata {
        config: saved.config.clone(),
        rules_text: saved.rules_text.clone(),
        initial_tape: saved.initial_tape.clone(),
        cells: saved.cells.clone(),
        head: saved.head,
        state: saved.state.clone(),
        step_count: saved.step_count,
        running: saved.running,
        last_move: saved.last_move,
    };

    let mut lines = Vec::with_capacity(saved.history.len() + 1);
    lines.push(serde_json::to_string(&metadata).map_err(|e| MachineError::Persist(e.to_string()))?);
    for entry in &saved.history {
        lines.push(serde_json::to_string(entry).map_err(|e| MachineError::Persist(e.to_string()))?);
    }

    Ok(lines.join("\n"))
}

/// Deserializes a saved machine from JSON lines.
pub fn from_json_lines(text: &str) -> Result<SavedMachine, MachineError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let first = lines
        .next()
        .ok_or_else(|| MachineError::Persist("empty snapshot".to_string()))?;
    let metadata: Metadata =
        serde_json::from_str(first).map_err(|e| MachineError::Persist(format!("metadata: {e}")))?;

    let mut history = Vec::new();
    for (idx, line) in lines.enumerate() {
        let entry: Snapshot = serde_json::from_str(line)
            .map_err(|e| MachineError::Persist(format!("history entry {}: {e}", idx + 1)))?;
        history.push(entry);
    }

    Ok(SavedMachine {
        config: metadata.config,
        rules_text: metadata.rules_text,
        initial_tape: metadata.initial_tape,
        cells: metadata.cells,
        head: metadata.head,
        state: metadata.state,
        step_count: metadata.step_count,
        running: metadata.running,
        last_move: metadata.last_move,
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Machine;

    const SCANNER_RULES: &str = "INIT | FIND | R\nFIND | FIND | R\nFIND _ HALT | R";

    fn run_machine() -> Machine {
        let mut m = Machine::new(SCANNER_RULES, MachineConfig::default()).unwrap();
        m.load("|||").unwrap();
        m.step_many(2).unwrap();
        m
    }

    #[test]
    fn test_save_captures_live_state() {
        let m = run_machine();
        let saved = m.save();

        assert_eq!(saved.state, "FIND");
        assert_eq!(saved.step_count, 2);
        assert_eq!(saved.head, 2);
        assert_eq!(saved.initial_tape, "|||");
        assert_eq!(saved.history.len(), 3);
        assert_eq!(saved.rules_text, SCANNER_RULES);
    }

    #[test]
    fn test_restore_round_trip() {
        let original = run_machine();
        let restored = Machine::restore(&original.save()).unwrap();

        assert_eq!(restored.state(), original.state());
        assert_eq!(restored.head(), original.head());
        assert_eq!(restored.step_count(), original.step_count());
        assert_eq!(restored.tape(), original.tape());
        assert_eq!(restored.history(), original.history());
        assert_eq!(restored.is_running(), original.is_running());
    }

    #[test]
    fn test_restored_machine_keeps_executing() {
        let original = run_machine();
        let mut restored = Machine::restore(&original.save()).unwrap();

        // Continue to completion on the restored instance
        let outcome = restored.resume(1_000).unwrap();
        assert_eq!(outcome, crate::types::RunOutcome::Halted);
        assert_eq!(restored.summary().tape, "||||");
    }

    #[test]
    fn test_restored_machine_can_seek_saved_history() {
        let original = run_machine();
        let mut restored = Machine::restore(&original.save()).unwrap();

        restored.seek(0).unwrap();
        assert_eq!(restored.state(), "INIT");
        assert_eq!(restored.step_count(), 0);
        assert_eq!(restored.tape().trimmed(), "|||");
    }

    #[test]
    fn test_restore_rejects_corrupt_rules() {
        let mut saved = run_machine().save();
        saved.rules_text = "INIT a".to_string();
        assert!(matches!(
            Machine::restore(&saved),
            Err(MachineError::MalformedRule { .. })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let saved = run_machine().save();
        let json = to_json(&saved).unwrap();
        let decoded = from_json(&json).unwrap();
        assert_eq!(decoded, saved);
    }

    #[test]
    fn test_json_lines_round_trip() {
        let saved = run_machine().save();
        let text = to_json_lines(&saved).unwrap();

        // Metadata line plus one line per history entry
        assert_eq!(text.lines().count(), 1 + saved.history.len());

        let decoded = from_json_lines(&text).unwrap();
        assert_eq!(decoded, saved);
    }

    #[test]
    fn test_from_json_lines_rejects_empty_input() {
        assert!(matches!(
            from_json_lines(""),
            Err(MachineError::Persist(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            from_json("not json"),
            Err(MachineError::Persist(_))
        ));
    }
}

//! This module provides the sparse tape: integer-indexed symbol storage with
//! blank-default semantics. Only non-blank cells are stored, so the tape extends
//! infinitely in both directions at no cost.

use crate::config::MachineConfig;
use crate::types::MachineError;
use std::collections::HashMap;

/// A sparse single tape over signed integer positions.
///
/// Invariant: the blank symbol is never stored as a value. Writing blank removes
/// the entry; reading an absent position returns blank.
#[derive(Debug, Clone, PartialEq)]
pub struct Tape {
    cells: HashMap<i64, char>,
    blank: char,
}

impl Tape {
    /// Creates an empty tape using the given blank symbol.
    pub fn new(blank: char) -> Self {
        Self {
            cells: HashMap::new(),
            blank,
        }
    }

    /// Initializes a tape from an input string, one cell per non-blank character at
    /// positions `0..len`.
    ///
    /// # Errors
    ///
    /// * `TapeTooLong` if the input exceeds the configured length ceiling.
    /// * `InvalidTapeContent` if the input contains a space character, which is
    ///   reserved as the field separator in rule text.
    pub fn load(input: &str, config: &MachineConfig) -> Result<Self, MachineError> {
        if input.contains(' ') {
            return Err(MachineError::InvalidTapeContent);
        }

        let len = input.chars().count();
        if len > config.max_tape_len {
            return Err(MachineError::TapeTooLong {
                len,
                max: config.max_tape_len,
            });
        }

        let mut tape = Self::new(config.blank);
        for (idx, symbol) in input.chars().enumerate() {
            if symbol != config.blank {
                tape.cells.insert(idx as i64, symbol);
            }
        }

        Ok(tape)
    }

    /// Returns the symbol at the given position, or blank if absent.
    pub fn read(&self, position: i64) -> char {
        self.cells.get(&position).copied().unwrap_or(self.blank)
    }

    /// Writes a symbol at the given position, removing the entry when the symbol
    /// is blank.
    pub fn write(&mut self, position: i64, symbol: char) {
        if symbol == self.blank {
            self.cells.remove(&position);
        } else {
            self.cells.insert(position, symbol);
        }
    }

    /// Returns the minimal span covering all stored cells and the head position,
    /// each end padded by `window`. Display-oriented; not part of step semantics.
    pub fn boundaries(&self, head: i64, window: i64) -> (i64, i64) {
        let (mut min_pos, mut max_pos) = match self.span() {
            Some(span) => span,
            None => (head, head),
        };

        min_pos = min_pos.min(head) - window;
        max_pos = max_pos.max(head) + window;
        (min_pos, max_pos)
    }

    /// Renders the window around the stored cells and head as a contiguous string.
    pub fn render(&self, head: i64, window: i64) -> String {
        let (min_pos, max_pos) = self.boundaries(head, window);
        (min_pos..=max_pos).map(|pos| self.read(pos)).collect()
    }

    /// Returns the tape content between the outermost non-blank cells, used for
    /// summary reporting. Empty when no cells are stored.
    pub fn trimmed(&self) -> String {
        match self.span() {
            Some((min_pos, max_pos)) => (min_pos..=max_pos).map(|pos| self.read(pos)).collect(),
            None => String::new(),
        }
    }

    /// Returns the number of stored (non-blank) cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true when the tape stores no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the blank symbol of this tape.
    pub fn blank(&self) -> char {
        self.blank
    }

    /// Returns the stored cell map, for snapshotting.
    pub fn cells(&self) -> &HashMap<i64, char> {
        &self.cells
    }

    /// Reconstructs a tape from a stored cell map.
    pub fn from_cells(cells: HashMap<i64, char>, blank: char) -> Self {
        Self { cells, blank }
    }

    fn span(&self) -> Option<(i64, i64)> {
        let min_pos = self.cells.keys().min().copied()?;
        let max_pos = self.cells.keys().max().copied()?;
        Some((min_pos, max_pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(input: &str) -> Tape {
        Tape::load(input, &MachineConfig::default()).unwrap()
    }

    #[test]
    fn test_load_stores_only_non_blank() {
        let tape = load("a_b");
        assert_eq!(tape.len(), 2);
        assert_eq!(tape.read(0), 'a');
        assert_eq!(tape.read(1), '_');
        assert_eq!(tape.read(2), 'b');
    }

    #[test]
    fn test_read_absent_position_is_blank() {
        let tape = load("x");
        assert_eq!(tape.read(-5), '_');
        assert_eq!(tape.read(100), '_');
    }

    #[test]
    fn test_write_blank_removes_entry() {
        let mut tape = load("ab");
        tape.write(0, '_');
        assert_eq!(tape.read(0), '_');
        assert!(!tape.cells().contains_key(&0));
        assert_eq!(tape.len(), 1);
    }

    #[test]
    fn test_write_negative_positions() {
        let mut tape = Tape::new('_');
        tape.write(-3, 'x');
        assert_eq!(tape.read(-3), 'x');
        assert_eq!(tape.len(), 1);
    }

    #[test]
    fn test_load_rejects_spaces() {
        let result = Tape::load("a b", &MachineConfig::default());
        assert_eq!(result, Err(MachineError::InvalidTapeContent));
    }

    #[test]
    fn test_load_rejects_oversized_input() {
        let config = MachineConfig {
            max_tape_len: 3,
            ..MachineConfig::default()
        };
        let result = Tape::load("abcd", &config);
        assert_eq!(result, Err(MachineError::TapeTooLong { len: 4, max: 3 }));
    }

    #[test]
    fn test_boundaries_cover_cells_and_head() {
        let tape = load("abc");
        assert_eq!(tape.boundaries(0, 5), (-5, 7));
        // Head far outside the stored span widens the window
        assert_eq!(tape.boundaries(10, 5), (-5, 15));
    }

    #[test]
    fn test_boundaries_on_empty_tape() {
        let tape = Tape::new('_');
        assert_eq!(tape.boundaries(-3, 2), (-5, -1));
    }

    #[test]
    fn test_render_window() {
        let tape = load("ab");
        assert_eq!(tape.render(0, 2), "__ab__");
    }

    #[test]
    fn test_trimmed_spans_outermost_cells() {
        let mut tape = load("_a_b_");
        assert_eq!(tape.trimmed(), "a_b");

        tape.write(1, '_');
        tape.write(3, '_');
        assert_eq!(tape.trimmed(), "");
    }

    #[test]
    fn test_custom_blank_symbol() {
        let config = MachineConfig {
            blank: '.',
            ..MachineConfig::default()
        };
        let tape = Tape::load(".x.", &config).unwrap();
        assert_eq!(tape.len(), 1);
        assert_eq!(tape.read(0), '.');
        assert_eq!(tape.read(1), 'x');
    }
}

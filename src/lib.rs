//! This crate provides the execution engine for a single-tape Turing machine.
//! It includes modules for parsing transition rule text, building the transition
//! table, the sparse tape, the step/run algorithms with a rewindable execution
//! history, save/restore of full machine state, and a collection of embedded
//! example programs.

pub mod config;
pub mod history;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod persist;
pub mod programs;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `MachineConfig` struct from the config module.
pub use config::MachineConfig;
/// Re-exports the `History` and `Snapshot` types from the history module.
pub use history::{History, Snapshot};
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the execution engine types from the machine module.
pub use machine::{AutoRun, Directive, Machine, Tick};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the save/restore surface from the persist module.
pub use persist::{from_json, from_json_lines, to_json, to_json_lines, SavedMachine};
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `TransitionTable` struct from the table module.
pub use table::TransitionTable;
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the core value types from the types module.
pub use types::{Action, Direction, MachineError, RunOutcome, RunSummary, TransitionRule};

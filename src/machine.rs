//! This module defines the `Machine` struct, the execution engine built atop the
//! transition table and sparse tape. It implements the atomic step, the run modes
//! (run-to-completion, bounded multi-step, interactive directives, paced auto-run),
//! and seeking through the execution history.

use crate::config::MachineConfig;
use crate::history::{History, Snapshot};
use crate::parser::parse;
use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{Direction, MachineError, RunOutcome, RunSummary, TransitionRule};
use std::time::Duration;

/// Width of the padding window used when rendering the tape for display.
const DISPLAY_WINDOW: i64 = 10;

/// An external directive for interactive execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Execute a single step.
    Step,
    /// Execute up to the given number of steps.
    StepMany(usize),
    /// Terminate the interactive session.
    Quit,
}

/// A single-tape Turing machine instance.
///
/// Owns its configuration, transition table, tape, machine state, and history
/// exclusively; concurrent instances are fully independent. The table is built
/// once per rule-text load and immutable thereafter; tape and machine state are
/// reinitialized on every load or reset.
pub struct Machine {
    config: MachineConfig,
    rules_text: String,
    rules: Vec<TransitionRule>,
    table: TransitionTable,
    input_tape: String,
    tape: Tape,
    head: i64,
    state: String,
    step_count: usize,
    running: bool,
    last_move: Option<Direction>,
    history: History,
}

impl Machine {
    /// Parses the rule text, builds the transition table, and initializes the
    /// machine with an empty tape.
    ///
    /// # Errors
    ///
    /// Any parse error (§ rule format) or table-construction error; both are
    /// non-recoverable for this load, the caller must supply corrected text.
    pub fn new(rules_text: &str, config: MachineConfig) -> Result<Self, MachineError> {
        let rules = parse(rules_text, &config)?;
        let table = TransitionTable::build(&rules, &config)?;

        let mut machine = Self {
            tape: Tape::new(config.blank),
            head: 0,
            state: config.initial_state.clone(),
            step_count: 0,
            running: true,
            last_move: None,
            history: History::new(),
            input_tape: String::new(),
            rules_text: rules_text.to_string(),
            rules,
            table,
            config,
        };
        machine.seed_history();
        Ok(machine)
    }

    /// Initializes the tape from an input string and resets head, state, step
    /// counter, and history to the step-0 snapshot.
    pub fn load(&mut self, input_tape: &str) -> Result<(), MachineError> {
        self.tape = Tape::load(input_tape, &self.config)?;
        self.input_tape = input_tape.to_string();
        self.head = 0;
        self.state = self.config.initial_state.clone();
        self.step_count = 0;
        self.running = true;
        self.last_move = None;
        self.seed_history();
        Ok(())
    }

    /// Reinitializes from the last loaded input tape.
    pub fn reset(&mut self) -> Result<(), MachineError> {
        let input = self.input_tape.clone();
        self.load(&input)
    }

    /// Executes one atomic transition.
    ///
    /// Reads the symbol under the head, looks up the (state, symbol) pair, writes
    /// the replacement symbol, moves to the successor state, shifts the head, and
    /// records the post-step snapshot. All-or-nothing: a step in progress is never
    /// interrupted.
    ///
    /// # Errors
    ///
    /// * `AlreadyHalted` if the current state is the halting state.
    /// * `StuckMachine` if no transition covers the current configuration; fatal
    ///   for this run, never retried or skipped.
    pub fn step(&mut self) -> Result<(), MachineError> {
        if self.is_halted() {
            return Err(MachineError::AlreadyHalted);
        }

        let symbol = self.tape.read(self.head);
        let action = match self.table.lookup(&self.state, symbol) {
            Some(action) => action.clone(),
            None => {
                self.running = false;
                return Err(MachineError::StuckMachine {
                    state: self.state.clone(),
                    symbol,
                    position: self.head,
                    steps: self.step_count,
                });
            }
        };

        self.tape.write(self.head, action.write);
        self.state = action.next_state;
        self.head += action.direction.shift();
        self.step_count += 1;
        self.last_move = Some(action.direction);

        let snapshot = self.snapshot();
        self.history.record(snapshot, action.direction);

        Ok(())
    }

    /// Loads the input tape and runs to completion under the configured step
    /// ceiling, returning the run summary and how the run stopped.
    pub fn run(&mut self, input_tape: &str) -> Result<(RunSummary, RunOutcome), MachineError> {
        self.load(input_tape)?;
        let limit = self.config.max_steps;
        let outcome = self.resume(limit)?;
        Ok((self.summary(), outcome))
    }

    /// Runs until the halting state or until the step counter reaches the given
    /// ceiling.
    ///
    /// Reaching the ceiling is not an error: the machine stays runnable and the
    /// caller may resume with a higher ceiling.
    pub fn resume(&mut self, max_steps: usize) -> Result<RunOutcome, MachineError> {
        loop {
            if self.is_halted() {
                self.running = false;
                return Ok(RunOutcome::Halted);
            }
            if self.step_count >= max_steps {
                return Ok(RunOutcome::StepLimitReached);
            }
            self.step()?;
        }
    }

    /// Executes up to `n` steps, or fewer if the machine halts or the configured
    /// step ceiling is hit first, returning the run summary.
    pub fn step_many(&mut self, n: usize) -> Result<RunSummary, MachineError> {
        for _ in 0..n {
            if self.is_halted() {
                self.running = false;
                break;
            }
            if self.step_count >= self.config.max_steps {
                break;
            }
            self.step()?;
        }

        Ok(self.summary())
    }

    /// Executes one interactive directive.
    ///
    /// Stepping a machine already in the halting state is a no-op here rather than
    /// an error; the interactive loop checks the halting condition before each
    /// directive the way a caller-owned prompt would.
    pub fn drive(&mut self, directive: Directive) -> Result<RunSummary, MachineError> {
        match directive {
            Directive::Quit => {
                self.running = false;
                Ok(self.summary())
            }
            Directive::Step => self.drive_steps(1),
            Directive::StepMany(n) => self.drive_steps(n),
        }
    }

    fn drive_steps(&mut self, n: usize) -> Result<RunSummary, MachineError> {
        if self.is_halted() {
            self.running = false;
            return Ok(self.summary());
        }
        self.step_many(n)
    }

    /// Restores tape, head position, current state, and step counter from the
    /// history entry at `index`.
    ///
    /// Non-destructive and repeatable: the history itself is never mutated.
    pub fn seek(&mut self, index: usize) -> Result<(), MachineError> {
        let snapshot = self.history.get(index)?.clone();
        self.tape = Tape::from_cells(snapshot.cells, self.config.blank);
        self.head = snapshot.head;
        self.state = snapshot.state;
        self.step_count = snapshot.step;
        self.last_move = snapshot.move_taken;
        self.running = !self.is_halted();
        Ok(())
    }

    /// Returns the trimmed tape, steps executed, and total rule count.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            tape: self.tape.trimmed(),
            steps: self.step_count,
            rule_count: self.rules.len(),
        }
    }

    /// Renders the tape window around the head for display.
    pub fn render_tape(&self) -> String {
        self.tape.render(self.head, DISPLAY_WINDOW)
    }

    /// Returns the current state label.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the current head position.
    pub fn head(&self) -> i64 {
        self.head
    }

    /// Returns the number of steps executed since the last load or reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns whether the machine considers itself running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns whether the current state is the halting state.
    pub fn is_halted(&self) -> bool {
        self.state == self.config.halting_state
    }

    /// Returns the direction of the most recent move, for display.
    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// Returns the live tape.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the execution history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns this machine's configuration.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Returns the parsed rules in source order.
    pub fn rules(&self) -> &[TransitionRule] {
        &self.rules
    }

    /// Returns the raw rule text the table was built from.
    pub fn rules_text(&self) -> &str {
        &self.rules_text
    }

    /// Returns the input tape string of the last load.
    pub fn input_tape(&self) -> &str {
        &self.input_tape
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            cells: self.tape.cells().clone(),
            head: self.head,
            state: self.state.clone(),
            step: self.step_count,
            move_taken: self.last_move,
            next_move: None,
        }
    }

    pub(crate) fn restore_parts(
        &mut self,
        input_tape: String,
        tape: Tape,
        head: i64,
        state: String,
        step_count: usize,
        running: bool,
        last_move: Option<Direction>,
        history: History,
    ) {
        self.input_tape = input_tape;
        self.tape = tape;
        self.head = head;
        self.state = state;
        self.step_count = step_count;
        self.running = running;
        self.last_move = last_move;
        self.history = history;
    }

    fn seed_history(&mut self) {
        self.history.reset(Snapshot::initial(
            self.tape.cells().clone(),
            self.head,
            self.state.clone(),
        ));
    }
}

/// Outcome of a single auto-run tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The batch ran; schedule another tick after the delay.
    Continue,
    /// The machine halted; do not reschedule.
    Halted,
    /// The configured step ceiling was reached; do not reschedule.
    LimitReached,
}

/// Cooperative pacer for timer-paced auto-run.
///
/// Executes one bounded batch per `tick` and tells the caller whether to schedule
/// another tick after `delay`. The engine never suspends internally; pacing exists
/// so a consumer can render intermediate states. Cancellation between batches is
/// simply not calling `tick` again.
#[derive(Debug, Clone, Copy)]
pub struct AutoRun {
    batch: usize,
    delay: Duration,
}

impl AutoRun {
    /// Creates a pacer running `batch` steps per tick with the given delay.
    pub fn new(batch: usize, delay: Duration) -> Self {
        Self { batch, delay }
    }

    /// Creates a pacer with a one-step batch and the configured delay.
    pub fn from_config(config: &MachineConfig) -> Self {
        Self::new(1, config.autorun_delay())
    }

    /// Returns the delay the caller should wait between ticks.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Checks the halting condition, then executes one bounded batch.
    pub fn tick(&self, machine: &mut Machine) -> Result<Tick, MachineError> {
        if machine.is_halted() {
            machine.running = false;
            return Ok(Tick::Halted);
        }
        if machine.step_count() >= machine.config().max_steps {
            return Ok(Tick::LimitReached);
        }

        machine.step_many(self.batch)?;

        if machine.is_halted() {
            machine.running = false;
            return Ok(Tick::Halted);
        }
        if machine.step_count() >= machine.config().max_steps {
            return Ok(Tick::LimitReached);
        }
        Ok(Tick::Continue)
    }
}

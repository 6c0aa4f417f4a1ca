//! Line-by-line construction of a sparse [`Trace`].
//!
//! The builder understands the NuSMV / nuXmv trace layout:
//!
//! ```text
//! Trace Type: Counterexample
//!   -> State: 1.1 <-
//!     m1.x = 1
//!     flag = TRUE
//!   -> Input: 1.2 <-
//!     req = TRUE
//!   -> State: 1.2 <-
//!     m1.x = 2
//! ```
//!
//! Everything before the `Trace Type: Counterexample` line is ignored.
//! Each `-> Input` marker opens a new step for all modules; `-> State` markers
//! switch back to state assignments within the current step.

use log::{debug, warn};

use crate::assign::parse_assign;
use crate::trace::{Trace, GLOBAL, INPUT};

/// Line that precedes the actual trace.
pub const COUNTEREXAMPLE_MARKER: &str = "Trace Type: Counterexample";
/// Prefix of a line opening an input section (and a new step).
pub const INPUT_MARKER: &str = "-> Input";
/// Prefix of a line opening a state section.
pub const STATE_MARKER: &str = "-> State";

/// Which kind of section the builder is currently in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Section {
    State,
    Input,
}

/// Accumulates trace lines into a sparse [`Trace`].
#[derive(Debug)]
pub struct TraceBuilder {
    trace: Trace,
    section: Section,
    started: bool,
    line_no: usize,
    skipped: usize,
}

impl TraceBuilder {
    pub fn new() -> Self {
        Self {
            trace: Trace::new(),
            section: Section::State,
            started: false,
            line_no: 0,
            skipped: 0,
        }
    }

    /// Whether the counterexample marker has been seen.
    pub fn started(&self) -> bool {
        self.started
    }

    /// Current section.
    pub fn section(&self) -> Section {
        self.section
    }

    /// Number of lines skipped because they were not assignments.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Feeds one raw line of model checker output.
    ///
    /// Lines are discarded until the counterexample marker appears.
    pub fn push_line(&mut self, line: &str) {
        self.line_no += 1;
        if self.started {
            self.parse_line(line);
        } else if line.trim() == COUNTEREXAMPLE_MARKER {
            debug!("push_line: counterexample starts at line {}", self.line_no);
            self.started = true;
        }
    }

    /// Processes one line of the trace body.
    pub fn parse_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        if line.starts_with(INPUT_MARKER) {
            self.section = Section::Input;
            self.trace.new_step();
        } else if line.starts_with(STATE_MARKER) {
            self.section = Section::State;
        } else {
            let assign = match parse_assign(line) {
                Ok(assign) => assign,
                Err(e) => {
                    warn!("Error with assignment at line {}: {} ({})", self.line_no, line, e);
                    self.skipped += 1;
                    return;
                }
            };
            let (module, var) = match self.section {
                Section::Input => (INPUT, assign.key),
                Section::State => assign.qualified().unwrap_or((GLOBAL, assign.key)),
            };
            self.trace.assign(module, var, assign.value);
        }
    }

    /// Returns the sparse trace.
    ///
    /// Without the counterexample marker this is [`Trace::empty`].
    pub fn finish(self) -> Trace {
        if !self.started {
            debug!("finish: no counterexample marker in {} lines", self.line_no);
            return Trace::empty();
        }
        if self.skipped > 0 {
            debug!("finish: skipped {} lines", self.skipped);
        }
        self.trace
    }
}

impl Default for TraceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

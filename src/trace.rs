//! The counterexample trace model.
//!
//! A [`Trace`] maps module names to the sequence of their per-step variable maps.
//! Two modules always exist:
//!
//! - [`INPUT`]: values supplied as external stimuli at each step,
//! - [`GLOBAL`]: variables without a module prefix.
//!
//! Right after parsing, the trace is *sparse*: each step only holds the assignments
//! printed by the model checker for that step. Call [`Trace::complete`] to obtain the
//! *dense* form where every step carries every variable known so far.
//!
//! # Examples
//!
//! ```
//! use ceviz_rs::trace::Trace;
//!
//! let text = "\
//! Trace Type: Counterexample
//! -> State: 1.1 <-
//!   m1.x = 1
//! -> Input: 1.2 <-
//! -> State: 1.2 <-
//!   m1.y = 2
//! ";
//!
//! let mut trace: Trace = text.parse().unwrap();
//! trace.complete();
//!
//! assert_eq!(trace.num_steps(), 2);
//! assert_eq!(trace.value("m1", 1, "x"), Some("1"));
//! assert_eq!(trace.value("m1", 0, "y"), None);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::builder::TraceBuilder;

/// Name of the module holding input values.
pub const INPUT: &str = "input";
/// Name of the module holding unqualified variables.
pub const GLOBAL: &str = "global";

/// Variable assignments of one module at one step.
pub type Step = BTreeMap<String, String>;

/// Error type for loading traces.
#[derive(Debug)]
pub enum TraceError {
    /// File I/O error.
    Io(io::Error),
}

impl From<io::Error> for TraceError {
    fn from(e: io::Error) -> Self {
        TraceError::Io(e)
    }
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraceError::Io(e) => Some(e),
        }
    }
}

/// Per-module, per-step variable values of a counterexample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub(crate) modules: BTreeMap<String, Vec<Step>>,
    pub(crate) num_steps: usize,
    pub(crate) complete: bool,
}

impl Trace {
    /// Creates a trace with the reserved modules and a single empty step 0.
    pub fn new() -> Self {
        let mut modules = BTreeMap::new();
        modules.insert(INPUT.to_string(), vec![Step::new()]);
        modules.insert(GLOBAL.to_string(), vec![Step::new()]);
        Self {
            modules,
            num_steps: 1,
            complete: false,
        }
    }

    /// Creates a trace with the reserved modules and no steps at all.
    ///
    /// This is what a text without the `Trace Type: Counterexample` marker yields.
    pub fn empty() -> Self {
        let mut modules = BTreeMap::new();
        modules.insert(INPUT.to_string(), Vec::new());
        modules.insert(GLOBAL.to_string(), Vec::new());
        Self {
            modules,
            num_steps: 0,
            complete: true,
        }
    }

    /// Reads a trace from `path`.
    ///
    /// The returned trace is sparse.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TraceError> {
        let path = path.as_ref();
        debug!("load({})", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reads a trace line by line from `reader`.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, TraceError> {
        let mut builder = TraceBuilder::new();
        for line in reader.lines() {
            builder.push_line(&line?);
        }
        Ok(builder.finish())
    }

    /// Number of steps, i.e. the number of `-> Input` markers plus one.
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Whether [`Trace::complete`] has run.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// All module names, sorted.
    pub fn module_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.modules.keys().map(String::as_str)
    }

    /// Returns the step sequence of `module`, if known.
    pub fn module(&self, module: &str) -> Option<&[Step]> {
        self.modules.get(module).map(Vec::as_slice)
    }

    /// Returns the variable map of `module` at `step`.
    pub fn step(&self, module: &str, step: usize) -> Option<&Step> {
        self.modules.get(module)?.get(step)
    }

    /// Returns the value of `var` in `module` at `step`.
    ///
    /// `None` when any of the three is absent, which after completion means
    /// the variable is not yet defined at that step.
    pub fn value(&self, module: &str, step: usize, var: &str) -> Option<&str> {
        self.step(module, step)?.get(var).map(String::as_str)
    }

    /// All variables that ever occur in `module`, sorted.
    pub fn variables_in_module(&self, module: &str) -> BTreeSet<&str> {
        self.modules
            .get(module)
            .into_iter()
            .flatten()
            .flat_map(|step| step.keys().map(String::as_str))
            .collect()
    }

    /// Returns the step sequence of `module`, registering it first if unknown.
    ///
    /// A new module starts with a single empty step, the current one.
    /// The boolean is `true` when the module was created by this call.
    pub fn module_entry(&mut self, module: &str) -> (&mut Vec<Step>, bool) {
        let current = self.num_steps.saturating_sub(1);
        let mut created = false;
        let steps = self.modules.entry(module.to_string()).or_insert_with(|| {
            debug!("module_entry: new module '{}' at step {}", module, current);
            created = true;
            vec![Step::new()]
        });
        (steps, created)
    }

    /// Starts a new step: appends an empty map to every known module.
    pub fn new_step(&mut self) {
        for steps in self.modules.values_mut() {
            steps.push(Step::new());
        }
        self.num_steps += 1;
        self.complete = false;
        debug!("new_step: now {} steps", self.num_steps);
    }

    /// Stores `var = value` into the current step of `module`.
    pub fn assign(&mut self, module: &str, var: &str, value: &str) {
        let (steps, _) = self.module_entry(module);
        if steps.is_empty() {
            steps.push(Step::new());
        }
        if let Some(current) = steps.last_mut() {
            current.insert(var.to_string(), value.to_string());
        }
    }
}

impl Default for Trace {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Trace {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_new_has_reserved_modules() {
        let trace = Trace::new();
        assert_eq!(trace.module_names().collect::<Vec<_>>(), vec![GLOBAL, INPUT]);
        assert_eq!(trace.num_steps(), 1);
        assert_eq!(trace.module(INPUT).unwrap().len(), 1);
        assert_eq!(trace.module(GLOBAL).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_has_no_steps() {
        let trace = Trace::empty();
        assert_eq!(trace.num_steps(), 0);
        assert!(trace.module(INPUT).unwrap().is_empty());
        assert!(trace.module(GLOBAL).unwrap().is_empty());
    }

    #[test]
    fn test_module_entry_creates_once() {
        let mut trace = Trace::new();
        let (steps, created) = trace.module_entry("m1");
        assert!(created);
        assert_eq!(steps.len(), 1);

        let (_, created) = trace.module_entry("m1");
        assert!(!created);

        let (_, created) = trace.module_entry(GLOBAL);
        assert!(!created);
    }

    #[test]
    fn test_new_step_grows_all_modules() {
        let mut trace = Trace::new();
        trace.assign("m1", "x", "1");
        trace.new_step();
        trace.new_step();
        assert_eq!(trace.num_steps(), 3);
        for name in [INPUT, GLOBAL, "m1"] {
            assert_eq!(trace.module(name).unwrap().len(), 3);
        }
    }

    #[test]
    fn test_assign_writes_current_step() {
        let mut trace = Trace::new();
        trace.assign(GLOBAL, "flag", "TRUE");
        trace.new_step();
        trace.assign(GLOBAL, "flag", "FALSE");
        assert_eq!(trace.value(GLOBAL, 0, "flag"), Some("TRUE"));
        assert_eq!(trace.value(GLOBAL, 1, "flag"), Some("FALSE"));
    }

    #[test]
    fn test_lookups_fail_softly() {
        let trace = Trace::new();
        assert_eq!(trace.value("nope", 0, "x"), None);
        assert_eq!(trace.value(INPUT, 7, "x"), None);
        assert_eq!(trace.value(INPUT, 0, "x"), None);
        assert!(trace.step("nope", 0).is_none());
        assert!(trace.variables_in_module("nope").is_empty());
    }

    #[test]
    fn test_variables_in_module_is_union() {
        let mut trace = Trace::new();
        trace.assign("m", "b", "1");
        trace.new_step();
        trace.assign("m", "a", "2");
        trace.assign("m", "b", "3");
        assert_eq!(trace.variables_in_module("m").into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Trace::load("/nonexistent/trace.out").unwrap_err();
        assert!(matches!(err, TraceError::Io(_)));
        assert!(err.to_string().starts_with("I/O error: "));
    }
}

//! Presentation tags for trace cells.
//!
//! Every `(module, step, variable)` cell of a dense trace is tagged with three
//! classifications, joined by spaces:
//!
//! 1. [`Change`]: did the value change since the previous step?
//! 2. [`Comparison`]: does the value match the other comparison module?
//! 3. [`SubModule`]: the variable name split on the sub-module separator.
//!
//! Missing data never raises: a failed lookup counts as a change, or as a
//! one-sided difference.
//!
//! # Examples
//!
//! ```
//! use ceviz_rs::classify::Classifier;
//! use ceviz_rs::trace::Trace;
//!
//! let mut trace: Trace = "Trace Type: Counterexample\nm1.a$b = 1\nm2.a$b = 1\n".parse().unwrap();
//! trace.complete();
//!
//! let classifier = Classifier::default();
//! assert_eq!(classifier.classes(&trace, "m1", 0, "a$b"), "changed equals a b");
//! ```

use std::fmt;

use crate::trace::Trace;

/// Default name of the first comparison module.
pub const DEFAULT_MODULE1: &str = "m1";
/// Default name of the second comparison module.
pub const DEFAULT_MODULE2: &str = "m2";
/// Default separator of hierarchical variable names.
pub const DEFAULT_SUB_SEPARATOR: char = '$';

/// Temporal classification.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Change {
    Changed,
    NotChanged,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Changed => write!(f, "changed"),
            Change::NotChanged => write!(f, "not-changed"),
        }
    }
}

/// Cross-module classification.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Comparison {
    Equals,
    NotEquals,
    /// The cell is missing on at least one side.
    OneSided,
    /// The module is not one of the comparison modules.
    NoCompare,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Equals => write!(f, "equals"),
            Comparison::NotEquals => write!(f, "not-equals"),
            Comparison::OneSided => write!(f, "not-equals one-sided"),
            Comparison::NoCompare => write!(f, "no-compare"),
        }
    }
}

/// Decomposition of a variable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubModule<'a> {
    /// Segments of a name containing the separator.
    Path(Vec<&'a str>),
    /// A name without the separator.
    Flat(&'a str),
}

impl SubModule<'_> {
    /// Human-readable label: segments joined by a single space.
    pub fn label(&self) -> String {
        match self {
            SubModule::Path(segments) => segments.join(" "),
            SubModule::Flat(name) => name.to_string(),
        }
    }
}

impl fmt::Display for SubModule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubModule::Path(segments) => write!(f, "{}", segments.join(" ")),
            SubModule::Flat(name) => write!(f, "no-sub-module {}", name),
        }
    }
}

/// All three classifications of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    pub change: Change,
    pub comparison: Comparison,
    pub sub_module: SubModule<'a>,
}

impl fmt::Display for Classification<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.change, self.comparison, self.sub_module)
    }
}

/// Classifies trace cells against a pair of comparison modules.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Module of the current revision.
    pub module1: String,
    /// Module of the next revision.
    pub module2: String,
    /// Separator of hierarchical variable names.
    pub sub_separator: char,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            module1: DEFAULT_MODULE1.to_string(),
            module2: DEFAULT_MODULE2.to_string(),
            sub_separator: DEFAULT_SUB_SEPARATOR,
        }
    }
}

impl Classifier {
    pub fn new(module1: impl Into<String>, module2: impl Into<String>) -> Self {
        Self {
            module1: module1.into(),
            module2: module2.into(),
            ..Self::default()
        }
    }

    pub fn with_sub_separator(self, sub_separator: char) -> Self {
        Self { sub_separator, ..self }
    }

    /// Has `var` changed in `module` between `step - 1` and `step`?
    ///
    /// Step 0 is always a change, and so is a failed lookup.
    pub fn change(&self, trace: &Trace, module: &str, step: usize, var: &str) -> Change {
        if step == 0 {
            return Change::Changed;
        }
        match (trace.value(module, step - 1, var), trace.value(module, step, var)) {
            (Some(prev), Some(cur)) if prev == cur => Change::NotChanged,
            _ => Change::Changed,
        }
    }

    /// Compares `var` at `step` between the two comparison modules.
    pub fn compare(&self, trace: &Trace, module: &str, step: usize, var: &str) -> Comparison {
        let other = if module == self.module1 {
            &self.module2
        } else if module == self.module2 {
            &self.module1
        } else {
            return Comparison::NoCompare;
        };
        match (trace.value(module, step, var), trace.value(other, step, var)) {
            (Some(a), Some(b)) if a == b => Comparison::Equals,
            (Some(_), Some(_)) => Comparison::NotEquals,
            _ => Comparison::OneSided,
        }
    }

    /// Splits `var` on the sub-module separator.
    pub fn sub_module<'a>(&self, var: &'a str) -> SubModule<'a> {
        if var.contains(self.sub_separator) {
            SubModule::Path(var.split(self.sub_separator).collect())
        } else {
            SubModule::Flat(var)
        }
    }

    pub fn classify<'a>(&self, trace: &Trace, module: &str, step: usize, var: &'a str) -> Classification<'a> {
        Classification {
            change: self.change(trace, module, step, var),
            comparison: self.compare(trace, module, step, var),
            sub_module: self.sub_module(var),
        }
    }

    /// Space-separated tag string for one cell.
    pub fn classes(&self, trace: &Trace, module: &str, step: usize, var: &str) -> String {
        self.classify(trace, module, step, var).to_string()
    }
}

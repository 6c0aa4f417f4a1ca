//! Assignment lines of a counterexample trace.
//!
//! Every line of a trace that is not a section marker is expected to look like
//!
//! ```text
//! <key> = <value>
//! ```
//!
//! with the literal separator `" = "` (space, equals, space) occurring exactly once.
//! The key is either `module.variable` or a bare variable name; the value is kept verbatim.
//!
//! # Examples
//!
//! ```
//! use ceviz_rs::assign::parse_assign;
//!
//! let assign = parse_assign("    scenario8.Actuator_MagazinVacuumOn = TRUE").unwrap();
//! assert_eq!(assign.key, "scenario8.Actuator_MagazinVacuumOn");
//! assert_eq!(assign.value, "TRUE");
//! ```

use std::fmt;

/// The literal separator between key and value.
pub const SEPARATOR: &str = " = ";

/// A parsed `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<'a> {
    /// Trimmed left-hand side, possibly module-qualified.
    pub key: &'a str,
    /// Trimmed right-hand side, stored as-is.
    pub value: &'a str,
}

impl<'a> Assignment<'a> {
    /// Splits the key on the **first** `.` into `(module, variable)`.
    ///
    /// Returns `None` for unqualified keys.
    ///
    /// ```
    /// use ceviz_rs::assign::parse_assign;
    ///
    /// let assign = parse_assign("a.b.c = 1").unwrap();
    /// assert_eq!(assign.qualified(), Some(("a", "b.c")));
    /// ```
    pub fn qualified(&self) -> Option<(&'a str, &'a str)> {
        self.key.split_once('.')
    }
}

/// Reason why a line is not an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    /// The line does not contain `" = "`.
    MissingSeparator,
    /// The line contains `" = "` more than once.
    AmbiguousSeparator { count: usize },
}

impl fmt::Display for AssignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignError::MissingSeparator => write!(f, "missing '{}' separator", SEPARATOR),
            AssignError::AmbiguousSeparator { count } => {
                write!(f, "expected one '{}' separator, found {}", SEPARATOR, count)
            }
        }
    }
}

impl std::error::Error for AssignError {}

/// Parses an assignment line.
///
/// The line must split into exactly two parts on [`SEPARATOR`].
/// Both parts are trimmed.
pub fn parse_assign(line: &str) -> Result<Assignment<'_>, AssignError> {
    let mut parts = line.split(SEPARATOR);
    let key = parts.next().unwrap_or_default();
    let value = parts.next().ok_or(AssignError::MissingSeparator)?;
    let rest = parts.count();
    if rest > 0 {
        return Err(AssignError::AmbiguousSeparator { count: rest + 1 });
    }
    Ok(Assignment {
        key: key.trim(),
        value: value.trim(),
    })
}

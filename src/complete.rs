//! Carry-forward completion of sparse traces.
//!
//! The model checker only prints the variables that changed at each step.
//! Completion rewrites every module so that step `i` holds the value of every
//! variable known at step `i`:
//!
//! ```text
//! sparse:  {x: 1, y: 0}   {x: 2}          {}              {z: 5}
//! dense:   {x: 1, y: 0}   {x: 2, y: 0}    {x: 2, y: 0}    {x: 2, y: 0, z: 5}
//! ```
//!
//! Variables are never invented for steps before their first assignment.

use log::debug;

use crate::trace::{Step, Trace};

/// Turns a sparse step sequence into a dense one.
///
/// The first step is kept as-is; every further step is the previous dense step
/// overlaid with its own assignments.
pub fn carry_forward(steps: Vec<Step>) -> Vec<Step> {
    let mut dense: Vec<Step> = Vec::with_capacity(steps.len());
    for step in steps {
        let next = match dense.last() {
            Some(prev) => {
                let mut next = prev.clone();
                next.extend(step);
                next
            }
            None => step,
        };
        dense.push(next);
    }
    dense
}

/// Prepends empty steps so that `steps` has `len` entries.
///
/// A module that first appears at step `k` only owns the steps from `k` on.
pub fn align(steps: &mut Vec<Step>, len: usize) {
    let missing = len.saturating_sub(steps.len());
    if missing > 0 {
        let owned = std::mem::take(steps);
        steps.extend(std::iter::repeat_with(Step::new).take(missing));
        steps.extend(owned);
    }
}

impl Trace {
    /// Rewrites every module into its dense, carry-forward form.
    ///
    /// Afterwards all modules have exactly [`Trace::num_steps`] steps.
    /// Running it again has no effect.
    pub fn complete(&mut self) {
        let num_steps = self.num_steps;
        for (name, steps) in self.modules.iter_mut() {
            if steps.len() < num_steps {
                debug!("complete: module '{}' starts at step {}", name, num_steps - steps.len());
                align(steps, num_steps);
            }
            *steps = carry_forward(std::mem::take(steps));
        }
        self.complete = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn step(pairs: &[(&str, &str)]) -> Step {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_carry_forward() {
        let sparse = vec![
            step(&[("x", "1"), ("y", "0")]),
            step(&[("x", "2")]),
            step(&[]),
            step(&[("z", "5")]),
        ];
        let dense = carry_forward(sparse);
        assert_eq!(dense[0], step(&[("x", "1"), ("y", "0")]));
        assert_eq!(dense[1], step(&[("x", "2"), ("y", "0")]));
        assert_eq!(dense[2], step(&[("x", "2"), ("y", "0")]));
        assert_eq!(dense[3], step(&[("x", "2"), ("y", "0"), ("z", "5")]));
    }

    #[test]
    fn test_carry_forward_keeps_first_step() {
        let dense = carry_forward(vec![step(&[]), step(&[("a", "TRUE")])]);
        assert!(dense[0].is_empty());
        assert_eq!(dense[1], step(&[("a", "TRUE")]));
    }

    #[test]
    fn test_carry_forward_empty() {
        assert!(carry_forward(Vec::new()).is_empty());
    }

    #[test]
    fn test_align() {
        let mut steps = vec![step(&[("x", "1")])];
        align(&mut steps, 3);
        assert_eq!(steps, vec![step(&[]), step(&[]), step(&[("x", "1")])]);

        align(&mut steps, 2);
        assert_eq!(steps.len(), 3);
    }

    #[test]
    fn test_complete_aligns_late_module() {
        let mut trace = Trace::new();
        trace.new_step();
        trace.assign("late", "x", "1");
        trace.new_step();
        trace.complete();

        assert!(trace.is_complete());
        assert_eq!(trace.module("late").unwrap().len(), 3);
        assert_eq!(trace.value("late", 0, "x"), None);
        assert_eq!(trace.value("late", 1, "x"), Some("1"));
        assert_eq!(trace.value("late", 2, "x"), Some("1"));
    }

    #[test]
    fn test_complete_is_idempotent() {
        let mut trace = Trace::new();
        trace.assign("m", "x", "1");
        trace.new_step();
        trace.assign("m", "y", "2");
        trace.complete();
        let once = trace.clone();
        trace.complete();
        assert_eq!(trace, once);
    }
}

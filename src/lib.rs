//! # ceviz-rs: counterexample visualization
//!
//! **`ceviz-rs`** turns the counterexample traces printed by the NuSMV and nuXmv model checkers
//! into browsable HTML reports showing how each module's variables evolve step by step.
//!
//! ## Trace Format
//!
//! ```text
//! -- specification AG !error is false
//! -- as demonstrated by the following execution sequence
//! Trace Description: CTL Counterexample
//! Trace Type: Counterexample
//!   -> State: 1.1 <-
//!     m1.x = 1
//!     global_flag = TRUE
//!   -> Input: 1.2 <-
//!     req = TRUE
//!   -> State: 1.2 <-
//!     m1.x = 2
//! ```
//!
//! - Everything before `Trace Type: Counterexample` is ignored.
//! - Every `-> Input` marker starts a new step.
//! - Assignments are `key = value`; `module.var` keys go to `module`, bare keys to `global`,
//!   and everything inside an input section goes to `input`.
//! - The model checker only prints changed variables, so the parsed trace is *sparse*.
//!
//! ## Basic Usage
//!
//! ```rust
//! use ceviz_rs::classify::Classifier;
//! use ceviz_rs::trace::Trace;
//!
//! let text = "\
//! Trace Type: Counterexample
//! -> State: 1.1 <-
//! m1.x = 1
//! global_flag = TRUE
//! -> Input: 1.2 <-
//! -> State: 1.2 <-
//! m1.x = 2
//! ";
//!
//! // 1. Parse the sparse trace
//! let mut trace: Trace = text.parse().unwrap();
//!
//! // 2. Fill in carried-forward values
//! trace.complete();
//! assert_eq!(trace.value("global", 1, "global_flag"), Some("TRUE"));
//!
//! // 3. Render
//! let html = trace.to_html(&Classifier::default()).unwrap();
//! assert!(html.contains("Step 2"));
//! ```
//!
//! ## Core Components
//!
//! - **[`trace`]**: The [`Trace`][crate::trace::Trace] model and its queries.
//! - **[`builder`]**: Line-by-line parsing into a sparse trace.
//! - **[`complete`]**: Carry-forward completion into a dense trace.
//! - **[`classify`]**: Change and cross-module comparison tags.
//! - **[`html`]**: The HTML report.

pub mod assign;
pub mod builder;
pub mod classify;
pub mod complete;
pub mod html;
pub mod trace;

//! Error-first asynchronous control flow.
//!
//! The [`engine`] module holds the `serial`, `parallel` and `map`
//! combinators; the rest of the crate drives them from plan files and the
//! `taskflow` command line.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod plan;
pub mod utils;

// Re-export main types for easier access
pub use cli::App;
pub use config::Config;
pub use engine::{map, parallel, serial, Done, Outcome, ParallelTask, SerialTask, Task};
pub use error::{FlowError, FlowResult};
pub use plan::{Plan, PlanMode, PlanReport, PlanRunner};

//! Server Command Wrappers
//!
//! Frontend bindings to the task board's HTTP endpoints, organized by domain.

mod task;

pub use task::*;

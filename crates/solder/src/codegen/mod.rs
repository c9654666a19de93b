//! C++ code generation
//!
//! This module provides the generators that turn parsed signatures into
//! NAN wrapper code:
//! - Marshalling strategy selection and emission (marshal)
//! - Per-function wrapper generation (function)
//! - Failure tracking across a run (tracker)
//! - Whole-artifact blob rendering (artifacts)

pub mod artifacts;
pub mod function;
pub mod marshal;
pub mod tracker;

pub use artifacts::{HeaderGenerator, SourceGenerator};
pub use function::{bind_function, todo_marker, FunctionBinding, Outcome};
pub use marshal::{ArgStrategy, ReturnStrategy};
pub use tracker::{FailureTracker, FnState};

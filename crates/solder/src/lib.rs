//! Solder: NAN addon binding generator
//!
//! This crate turns a JSON API description of C functions into the C++
//! marshalling code of a Node.js addon. For every declared function it
//! emits a `NAN_METHOD` wrapper that extracts the arguments from V8
//! values, calls the native function and converts the result back, plus
//! the matching export registration and header prototype.
//!
//! Functions whose types cannot be marshalled do not abort the run:
//! they degrade to `//TODO: fix <name>` placeholders in every artifact
//! position and a diagnostic records why. Only structural problems
//! (unreadable input, invalid JSON, duplicate names, a skeleton missing
//! its placeholder) are fatal.
//!
//! # Architecture
//!
//! - `ir`: type expressions, function signatures and the parsed document
//! - `codegen`: marshalling strategies, wrapper generation, failure
//!   tracking and artifact blobs
//! - `template`: output skeletons with a single placeholder each
//! - `assembler`: end-to-end pipeline from description to files
//! - `diagnostics`: fatal errors and per-function diagnostics
//!
//! # Usage
//!
//! ```rust,ignore
//! use solder::Assembler;
//!
//! let report = Assembler::new()
//!     .input("gl.json")
//!     .run()?;
//! for diagnostic in &report.diagnostics {
//!     eprintln!("{}", diagnostic.format());
//! }
//! ```

pub mod assembler;
pub mod codegen;
pub mod diagnostics;
pub mod ir;
pub mod template;

// Re-export commonly used types
pub use assembler::{
    generate, Assembler, GeneratedArtifacts, Report, DEFAULT_HEADER_OUT, DEFAULT_HEADER_TEMPLATE,
    DEFAULT_INPUT, DEFAULT_SOURCE_OUT, DEFAULT_SOURCE_TEMPLATE,
};
pub use codegen::{
    bind_function, todo_marker, ArgStrategy, FailureTracker, FnState, FunctionBinding,
    HeaderGenerator, Outcome, ReturnStrategy, SourceGenerator,
};
pub use diagnostics::{Diagnostic, Severity, SolderError, SolderResult};
pub use ir::{ApiDocument, Arg, CanonicalBase, CanonicalType, FunctionSig, Primitive, TypeDesc};
pub use template::{Skeleton, BINDINGS_TOKEN, PROTOTYPES_TOKEN};

//! Intermediate Representation (IR) for API descriptions
//!
//! This module provides the type expressions, function signatures and
//! document structure parsed out of the JSON input.

pub mod types;
pub mod symbol;
pub mod document;

pub use types::*;
pub use symbol::*;
pub use document::*;

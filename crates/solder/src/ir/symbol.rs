//! Function signatures from the API description
//!
//! This module provides the metadata structures for the native functions
//! a description declares. Each signature carries the declared name, the
//! ordered argument list and the result type expression.

use crate::ir::{Primitive, TypeDesc};
use serde::Deserialize;

/// A single named argument
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Arg {
    /// Argument name, used verbatim as the local variable name
    pub name: String,
    /// Declared type expression
    #[serde(rename = "type")]
    pub ty: TypeDesc,
}

impl Arg {
    /// Create a new argument
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Signature of one native function to bind
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FunctionSig {
    /// Native function name, also the exported property name
    pub name: String,
    /// Ordered argument list
    pub args: Vec<Arg>,
    /// Result type expression
    pub result: TypeDesc,
}

impl FunctionSig {
    /// Create a signature with no arguments returning void
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            result: TypeDesc::Primitive(Primitive::Void),
        }
    }

    /// Append an argument
    pub fn arg(mut self, name: impl Into<String>, ty: TypeDesc) -> Self {
        self.args.push(Arg::new(name, ty));
        self
    }

    /// Set the result type
    pub fn returns(mut self, ty: TypeDesc) -> Self {
        self.result = ty;
        self
    }

    /// Name of the generated wrapper function
    pub fn binding_name(&self) -> String {
        format!("{}_binding", self.name)
    }

    /// Argument names in declaration order
    pub fn arg_names(&self) -> Vec<&str> {
        self.args.iter().map(|a| a.name.as_str()).collect()
    }
}

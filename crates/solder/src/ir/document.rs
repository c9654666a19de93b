//! API description documents
//!
//! The top-level input to the generator: a JSON document listing every
//! function to bind. Parsing is strict. A structural problem anywhere in
//! the document is fatal, only *type-level* problems degrade per
//! function later in the pipeline.

use crate::diagnostics::{SolderError, SolderResult};
use crate::ir::FunctionSig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A parsed API description
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiDocument {
    /// Functions in declaration order
    pub functions: Vec<FunctionSig>,
}

impl ApiDocument {
    /// Parse a description from JSON text and validate it
    pub fn from_json(text: &str) -> SolderResult<Self> {
        let document: ApiDocument = serde_json::from_str(text)?;
        document.validate()?;
        Ok(document)
    }

    /// Load a description from a file
    pub fn load(path: impl AsRef<Path>) -> SolderResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SolderError::FileNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validate the document structure
    pub fn validate(&self) -> SolderResult<()> {
        let mut seen = std::collections::HashSet::new();
        for func in &self.functions {
            if func.name.is_empty() {
                return Err(SolderError::document("function name cannot be empty"));
            }
            if !seen.insert(&func.name) {
                return Err(SolderError::document(format!(
                    "duplicate function name: {}",
                    func.name
                )));
            }
        }
        Ok(())
    }
}

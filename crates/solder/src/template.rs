//! Output skeletons
//!
//! The generated code is spliced into fixed skeleton files supplied next
//! to the description. Each skeleton carries exactly one placeholder
//! token; everything around the token (includes, module registration,
//! include guards) passes through untouched.

use crate::diagnostics::{SolderError, SolderResult};
use std::fs;
use std::path::Path;

/// Placeholder the source skeleton must contain
pub const BINDINGS_TOKEN: &str = "${bindings}";

/// Placeholder the header skeleton must contain
pub const PROTOTYPES_TOKEN: &str = "${prototypes}";

/// A loaded skeleton file
#[derive(Debug, Clone)]
pub struct Skeleton {
    text: String,
}

impl Skeleton {
    /// Create a skeleton from text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Load a skeleton from a file
    pub fn load(path: impl AsRef<Path>) -> SolderResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SolderError::FileNotFound(path.to_path_buf()));
        }
        Ok(Self::new(fs::read_to_string(path)?))
    }

    /// Raw skeleton text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the first occurrence of `token` with `replacement`.
    ///
    /// A skeleton without its token would silently discard the entire
    /// generated blob, so that case is an error rather than a no-op.
    pub fn fill(&self, token: &str, replacement: &str) -> SolderResult<String> {
        if !self.text.contains(token) {
            return Err(SolderError::template(format!(
                "placeholder {} not found in skeleton",
                token
            )));
        }
        Ok(self.text.replacen(token, replacement, 1))
    }
}

//! Per-function failure tracking
//!
//! Generation never aborts because one signature is unmarshallable. The
//! tracker records which functions failed so every artifact renders the
//! same placeholder for them, and keeps the diagnostics that explain
//! each failure.
//!
//! A function moves through a small state machine:
//!
//! ```text
//! Pending -> Resolving -> Succeeded
//!                      \-> Failed        (sticky)
//! ```
//!
//! `Failed` is terminal. Once a function has failed, later transition
//! attempts are ignored, so a bad argument keeps its function failed no
//! matter what happens afterwards.

use crate::diagnostics::Diagnostic;
use std::collections::{BTreeMap, BTreeSet};

/// Generation state of one function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FnState {
    /// Declared but not visited yet
    Pending,
    /// Currently being classified and emitted
    Resolving,
    /// All fragments generated
    Succeeded,
    /// Degraded to a placeholder in every artifact
    Failed,
}

/// Records failed functions and their diagnostics across a run
#[derive(Debug, Default)]
pub struct FailureTracker {
    states: BTreeMap<String, FnState>,
    failed: BTreeSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl FailureTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a function up front as `Pending`
    pub fn register(&mut self, name: &str) {
        self.states.entry(name.to_string()).or_insert(FnState::Pending);
    }

    /// Mark a function as being worked on
    pub fn begin(&mut self, name: &str) {
        match self.states.get(name) {
            Some(FnState::Failed) => {}
            _ => {
                self.states.insert(name.to_string(), FnState::Resolving);
            }
        }
    }

    /// Record a failure. Failed is sticky: only the first diagnostic for
    /// a function is kept.
    pub fn fail(&mut self, name: &str, diagnostic: Diagnostic) {
        if self.failed.contains(name) {
            return;
        }
        self.states.insert(name.to_string(), FnState::Failed);
        self.failed.insert(name.to_string());
        self.diagnostics.push(diagnostic);
    }

    /// Record success. Ignored unless the function is `Resolving`, so a
    /// failed function can never be resurrected.
    pub fn succeed(&mut self, name: &str) {
        if self.states.get(name) == Some(&FnState::Resolving) {
            self.states.insert(name.to_string(), FnState::Succeeded);
        }
    }

    /// Current state of a function, if it was ever registered
    pub fn state(&self, name: &str) -> Option<FnState> {
        self.states.get(name).copied()
    }

    /// Whether the function has failed
    pub fn is_failed(&self, name: &str) -> bool {
        self.failed.contains(name)
    }

    /// Names of all failed functions, ordered
    pub fn failed(&self) -> &BTreeSet<String> {
        &self.failed
    }

    /// All diagnostics in the order they were recorded
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether any function failed
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeDesc;

    fn complex_diag(function: &str, argument: &str) -> Diagnostic {
        let canonical = TypeDesc::reference(TypeDesc::parse_leaf("int")).resolve();
        Diagnostic::accessor(function, argument, &canonical)
    }

    #[test]
    fn test_lifecycle() {
        let mut tracker = FailureTracker::new();
        tracker.register("glEnable");
        assert_eq!(tracker.state("glEnable"), Some(FnState::Pending));

        tracker.begin("glEnable");
        assert_eq!(tracker.state("glEnable"), Some(FnState::Resolving));

        tracker.succeed("glEnable");
        assert_eq!(tracker.state("glEnable"), Some(FnState::Succeeded));
        assert!(!tracker.has_failures());
    }

    #[test]
    fn test_failure_is_sticky() {
        let mut tracker = FailureTracker::new();
        tracker.register("glMapBuffer");
        tracker.begin("glMapBuffer");
        tracker.fail("glMapBuffer", complex_diag("glMapBuffer", "target"));

        // Neither succeed nor a fresh begin may resurrect it.
        tracker.succeed("glMapBuffer");
        assert_eq!(tracker.state("glMapBuffer"), Some(FnState::Failed));
        tracker.begin("glMapBuffer");
        assert_eq!(tracker.state("glMapBuffer"), Some(FnState::Failed));
        assert!(tracker.is_failed("glMapBuffer"));
    }

    #[test]
    fn test_first_diagnostic_wins() {
        let mut tracker = FailureTracker::new();
        tracker.begin("f");
        tracker.fail("f", complex_diag("f", "a"));
        tracker.fail("f", complex_diag("f", "b"));

        assert_eq!(tracker.diagnostics().len(), 1);
        assert_eq!(tracker.diagnostics()[0].argument.as_deref(), Some("a"));
    }

    #[test]
    fn test_failed_set_is_ordered() {
        let mut tracker = FailureTracker::new();
        for name in ["zz", "aa", "mm"] {
            tracker.begin(name);
            tracker.fail(name, complex_diag(name, "x"));
        }
        let failed: Vec<&String> = tracker.failed().iter().collect();
        assert_eq!(failed, vec!["aa", "mm", "zz"]);
    }
}

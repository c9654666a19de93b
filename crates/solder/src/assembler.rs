//! End-to-end binding assembly
//!
//! Ties the pipeline together: load the description, bind every
//! function in declaration order, splice the blobs into the two
//! skeletons and write the artifacts. Output files are created before
//! any generation work happens, so a fatal error mid-run can leave
//! truncated files behind but never stale ones.

use crate::codegen::{bind_function, FailureTracker, HeaderGenerator, Outcome, SourceGenerator};
use crate::diagnostics::{Diagnostic, SolderResult};
use crate::ir::ApiDocument;
use crate::template::{Skeleton, BINDINGS_TOKEN, PROTOTYPES_TOKEN};
use std::collections::BTreeSet;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default description path
pub const DEFAULT_INPUT: &str = "bindings.json";
/// Default source skeleton path
pub const DEFAULT_SOURCE_TEMPLATE: &str = "bindings.cc.tmpl";
/// Default header skeleton path
pub const DEFAULT_HEADER_TEMPLATE: &str = "bindings.h.tmpl";
/// Default source artifact path
pub const DEFAULT_SOURCE_OUT: &str = "src/bindings.cc";
/// Default header artifact path
pub const DEFAULT_HEADER_OUT: &str = "src/bindings.h";

/// Artifacts produced by a generation pass, before any file IO
#[derive(Debug)]
pub struct GeneratedArtifacts {
    /// Complete source file text
    pub source: String,
    /// Complete header file text
    pub header: String,
    /// Failure state accumulated during the pass
    pub tracker: FailureTracker,
}

/// Summary of one assembler run
#[derive(Debug)]
pub struct Report {
    /// Where the source artifact was written
    pub source_path: PathBuf,
    /// Where the header artifact was written
    pub header_path: PathBuf,
    /// Functions bound successfully
    pub bound: usize,
    /// Functions degraded to placeholders, ordered by name
    pub failed: BTreeSet<String>,
    /// Diagnostics in the order they were recorded
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Whether any function degraded
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Run the generation pipeline over an already-loaded document.
///
/// Pure with respect to the filesystem, which keeps it directly
/// testable: callers hand in the skeletons and receive the full
/// artifact texts plus the failure tracker.
pub fn generate(
    document: &ApiDocument,
    source_skeleton: &Skeleton,
    header_skeleton: &Skeleton,
) -> SolderResult<GeneratedArtifacts> {
    let mut tracker = FailureTracker::new();
    for func in &document.functions {
        tracker.register(&func.name);
    }

    let outcomes: Vec<Outcome> = document
        .functions
        .iter()
        .map(|func| bind_function(func, &mut tracker))
        .collect();

    let source_blob = SourceGenerator::new(&outcomes).generate();
    let header_blob = HeaderGenerator::new(&outcomes).generate();

    let source = source_skeleton.fill(BINDINGS_TOKEN, &source_blob)?;
    let header = header_skeleton.fill(PROTOTYPES_TOKEN, &header_blob)?;

    Ok(GeneratedArtifacts {
        source,
        header,
        tracker,
    })
}

/// Configures and runs a full description-to-files pass
///
/// # Example
/// ```ignore
/// use solder::Assembler;
///
/// let report = Assembler::new()
///     .input("gl.json")
///     .source_out("src/gl.cc")
///     .header_out("src/gl.h")
///     .run()?;
/// ```
#[derive(Debug, Clone)]
pub struct Assembler {
    input: PathBuf,
    source_template: PathBuf,
    header_template: PathBuf,
    source_out: PathBuf,
    header_out: PathBuf,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    /// Create an assembler with the default paths
    pub fn new() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            source_template: PathBuf::from(DEFAULT_SOURCE_TEMPLATE),
            header_template: PathBuf::from(DEFAULT_HEADER_TEMPLATE),
            source_out: PathBuf::from(DEFAULT_SOURCE_OUT),
            header_out: PathBuf::from(DEFAULT_HEADER_OUT),
        }
    }

    /// Set the description path
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = path.into();
        self
    }

    /// Set the source skeleton path
    pub fn source_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_template = path.into();
        self
    }

    /// Set the header skeleton path
    pub fn header_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.header_template = path.into();
        self
    }

    /// Set the source artifact path
    pub fn source_out(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_out = path.into();
        self
    }

    /// Set the header artifact path
    pub fn header_out(mut self, path: impl Into<PathBuf>) -> Self {
        self.header_out = path.into();
        self
    }

    /// Load the description, generate both artifacts and write them
    pub fn run(&self) -> SolderResult<Report> {
        let document = ApiDocument::load(&self.input)?;
        debug!(
            input = %self.input.display(),
            functions = document.functions.len(),
            "loaded api description"
        );

        // Sinks open before generation starts.
        let mut source_file = create_sink(&self.source_out)?;
        let mut header_file = create_sink(&self.header_out)?;

        let source_skeleton = Skeleton::load(&self.source_template)?;
        let header_skeleton = Skeleton::load(&self.header_template)?;

        let artifacts = generate(&document, &source_skeleton, &header_skeleton)?;

        source_file.write_all(artifacts.source.as_bytes())?;
        header_file.write_all(artifacts.header.as_bytes())?;
        source_file.flush()?;
        header_file.flush()?;

        let failed = artifacts.tracker.failed().clone();
        debug!(
            source = %self.source_out.display(),
            header = %self.header_out.display(),
            failed = failed.len(),
            "wrote artifacts"
        );

        Ok(Report {
            source_path: self.source_out.clone(),
            header_path: self.header_out.clone(),
            bound: document.functions.len() - failed.len(),
            failed,
            diagnostics: artifacts.tracker.diagnostics().to_vec(),
        })
    }
}

fn create_sink(path: &Path) -> SolderResult<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(path)?)
}

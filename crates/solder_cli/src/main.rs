//! Solder CLI - generate NAN addon bindings from a JSON API description
//!
//! Usage: `solder [description.json]`
//!
//! The description path defaults to `bindings.json` in the working
//! directory. The skeleton files `bindings.cc.tmpl` and `bindings.h.tmpl`
//! are expected next to it and the artifacts land in `src/bindings.cc`
//! and `src/bindings.h`.
//!
//! Per-function marshalling failures are printed to stderr and do not
//! affect the exit status; the artifacts are still written with TODO
//! placeholders in place of the failed functions. Structural problems
//! (missing input, invalid JSON, broken skeletons) abort with a
//! non-zero status.

use anyhow::{Context, Result};
use solder::Assembler;
use std::env;

fn main() -> Result<()> {
    // Initialize tracing with env-filter support
    // Use SOLDER_LOG env var for log level configuration, default to "info"
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("SOLDER_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    // One optional positional argument: the description path.
    let input = env::args()
        .nth(1)
        .unwrap_or_else(|| solder::DEFAULT_INPUT.to_string());

    let report = Assembler::new()
        .input(&input)
        .run()
        .with_context(|| format!("failed to generate bindings from {}", input))?;

    for diagnostic in &report.diagnostics {
        eprintln!("{}", diagnostic.format());
    }
    if report.has_failures() {
        eprintln!(
            "\n{} function(s) degraded to placeholders",
            report.failed.len()
        );
    }

    tracing::info!(
        bound = report.bound,
        failed = report.failed.len(),
        source = %report.source_path.display(),
        header = %report.header_path.display(),
        "bindings written"
    );

    Ok(())
}

//! Per-function wrapper generation
//!
//! Each function signature either produces a complete set of fragments
//! (method body, registration, prototype) or degrades to a TODO marker
//! in all three positions. There is no in-between: the first argument or
//! result that cannot be classified fails the whole function and the
//! remaining positions are not visited.

use crate::codegen::marshal::{ArgStrategy, ReturnStrategy};
use crate::codegen::tracker::FailureTracker;
use crate::diagnostics::Diagnostic;
use crate::ir::{CanonicalType, FunctionSig};
use std::borrow::Cow;

/// Marker dropped into every artifact position of a failed function
pub fn todo_marker(name: &str) -> String {
    format!("//TODO: fix {}", name)
}

/// Generated fragments for one successfully bound function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionBinding {
    /// Complete `NAN_METHOD` wrapper definition
    pub method: String,
    /// Registration statement for the init block
    pub export: String,
    /// Wrapper prototype for the header
    pub prototype: String,
}

/// Result of binding one function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Fragments were generated
    Bound(FunctionBinding),
    /// The named function degraded to placeholders
    Failed(String),
}

impl Outcome {
    /// Whether this function degraded
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// Method fragment for the source artifact
    pub fn method_fragment(&self) -> Cow<'_, str> {
        match self {
            Outcome::Bound(binding) => Cow::Borrowed(binding.method.as_str()),
            Outcome::Failed(name) => Cow::Owned(todo_marker(name)),
        }
    }

    /// Registration fragment for the init block
    pub fn export_fragment(&self) -> Cow<'_, str> {
        match self {
            Outcome::Bound(binding) => Cow::Borrowed(binding.export.as_str()),
            Outcome::Failed(name) => Cow::Owned(todo_marker(name)),
        }
    }

    /// Prototype fragment for the header artifact
    pub fn prototype_fragment(&self) -> Cow<'_, str> {
        match self {
            Outcome::Bound(binding) => Cow::Borrowed(binding.prototype.as_str()),
            Outcome::Failed(name) => Cow::Owned(todo_marker(name)),
        }
    }
}

/// Generate the fragments for one function, recording any failure.
///
/// Arguments are classified left to right and the result last; the
/// first unmarshallable type short-circuits with one diagnostic.
pub fn bind_function(func: &FunctionSig, tracker: &mut FailureTracker) -> Outcome {
    tracker.begin(&func.name);

    let mut accessors = Vec::with_capacity(func.args.len());
    for (index, arg) in func.args.iter().enumerate() {
        let canonical = arg.ty.resolve();
        match ArgStrategy::select(&canonical) {
            Some(strategy) => accessors.push(strategy.emit(&arg.name, index, &canonical)),
            None => {
                tracker.fail(&func.name, Diagnostic::accessor(&func.name, &arg.name, &canonical));
                return Outcome::Failed(func.name.clone());
            }
        }
    }

    let result = func.result.resolve();
    let ret = match ReturnStrategy::select(&result) {
        Some(strategy) => strategy,
        None => {
            tracker.fail(&func.name, Diagnostic::result(&func.name, &result));
            return Outcome::Failed(func.name.clone());
        }
    };

    let export = format!(
        "\n  exports->Set(NanNew<String>(\"{}\"),\n    NanNew<FunctionTemplate>({})->GetFunction());",
        func.name,
        func.binding_name()
    );
    let prototype = format!("NAN_METHOD({});", func.binding_name());
    let method = render_method(func, accessors, &result, ret);

    tracker.succeed(&func.name);
    Outcome::Bound(FunctionBinding {
        method,
        export,
        prototype,
    })
}

/// Assemble the full `NAN_METHOD` definition from its pieces
fn render_method(
    func: &FunctionSig,
    accessors: Vec<String>,
    result: &CanonicalType,
    ret: ReturnStrategy,
) -> String {
    let mut lines = Vec::with_capacity(accessors.len() + 6);
    lines.push(format!("\nNAN_METHOD({}) {{", func.binding_name()));
    lines.push("  NanScope();".to_string());
    lines.push(String::new());
    lines.extend(accessors);
    lines.push(render_invocation(func, result));
    lines.push(ret.emit().to_string());
    lines.push("}".to_string());
    lines.join("\n")
}

/// The native call itself. Void calls drop the `res` local since there
/// is nothing to hand back.
fn render_invocation(func: &FunctionSig, result: &CanonicalType) -> String {
    let call = format!("{}({})", func.name, func.arg_names().join(", "));
    if result.is_void() {
        format!("  {};", call)
    } else {
        format!("  auto res = {};", call)
    }
}

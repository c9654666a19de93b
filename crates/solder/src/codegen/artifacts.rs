//! Artifact blob generators
//!
//! Generates the two text blobs that get spliced into the output
//! skeletons: the source blob (all method definitions plus the `Init`
//! registration block) and the header blob (all prototypes). Both
//! render from the same outcome list, so a failed function shows the
//! identical `//TODO: fix <name>` marker everywhere it would otherwise
//! appear.

use crate::codegen::function::Outcome;

/// Generator for the C++ source blob
pub struct SourceGenerator<'a> {
    outcomes: &'a [Outcome],
}

impl<'a> SourceGenerator<'a> {
    /// Create a new source generator
    pub fn new(outcomes: &'a [Outcome]) -> Self {
        Self { outcomes }
    }

    /// Generate method definitions followed by the `Init` block
    ///
    /// This produces code like:
    /// ```cpp
    /// NAN_METHOD(foo_binding) {
    ///   ...
    /// }
    ///
    /// void Init(Handle<Object> exports) {
    ///
    ///   exports->Set(NanNew<String>("foo"),
    ///     NanNew<FunctionTemplate>(foo_binding)->GetFunction());
    /// }
    /// ```
    pub fn generate(&self) -> String {
        let methods: Vec<_> = self.outcomes.iter().map(|o| o.method_fragment()).collect();
        let registrations: Vec<_> = self.outcomes.iter().map(|o| o.export_fragment()).collect();

        format!(
            "{}\n\nvoid Init(Handle<Object> exports) {{\n{}\n}}",
            methods.join("\n"),
            registrations.join("\n")
        )
    }
}

/// Generator for the C++ header blob
pub struct HeaderGenerator<'a> {
    outcomes: &'a [Outcome],
}

impl<'a> HeaderGenerator<'a> {
    /// Create a new header generator
    pub fn new(outcomes: &'a [Outcome]) -> Self {
        Self { outcomes }
    }

    /// Generate one prototype line per function
    pub fn generate(&self) -> String {
        let prototypes: Vec<_> = self.outcomes.iter().map(|o| o.prototype_fragment()).collect();
        prototypes.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::function::bind_function;
    use crate::codegen::tracker::FailureTracker;
    use crate::ir::{FunctionSig, TypeDesc};
    use pretty_assertions::assert_eq;

    fn outcomes(funcs: &[FunctionSig]) -> Vec<Outcome> {
        let mut tracker = FailureTracker::new();
        funcs.iter().map(|f| bind_function(f, &mut tracker)).collect()
    }

    #[test]
    fn test_source_blob_layout() {
        let funcs = vec![
            FunctionSig::new("foo").arg("x", TypeDesc::parse_leaf("unsigned int")),
            FunctionSig::new("bar").returns(TypeDesc::parse_leaf("char*")),
        ];
        let outcomes = outcomes(&funcs);
        let blob = SourceGenerator::new(&outcomes).generate();

        let expected = "\
\nNAN_METHOD(foo_binding) {
  NanScope();

  auto x = args[0]->Uint32Value();
  foo(x);
  NanReturnNull();
}
\nNAN_METHOD(bar_binding) {
  NanScope();

  auto res = bar();
  NanReturnValue(NanNew<String>(res));
}

void Init(Handle<Object> exports) {

  exports->Set(NanNew<String>(\"foo\"),
    NanNew<FunctionTemplate>(foo_binding)->GetFunction());

  exports->Set(NanNew<String>(\"bar\"),
    NanNew<FunctionTemplate>(bar_binding)->GetFunction());
}";
        assert_eq!(blob, expected);
    }

    #[test]
    fn test_failed_function_marked_in_both_blob_positions() {
        let funcs = vec![
            FunctionSig::new("good").arg("n", TypeDesc::parse_leaf("int")),
            FunctionSig::new("broken").arg("r", TypeDesc::reference(TypeDesc::parse_leaf("int"))),
        ];
        let outcomes = outcomes(&funcs);

        let source = SourceGenerator::new(&outcomes).generate();
        let header = HeaderGenerator::new(&outcomes).generate();

        // No partial fragments of the failed function anywhere.
        assert!(!source.contains("broken_binding"));
        assert!(!header.contains("broken_binding"));

        // The marker shows up once per artifact position.
        assert_eq!(source.matches("//TODO: fix broken").count(), 2);
        assert_eq!(header.matches("//TODO: fix broken").count(), 1);

        assert_eq!(header, "NAN_METHOD(good_binding);\n//TODO: fix broken");
    }

    #[test]
    fn test_empty_document_still_renders_init() {
        let blob = SourceGenerator::new(&[]).generate();
        assert_eq!(blob, "\n\nvoid Init(Handle<Object> exports) {\n\n}");
        assert_eq!(HeaderGenerator::new(&[]).generate(), "");
    }
}

//! Marshalling strategies between V8 values and C types
//!
//! Every argument and result position is classified against a closed set
//! of strategies. Classification is total over the strategy enums: a
//! canonical type either maps to exactly one strategy or to `None`,
//! which the caller turns into a per-function failure.
//!
//! # Argument Strategies
//!
//! | Canonical type | Strategy | Accessor |
//! |----------------|----------|----------|
//! | `unsigned int`, `unsigned short`, `unsigned char` | `Uint32` | `->Uint32Value()` |
//! | `long`, `unsigned long` | `Integer` | `->IntegerValue()` |
//! | `int`, `short`, `char`, `signed char` | `Int32` | `->Int32Value()` |
//! | `bool` | `Boolean` | `->BooleanValue()` |
//! | `float`, `double` | `Number` | `->NumberValue()` |
//! | `char*` | `Text` | `NanAsciiString` |
//! | any other single-level primitive pointer | `Buffer` | `node::Buffer::Data` cast |
//!
//! Everything else (plain `void`, opaque names, `complex`, double
//! pointers) has no strategy. Note that `long` goes through the 53-bit
//! `IntegerValue()` accessor and truncates to the C width on assignment,
//! exactly like a 32-bit build of the addon behaves.
//!
//! # Result Strategies
//!
//! | Canonical type | Strategy | Return statement |
//! |----------------|----------|------------------|
//! | integral values up to `unsigned long` | `Number` | `NanReturnValue(NanNew<Number>(res))` |
//! | `void` | `Null` | `NanReturnNull()` |
//! | `char*`, `signed char*`, `unsigned char*` | `Text` | `NanReturnValue(NanNew<String>(res))` |
//!
//! The result side is narrower than the argument side: `bool`, `signed
//! char`, `float` and `double` results have no conversion and degrade
//! the function.

use crate::ir::{CanonicalBase, CanonicalType, Primitive};

/// How one argument travels from a V8 value into a C local
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgStrategy {
    /// Unsigned 32-bit extraction
    Uint32,
    /// 53-bit integer extraction for the `long` widths
    Integer,
    /// Signed 32-bit extraction
    Int32,
    /// Boolean extraction
    Boolean,
    /// Double-precision extraction
    Number,
    /// ASCII string view for `char*`
    Text,
    /// Byte-buffer view reinterpreted to the target pointer type
    Buffer,
}

impl ArgStrategy {
    /// Pick the strategy for a canonical argument type
    pub fn select(canonical: &CanonicalType) -> Option<Self> {
        match (&canonical.base, canonical.indirection) {
            (CanonicalBase::Prim(p), 0) => Self::for_value(*p),
            (CanonicalBase::Prim(Primitive::Char), 1) => Some(ArgStrategy::Text),
            (CanonicalBase::Prim(_), 1) => Some(ArgStrategy::Buffer),
            _ => None,
        }
    }

    fn for_value(p: Primitive) -> Option<Self> {
        match p {
            Primitive::UnsignedInt | Primitive::UnsignedShort | Primitive::UnsignedChar => {
                Some(ArgStrategy::Uint32)
            }
            Primitive::Long | Primitive::UnsignedLong => Some(ArgStrategy::Integer),
            Primitive::Int | Primitive::Short | Primitive::Char | Primitive::SignedChar => {
                Some(ArgStrategy::Int32)
            }
            Primitive::Bool => Some(ArgStrategy::Boolean),
            Primitive::Float | Primitive::Double => Some(ArgStrategy::Number),
            Primitive::Void => None,
        }
    }

    /// Emit the accessor statement(s) binding `name` from `args[index]`.
    ///
    /// Buffer accessors need the canonical type for the pointer cast.
    pub fn emit(&self, name: &str, index: usize, canonical: &CanonicalType) -> String {
        match self {
            ArgStrategy::Uint32 => {
                format!("  auto {} = args[{}]->Uint32Value();", name, index)
            }
            ArgStrategy::Integer => {
                format!("  auto {} = args[{}]->IntegerValue();", name, index)
            }
            ArgStrategy::Int32 => {
                format!("  auto {} = args[{}]->Int32Value();", name, index)
            }
            ArgStrategy::Boolean => {
                format!("  auto {} = args[{}]->BooleanValue();", name, index)
            }
            ArgStrategy::Number => {
                format!("  auto {} = args[{}]->NumberValue();", name, index)
            }
            ArgStrategy::Text => format!(
                "NanAsciiString _{}(args[{}]->ToString());  auto {} = *_{};",
                name, index, name, name
            ),
            ArgStrategy::Buffer => format!(
                "  auto _{} = args[{}]->ToObject();\n  auto {} = reinterpret_cast<{}>(node::Buffer::Data(_{}));",
                name, index, name, canonical, name
            ),
        }
    }
}

/// How a native result travels back into a V8 value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnStrategy {
    /// Numeric result wrapped in a V8 Number
    Number,
    /// No result, the wrapper returns null
    Null,
    /// C string result wrapped in a V8 String
    Text,
}

impl ReturnStrategy {
    /// Pick the strategy for a canonical result type
    pub fn select(canonical: &CanonicalType) -> Option<Self> {
        match (&canonical.base, canonical.indirection) {
            (CanonicalBase::Prim(p), 0) => match p {
                Primitive::UnsignedInt
                | Primitive::UnsignedShort
                | Primitive::UnsignedChar
                | Primitive::Long
                | Primitive::UnsignedLong
                | Primitive::Int
                | Primitive::Short
                | Primitive::Char => Some(ReturnStrategy::Number),
                Primitive::Void => Some(ReturnStrategy::Null),
                Primitive::SignedChar | Primitive::Bool | Primitive::Float | Primitive::Double => {
                    None
                }
            },
            (CanonicalBase::Prim(Primitive::Char), 1)
            | (CanonicalBase::Prim(Primitive::SignedChar), 1)
            | (CanonicalBase::Prim(Primitive::UnsignedChar), 1) => Some(ReturnStrategy::Text),
            _ => None,
        }
    }

    /// Emit the return statement
    pub fn emit(&self) -> &'static str {
        match self {
            ReturnStrategy::Number => "  NanReturnValue(NanNew<Number>(res));",
            ReturnStrategy::Null => "  NanReturnNull();",
            ReturnStrategy::Text => "  NanReturnValue(NanNew<String>(res));",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeDesc;
    use pretty_assertions::assert_eq;

    fn canonical(leaf: &str) -> CanonicalType {
        TypeDesc::parse_leaf(leaf).resolve()
    }

    #[test]
    fn test_arg_strategy_table() {
        assert_eq!(ArgStrategy::select(&canonical("unsigned int")), Some(ArgStrategy::Uint32));
        assert_eq!(ArgStrategy::select(&canonical("unsigned short")), Some(ArgStrategy::Uint32));
        assert_eq!(ArgStrategy::select(&canonical("unsigned char")), Some(ArgStrategy::Uint32));
        assert_eq!(ArgStrategy::select(&canonical("long")), Some(ArgStrategy::Integer));
        assert_eq!(ArgStrategy::select(&canonical("unsigned long")), Some(ArgStrategy::Integer));
        assert_eq!(ArgStrategy::select(&canonical("int")), Some(ArgStrategy::Int32));
        assert_eq!(ArgStrategy::select(&canonical("short")), Some(ArgStrategy::Int32));
        assert_eq!(ArgStrategy::select(&canonical("char")), Some(ArgStrategy::Int32));
        assert_eq!(ArgStrategy::select(&canonical("signed char")), Some(ArgStrategy::Int32));
        assert_eq!(ArgStrategy::select(&canonical("bool")), Some(ArgStrategy::Boolean));
        assert_eq!(ArgStrategy::select(&canonical("float")), Some(ArgStrategy::Number));
        assert_eq!(ArgStrategy::select(&canonical("double")), Some(ArgStrategy::Number));
        assert_eq!(ArgStrategy::select(&canonical("char*")), Some(ArgStrategy::Text));
    }

    #[test]
    fn test_arg_pointers_become_buffers() {
        for leaf in [
            "void*",
            "bool*",
            "int*",
            "unsigned int*",
            "short*",
            "unsigned short*",
            "long*",
            "unsigned long*",
            "float*",
            "double*",
            "signed char*",
            "unsigned char*",
        ] {
            assert_eq!(ArgStrategy::select(&canonical(leaf)), Some(ArgStrategy::Buffer), "{}", leaf);
        }
    }

    #[test]
    fn test_arg_unsupported() {
        assert_eq!(ArgStrategy::select(&canonical("void")), None);
        assert_eq!(ArgStrategy::select(&canonical("char**")), None);
        assert_eq!(ArgStrategy::select(&canonical("GLsync")), None);
        assert_eq!(ArgStrategy::select(&canonical("GLsync*")), None);

        let reference = TypeDesc::reference(TypeDesc::parse_leaf("int")).resolve();
        assert_eq!(ArgStrategy::select(&reference), None);
    }

    #[test]
    fn test_arg_emission() {
        let uint = canonical("unsigned int");
        assert_eq!(
            ArgStrategy::Uint32.emit("mode", 0, &uint),
            "  auto mode = args[0]->Uint32Value();"
        );

        let text = canonical("char*");
        assert_eq!(
            ArgStrategy::Text.emit("name", 2, &text),
            "NanAsciiString _name(args[2]->ToString());  auto name = *_name;"
        );

        let floats = canonical("float*");
        assert_eq!(
            ArgStrategy::Buffer.emit("data", 1, &floats),
            "  auto _data = args[1]->ToObject();\n  auto data = reinterpret_cast<float*>(node::Buffer::Data(_data));"
        );
    }

    #[test]
    fn test_return_strategy_table() {
        for leaf in [
            "unsigned int",
            "unsigned short",
            "unsigned char",
            "long",
            "unsigned long",
            "int",
            "short",
            "char",
        ] {
            assert_eq!(ReturnStrategy::select(&canonical(leaf)), Some(ReturnStrategy::Number), "{}", leaf);
        }
        assert_eq!(ReturnStrategy::select(&canonical("void")), Some(ReturnStrategy::Null));
        for leaf in ["char*", "signed char*", "unsigned char*"] {
            assert_eq!(ReturnStrategy::select(&canonical(leaf)), Some(ReturnStrategy::Text), "{}", leaf);
        }
    }

    #[test]
    fn test_return_unsupported() {
        // Narrower than the argument side on purpose.
        for leaf in ["bool", "signed char", "float", "double", "void*", "float*", "GLenum"] {
            assert_eq!(ReturnStrategy::select(&canonical(leaf)), None, "{}", leaf);
        }

        let reference = TypeDesc::reference(TypeDesc::parse_leaf("int")).resolve();
        assert_eq!(ReturnStrategy::select(&reference), None);
    }

    #[test]
    fn test_return_emission() {
        assert_eq!(ReturnStrategy::Number.emit(), "  NanReturnValue(NanNew<Number>(res));");
        assert_eq!(ReturnStrategy::Null.emit(), "  NanReturnNull();");
        assert_eq!(ReturnStrategy::Text.emit(), "  NanReturnValue(NanNew<String>(res));");
    }
}

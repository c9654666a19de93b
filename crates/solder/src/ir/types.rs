//! Type descriptors for API descriptions
//!
//! This module models the recursive type expressions an API description
//! uses to declare argument and result types, and the canonical form the
//! code generators consume.
//!
//! # Wire Grammar
//!
//! A type position in the JSON document holds either a bare C type name
//! or an object wrapping another type expression:
//!
//! ```json
//! "unsigned int"
//! { "pointer": true, "type": "float" }
//! { "lvalue_reference": true, "type": { "pointer": true, "type": "char" } }
//! ```
//!
//! Leaf strings may carry trailing `*` markers themselves, so `"char*"`
//! and `{ "pointer": true, "type": "char" }` describe the same type.
//! Wrapper objects are interpreted in a fixed priority order: `pointer`
//! first, then `lvalue_reference`/`rvalue_reference`, then a plain
//! `type` field which transparently unwraps. An object with none of
//! those fields is structurally invalid and fails deserialization.
//!
//! Leaf names that are not one of the known C primitives are kept
//! verbatim as [`TypeDesc::Opaque`]. They parse fine; the marshalling
//! layer later degrades any function that uses one, so a single exotic
//! type never rejects the whole document.
//!
//! # Canonical Form
//!
//! [`TypeDesc::resolve`] flattens a descriptor into a [`CanonicalType`],
//! a base plus a pointer depth. References have no representation in the
//! dynamic calling convention, so any reference wrapper collapses the
//! whole subtree to [`CanonicalBase::Complex`]:
//!
//! | Descriptor | Canonical |
//! |------------|-----------|
//! | `"unsigned int"` | `unsigned int` |
//! | `{pointer, type: "float"}` | `float*` |
//! | `"char**"` | `char**` |
//! | `{lvalue_reference, type: "int"}` | `complex` |
//! | `{pointer, type: {lvalue_reference, type: "T"}}` | `complex*` |
//!
//! The canonical display string is what diagnostics print and what the
//! buffer accessor casts through (`reinterpret_cast<float*>`).

use serde::de::{self, Deserialize, Deserializer};
use std::fmt;

/// C primitive types recognized in leaf positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Void,
    Bool,
    Char,
    SignedChar,
    UnsignedChar,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Long,
    UnsignedLong,
    Float,
    Double,
}

impl Primitive {
    /// The C spelling of this primitive
    pub fn as_c_name(&self) -> &'static str {
        match self {
            Primitive::Void => "void",
            Primitive::Bool => "bool",
            Primitive::Char => "char",
            Primitive::SignedChar => "signed char",
            Primitive::UnsignedChar => "unsigned char",
            Primitive::Short => "short",
            Primitive::UnsignedShort => "unsigned short",
            Primitive::Int => "int",
            Primitive::UnsignedInt => "unsigned int",
            Primitive::Long => "long",
            Primitive::UnsignedLong => "unsigned long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    /// Parse from a C type name
    pub fn from_c_name(s: &str) -> Option<Self> {
        match s {
            "void" => Some(Primitive::Void),
            "bool" => Some(Primitive::Bool),
            "char" => Some(Primitive::Char),
            "signed char" => Some(Primitive::SignedChar),
            "unsigned char" => Some(Primitive::UnsignedChar),
            "short" => Some(Primitive::Short),
            "unsigned short" => Some(Primitive::UnsignedShort),
            "int" => Some(Primitive::Int),
            "unsigned int" => Some(Primitive::UnsignedInt),
            "long" => Some(Primitive::Long),
            "unsigned long" => Some(Primitive::UnsignedLong),
            "float" => Some(Primitive::Float),
            "double" => Some(Primitive::Double),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_c_name())
    }
}

/// A recursive type expression as declared in the API description
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    /// Known C primitive
    Primitive(Primitive),

    /// Leaf name outside the primitive set, kept verbatim
    Opaque(String),

    /// Pointer to another descriptor
    Pointer(Box<TypeDesc>),

    /// lvalue or rvalue reference (never marshallable)
    Reference(Box<TypeDesc>),
}

impl TypeDesc {
    /// Create a primitive descriptor
    pub fn primitive(p: Primitive) -> Self {
        TypeDesc::Primitive(p)
    }

    /// Create an opaque leaf descriptor
    pub fn opaque(name: impl Into<String>) -> Self {
        TypeDesc::Opaque(name.into())
    }

    /// Create a void descriptor
    pub fn void() -> Self {
        TypeDesc::Primitive(Primitive::Void)
    }

    /// Create a pointer to `inner`
    pub fn pointer(inner: TypeDesc) -> Self {
        TypeDesc::Pointer(Box::new(inner))
    }

    /// Create a reference to `inner`
    pub fn reference(inner: TypeDesc) -> Self {
        TypeDesc::Reference(Box::new(inner))
    }

    /// Parse a leaf string, folding trailing `*` markers into pointers.
    ///
    /// `"char*"` parses as pointer-to-char, so a leaf star and an
    /// explicit `pointer` wrapper resolve identically. No whitespace
    /// normalization happens here: `"char *"` stays an opaque leaf and
    /// later degrades the function that uses it.
    pub fn parse_leaf(name: &str) -> Self {
        let depth = name.chars().rev().take_while(|c| *c == '*').count();
        let base = &name[..name.len() - depth];

        let mut ty = match Primitive::from_c_name(base) {
            Some(p) => TypeDesc::Primitive(p),
            None => TypeDesc::Opaque(base.to_string()),
        };
        for _ in 0..depth {
            ty = TypeDesc::Pointer(Box::new(ty));
        }
        ty
    }

    /// Flatten this descriptor into its canonical form.
    ///
    /// Pointer wrappers accumulate indirection; a reference anywhere
    /// collapses the subtree to [`CanonicalBase::Complex`] because the
    /// calling convention has no way to pass one.
    pub fn resolve(&self) -> CanonicalType {
        match self {
            TypeDesc::Primitive(p) => CanonicalType::new(CanonicalBase::Prim(*p), 0),
            TypeDesc::Opaque(name) => CanonicalType::new(CanonicalBase::Opaque(name.clone()), 0),
            TypeDesc::Pointer(inner) => {
                let mut canonical = inner.resolve();
                canonical.indirection += 1;
                canonical
            }
            TypeDesc::Reference(_) => CanonicalType::new(CanonicalBase::Complex, 0),
        }
    }
}

impl<'de> Deserialize<'de> for TypeDesc {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Node {
            #[serde(default)]
            pointer: bool,
            #[serde(default)]
            lvalue_reference: bool,
            #[serde(default)]
            rvalue_reference: bool,
            #[serde(rename = "type")]
            inner: Option<TypeDesc>,
        }

        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Leaf(String),
            Node(Node),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Leaf(name) => Ok(TypeDesc::parse_leaf(&name)),
            Wire::Node(node) => {
                if node.pointer {
                    let inner = node.inner.ok_or_else(|| {
                        de::Error::custom("pointer descriptor is missing its \"type\" field")
                    })?;
                    Ok(TypeDesc::Pointer(Box::new(inner)))
                } else if node.lvalue_reference || node.rvalue_reference {
                    let inner = node.inner.ok_or_else(|| {
                        de::Error::custom("reference descriptor is missing its \"type\" field")
                    })?;
                    Ok(TypeDesc::Reference(Box::new(inner)))
                } else if let Some(inner) = node.inner {
                    Ok(inner)
                } else {
                    Err(de::Error::custom(
                        "type descriptor must be a string or carry \"pointer\", \
                         \"lvalue_reference\", \"rvalue_reference\" or \"type\"",
                    ))
                }
            }
        }
    }
}

/// Base of a canonical type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CanonicalBase {
    /// Known C primitive
    Prim(Primitive),
    /// Verbatim leaf name outside the primitive set
    Opaque(String),
    /// Reference-contaminated subtree, displays as `complex`
    Complex,
}

impl fmt::Display for CanonicalBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalBase::Prim(p) => write!(f, "{}", p.as_c_name()),
            CanonicalBase::Opaque(name) => write!(f, "{}", name),
            CanonicalBase::Complex => write!(f, "complex"),
        }
    }
}

/// Canonical form of a type expression: a base plus pointer depth
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalType {
    /// Base name
    pub base: CanonicalBase,
    /// Number of pointer wrappers around the base
    pub indirection: usize,
}

impl CanonicalType {
    /// Create a canonical type
    pub fn new(base: CanonicalBase, indirection: usize) -> Self {
        Self { base, indirection }
    }

    /// True for plain `void` (not `void*`)
    pub fn is_void(&self) -> bool {
        self.indirection == 0 && self.base == CanonicalBase::Prim(Primitive::Void)
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        for _ in 0..self.indirection {
            write!(f, "*")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_leaf_parsing() {
        assert_eq!(
            TypeDesc::parse_leaf("unsigned int"),
            TypeDesc::Primitive(Primitive::UnsignedInt)
        );
        assert_eq!(
            TypeDesc::parse_leaf("char*"),
            TypeDesc::pointer(TypeDesc::Primitive(Primitive::Char))
        );
        assert_eq!(
            TypeDesc::parse_leaf("float**"),
            TypeDesc::pointer(TypeDesc::pointer(TypeDesc::Primitive(Primitive::Float)))
        );
        // Unknown names stay verbatim instead of failing the parse
        assert_eq!(TypeDesc::parse_leaf("GLsync"), TypeDesc::opaque("GLsync"));
        // No whitespace normalization
        assert_eq!(
            TypeDesc::parse_leaf("char *"),
            TypeDesc::pointer(TypeDesc::opaque("char "))
        );
    }

    #[test]
    fn test_resolution_is_idempotent_over_display() {
        for name in ["unsigned int", "char*", "float**", "void*", "GLsync"] {
            let canonical = TypeDesc::parse_leaf(name).resolve();
            assert_eq!(canonical.to_string(), name);
            // Feeding the canonical spelling back through the parser
            // lands on the same canonical form.
            assert_eq!(TypeDesc::parse_leaf(&canonical.to_string()).resolve(), canonical);
        }
    }

    #[test]
    fn test_reference_collapses_to_complex() {
        let reference = TypeDesc::reference(TypeDesc::Primitive(Primitive::Int));
        let canonical = reference.resolve();
        assert_eq!(canonical.base, CanonicalBase::Complex);
        assert_eq!(canonical.indirection, 0);
        assert_eq!(canonical.to_string(), "complex");
    }

    #[test]
    fn test_pointer_over_reference() {
        let desc = TypeDesc::pointer(TypeDesc::reference(TypeDesc::Primitive(Primitive::Char)));
        assert_eq!(desc.resolve().to_string(), "complex*");
    }

    #[test]
    fn test_wire_string_leaf() {
        let desc: TypeDesc = serde_json::from_str("\"unsigned int\"").unwrap();
        assert_eq!(desc, TypeDesc::Primitive(Primitive::UnsignedInt));

        let desc: TypeDesc = serde_json::from_str("\"char*\"").unwrap();
        assert_eq!(desc, TypeDesc::pointer(TypeDesc::Primitive(Primitive::Char)));
    }

    #[test]
    fn test_wire_pointer_object() {
        let desc: TypeDesc =
            serde_json::from_str(r#"{ "pointer": true, "type": "float" }"#).unwrap();
        assert_eq!(desc, TypeDesc::pointer(TypeDesc::Primitive(Primitive::Float)));
        assert_eq!(desc.resolve().to_string(), "float*");
    }

    #[test]
    fn test_wire_reference_object() {
        let desc: TypeDesc =
            serde_json::from_str(r#"{ "lvalue_reference": true, "type": "int" }"#).unwrap();
        assert_eq!(desc.resolve().to_string(), "complex");

        let desc: TypeDesc =
            serde_json::from_str(r#"{ "rvalue_reference": true, "type": "int" }"#).unwrap();
        assert_eq!(desc.resolve().to_string(), "complex");
    }

    #[test]
    fn test_wire_pointer_wins_over_reference() {
        // Both flags on one object: pointer takes priority.
        let desc: TypeDesc = serde_json::from_str(
            r#"{ "pointer": true, "lvalue_reference": true, "type": "int" }"#,
        )
        .unwrap();
        assert_eq!(desc, TypeDesc::pointer(TypeDesc::Primitive(Primitive::Int)));
    }

    #[test]
    fn test_wire_plain_wrapper_unwraps() {
        let desc: TypeDesc = serde_json::from_str(r#"{ "type": "double" }"#).unwrap();
        assert_eq!(desc, TypeDesc::Primitive(Primitive::Double));
    }

    #[test]
    fn test_wire_nested_pointer_to_reference() {
        let desc: TypeDesc = serde_json::from_str(
            r#"{ "pointer": true, "type": { "lvalue_reference": true, "type": "char" } }"#,
        )
        .unwrap();
        assert_eq!(desc.resolve().to_string(), "complex*");
    }

    #[test]
    fn test_wire_malformed_rejected() {
        assert!(serde_json::from_str::<TypeDesc>(r#"{ "pointer": true }"#).is_err());
        assert!(serde_json::from_str::<TypeDesc>(r#"{ "lvalue_reference": true }"#).is_err());
        assert!(serde_json::from_str::<TypeDesc>(r#"{}"#).is_err());
        assert!(serde_json::from_str::<TypeDesc>("5").is_err());
        assert!(serde_json::from_str::<TypeDesc>("true").is_err());
        assert!(serde_json::from_str::<TypeDesc>("[\"int\"]").is_err());
    }
}

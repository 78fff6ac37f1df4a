//! Resolved declarations.

use std::fmt;
use std::sync::Arc;

use super::foreign::ForeignClass;
use super::types::TypeInfo;
use crate::base::{FileId, FqName};
use crate::parser::{AstNode, ClassDecl, SyntaxNode};

/// A class declared in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceClass {
    pub file: FileId,
    pub fq_name: FqName,
    pub decl: ClassDecl,
}

impl SourceClass {
    pub fn is_annotation(&self) -> bool {
        self.decl.is_annotation()
    }
}

/// Builtin functions that produce arrays (`arrayOf`, `intArrayOf`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayFactory {
    ArrayOf,
    EmptyArray,
    IntArrayOf,
    LongArrayOf,
    ShortArrayOf,
    ByteArrayOf,
    CharArrayOf,
    FloatArrayOf,
    DoubleArrayOf,
    BooleanArrayOf,
}

impl ArrayFactory {
    pub const ALL: [ArrayFactory; 10] = [
        Self::ArrayOf,
        Self::EmptyArray,
        Self::IntArrayOf,
        Self::LongArrayOf,
        Self::ShortArrayOf,
        Self::ByteArrayOf,
        Self::CharArrayOf,
        Self::FloatArrayOf,
        Self::DoubleArrayOf,
        Self::BooleanArrayOf,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ArrayOf => "arrayOf",
            Self::EmptyArray => "emptyArray",
            Self::IntArrayOf => "intArrayOf",
            Self::LongArrayOf => "longArrayOf",
            Self::ShortArrayOf => "shortArrayOf",
            Self::ByteArrayOf => "byteArrayOf",
            Self::CharArrayOf => "charArrayOf",
            Self::FloatArrayOf => "floatArrayOf",
            Self::DoubleArrayOf => "doubleArrayOf",
            Self::BooleanArrayOf => "booleanArrayOf",
        }
    }

    pub fn fq_name(self) -> FqName {
        FqName::new("kotlin").child(self.name())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// The array type the factory returns.
    pub fn return_type(self) -> TypeInfo {
        let element = match self {
            Self::ArrayOf | Self::EmptyArray => {
                return TypeInfo::named("kotlin.Array").with_argument(TypeInfo::named("T"));
            }
            Self::IntArrayOf => "kotlin.Int",
            Self::LongArrayOf => "kotlin.Long",
            Self::ShortArrayOf => "kotlin.Short",
            Self::ByteArrayOf => "kotlin.Byte",
            Self::CharArrayOf => "kotlin.Char",
            Self::FloatArrayOf => "kotlin.Float",
            Self::DoubleArrayOf => "kotlin.Double",
            Self::BooleanArrayOf => "kotlin.Boolean",
        };
        TypeInfo::array_of(TypeInfo::named(element))
    }
}

/// What a name, type reference or callee resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    SourceClass(SourceClass),
    ForeignClass(Arc<ForeignClass>),
    ArrayFactory(ArrayFactory),
}

impl Definition {
    pub fn fq_name(&self) -> FqName {
        match self {
            Self::SourceClass(c) => c.fq_name.clone(),
            Self::ForeignClass(c) => c.fq_name().clone(),
            Self::ArrayFactory(f) => f.fq_name(),
        }
    }

    /// Whether this is an annotation class, source or foreign.
    pub fn is_annotation_class(&self) -> bool {
        match self {
            Self::SourceClass(c) => c.is_annotation(),
            Self::ForeignClass(c) => c.is_annotation_type(),
            Self::ArrayFactory(_) => false,
        }
    }

    /// The source declaration, for source classes.
    pub fn source(&self) -> Option<&SyntaxNode> {
        match self {
            Self::SourceClass(c) => Some(c.decl.syntax()),
            _ => None,
        }
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceClass(c) => write!(f, "class {}", c.fq_name),
            Self::ForeignClass(c) => write!(f, "foreign class {}", c.fq_name()),
            Self::ArrayFactory(a) => write!(f, "fun {}", a.fq_name()),
        }
    }
}

use std::fmt;
use std::sync::Arc;

use super::annotation::ClsAnnotationData;
use crate::base::{ConstValue, FqName, Name};

/// An evaluated annotation attribute value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClsMemberValue {
    /// A primitive or string constant.
    Constant(ConstValue),
    /// A nested annotation.
    Annotation(Arc<ClsAnnotationData>),
    /// An array of values (`{a, b}` in Java terms).
    Array(Vec<ClsMemberValue>),
    /// An enum entry such as `RetentionPolicy.RUNTIME`.
    EnumConstant { class: FqName, name: Name },
    /// A class literal such as `String::class`.
    Class(FqName),
}

impl ClsMemberValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::Constant(ConstValue::String(value.into()))
    }

    pub fn int(value: i32) -> Self {
        Self::Constant(ConstValue::Int(value))
    }

    pub fn as_constant(&self) -> Option<&ConstValue> {
        match self {
            Self::Constant(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ClsMemberValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_annotation(&self) -> Option<&ClsAnnotationData> {
        match self {
            Self::Annotation(a) => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for ClsMemberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(c) => write!(f, "{c}"),
            Self::Annotation(a) => write!(f, "{a}"),
            Self::Array(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
            Self::EnumConstant { class, name } => write!(f, "{class}.{name}"),
            Self::Class(name) => write!(f, "{name}.class"),
        }
    }
}

//! Parameter types as far as call binding needs them.

use std::fmt;

use crate::base::FqName;
use crate::parser::TypeRef;

const KOTLIN_PACKAGE: &str = "kotlin";

const PRIMITIVE_ARRAYS: [(&str, &str); 8] = [
    ("Int", "IntArray"),
    ("Long", "LongArray"),
    ("Short", "ShortArray"),
    ("Byte", "ByteArray"),
    ("Char", "CharArray"),
    ("Float", "FloatArray"),
    ("Double", "DoubleArray"),
    ("Boolean", "BooleanArray"),
];

/// A written or foreign type: `Array<String>`, `IntArray`, `kotlin.String?`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    name: FqName,
    arguments: Vec<TypeInfo>,
    nullable: bool,
}

impl TypeInfo {
    pub fn named(name: impl Into<FqName>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn with_argument(mut self, argument: TypeInfo) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// The array type holding `element`s.
    ///
    /// Kotlin primitives map to their specialized array (`Int` to
    /// `IntArray`); everything else to `Array<element>`. Foreign `T[]`
    /// types are modelled the same way.
    pub fn array_of(element: TypeInfo) -> Self {
        if !element.nullable && element.is_kotlin_builtin() {
            if let Some((_, array)) = PRIMITIVE_ARRAYS
                .iter()
                .find(|(primitive, _)| *primitive == element.name.short_name())
            {
                return Self::named(FqName::new(KOTLIN_PACKAGE).child(array));
            }
        }
        Self::named(FqName::new(KOTLIN_PACKAGE).child("Array")).with_argument(element)
    }

    /// Build from a written type reference. Names are kept as written.
    pub fn from_type_ref(type_ref: &TypeRef) -> Option<Self> {
        let mut info = Self::named(type_ref.written_name()?);
        info.arguments = type_ref
            .type_arguments()
            .iter()
            .filter_map(Self::from_type_ref)
            .collect();
        info.nullable = type_ref.is_nullable();
        Some(info)
    }

    pub fn name(&self) -> &FqName {
        &self.name
    }

    pub fn arguments(&self) -> &[TypeInfo] {
        &self.arguments
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether values of this type are arrays (`Array<T>` or a primitive array).
    pub fn is_array(&self) -> bool {
        if !self.is_kotlin_builtin() {
            return false;
        }
        let short = self.name.short_name();
        short == "Array" || PRIMITIVE_ARRAYS.iter().any(|(_, array)| *array == short)
    }

    /// Element type of an array type.
    pub fn element_type(&self) -> Option<TypeInfo> {
        if !self.is_array() {
            return None;
        }
        let short = self.name.short_name();
        if short == "Array" {
            return self.arguments.first().cloned();
        }
        PRIMITIVE_ARRAYS
            .iter()
            .find(|(_, array)| *array == short)
            .map(|(primitive, _)| Self::named(FqName::new(KOTLIN_PACKAGE).child(primitive)))
    }

    /// Unqualified names are taken to be default-imported from `kotlin`.
    fn is_kotlin_builtin(&self) -> bool {
        let parent = self.name.parent();
        parent.is_root() || parent.as_str() == KOTLIN_PACKAGE
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

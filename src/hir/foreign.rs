//! Foreign (compiled, non-Kotlin) class declarations.
//!
//! Java annotation types are described by their element methods. When
//! called from Kotlin the `value` element comes first and is the only one
//! that may be passed positionally; an array-typed `value` accepts any
//! number of positional arguments.

use std::sync::Arc;

use super::types::TypeInfo;
use crate::base::{FqName, Name};
use crate::cls::{ClsMemberValue, DEFAULT_ATTRIBUTE_NAME};

/// An element method of a foreign annotation type (`String value() default "";`).
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignAnnotationMethod {
    name: Name,
    ty: TypeInfo,
    default_value: Option<ClsMemberValue>,
}

impl ForeignAnnotationMethod {
    pub fn new(name: impl Into<Name>, ty: TypeInfo) -> Self {
        Self {
            name: name.into(),
            ty,
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: ClsMemberValue) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn ty(&self) -> &TypeInfo {
        &self.ty
    }

    /// The compiled default value, already evaluated.
    pub fn default_value(&self) -> Option<&ClsMemberValue> {
        self.default_value.as_ref()
    }
}

/// A compiled class visible to resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignClass {
    fq_name: FqName,
    is_annotation_type: bool,
    methods: Vec<Arc<ForeignAnnotationMethod>>,
}

impl ForeignClass {
    /// A plain (non-annotation) class.
    pub fn class(fq_name: impl Into<FqName>) -> Self {
        Self {
            fq_name: fq_name.into(),
            is_annotation_type: false,
            methods: Vec::new(),
        }
    }

    /// An annotation type (`@interface`).
    pub fn annotation(fq_name: impl Into<FqName>) -> Self {
        Self {
            is_annotation_type: true,
            ..Self::class(fq_name)
        }
    }

    pub fn with_method(mut self, method: ForeignAnnotationMethod) -> Self {
        self.methods.push(Arc::new(method));
        self
    }

    pub fn fq_name(&self) -> &FqName {
        &self.fq_name
    }

    pub fn is_annotation_type(&self) -> bool {
        self.is_annotation_type
    }

    /// Element methods in declaration order.
    pub fn methods(&self) -> &[Arc<ForeignAnnotationMethod>] {
        &self.methods
    }

    /// Element methods in Kotlin call order: `value` first, the rest as declared.
    pub fn methods_in_call_order(&self) -> Vec<Arc<ForeignAnnotationMethod>> {
        let (value, rest): (Vec<_>, Vec<_>) = self
            .methods
            .iter()
            .cloned()
            .partition(|m| m.name() == DEFAULT_ATTRIBUTE_NAME);
        value.into_iter().chain(rest).collect()
    }
}

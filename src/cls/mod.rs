//! Compiled (foreign) annotation model.
//!
//! This is the byte-code-oriented view that light facades stand in for:
//! annotations as they appear on compiled members, with fully evaluated
//! attribute values. Values here are immutable and thread-safe; a
//! resolution backend hands them to the light layer as delegates.
//!
//! ## Key Types
//!
//! - [`ClsAnnotation`] - What a compiled annotation exposes
//! - [`ClsAnnotationData`] - The concrete compiled annotation
//! - [`ClsMemberValue`] - Evaluated attribute values
//! - [`ClsModifierListOwner`] - Members carrying a modifier list of annotations

mod annotation;
mod member;
mod value;

pub use annotation::{ClsAnnotation, ClsAnnotationData, ClsReference};
pub use member::{ClsMember, ClsModifierList, ClsModifierListOwner};
pub use value::ClsMemberValue;

/// Attribute name used when a lookup does not name one.
pub const DEFAULT_ATTRIBUTE_NAME: &str = "value";

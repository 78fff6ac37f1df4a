//! Light annotations: read-only facades presenting the compiled
//! annotation interface over source usages.
//!
//! A facade is built per annotation usage without evaluating anything.
//! Attribute values are converted from source on request; the compiled
//! counterpart (the delegate) is computed at most once and only when a
//! query needs it.
//!
//! ## Variants
//!
//! | Variant | Backed by | Delegate |
//! |---------|-----------|----------|
//! | [`SourceAnnotation`] | `@A(...)` entry or nested `A(...)` call | lazily computed (never for nested) |
//! | [`NonSourceAnnotation`] | compiled annotation | supplied |
//! | [`AbsentAnnotation`] | nothing | none |
//! | [`NullabilityAnnotation`] | a [`LightMember`] | last nullability marker of the member |
//!
//! ## Queries
//!
//! Every query takes a [`LightContext`]: the semantic model, the
//! [`LightConfig`] and the diagnostics sink. Facades are single-threaded
//! (`Rc`-based) like the syntax trees they wrap.
//!
//! ```text
//! LightAnnotation::find_attribute_value(cx, name)
//!     │
//!     ▼
//! SemanticModel::resolve_call      ← CallBinding
//!     │
//!     ▼
//! convert_to_member_value          ← literal | nested annotation | array
//! ```

mod absent;
mod annotation;
mod context;
mod convert;
mod error;
mod lazy;
mod member;
mod member_value;
mod non_source;
mod nullability;
mod params;
mod parent;
mod reference;
mod source;

pub use absent::AbsentAnnotation;
pub use annotation::{Delegate, FacadeKind, LightAnnotation};
pub use context::{
    DEFAULT_NULLABILITY_MARKERS, InvariantViolation, LightConfig, LightContext, ViolationKind,
};
pub use convert::{annotation_name, convert_to_member_value};
pub use error::{LightError, Result};
pub use lazy::Provenance;
pub use member::LightMember;
pub use member_value::{LightArrayInitializer, LightLiteral, MemberValue};
pub use non_source::NonSourceAnnotation;
pub use nullability::NullabilityAnnotation;
pub use params::{LightNameValuePair, LightParameterList, NameValuePair};
pub use parent::LightParent;
pub use reference::LightReference;
pub use source::SourceAnnotation;

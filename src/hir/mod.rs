//! High-level IR (HIR) - declarations, name resolution and call binding.
//!
//! This is the resolution backend behind the light facades. It answers
//! three kinds of questions about source trees:
//!
//! - what a callee, type reference or name refers to
//! - how a call's arguments bind to the callee's parameters
//! - whether a call invokes a builtin array factory
//!
//! ## Key Types
//!
//! - [`Analysis`] - Owns parsed files and foreign classes
//! - [`SemanticModel`] - The query interface the light layer consumes
//! - [`SymbolIndex`] - Qualified-name index of source and foreign classes
//! - [`Resolver`] - Name lookup with imports, packages and nesting
//! - [`CallBinding`] - Parameters of a resolved call with their arguments
//!
//! ## Query Flow
//!
//! ```text
//! add_file(text) / add_foreign_class(class)
//!     │
//!     ▼
//! SymbolIndex                 ← qualified name → Definition
//!     │
//!     ▼
//! Resolver (scope of node)    ← imports, package, enclosing classes
//!     │
//!     ▼
//! resolve_call(usage)         ← CallBinding
//! ```

mod analysis;
mod binding;
mod foreign;
mod resolve;
mod symbols;
mod types;

pub use analysis::{Analysis, SemanticModel};
pub use binding::{BoundParameter, CallBinding, ParameterInfo, ParameterOrigin};
pub use foreign::{ForeignAnnotationMethod, ForeignClass};
pub use resolve::{ResolveResult, Resolver, Scope, SymbolIndex};
pub use symbols::{ArrayFactory, Definition, SourceClass};
pub use types::TypeInfo;

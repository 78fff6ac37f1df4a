//! # ktlight-base
//!
//! Lazy light-annotation facades over Kotlin-style annotation usages.
//!
//! A light annotation presents the compiled (byte-code) annotation
//! interface over annotations written in source, without evaluating
//! anything up front: attribute values are converted from the source
//! arguments on request, and the compiled counterpart is built at most
//! once, only when something needs it.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! light     → Annotation facades, member values, parameter lists
//!   ↓
//! hir       → Symbol index, name resolution, call binding
//!   ↓
//! cls       → Compiled annotation model (delegates)
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (FileId, names, constants, TextRange)
//! ```
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use std::sync::Arc;
//! use ktlight::hir::Analysis;
//! use ktlight::light::{LightConfig, LightContext, SourceAnnotation};
//! use ktlight::cls::{ClsAnnotation, ClsAnnotationData};
//!
//! let mut analysis = Analysis::new();
//! let file = analysis.add_file("annotation class A(val x: Int = 1)\n@A(x = 2) class C");
//! let entry = analysis.file(file).unwrap().annotation_entries().next().unwrap();
//!
//! let cx = LightContext::new(Rc::new(analysis), LightConfig::default());
//! let annotation = SourceAnnotation::from_entry(&cx, &entry, |_| {
//!     Ok(Arc::new(ClsAnnotationData::new("A")) as Arc<dyn ClsAnnotation>)
//! })
//! .unwrap();
//! let value = annotation.find_attribute_value(&cx, Some("x")).unwrap();
//! assert_eq!(value.as_literal().unwrap().text(), "2");
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → cls → hir → light)
// ============================================================================

/// Foundation types: FileId, names, constants, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Compiled annotation model
pub mod cls;

/// High-level IR: declarations, name resolution, call binding
pub mod hir;

/// Light annotation facades
pub mod light;

// Re-export foundation types
pub use base::{ConstValue, FileId, FqName, LineIndex, Name, Position, Span, TextRange, TextSize};

// Re-export the facade entry points
pub use hir::{Analysis, SemanticModel};
pub use light::{LightAnnotation, LightConfig, LightContext, LightError, MemberValue};

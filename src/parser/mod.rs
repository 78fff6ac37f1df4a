//! Rowan-based parser for Kotlin-style declarations
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! This is the rust-analyzer approach: we build a lossless CST that preserves
//! all whitespace and comments, then extract an AST layer on top.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//!     ↓
//! HIR → Declarations, call binding, reference resolution
//! ```
//!
//! The grammar covers what the light facades need: packages, imports,
//! classes (including annotation classes with primary constructors),
//! functions, properties, annotation entries and constant-shaped
//! expressions (literals, calls, collection literals, qualified access).

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod lexer;
mod syntax_kind;

pub use ast::*;
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse_file};
pub use syntax_kind::{
    KtLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken,
};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};

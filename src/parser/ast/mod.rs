//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.
//!
//! Equality and hashing of every wrapper follow the wrapped node: two
//! wrappers are equal only when they point at the same node of the same
//! tree, never merely because their text matches.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};
use crate::base::Name;

// ============================================================================
// Helper utilities for reducing code duplication
// ============================================================================

/// Check if a syntax node has a direct child token of the specified kind.
#[inline]
fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == kind)
}

/// Find the first direct child token of the specified kind.
#[inline]
fn find_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

/// Identifier text with Kotlin backticks removed (`` `in` `` → `in`).
#[inline]
fn ident_text(token: &SyntaxToken) -> Name {
    let text = token.text();
    if text.len() > 1 && text.starts_with('`') && text.ends_with('`') {
        Name::new(&text[1..text.len() - 1])
    } else {
        Name::new(text)
    }
}

/// Macro to generate a method that finds the first child of a specific AST type.
macro_rules! first_child_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get the first `", stringify!($type), "` child of this node.")]
        pub fn $name(&self) -> Option<$type> {
            self.0.children().find_map($type::cast)
        }
    };
}

/// Macro to generate a method that returns an iterator over children of a specific AST type.
macro_rules! children_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get all `", stringify!($type), "` children of this node.")]
        pub fn $name(&self) -> impl Iterator<Item = $type> + '_ {
            self.0.children().filter_map($type::cast)
        }
    };
}

/// Macro to generate a method that returns a Vec of children of a specific AST type.
macro_rules! children_vec_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get all `", stringify!($type), "` children of this node as a Vec.")]
        pub fn $name(&self) -> Vec<$type> {
            self.0.children().filter_map($type::cast).collect()
        }
    };
}

/// Macro to generate boolean property methods that check for a specific token kind.
macro_rules! has_token_method {
    ($name:ident, $kind:ident, $example:literal) => {
        #[doc = concat!("Check if this node has the `", stringify!($kind), "` token (e.g., `", $example, "`).")]
        pub fn $name(&self) -> bool {
            has_token(&self.0, SyntaxKind::$kind)
        }
    };
}

/// Macro to generate the `name()` accessor reading the first IDENT token.
macro_rules! ident_name_method {
    () => {
        /// The declared name, with backticks removed.
        pub fn name(&self) -> Option<Name> {
            find_token(&self.0, SyntaxKind::IDENT).map(|t| ident_text(&t))
        }
    };
}

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    /// Find all descendant nodes of a specific AST type
    fn descendants<T: AstNode>(&self) -> impl Iterator<Item = T> {
        self.syntax().descendants().filter_map(T::cast)
    }

    /// The closest ancestor (excluding self) of a specific AST type
    fn ancestor<T: AstNode>(&self) -> Option<T> {
        self.syntax().ancestors().skip(1).find_map(T::cast)
    }
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

/// The closest common ancestor of a set of nodes (inclusive).
///
/// Returns `None` for an empty input or nodes from different trees.
pub fn common_ancestor<'a>(nodes: impl IntoIterator<Item = &'a SyntaxNode>) -> Option<SyntaxNode> {
    let mut iter = nodes.into_iter();
    let mut common = iter.next()?.clone();
    for node in iter {
        let path: Vec<SyntaxNode> = node.ancestors().collect();
        common = common.ancestors().find(|candidate| path.contains(candidate))?;
    }
    Some(common)
}

// Submodules: declared after macros so macro_rules! are in scope
mod declarations;
mod expressions;

// Re-export all public types so external code sees a flat namespace
pub use self::declarations::*;
pub use self::expressions::*;

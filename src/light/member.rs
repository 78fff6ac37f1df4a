//! Member facades owning synthesized annotations.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use super::context::LightContext;
use super::error::Result;
use super::lazy::LazyDelegate;
use super::nullability::NullabilityAnnotation;
use crate::base::Name;
use crate::cls::ClsModifierListOwner;
use crate::parser::SyntaxNode;

#[derive(Debug)]
struct MemberInner {
    name: Name,
    origin: Option<SyntaxNode>,
    delegate: LazyDelegate<Arc<dyn ClsModifierListOwner>>,
}

/// A light member: a source declaration with a lazily built compiled
/// counterpart.
#[derive(Debug, Clone)]
pub struct LightMember(Rc<MemberInner>);

impl LightMember {
    pub fn new(
        name: impl Into<Name>,
        origin: Option<SyntaxNode>,
        compute_delegate: impl FnOnce(&LightContext) -> Result<Arc<dyn ClsModifierListOwner>>
        + 'static,
    ) -> Self {
        Self(Rc::new(MemberInner {
            name: name.into(),
            origin,
            delegate: LazyDelegate::new(compute_delegate),
        }))
    }

    pub fn name(&self) -> &Name {
        &self.0.name
    }

    pub fn origin(&self) -> Option<&SyntaxNode> {
        self.0.origin.as_ref()
    }

    /// The compiled member, computed once.
    pub fn delegate(&self, cx: &LightContext) -> Result<Arc<dyn ClsModifierListOwner>> {
        self.0.delegate.get(cx)
    }

    /// A fresh nullability facade for this member.
    pub fn nullability_annotation(&self) -> NullabilityAnnotation {
        NullabilityAnnotation::new(self.clone())
    }

    pub fn ptr_eq(&self, other: &LightMember) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for LightMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

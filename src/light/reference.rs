//! References from an annotation to its annotation class.

use once_cell::unsync::OnceCell;
use std::rc::Rc;

use super::context::LightContext;
use super::source::SourceAnnotation;
use crate::base::{FqName, Name, TextRange};
use crate::cls::ClsReference;
use crate::hir::Definition;
use crate::parser::{AstNode, CallElement, NameRef, SyntaxNode, TypeRef};

#[derive(Debug, Clone)]
enum ReferenceElement {
    /// `A` of `@A(...)`.
    Type(TypeRef),
    /// `A` of a nested `A(...)`.
    Callee(NameRef),
}

#[derive(Debug)]
pub struct SourceReferenceInner {
    element: ReferenceElement,
    annotation: SourceAnnotation,
    fallback: OnceCell<Option<ClsReference>>,
}

/// The name reference of an annotation.
///
/// Source references resolve through the semantic model and fall back to
/// the delegate's reference when they cannot.
#[derive(Debug, Clone)]
pub enum LightReference {
    Source(Rc<SourceReferenceInner>),
    Compiled(ClsReference),
}

impl LightReference {
    pub(crate) fn for_source(annotation: SourceAnnotation) -> Option<Self> {
        let element = match annotation.origin() {
            CallElement::Annotation(entry) => ReferenceElement::Type(entry.type_ref()?),
            CallElement::Call(call) => ReferenceElement::Callee(call.callee()?),
        };
        Some(Self::Source(Rc::new(SourceReferenceInner {
            element,
            annotation,
            fallback: OnceCell::new(),
        })))
    }

    /// The referenced name as written (short name).
    pub fn reference_name(&self) -> Option<Name> {
        match self {
            Self::Source(inner) => match &inner.element {
                ReferenceElement::Type(t) => t.written_name().map(|n| Name::new(n.short_name())),
                ReferenceElement::Callee(c) => Some(c.name()),
            },
            Self::Compiled(r) => Some(Name::new(r.reference_name())),
        }
    }

    /// The annotation class declaration.
    pub fn resolve(&self, cx: &LightContext) -> Option<Definition> {
        match self {
            Self::Source(inner) => match &inner.element {
                ReferenceElement::Type(t) => cx.model().resolve_type_ref(t),
                ReferenceElement::Callee(c) => cx.model().resolve_reference(c),
            },
            Self::Compiled(_) => None,
        }
    }

    /// The referenced class's qualified name, from resolution or the
    /// delegate's reference.
    pub fn qualified_name(&self, cx: &LightContext) -> Option<FqName> {
        match self {
            Self::Source(inner) => self
                .resolve(cx)
                .map(|d| d.fq_name())
                .or_else(|| fallback(cx, inner).map(|r| r.qualified_name)),
            Self::Compiled(r) => Some(r.qualified_name.clone()),
        }
    }

    pub fn navigation_element(&self) -> Option<SyntaxNode> {
        match self {
            Self::Source(inner) => Some(match &inner.element {
                ReferenceElement::Type(t) => t.syntax().clone(),
                ReferenceElement::Callee(c) => c.syntax().clone(),
            }),
            Self::Compiled(_) => None,
        }
    }

    pub fn text_range(&self) -> Option<TextRange> {
        self.navigation_element().map(|n| n.text_range())
    }

    pub fn annotation(&self) -> Option<&SourceAnnotation> {
        match self {
            Self::Source(inner) => Some(&inner.annotation),
            Self::Compiled(_) => None,
        }
    }
}

fn fallback(cx: &LightContext, inner: &SourceReferenceInner) -> Option<ClsReference> {
    inner
        .fallback
        .get_or_init(|| {
            tracing::trace!(
                "[LIGHT] Reference of {} falls back to its delegate",
                inner.annotation
            );
            inner.annotation.delegate(cx).ok()?.name_reference()
        })
        .clone()
}

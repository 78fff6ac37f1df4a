//! Synthesized nullability annotations of light members.

use std::fmt;
use std::rc::Rc;

use super::absent::AbsentAnnotation;
use super::annotation::{AnnotationBase, Delegate, FacadeKind};
use super::context::LightContext;
use super::error::Result;
use super::member::LightMember;
use super::params::LightParameterList;
use super::parent::LightParent;
use crate::base::FqName;

#[derive(Debug)]
struct NullabilityInner {
    base: AnnotationBase,
    member: LightMember,
}

/// The nullability marker of a member, taken from its compiled delegate.
///
/// The delegate is the last marker annotation on the member's compiled
/// modifier list, or an absent annotation when there is none. Markers
/// carry no attributes.
#[derive(Debug, Clone)]
pub struct NullabilityAnnotation(Rc<NullabilityInner>);

impl NullabilityAnnotation {
    pub fn new(member: LightMember) -> Self {
        let owner = member.clone();
        let base = AnnotationBase::new(
            LightParent::Member(member.clone()),
            FacadeKind::Nullability,
            move |cx| select_marker(cx, &owner),
        );
        Self(Rc::new(NullabilityInner { base, member }))
    }

    pub(crate) fn base(&self) -> &AnnotationBase {
        &self.0.base
    }

    pub fn member(&self) -> &LightMember {
        &self.0.member
    }

    pub fn delegate(&self, cx: &LightContext) -> Result<Delegate> {
        self.0.base.delegate(cx, self)
    }

    pub fn qualified_name(&self, cx: &LightContext) -> Option<FqName> {
        self.delegate(cx).ok()?.qualified_name()
    }

    /// Only marker names can match.
    pub fn fq_name_matches(&self, cx: &LightContext, fq_name: &str) -> bool {
        if !cx.config().is_nullability_marker(fq_name) {
            return false;
        }
        self.qualified_name(cx)
            .map(|name| name == fq_name)
            .unwrap_or(false)
    }

    pub fn parameter_list(&self, cx: &LightContext) -> LightParameterList {
        match self.delegate(cx) {
            Ok(delegate) => delegate.parameter_list(),
            Err(_) => LightParameterList::Empty,
        }
    }

    pub fn ptr_eq(&self, other: &NullabilityAnnotation) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

fn select_marker(cx: &LightContext, member: &LightMember) -> Result<Delegate> {
    let owner = member.delegate(cx)?;
    let marker = owner.modifier_list().and_then(|list| {
        list.annotations()
            .iter()
            .rev()
            .find(|a| {
                a.qualified_name()
                    .is_some_and(|name| cx.config().is_nullability_marker(name))
            })
            .cloned()
    });
    Ok(match marker {
        Some(annotation) => {
            tracing::debug!(
                "[LIGHT] Nullability of '{}' is {:?}",
                member.name(),
                annotation.qualified_name()
            );
            Delegate::Compiled(annotation)
        }
        None => Delegate::Absent(AbsentAnnotation::new(LightParent::Member(member.clone()))),
    })
}

impl fmt::Display for NullabilityAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.base.peek_delegate() {
            Some(Ok(delegate)) => match delegate.qualified_name() {
                Some(name) => write!(f, "@{name}"),
                None => f.write_str("@<no nullability>"),
            },
            _ => write!(f, "@<nullability of {}>", self.0.member.name()),
        }
    }
}

//! The annotation facade: one closed set of variants behind one interface.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::absent::AbsentAnnotation;
use super::context::{LightContext, ViolationKind};
use super::error::{LightError, Result};
use super::lazy::{LazyDelegate, Provenance};
use super::member_value::MemberValue;
use super::non_source::NonSourceAnnotation;
use super::nullability::NullabilityAnnotation;
use super::params::LightParameterList;
use super::parent::LightParent;
use super::reference::LightReference;
use super::source::SourceAnnotation;
use crate::base::{FqName, Name, TextRange};
use crate::cls::{ClsAnnotation, ClsAnnotationData, ClsMemberValue, ClsReference};
use crate::parser::{AstNode, CallElement, SyntaxNode};

/// Which variant a facade is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacadeKind {
    Source,
    NonSource,
    Absent,
    Nullability,
}

impl fmt::Display for FacadeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "source annotation",
            Self::NonSource => "compiled annotation",
            Self::Absent => "absent annotation",
            Self::Nullability => "nullability annotation",
        })
    }
}

/// The compiled-model counterpart a facade forwards to.
#[derive(Debug, Clone)]
pub enum Delegate {
    Compiled(Arc<dyn ClsAnnotation>),
    Absent(AbsentAnnotation),
}

impl Delegate {
    pub fn qualified_name(&self) -> Option<FqName> {
        match self {
            Self::Compiled(a) => a.qualified_name().map(FqName::new),
            Self::Absent(_) => None,
        }
    }

    pub fn find_attribute_value(&self, name: Option<&str>) -> Option<ClsMemberValue> {
        match self {
            Self::Compiled(a) => a.find_attribute_value(name),
            Self::Absent(_) => None,
        }
    }

    pub fn find_or_default_attribute_value(&self, name: Option<&str>) -> Option<ClsMemberValue> {
        match self {
            Self::Compiled(a) => a.find_or_default_attribute_value(name),
            Self::Absent(_) => None,
        }
    }

    pub fn find_declared_attribute_value(&self, name: Option<&str>) -> Option<ClsMemberValue> {
        match self {
            Self::Compiled(a) => a.find_declared_attribute_value(name),
            Self::Absent(_) => None,
        }
    }

    pub fn attributes(&self) -> Vec<(Name, ClsMemberValue)> {
        match self {
            Self::Compiled(a) => a.attributes(),
            Self::Absent(_) => Vec::new(),
        }
    }

    pub fn name_reference(&self) -> Option<ClsReference> {
        match self {
            Self::Compiled(a) => a.name_reference(),
            Self::Absent(_) => None,
        }
    }

    pub fn as_compiled(&self) -> Option<&Arc<dyn ClsAnnotation>> {
        match self {
            Self::Compiled(a) => Some(a),
            Self::Absent(_) => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent(_))
    }

    /// Identity comparison: the same compiled object or the same placeholder.
    pub fn ptr_eq(&self, other: &Delegate) -> bool {
        match (self, other) {
            (Self::Compiled(a), Self::Compiled(b)) => Arc::ptr_eq(a, b),
            (Self::Absent(a), Self::Absent(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub(crate) fn parameter_list(&self) -> LightParameterList {
        match self {
            Self::Compiled(_) => LightParameterList::compiled(self.attributes()),
            Self::Absent(_) => LightParameterList::Empty,
        }
    }

    fn evaluate(&self) -> Option<ClsAnnotationData> {
        let name = self.qualified_name()?;
        Some(
            self.attributes()
                .into_iter()
                .fold(ClsAnnotationData::new(name), |data, (k, v)| {
                    data.with_value(k, v)
                }),
        )
    }
}

/// State shared by the facades that carry a delegate.
#[derive(Debug)]
pub(crate) struct AnnotationBase {
    pub(crate) parent: LightParent,
    pub(crate) kind: FacadeKind,
    delegate: LazyDelegate<Delegate>,
}

impl AnnotationBase {
    pub(crate) fn new(
        parent: LightParent,
        kind: FacadeKind,
        compute: impl FnOnce(&LightContext) -> Result<Delegate> + 'static,
    ) -> Self {
        Self {
            parent,
            kind,
            delegate: LazyDelegate::new(compute),
        }
    }

    pub(crate) fn supplied(parent: LightParent, delegate: Delegate) -> Self {
        Self {
            parent,
            kind: FacadeKind::NonSource,
            delegate: LazyDelegate::ready(delegate),
        }
    }

    /// Pull the delegate, flagging pulls outside the lazy build.
    pub(crate) fn delegate(&self, cx: &LightContext, facade: &dyn fmt::Display) -> Result<Delegate> {
        if self.kind != FacadeKind::NonSource
            && cx.config().verification
            && !cx.in_build_context()
        {
            cx.report(
                ViolationKind::DelegateOutsideBuild,
                self.kind,
                format!("delegate of {facade} requested outside lazy build"),
            );
        }
        self.delegate.get(cx)
    }

    pub(crate) fn peek_delegate(&self) -> Option<&Result<Delegate>> {
        self.delegate.peek()
    }

    pub(crate) fn provenance(&self) -> Option<Provenance> {
        self.delegate.provenance()
    }
}

/// A light annotation: a read-only view presenting the compiled
/// annotation interface over source usages or compiled data.
///
/// Source-backed facades are equal when they wrap the same usage node;
/// every other facade is equal only to itself.
#[derive(Debug, Clone)]
pub enum LightAnnotation {
    Source(SourceAnnotation),
    NonSource(NonSourceAnnotation),
    Absent(AbsentAnnotation),
    Nullability(NullabilityAnnotation),
}

impl LightAnnotation {
    pub fn kind(&self) -> FacadeKind {
        match self {
            Self::Source(_) => FacadeKind::Source,
            Self::NonSource(_) => FacadeKind::NonSource,
            Self::Absent(_) => FacadeKind::Absent,
            Self::Nullability(_) => FacadeKind::Nullability,
        }
    }

    /// `None` only for the absent placeholder (and a nullability facade
    /// that found no marker).
    pub fn qualified_name(&self, cx: &LightContext) -> Option<FqName> {
        match self {
            Self::Source(a) => Some(a.qualified_name().clone()),
            Self::NonSource(a) => a.qualified_name(cx),
            Self::Absent(_) => None,
            Self::Nullability(a) => a.qualified_name(cx),
        }
    }

    /// Annotations have no name of their own.
    pub fn name(&self) -> Option<Name> {
        None
    }

    pub fn delegate(&self, cx: &LightContext) -> Result<Delegate> {
        match self {
            Self::Source(a) => a.delegate(cx),
            Self::NonSource(a) => a.delegate(cx),
            Self::Absent(_) => Err(LightError::unsupported(
                "absent annotation has no delegate",
            )),
            Self::Nullability(a) => a.delegate(cx),
        }
    }

    /// Where the delegate came from, once it has been computed.
    pub fn delegate_provenance(&self) -> Option<Provenance> {
        match self {
            Self::Source(a) => a.base().provenance(),
            Self::NonSource(a) => a.base().provenance(),
            Self::Absent(_) => None,
            Self::Nullability(a) => a.base().provenance(),
        }
    }

    /// The value bound to `name` (default `"value"`) by an explicit
    /// argument, without default fallback.
    pub fn find_attribute_value(&self, cx: &LightContext, name: Option<&str>) -> Option<MemberValue> {
        match self {
            Self::Source(a) => a.find_attribute_value(cx, name),
            Self::NonSource(a) => a.find_attribute_value(cx, name),
            Self::Absent(_) | Self::Nullability(_) => None,
        }
    }

    /// Like [`find_attribute_value`](Self::find_attribute_value), falling
    /// back to the parameter's default when no argument is bound.
    pub fn find_or_default_attribute_value(
        &self,
        cx: &LightContext,
        name: Option<&str>,
    ) -> Option<MemberValue> {
        match self {
            Self::Source(a) => a.find_or_default_attribute_value(cx, name),
            Self::NonSource(a) => a.find_or_default_attribute_value(cx, name),
            Self::Absent(_) | Self::Nullability(_) => None,
        }
    }

    /// Same as [`find_attribute_value`](Self::find_attribute_value).
    pub fn find_declared_attribute_value(
        &self,
        cx: &LightContext,
        name: Option<&str>,
    ) -> Option<MemberValue> {
        self.find_attribute_value(cx, name)
    }

    pub fn fq_name_matches(&self, cx: &LightContext, fq_name: &str) -> bool {
        match self {
            Self::Nullability(a) => a.fq_name_matches(cx, fq_name),
            _ => self
                .qualified_name(cx)
                .map(|name| name == fq_name)
                .unwrap_or(false),
        }
    }

    pub fn parameter_list(&self, cx: &LightContext) -> LightParameterList {
        match self {
            Self::Source(a) => a.parameter_list(),
            Self::NonSource(a) => a.parameter_list(cx),
            Self::Absent(a) => a.parameter_list(),
            Self::Nullability(a) => a.parameter_list(cx),
        }
    }

    pub fn name_reference_element(&self, cx: &LightContext) -> Option<LightReference> {
        match self {
            Self::Source(a) => a.name_reference_element(),
            Self::NonSource(a) => a.name_reference_element(cx),
            Self::Absent(_) | Self::Nullability(_) => None,
        }
    }

    pub fn parent(&self) -> &LightParent {
        match self {
            Self::Source(a) => a.parent(),
            Self::NonSource(a) => &a.base().parent,
            Self::Absent(a) => a.parent(),
            Self::Nullability(a) => &a.base().parent,
        }
    }

    /// The annotated source declaration, when the parent is one.
    pub fn owner(&self) -> Option<SyntaxNode> {
        match self.parent() {
            LightParent::Declaration(node) => Some(node.clone()),
            _ => None,
        }
    }

    /// The backing usage node, for source-backed facades.
    pub fn source(&self) -> Option<&CallElement> {
        match self {
            Self::Source(a) => Some(a.origin()),
            _ => None,
        }
    }

    pub fn navigation_element(&self) -> Option<SyntaxNode> {
        self.source().map(|s| s.syntax().clone())
    }

    pub fn text_range(&self) -> Option<TextRange> {
        self.source().map(|s| s.text_range())
    }

    pub fn can_navigate(&self) -> bool {
        self.source().is_some()
    }

    /// Always fails: facades cannot persist written values.
    pub fn set_declared_attribute_value(
        &self,
        name: Option<&str>,
        value: Option<MemberValue>,
    ) -> Result<MemberValue> {
        let _ = (name, value);
        Err(LightError::ReadOnly(self.kind()))
    }

    /// Remove the backing usage from its source tree.
    pub fn delete(&self) -> Result<()> {
        match self {
            Self::Source(a) => a.delete(),
            _ => Err(LightError::unsupported(format!(
                "{} has no source to delete",
                self.kind()
            ))),
        }
    }

    /// Fold into the compiled model, evaluating every bound attribute.
    pub fn evaluate(&self, cx: &LightContext) -> Option<ClsAnnotationData> {
        match self {
            Self::Source(a) => a.evaluate(cx),
            Self::NonSource(a) => a.delegate(cx).ok()?.evaluate(),
            Self::Absent(_) => None,
            Self::Nullability(a) => a.delegate(cx).ok()?.evaluate(),
        }
    }

    pub fn as_source(&self) -> Option<&SourceAnnotation> {
        match self {
            Self::Source(a) => Some(a),
            _ => None,
        }
    }
}

impl PartialEq for LightAnnotation {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Source(a), Self::Source(b)) => a.origin() == b.origin(),
            (Self::NonSource(a), Self::NonSource(b)) => a.ptr_eq(b),
            (Self::Absent(a), Self::Absent(b)) => a.ptr_eq(b),
            (Self::Nullability(a), Self::Nullability(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Eq for LightAnnotation {}

impl Hash for LightAnnotation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Source(a) => a.origin().hash(state),
            Self::NonSource(a) => a.addr().hash(state),
            Self::Absent(a) => a.addr().hash(state),
            Self::Nullability(a) => a.addr().hash(state),
        }
    }
}

impl fmt::Display for LightAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(a) => fmt::Display::fmt(a, f),
            Self::NonSource(a) => fmt::Display::fmt(a, f),
            Self::Absent(a) => fmt::Display::fmt(a, f),
            Self::Nullability(a) => fmt::Display::fmt(a, f),
        }
    }
}

impl From<SourceAnnotation> for LightAnnotation {
    fn from(a: SourceAnnotation) -> Self {
        Self::Source(a)
    }
}

impl From<NonSourceAnnotation> for LightAnnotation {
    fn from(a: NonSourceAnnotation) -> Self {
        Self::NonSource(a)
    }
}

impl From<AbsentAnnotation> for LightAnnotation {
    fn from(a: AbsentAnnotation) -> Self {
        Self::Absent(a)
    }
}

impl From<NullabilityAnnotation> for LightAnnotation {
    fn from(a: NullabilityAnnotation) -> Self {
        Self::Nullability(a)
    }
}

//! Source-backed annotations: facades over `@A(...)` entries and nested
//! `A(...)` calls.

use once_cell::unsync::OnceCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use super::annotation::{AnnotationBase, Delegate, FacadeKind, LightAnnotation};
use super::context::{LightContext, ViolationKind};
use super::convert::{annotation_name, convert_to_member_value};
use super::error::{LightError, Result};
use super::member_value::{LightArrayInitializer, MemberValue};
use super::params::LightParameterList;
use super::parent::LightParent;
use super::reference::LightReference;
use crate::base::FqName;
use crate::cls::{ClsAnnotation, ClsAnnotationData};
use crate::hir::ParameterOrigin;
use crate::parser::{AnnotationEntry, AstNode, CallElement, CallExpr, Expr, common_ancestor};

#[derive(Debug)]
pub(crate) struct SourceInner {
    qualified_name: FqName,
    origin: CallElement,
    nested: bool,
    base: AnnotationBase,
    parameter_list: OnceCell<LightParameterList>,
}

/// An annotation facade backed by a source usage.
#[derive(Debug, Clone)]
pub struct SourceAnnotation(Rc<SourceInner>);

impl SourceAnnotation {
    /// A facade over `origin` whose delegate is produced by `compute_delegate`
    /// the first time it is requested.
    pub fn new(
        qualified_name: impl Into<FqName>,
        origin: impl Into<CallElement>,
        parent: LightParent,
        compute_delegate: impl FnOnce(&LightContext) -> Result<Arc<dyn ClsAnnotation>> + 'static,
    ) -> Self {
        let base = AnnotationBase::new(parent, FacadeKind::Source, move |cx| {
            compute_delegate(cx).map(Delegate::Compiled)
        });
        Self::from_parts(qualified_name.into(), origin.into(), false, base)
    }

    /// A facade over an annotation entry, named after what its type
    /// reference resolves to (or the written name when it does not resolve).
    pub fn from_entry(
        cx: &LightContext,
        entry: &AnnotationEntry,
        compute_delegate: impl FnOnce(&LightContext) -> Result<Arc<dyn ClsAnnotation>> + 'static,
    ) -> Option<Self> {
        let type_ref = entry.type_ref()?;
        let qualified_name = match cx.model().resolve_type_ref(&type_ref) {
            Some(definition) => definition.fq_name(),
            None => {
                tracing::trace!("[LIGHT] Unresolved annotation type '{}'", type_ref);
                type_ref.written_name()?
            }
        };
        let parent = entry
            .owner()
            .map(LightParent::Declaration)
            .unwrap_or(LightParent::None);
        Some(Self::new(qualified_name, entry.clone(), parent, compute_delegate))
    }

    /// A nested annotation. Its delegate cannot be computed.
    pub(crate) fn nested(qualified_name: FqName, call: CallExpr, parent: LightParent) -> Self {
        let base = AnnotationBase::new(parent, FacadeKind::Source, |_| {
            Err(LightError::unsupported(
                "cls delegate is not supported for nested annotations",
            ))
        });
        Self::from_parts(qualified_name, CallElement::Call(call), true, base)
    }

    fn from_parts(
        qualified_name: FqName,
        origin: CallElement,
        nested: bool,
        base: AnnotationBase,
    ) -> Self {
        Self(Rc::new(SourceInner {
            qualified_name,
            origin,
            nested,
            base,
            parameter_list: OnceCell::new(),
        }))
    }

    pub fn qualified_name(&self) -> &FqName {
        &self.0.qualified_name
    }

    pub fn origin(&self) -> &CallElement {
        &self.0.origin
    }

    pub fn parent(&self) -> &LightParent {
        &self.0.base.parent
    }

    pub fn is_nested(&self) -> bool {
        self.0.nested
    }

    pub(crate) fn base(&self) -> &AnnotationBase {
        &self.0.base
    }

    pub fn delegate(&self, cx: &LightContext) -> Result<Delegate> {
        if self.0.nested {
            cx.report(
                ViolationKind::NestedAnnotationDelegate,
                FacadeKind::Source,
                format!("delegate of nested {self} requested"),
            );
        }
        self.0.base.delegate(cx, self)
    }

    pub fn find_attribute_value(&self, cx: &LightContext, name: Option<&str>) -> Option<MemberValue> {
        self.attribute_value(cx, name, false)
    }

    pub fn find_or_default_attribute_value(
        &self,
        cx: &LightContext,
        name: Option<&str>,
    ) -> Option<MemberValue> {
        self.attribute_value(cx, name, true)
    }

    pub fn find_declared_attribute_value(
        &self,
        cx: &LightContext,
        name: Option<&str>,
    ) -> Option<MemberValue> {
        self.find_attribute_value(cx, name)
    }

    fn attribute_value(
        &self,
        cx: &LightContext,
        name: Option<&str>,
        use_default: bool,
    ) -> Option<MemberValue> {
        let name = name.unwrap_or(cx.config().default_attribute_name.as_str());
        let Some(binding) = cx.model().resolve_call(self.origin()) else {
            tracing::trace!("[LIGHT] {} does not resolve to a call", self);
            return None;
        };
        let bound = binding.find(name)?;

        let expressions: Vec<Expr> = bound
            .arguments
            .iter()
            .filter_map(|a| a.expression())
            .collect();
        if let Some(first) = expressions.first() {
            if bound.parameter.ty.is_array()
                && (expressions.len() > 1
                    || first.is_literal()
                    || annotation_name(cx, first).is_some())
            {
                let source = common_ancestor(expressions.iter().map(|e| e.syntax()))?;
                let array = LightArrayInitializer::new(source, self.as_parent(), expressions);
                return Some(MemberValue::Array(array));
            }
            if let Some(value) = convert_to_member_value(cx, self.as_parent(), first.clone()) {
                return Some(value);
            }
        }

        if !use_default || !bound.parameter.declares_or_inherits_default() {
            return None;
        }
        match &bound.parameter.origin {
            ParameterOrigin::Source(parameter) => {
                let default = parameter.default_value()?;
                convert_to_member_value(cx, self.as_parent(), default)
            }
            ParameterOrigin::Foreign(method) => {
                method.default_value().cloned().map(MemberValue::Compiled)
            }
        }
    }

    /// One name-value pair per supplied argument, built once.
    pub fn parameter_list(&self) -> LightParameterList {
        self.0
            .parameter_list
            .get_or_init(|| LightParameterList::source(self.downgrade(), self.origin().clone()))
            .clone()
    }

    pub fn name_reference_element(&self) -> Option<LightReference> {
        LightReference::for_source(self.clone())
    }

    /// Detach the backing usage from its tree.
    pub fn delete(&self) -> Result<()> {
        let node = self.origin().syntax();
        if node.parent().is_none() {
            return Err(LightError::invalid_tree(format!(
                "{self} is not attached to a source tree"
            )));
        }
        tracing::debug!("[LIGHT] Deleting {}", self);
        node.detach();
        Ok(())
    }

    /// Fold into the compiled model: bound arguments become values,
    /// omitted parameters with defaults become defaults.
    pub fn evaluate(&self, cx: &LightContext) -> Option<ClsAnnotationData> {
        let binding = cx.model().resolve_call(self.origin())?;
        let mut data = ClsAnnotationData::new(self.qualified_name().clone());
        for bound in binding.parameters() {
            let name = bound.parameter.name.as_str();
            if bound.arguments.is_empty() {
                if let Some(value) = self
                    .find_or_default_attribute_value(cx, Some(name))
                    .and_then(|v| v.evaluate(cx))
                {
                    data = data.with_default(name, value);
                }
            } else if let Some(value) = self
                .find_attribute_value(cx, Some(name))
                .and_then(|v| v.evaluate(cx))
            {
                data = data.with_value(name, value);
            }
        }
        Some(data)
    }

    pub(crate) fn downgrade(&self) -> Weak<SourceInner> {
        Rc::downgrade(&self.0)
    }

    pub(crate) fn upgrade(inner: &Weak<SourceInner>) -> Option<Self> {
        inner.upgrade().map(Self)
    }

    fn as_parent(&self) -> LightParent {
        LightParent::Annotation(LightAnnotation::Source(self.clone()))
    }
}

impl fmt::Display for SourceAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0.qualified_name)
    }
}

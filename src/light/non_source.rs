//! Annotations backed by a supplied compiled delegate.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use super::annotation::{AnnotationBase, Delegate};
use super::context::LightContext;
use super::error::Result;
use super::member_value::MemberValue;
use super::params::LightParameterList;
use super::parent::LightParent;
use super::reference::LightReference;
use crate::base::FqName;
use crate::cls::ClsAnnotation;

/// A facade over a compiled annotation. Every query forwards to the delegate.
#[derive(Debug, Clone)]
pub struct NonSourceAnnotation(Rc<AnnotationBase>);

impl NonSourceAnnotation {
    pub fn new(parent: LightParent, delegate: Arc<dyn ClsAnnotation>) -> Self {
        Self(Rc::new(AnnotationBase::supplied(
            parent,
            Delegate::Compiled(delegate),
        )))
    }

    pub(crate) fn base(&self) -> &AnnotationBase {
        &self.0
    }

    pub fn delegate(&self, cx: &LightContext) -> Result<Delegate> {
        self.0.delegate(cx, self)
    }

    pub fn qualified_name(&self, cx: &LightContext) -> Option<FqName> {
        self.delegate(cx).ok()?.qualified_name()
    }

    pub fn find_attribute_value(&self, cx: &LightContext, name: Option<&str>) -> Option<MemberValue> {
        self.delegate(cx)
            .ok()?
            .find_attribute_value(name)
            .map(MemberValue::Compiled)
    }

    pub fn find_or_default_attribute_value(
        &self,
        cx: &LightContext,
        name: Option<&str>,
    ) -> Option<MemberValue> {
        self.delegate(cx)
            .ok()?
            .find_or_default_attribute_value(name)
            .map(MemberValue::Compiled)
    }

    pub fn find_declared_attribute_value(
        &self,
        cx: &LightContext,
        name: Option<&str>,
    ) -> Option<MemberValue> {
        self.delegate(cx)
            .ok()?
            .find_declared_attribute_value(name)
            .map(MemberValue::Compiled)
    }

    pub fn parameter_list(&self, cx: &LightContext) -> LightParameterList {
        match self.delegate(cx) {
            Ok(delegate) => delegate.parameter_list(),
            Err(_) => LightParameterList::Empty,
        }
    }

    pub fn name_reference_element(&self, cx: &LightContext) -> Option<LightReference> {
        self.delegate(cx)
            .ok()?
            .name_reference()
            .map(LightReference::Compiled)
    }

    pub fn ptr_eq(&self, other: &NonSourceAnnotation) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl fmt::Display for NonSourceAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.peek_delegate() {
            Some(Ok(delegate)) => match delegate.qualified_name() {
                Some(name) => write!(f, "@{name}"),
                None => f.write_str("@<compiled>"),
            },
            _ => f.write_str("@<compiled>"),
        }
    }
}

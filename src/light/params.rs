//! Parameter list views: the supplied name-value pairs of an annotation.

use once_cell::unsync::OnceCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::context::LightContext;
use super::convert::convert_to_member_value;
use super::member_value::MemberValue;
use super::parent::LightParent;
use super::source::{SourceAnnotation, SourceInner};
use crate::base::Name;
use crate::cls::ClsMemberValue;
use crate::parser::{CallElement, Expr, ValueArgument};

#[derive(Debug)]
pub struct ParamListInner {
    annotation: Weak<SourceInner>,
    origin: CallElement,
    attributes: OnceCell<Vec<LightNameValuePair>>,
}

/// The attributes written on an annotation.
#[derive(Debug, Clone)]
pub enum LightParameterList {
    /// One pair per supplied source argument, built on first access.
    Source(Rc<ParamListInner>),
    /// Attributes of a compiled delegate.
    Compiled(Rc<[(Name, ClsMemberValue)]>),
    /// Permanently empty.
    Empty,
}

impl LightParameterList {
    pub(crate) fn source(annotation: Weak<SourceInner>, origin: CallElement) -> Self {
        Self::Source(Rc::new(ParamListInner {
            annotation,
            origin,
            attributes: OnceCell::new(),
        }))
    }

    pub(crate) fn compiled(attributes: Vec<(Name, ClsMemberValue)>) -> Self {
        if attributes.is_empty() {
            return Self::Empty;
        }
        Self::Compiled(attributes.into())
    }

    pub fn attributes(&self) -> Vec<NameValuePair> {
        match self {
            Self::Source(inner) => source_pairs(inner)
                .iter()
                .cloned()
                .map(NameValuePair::Source)
                .collect(),
            Self::Compiled(attributes) => attributes
                .iter()
                .map(|(name, value)| NameValuePair::Compiled {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
            Self::Empty => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Source(inner) => source_pairs(inner).len(),
            Self::Compiled(attributes) => attributes.len(),
            Self::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The source annotation this list belongs to, while it is alive.
    pub fn annotation(&self) -> Option<SourceAnnotation> {
        match self {
            Self::Source(inner) => SourceAnnotation::upgrade(&inner.annotation),
            _ => None,
        }
    }

    pub fn ptr_eq(&self, other: &LightParameterList) -> bool {
        match (self, other) {
            (Self::Source(a), Self::Source(b)) => Rc::ptr_eq(a, b),
            (Self::Compiled(a), Self::Compiled(b)) => Rc::ptr_eq(a, b),
            (Self::Empty, Self::Empty) => true,
            _ => false,
        }
    }
}

fn source_pairs(inner: &Rc<ParamListInner>) -> &Vec<LightNameValuePair> {
    inner.attributes.get_or_init(|| {
        let list = Rc::downgrade(inner);
        inner
            .origin
            .value_arguments()
            .into_iter()
            .map(|argument| {
                LightNameValuePair(Rc::new(PairInner {
                    argument,
                    list: list.clone(),
                }))
            })
            .collect()
    })
}

/// One attribute of a parameter list.
#[derive(Debug, Clone)]
pub enum NameValuePair {
    Source(LightNameValuePair),
    Compiled { name: Name, value: ClsMemberValue },
}

impl NameValuePair {
    /// The written name; `None` for positional source arguments.
    pub fn name(&self) -> Option<Name> {
        match self {
            Self::Source(pair) => pair.name(),
            Self::Compiled { name, .. } => Some(name.clone()),
        }
    }

    pub fn value(&self, cx: &LightContext) -> Option<MemberValue> {
        match self {
            Self::Source(pair) => pair.value(cx),
            Self::Compiled { value, .. } => Some(MemberValue::Compiled(value.clone())),
        }
    }

    pub fn literal_text(&self) -> Option<String> {
        match self {
            Self::Source(pair) => pair.literal_text(),
            Self::Compiled { value, .. } => value.as_constant().map(|c| c.to_string()),
        }
    }
}

#[derive(Debug)]
struct PairInner {
    argument: ValueArgument,
    list: Weak<ParamListInner>,
}

/// A supplied `name = value` (or positional) argument. The value is
/// converted on each request.
#[derive(Debug, Clone)]
pub struct LightNameValuePair(Rc<PairInner>);

impl LightNameValuePair {
    pub fn name(&self) -> Option<Name> {
        self.0.argument.name()
    }

    pub fn argument(&self) -> &ValueArgument {
        &self.0.argument
    }

    pub fn expression(&self) -> Option<Expr> {
        self.0.argument.expression()
    }

    pub fn value(&self, cx: &LightContext) -> Option<MemberValue> {
        let expression = self.expression()?;
        convert_to_member_value(cx, LightParent::NameValuePair(self.clone()), expression)
    }

    /// Source text of a literal value.
    pub fn literal_text(&self) -> Option<String> {
        self.expression()
            .filter(Expr::is_literal)
            .map(|e| e.to_string())
    }

    pub fn parameter_list(&self) -> Option<LightParameterList> {
        self.0.list.upgrade().map(LightParameterList::Source)
    }

    /// The annotation owning this pair's list.
    pub fn annotation(&self) -> Option<SourceAnnotation> {
        let list = self.0.list.upgrade()?;
        SourceAnnotation::upgrade(&list.annotation)
    }

    pub fn ptr_eq(&self, other: &LightNameValuePair) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for LightNameValuePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.argument, f)
    }
}

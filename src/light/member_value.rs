//! Converted attribute values.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use super::annotation::LightAnnotation;
use super::context::LightContext;
use super::convert::convert_to_member_value;
use super::parent::LightParent;
use crate::base::ConstValue;
use crate::cls::ClsMemberValue;
use crate::parser::{AstNode, Expr, SyntaxNode};

/// One converted attribute value. Created fresh on every lookup.
#[derive(Debug, Clone)]
pub enum MemberValue {
    /// A string or constant literal.
    Literal(LightLiteral),
    /// A nested annotation usage.
    Annotation(LightAnnotation),
    Array(LightArrayInitializer),
    /// A value taken from the compiled model (foreign defaults, compiled delegates).
    Compiled(ClsMemberValue),
}

impl MemberValue {
    /// The element logically containing this value; compiled values have none.
    pub fn parent(&self) -> Option<&LightParent> {
        match self {
            Self::Literal(l) => Some(l.parent()),
            Self::Annotation(a) => Some(a.parent()),
            Self::Array(a) => Some(a.parent()),
            Self::Compiled(_) => None,
        }
    }

    pub fn source(&self) -> Option<SyntaxNode> {
        match self {
            Self::Literal(l) => Some(l.expression().syntax().clone()),
            Self::Annotation(a) => a.navigation_element(),
            Self::Array(a) => Some(a.source().clone()),
            Self::Compiled(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&LightLiteral> {
        match self {
            Self::Literal(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_annotation(&self) -> Option<&LightAnnotation> {
        match self {
            Self::Annotation(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&LightArrayInitializer> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Fold into the compiled model, for structural comparison.
    ///
    /// Literals without a constant value (interpolated templates) and
    /// unresolvable nested annotations evaluate to `None`; array elements
    /// that do not evaluate are dropped.
    pub fn evaluate(&self, cx: &LightContext) -> Option<ClsMemberValue> {
        match self {
            Self::Literal(l) => l.value().map(ClsMemberValue::Constant),
            Self::Annotation(a) => a
                .evaluate(cx)
                .map(|data| ClsMemberValue::Annotation(Arc::new(data))),
            Self::Array(a) => Some(ClsMemberValue::Array(
                a.initializers(cx)
                    .iter()
                    .filter_map(|v| v.evaluate(cx))
                    .collect(),
            )),
            Self::Compiled(v) => Some(v.clone()),
        }
    }
}

/// A literal attribute value.
#[derive(Debug, Clone)]
pub struct LightLiteral {
    expression: Expr,
    parent: LightParent,
}

impl LightLiteral {
    pub(crate) fn new(expression: Expr, parent: LightParent) -> Self {
        Self { expression, parent }
    }

    /// The literal's source text.
    pub fn text(&self) -> String {
        self.expression.to_string()
    }

    /// The constant value; `None` for string templates with interpolation.
    pub fn value(&self) -> Option<ConstValue> {
        self.expression.const_value()
    }

    pub fn expression(&self) -> &Expr {
        &self.expression
    }

    pub fn parent(&self) -> &LightParent {
        &self.parent
    }
}

impl fmt::Display for LightLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.expression, f)
    }
}

#[derive(Debug)]
struct ArrayInner {
    source: SyntaxNode,
    parent: LightParent,
    elements: Vec<Expr>,
}

/// An array attribute value over a list of element expressions.
#[derive(Debug, Clone)]
pub struct LightArrayInitializer(Rc<ArrayInner>);

impl LightArrayInitializer {
    pub(crate) fn new(source: SyntaxNode, parent: LightParent, elements: Vec<Expr>) -> Self {
        Self(Rc::new(ArrayInner {
            source,
            parent,
            elements,
        }))
    }

    /// The node spanning every element: the common ancestor of the
    /// arguments, the collection literal, or the array factory call.
    pub fn source(&self) -> &SyntaxNode {
        &self.0.source
    }

    pub fn parent(&self) -> &LightParent {
        &self.0.parent
    }

    /// Element expressions before conversion.
    pub fn elements(&self) -> &[Expr] {
        &self.0.elements
    }

    /// Converted elements in order; elements that do not convert are skipped.
    pub fn initializers(&self, cx: &LightContext) -> Vec<MemberValue> {
        self.0
            .elements
            .iter()
            .filter_map(|e| convert_to_member_value(cx, LightParent::Array(self.clone()), e.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &LightArrayInitializer) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

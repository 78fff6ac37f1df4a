//! Conversion of argument expressions into member values.

use super::context::LightContext;
use super::member_value::{LightArrayInitializer, LightLiteral, MemberValue};
use super::parent::LightParent;
use super::source::SourceAnnotation;
use crate::base::FqName;
use crate::parser::{AstNode, CallElement, CallExpr, Expr};

/// Convert one argument expression.
///
/// Literals become literal values, calls to annotation classes become
/// nested annotations, array factory calls and non-empty collection
/// literals become arrays. Any other shape has no static value.
pub fn convert_to_member_value(
    cx: &LightContext,
    parent: LightParent,
    expression: Expr,
) -> Option<MemberValue> {
    match expression.unwrap_call() {
        expr @ (Expr::StringTemplate(_) | Expr::Constant(_)) => {
            Some(MemberValue::Literal(LightLiteral::new(expr, parent)))
        }
        Expr::Call(call) => {
            if let Some(name) = annotation_name_of_call(cx, &call) {
                let nested = SourceAnnotation::nested(name, call, parent);
                return Some(MemberValue::Annotation(nested.into()));
            }
            if cx.model().is_array_function_call(&call) {
                let elements = call
                    .value_arguments()
                    .iter()
                    .filter_map(|a| a.expression())
                    .collect();
                let source = call.syntax().clone();
                return Some(MemberValue::Array(LightArrayInitializer::new(
                    source, parent, elements,
                )));
            }
            tracing::trace!("[LIGHT] '{}' is neither an annotation nor an array", call);
            None
        }
        Expr::CollectionLiteral(list) => {
            let elements = list.inner_expressions();
            if elements.is_empty() {
                return None;
            }
            Some(MemberValue::Array(LightArrayInitializer::new(
                list.syntax().clone(),
                parent,
                elements,
            )))
        }
        _ => None,
    }
}

/// The qualified name of the annotation class an expression constructs.
pub fn annotation_name(cx: &LightContext, expression: &Expr) -> Option<FqName> {
    match expression.clone().unwrap_call() {
        Expr::Call(call) => annotation_name_of_call(cx, &call),
        Expr::NameRef(name) => cx
            .model()
            .resolve_reference(&name)
            .filter(|d| d.is_annotation_class())
            .map(|d| d.fq_name()),
        _ => None,
    }
}

fn annotation_name_of_call(cx: &LightContext, call: &CallExpr) -> Option<FqName> {
    cx.model()
        .resolve_callee(&CallElement::Call(call.clone()))
        .filter(|d| d.is_annotation_class())
        .map(|d| d.fq_name())
}

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

//! Nested annotation values: `@Outer(Inner(1))`.

use ktlight::base::ConstValue;
use ktlight::cls::ClsMemberValue;
use ktlight::light::{FacadeKind, LightAnnotation, LightConfig, LightError, LightParent};

use crate::helpers::light_helpers::{fixture_with, light_fixture, literal};
use crate::helpers::source_fixtures::{ANNOTATION_CLASSES, usage};

fn nested(value: &ktlight::light::MemberValue) -> LightAnnotation {
    value
        .as_annotation()
        .unwrap_or_else(|| panic!("expected a nested annotation, got {value:?}"))
        .clone()
}

#[test]
fn test_nested_annotation_value() {
    let fixture = light_fixture("@Outer(Inner(1)) class C");
    let inner = nested(&fixture.attribute(0, Some("inner")).unwrap());

    assert_eq!(inner.kind(), FacadeKind::Source);
    assert_eq!(inner.qualified_name(&fixture.cx).unwrap().as_str(), "anno.Inner");
    assert!(inner.as_source().unwrap().is_nested());

    let v = inner.find_attribute_value(&fixture.cx, Some("v")).unwrap();
    assert_eq!(literal(&v), ConstValue::Int(1));
    assert!(inner.find_attribute_value(&fixture.cx, Some("w")).is_none());
    let w = inner
        .find_or_default_attribute_value(&fixture.cx, Some("w"))
        .unwrap();
    assert_eq!(literal(&w), ConstValue::Int(5));
}

#[test]
fn test_qualified_nested_call() {
    let fixture = light_fixture("@Outer(anno.Inner(2)) class C");
    let inner = nested(&fixture.attribute(0, Some("inner")).unwrap());
    assert_eq!(inner.qualified_name(&fixture.cx).unwrap().as_str(), "anno.Inner");
    let v = inner.find_attribute_value(&fixture.cx, Some("v")).unwrap();
    assert_eq!(literal(&v), ConstValue::Int(2));
}

#[test]
fn test_nested_parent_is_the_enclosing_annotation() {
    let fixture = light_fixture("@Outer(Inner(1)) class C");
    let outer = fixture.annotation(0);
    let inner = nested(&outer.find_attribute_value(&fixture.cx, Some("inner")).unwrap());

    let LightParent::Annotation(parent) = inner.parent() else {
        panic!("expected an annotation parent, got {:?}", inner.parent());
    };
    assert_eq!(parent, &outer);
    assert!(inner.owner().is_none());
    assert!(outer.owner().is_some());
}

#[test]
fn test_single_nested_annotation_is_wrapped_for_array_parameter() {
    let fixture = light_fixture("@Outer(Inner(1), Inner(2)) class C");
    let others = fixture.attribute(0, Some("others")).unwrap();
    let elements = others.as_array().unwrap().initializers(&fixture.cx);
    assert_eq!(elements.len(), 1);
    let element = nested(&elements[0]);
    let v = element.find_attribute_value(&fixture.cx, Some("v")).unwrap();
    assert_eq!(literal(&v), ConstValue::Int(2));
}

#[test]
fn test_array_of_nested_annotations() {
    let fixture = light_fixture("@Outer(Inner(1), others = [Inner(2), Inner(3)]) class C");
    let others = fixture.attribute(0, Some("others")).unwrap();
    let values: Vec<_> = others
        .as_array()
        .unwrap()
        .initializers(&fixture.cx)
        .iter()
        .map(|e| {
            let v = nested(e).find_attribute_value(&fixture.cx, Some("v")).unwrap();
            literal(&v)
        })
        .collect();
    assert_eq!(values, vec![ConstValue::Int(2), ConstValue::Int(3)]);
}

#[test]
fn test_empty_array_default_has_no_value() {
    let fixture = light_fixture("@Outer(Inner(1)) class C");
    assert!(fixture.attribute_or_default(0, Some("others")).is_none());
}

#[test]
fn test_nested_delegate_is_unsupported() {
    let fixture = fixture_with(
        &[ANNOTATION_CLASSES, &usage("@Outer(Inner(1)) class C")],
        Vec::new(),
        LightConfig::verifying(),
    );
    let inner = nested(&fixture.attribute(0, Some("inner")).unwrap());
    let err = fixture.cx.lazy_build(|| inner.delegate(&fixture.cx)).unwrap_err();
    assert!(matches!(err, LightError::UnsupportedOperation(_)));
    assert_eq!(fixture.cx.take_violations().len(), 1);

    // The cached failure is returned again and reported again.
    assert!(inner.delegate(&fixture.cx).is_err());
    assert!(!fixture.cx.take_violations().is_empty());
}

#[test]
fn test_nested_values_evaluate_without_delegates() {
    let fixture = light_fixture("@Outer(Inner(1)) class C");
    let data = fixture.annotation(0).evaluate(&fixture.cx).unwrap();
    let Some(ClsMemberValue::Annotation(inner)) = data.values().get("inner") else {
        panic!("expected a nested annotation in {data}");
    };
    assert_eq!(inner.fq_name().unwrap().as_str(), "anno.Inner");
    assert_eq!(inner.values().get("v"), Some(&ClsMemberValue::int(1)));
    assert_eq!(inner.defaults().get("w"), Some(&ClsMemberValue::int(5)));
}

#[test]
fn test_nested_name_reference() {
    let fixture = light_fixture("@Outer(Inner(1)) class C");
    let inner = nested(&fixture.attribute(0, Some("inner")).unwrap());
    let reference = inner.name_reference_element(&fixture.cx).unwrap();
    assert_eq!(reference.reference_name().as_deref(), Some("Inner"));
    assert_eq!(
        reference.qualified_name(&fixture.cx).unwrap().as_str(),
        "anno.Inner"
    );
}

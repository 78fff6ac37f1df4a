#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

//! Attribute lookup on source-backed facades.

use rstest::rstest;

use ktlight::base::ConstValue;
use ktlight::cls::ClsMemberValue;
use ktlight::hir::{ForeignAnnotationMethod, ForeignClass, TypeInfo};
use ktlight::light::{LightConfig, MemberValue};

use crate::helpers::light_helpers::{array_literals, fixture_with, light_fixture, literal};
use crate::helpers::source_fixtures::{ANNOTATION_CLASSES, usage};

#[test]
fn test_named_literal_argument() {
    let fixture = light_fixture("@Named(x = 1) class C");
    let value = fixture.attribute(0, Some("x")).unwrap();
    assert_eq!(literal(&value), ConstValue::Int(1));
    assert_eq!(value.as_literal().unwrap().text(), "1");
}

#[rstest]
#[case("@Single(\"s\") class C")]
#[case("@Single(value = \"s\") class C")]
fn test_value_is_the_default_name(#[case] body: &str) {
    let fixture = light_fixture(body);
    let implicit = fixture.attribute(0, None).unwrap();
    let explicit = fixture.attribute(0, Some("value")).unwrap();
    assert_eq!(literal(&implicit), literal(&explicit));
    assert_eq!(literal(&implicit), ConstValue::String("s".to_string()));
}

#[test]
fn test_configured_default_attribute_name() {
    let fixture = fixture_with(
        &[ANNOTATION_CLASSES, &usage("@Named(x = 3) class C")],
        Vec::new(),
        LightConfig::default().with_default_attribute_name("x"),
    );
    assert_eq!(literal(&fixture.attribute(0, None).unwrap()), ConstValue::Int(3));
}

#[rstest]
#[case::vararg_single("@Many(1) class C", vec![1])]
#[case::vararg_several("@Many(1, 2, 3) class C", vec![1, 2, 3])]
#[case::collection_literal("@Numbers([1]) class C", vec![1])]
#[case::array_factory("@Numbers(intArrayOf(4, 5)) class C", vec![4, 5])]
#[case::spread_factory("@Many(*intArrayOf(6)) class C", vec![6])]
fn test_array_arguments(#[case] body: &str, #[case] expected: Vec<i32>) {
    let fixture = light_fixture(body);
    let value = fixture.attribute(0, None).unwrap();
    let expected: Vec<_> = expected.into_iter().map(ConstValue::Int).collect();
    assert_eq!(array_literals(&fixture.cx, &value), expected);
}

#[test]
fn test_bare_and_bracketed_element_agree() {
    let bare = light_fixture("@Numbers(1) class C");
    let bracketed = light_fixture("@Numbers([1]) class C");
    let bare_value = bare.attribute(0, None).unwrap();
    let bracketed_value = bracketed.attribute(0, None).unwrap();
    assert_eq!(
        array_literals(&bare.cx, &bare_value),
        array_literals(&bracketed.cx, &bracketed_value)
    );
    assert_eq!(array_literals(&bare.cx, &bare_value), vec![ConstValue::Int(1)]);
}

#[rstest]
#[case::empty_factory("@Numbers(intArrayOf()) class C", Some(0))]
#[case::empty_collection_literal("@Numbers([]) class C", None)]
#[case::empty_vararg("@Many() class C", None)]
fn test_empty_array_arguments(#[case] body: &str, #[case] expected: Option<usize>) {
    let fixture = light_fixture(body);
    let value = fixture.attribute(0, None);
    assert_eq!(
        value.map(|v| array_literals(&fixture.cx, &v).len()),
        expected
    );
}

#[test]
fn test_single_literal_is_wrapped_for_array_parameter() {
    let fixture = light_fixture("@Tags(\"a\") class C");
    let value = fixture.attribute(0, None).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.elements().len(), 1);
    assert_eq!(
        array_literals(&fixture.cx, &value),
        vec![ConstValue::String("a".to_string())]
    );
}

#[test]
fn test_wrapped_array_spans_every_argument() {
    let fixture = light_fixture("@Many(1, 2) class C");
    let value = fixture.attribute(0, None).unwrap();
    let source = value.source().unwrap();
    assert!(source.text().to_string().contains("1, 2"));
}

#[rstest]
#[case::source_default("@Named(x = 1) class C", "label", Some(ConstValue::String("none".to_string())))]
#[case::no_default("@Named(label = \"l\") class C", "x", None)]
#[case::no_such_parameter("@Named(x = 1) class C", "missing", None)]
#[case::no_parameters("@Flag class C", "value", None)]
fn test_default_fallback(
    #[case] body: &str,
    #[case] name: &str,
    #[case] expected: Option<ConstValue>,
) {
    let fixture = light_fixture(body);
    let value = fixture.attribute_or_default(0, Some(name));
    assert_eq!(value.as_ref().map(literal), expected);
    assert!(fixture.attribute(0, Some(name)).is_none());
}

#[test]
fn test_array_default() {
    let fixture = light_fixture("@Numbers class C");
    let value = fixture.attribute_or_default(0, None).unwrap();
    assert_eq!(
        array_literals(&fixture.cx, &value),
        vec![ConstValue::Int(7), ConstValue::Int(8)]
    );
    assert!(fixture.attribute(0, None).is_none());
}

#[test]
fn test_lookup_distinguishes_bound_from_default() {
    let fixture = light_fixture("@Named(x = 1) class C");
    let annotation = fixture.annotation(0);
    let cx = &fixture.cx;

    assert!(annotation.find_attribute_value(cx, Some("label")).is_none());
    assert!(annotation.find_declared_attribute_value(cx, Some("label")).is_none());
    let label = annotation
        .find_or_default_attribute_value(cx, Some("label"))
        .unwrap();
    assert_eq!(literal(&label), ConstValue::String("none".to_string()));

    let x = annotation.find_attribute_value(cx, Some("x")).unwrap();
    let x_or_default = annotation.find_or_default_attribute_value(cx, Some("x")).unwrap();
    assert_eq!(literal(&x), literal(&x_or_default));
}

#[test]
fn test_declared_value_wins_over_default() {
    let fixture = light_fixture("@Named(x = 1, label = \"set\") class C");
    let declared = fixture.attribute(0, Some("label")).unwrap();
    assert_eq!(literal(&declared), ConstValue::String("set".to_string()));
    let value = fixture.attribute_or_default(0, Some("label")).unwrap();
    assert_eq!(literal(&value), ConstValue::String("set".to_string()));
}

#[test]
fn test_unresolved_annotation_has_no_values() {
    let fixture = light_fixture("@Missing(x = 1) class C");
    let annotation = fixture.annotation(0);
    assert_eq!(
        annotation.qualified_name(&fixture.cx).unwrap().as_str(),
        "Missing"
    );
    assert!(annotation.find_attribute_value(&fixture.cx, Some("x")).is_none());
    assert_eq!(annotation.parameter_list(&fixture.cx).len(), 1);
}

#[test]
fn test_unbindable_arguments_have_no_values() {
    let fixture = light_fixture("@Named(y = 1) class C");
    assert!(fixture.attribute(0, Some("x")).is_none());
    assert!(fixture.attribute_or_default(0, Some("label")).is_none());
}

#[test]
fn test_non_constant_argument_falls_back_to_default() {
    let fixture = light_fixture("@Named(x = 1, label = Consts.PREFIX) class C");
    assert!(fixture.attribute(0, Some("label")).is_none());
    let value = fixture.attribute_or_default(0, Some("label")).unwrap();
    assert_eq!(literal(&value), ConstValue::String("none".to_string()));
}

#[test]
fn test_foreign_annotation_default() {
    let foreign = ForeignClass::annotation("javax.Timeout")
        .with_method(ForeignAnnotationMethod::new("value", TypeInfo::named("kotlin.Int")))
        .with_method(
            ForeignAnnotationMethod::new("unit", TypeInfo::named("java.lang.String"))
                .with_default(ClsMemberValue::Constant(ConstValue::String("ms".into()))),
        );
    let fixture = fixture_with(
        &["import javax.Timeout\n@Timeout(30) class C"],
        vec![foreign],
        LightConfig::default(),
    );
    assert_eq!(literal(&fixture.attribute(0, None).unwrap()), ConstValue::Int(30));
    let unit = fixture.attribute_or_default(0, Some("unit")).unwrap();
    let MemberValue::Compiled(compiled) = unit else {
        panic!("expected a compiled default, got {unit:?}");
    };
    assert_eq!(
        compiled.as_constant(),
        Some(&ConstValue::String("ms".to_string()))
    );
    assert!(fixture.attribute(0, Some("unit")).is_none());
}

#[test]
fn test_evaluate_separates_values_and_defaults() {
    let fixture = light_fixture("@Named(x = 2) class C");
    let data = fixture.annotation(0).evaluate(&fixture.cx).unwrap();
    assert_eq!(data.fq_name().unwrap().as_str(), "anno.Named");
    assert_eq!(
        data.values().get("x"),
        Some(&ClsMemberValue::Constant(ConstValue::Int(2)))
    );
    assert_eq!(
        data.defaults().get("label"),
        Some(&ClsMemberValue::Constant(ConstValue::String("none".into())))
    );
    assert_eq!(data.to_string(), "@anno.Named(x = 2)");
}

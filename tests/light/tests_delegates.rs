#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

//! Lazy delegates, build-context checks and nullability facades.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use ktlight::cls::{
    ClsAnnotation, ClsAnnotationData, ClsMember, ClsMemberValue, ClsModifierList,
    ClsModifierListOwner,
};
use ktlight::light::{
    FacadeKind, LightAnnotation, LightConfig, LightMember, LightParent, NonSourceAnnotation,
    Provenance, SourceAnnotation, ViolationKind,
};

use crate::helpers::light_helpers::{fixture_with, light_fixture};
use crate::helpers::source_fixtures::{ANNOTATION_CLASSES, usage};

const NULLABLE: &str = "org.jetbrains.annotations.Nullable";
const NOT_NULL: &str = "org.jetbrains.annotations.NotNull";

fn compiled(name: &str) -> Arc<dyn ClsAnnotation> {
    Arc::new(ClsAnnotationData::new(name))
}

fn member_with(annotations: Vec<Arc<dyn ClsAnnotation>>) -> LightMember {
    LightMember::new("field", None, move |_| {
        let list = ClsModifierList::new(annotations);
        Ok(Arc::new(ClsMember::new("field", Some(list))) as Arc<dyn ClsModifierListOwner>)
    })
}

#[test]
fn test_delegate_is_computed_once_and_shared() {
    let fixture = light_fixture("@Named(x = 1) class C");
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let annotation = LightAnnotation::from(
        SourceAnnotation::from_entry(&fixture.cx, &fixture.entries[0], move |_| {
            counter.set(counter.get() + 1);
            Ok(Arc::new(ClsAnnotationData::new("anno.Named").with_value("x", ClsMemberValue::int(1)))
                as Arc<dyn ClsAnnotation>)
        })
        .unwrap(),
    );
    assert_eq!(annotation.delegate_provenance(), None);

    let first = fixture.cx.lazy_build(|| annotation.delegate(&fixture.cx)).unwrap();
    let second = annotation.delegate(&fixture.cx).unwrap();
    assert!(first.ptr_eq(&second));
    assert_eq!(calls.get(), 1);
    assert_eq!(annotation.delegate_provenance(), Some(Provenance::BuildContext));
    assert_eq!(
        first.find_attribute_value(Some("x")),
        Some(ClsMemberValue::int(1))
    );
}

#[test]
fn test_verification_reports_pulls_outside_builds() {
    let fixture = fixture_with(
        &[ANNOTATION_CLASSES, &usage("@Flag class C")],
        Vec::new(),
        LightConfig::verifying(),
    );
    let annotation = fixture.annotation(0);

    // Facade queries that do not need the delegate stay silent.
    annotation.find_attribute_value(&fixture.cx, None);
    annotation.parameter_list(&fixture.cx);
    assert!(fixture.cx.violations().is_empty());

    annotation.delegate(&fixture.cx).unwrap();
    let violations = fixture.cx.take_violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::DelegateOutsideBuild);
    assert_eq!(violations[0].facade, FacadeKind::Source);
    assert!(fixture.cx.violations().is_empty());
}

#[test]
fn test_nested_builds_restore_the_outer_state() {
    let fixture = light_fixture("");
    assert!(!fixture.cx.in_build_context());
    fixture.cx.lazy_build(|| {
        fixture.cx.lazy_build(|| assert!(fixture.cx.in_build_context()));
        assert!(fixture.cx.in_build_context());
    });
    assert!(!fixture.cx.in_build_context());
}

#[test]
fn test_non_source_reads_its_delegate() {
    let fixture = fixture_with(&[""], Vec::new(), LightConfig::verifying());
    let delegate: Arc<dyn ClsAnnotation> = Arc::new(
        ClsAnnotationData::new("a.Retry")
            .with_value("times", ClsMemberValue::int(3))
            .with_default("delay", ClsMemberValue::int(10)),
    );
    let annotation = LightAnnotation::from(NonSourceAnnotation::new(LightParent::None, delegate));

    assert_eq!(annotation.qualified_name(&fixture.cx).unwrap().as_str(), "a.Retry");
    assert!(annotation.fq_name_matches(&fixture.cx, "a.Retry"));
    assert!(
        annotation
            .find_or_default_attribute_value(&fixture.cx, Some("delay"))
            .is_some()
    );
    assert!(annotation.find_attribute_value(&fixture.cx, Some("delay")).is_none());
    assert!(
        annotation
            .find_declared_attribute_value(&fixture.cx, Some("delay"))
            .is_none()
    );
    assert!(annotation.find_attribute_value(&fixture.cx, Some("times")).is_some());
    let pairs = annotation.parameter_list(&fixture.cx).attributes();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].name().as_deref(), Some("times"));
    assert_eq!(pairs[0].literal_text().as_deref(), Some("3"));
    assert_eq!(annotation.delegate_provenance(), Some(Provenance::Supplied));
    assert!(fixture.cx.violations().is_empty());
    assert!(!annotation.can_navigate());
}

#[test]
fn test_nullability_selects_the_last_marker() {
    let fixture = light_fixture("");
    let markers = vec![compiled(NULLABLE), compiled(NOT_NULL), compiled(NULLABLE)];
    let last = markers[2].clone();
    let annotation = LightAnnotation::from(member_with(markers).nullability_annotation());

    let delegate = fixture.cx.lazy_build(|| annotation.delegate(&fixture.cx)).unwrap();
    assert!(Arc::ptr_eq(delegate.as_compiled().unwrap(), &last));
    assert_eq!(annotation.qualified_name(&fixture.cx).unwrap().as_str(), NULLABLE);
    assert!(annotation.fq_name_matches(&fixture.cx, NULLABLE));
    assert!(!annotation.fq_name_matches(&fixture.cx, NOT_NULL));
}

#[test]
fn test_nullability_lists_marker_attributes() {
    let fixture = light_fixture("");
    let marker: Arc<dyn ClsAnnotation> =
        Arc::new(ClsAnnotationData::new(NULLABLE).with_value("reason", ClsMemberValue::string("io")));
    let annotation = LightAnnotation::from(member_with(vec![marker]).nullability_annotation());

    let pairs = annotation.parameter_list(&fixture.cx).attributes();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].name().as_deref(), Some("reason"));
}

#[test]
fn test_nullability_ignores_other_annotations() {
    let fixture = light_fixture("");
    let markers = vec![compiled(NOT_NULL), compiled("a.Other")];
    let annotation = LightAnnotation::from(member_with(markers).nullability_annotation());
    assert_eq!(annotation.qualified_name(&fixture.cx).unwrap().as_str(), NOT_NULL);
}

#[test]
fn test_nullability_without_modifier_list_is_absent() {
    let fixture = light_fixture("");
    let member = LightMember::new("bare", None, |_| {
        Ok(Arc::new(ClsMember::new("bare", None)) as Arc<dyn ClsModifierListOwner>)
    });
    let annotation = LightAnnotation::from(member.nullability_annotation());
    assert!(annotation.delegate(&fixture.cx).unwrap().is_absent());
    assert_eq!(annotation.qualified_name(&fixture.cx), None);
    assert!(annotation.parameter_list(&fixture.cx).is_empty());
    assert!(annotation.find_attribute_value(&fixture.cx, None).is_none());
    assert!(annotation.find_or_default_attribute_value(&fixture.cx, None).is_none());
    assert_eq!(annotation.to_string(), "@<no nullability>");
}

#[test]
fn test_nullability_parent_is_its_member() {
    let member = member_with(vec![compiled(NULLABLE)]);
    let annotation = LightAnnotation::from(member.nullability_annotation());
    let LightParent::Member(parent) = annotation.parent() else {
        panic!("expected a member parent");
    };
    assert!(parent.ptr_eq(&member));
    assert_eq!(annotation.kind(), FacadeKind::Nullability);
}

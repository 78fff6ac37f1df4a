#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

//! Facade equality, hashing and read-only behavior.

use std::collections::HashSet;
use std::sync::Arc;

use rstest::rstest;

use ktlight::cls::{ClsAnnotation, ClsAnnotationData, ClsMember, ClsModifierList, ClsModifierListOwner};
use ktlight::light::{
    AbsentAnnotation, FacadeKind, LightAnnotation, LightError, LightMember, LightParent,
    NonSourceAnnotation,
};

use crate::helpers::light_helpers::light_fixture;

fn compiled(name: &str) -> Arc<dyn ClsAnnotation> {
    Arc::new(ClsAnnotationData::new(name))
}

fn nullability() -> LightAnnotation {
    let member = LightMember::new("field", None, |_| {
        let list = ClsModifierList::new(vec![compiled("org.jetbrains.annotations.NotNull")]);
        Ok(Arc::new(ClsMember::new("field", Some(list))) as Arc<dyn ClsModifierListOwner>)
    });
    member.nullability_annotation().into()
}

#[test]
fn test_source_facades_over_the_same_usage_are_equal() {
    let fixture = light_fixture("@Flag @Flag class C");
    let first = fixture.annotation(0);
    let again = fixture.annotation(0);
    let second = fixture.annotation(1);

    assert_eq!(first, again);
    assert_ne!(first, second);

    let set: HashSet<_> = [first, again, second].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_non_source_facades_are_equal_only_to_themselves() {
    let delegate = compiled("a.B");
    let one = LightAnnotation::from(NonSourceAnnotation::new(LightParent::None, delegate.clone()));
    let two = LightAnnotation::from(NonSourceAnnotation::new(LightParent::None, delegate));

    assert_eq!(one, one.clone());
    assert_ne!(one, two);
    let absent = LightAnnotation::from(AbsentAnnotation::new(LightParent::None));
    assert_ne!(absent, LightAnnotation::from(AbsentAnnotation::new(LightParent::None)));
    assert_eq!(absent, absent.clone());
}

#[test]
fn test_source_and_non_source_never_equal() {
    let fixture = light_fixture("@Flag class C");
    let source = fixture.annotation(0);
    let compiled = LightAnnotation::from(NonSourceAnnotation::new(
        LightParent::None,
        compiled("anno.Flag"),
    ));
    assert_ne!(source, compiled);
    assert_eq!(
        source.qualified_name(&fixture.cx),
        compiled.qualified_name(&fixture.cx)
    );
}

#[rstest]
#[case::source(FacadeKind::Source)]
#[case::non_source(FacadeKind::NonSource)]
#[case::absent(FacadeKind::Absent)]
#[case::nullability(FacadeKind::Nullability)]
fn test_set_declared_attribute_value_is_rejected(#[case] kind: FacadeKind) {
    let fixture = light_fixture("@Named(x = 1) class C");
    let annotation = match kind {
        FacadeKind::Source => fixture.annotation(0),
        FacadeKind::NonSource => NonSourceAnnotation::new(LightParent::None, compiled("a.B")).into(),
        FacadeKind::Absent => AbsentAnnotation::new(LightParent::None).into(),
        FacadeKind::Nullability => nullability(),
    };
    let value = fixture.attribute(0, Some("x"));
    let err = annotation
        .set_declared_attribute_value(Some("x"), value)
        .unwrap_err();
    assert_eq!(err, LightError::ReadOnly(kind));
    assert!(err.is_read_only());
}

#[test]
fn test_absent_annotation_is_empty() {
    let fixture = light_fixture("");
    let absent = LightAnnotation::from(AbsentAnnotation::new(LightParent::None));

    assert_eq!(absent.qualified_name(&fixture.cx), None);
    assert_eq!(absent.name(), None);
    assert!(absent.parameter_list(&fixture.cx).is_empty());
    assert!(absent.find_attribute_value(&fixture.cx, None).is_none());
    assert!(absent.find_declared_attribute_value(&fixture.cx, Some("x")).is_none());
    assert!(absent.name_reference_element(&fixture.cx).is_none());
    assert!(!absent.fq_name_matches(&fixture.cx, ""));
    assert!(!absent.can_navigate());
    assert!(absent.delegate(&fixture.cx).is_err());
    assert!(absent.delete().is_err());
    assert!(absent.evaluate(&fixture.cx).is_none());
    assert_eq!(absent.to_string(), "@<absent>");
}

#[test]
fn test_navigation_follows_the_usage() {
    let fixture = light_fixture("@Named(x = 1) class C");
    let annotation = fixture.annotation(0);
    assert!(annotation.can_navigate());
    let node = annotation.navigation_element().unwrap();
    assert_eq!(node.text().to_string(), "@Named(x = 1)");
    assert_eq!(annotation.text_range(), Some(node.text_range()));
}

#[test]
fn test_name_reference_resolves_to_annotation_class() {
    let fixture = light_fixture("@Named(x = 1) class C");
    let reference = fixture.annotation(0).name_reference_element(&fixture.cx).unwrap();
    assert_eq!(reference.reference_name().as_deref(), Some("Named"));
    let definition = reference.resolve(&fixture.cx).unwrap();
    assert!(definition.is_annotation_class());
    assert_eq!(definition.fq_name().as_str(), "anno.Named");
}

#[test]
fn test_unresolved_reference_falls_back_to_delegate() {
    let fixture = light_fixture("@Missing class C");
    let reference = fixture.annotation(0).name_reference_element(&fixture.cx).unwrap();
    assert!(reference.resolve(&fixture.cx).is_none());
    assert_eq!(reference.qualified_name(&fixture.cx).unwrap().as_str(), "Missing");
}

#[test]
fn test_delete_detaches_the_usage() {
    let fixture = light_fixture("@Flag @Named(x = 1) class C");
    let annotation = fixture.annotation(0);
    let owner = annotation.owner().unwrap();
    annotation.delete().unwrap();

    assert!(!owner.text().to_string().contains("@Flag"));
    assert!(owner.text().to_string().contains("@Named"));
    assert!(matches!(annotation.delete(), Err(LightError::InvalidTree(_))));
}

#[test]
fn test_non_source_delete_is_unsupported() {
    let annotation = LightAnnotation::from(NonSourceAnnotation::new(LightParent::None, compiled("a.B")));
    assert!(matches!(
        annotation.delete(),
        Err(LightError::UnsupportedOperation(_))
    ));
}

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

//! Annotation name resolution through `Analysis`.

use rstest::rstest;

use ktlight::Position;
use ktlight::hir::{Analysis, Definition, ForeignClass, SemanticModel};
use ktlight::parser::CallElement;

fn resolve_first_entry(sources: &[&str], foreign: &[&str]) -> Option<String> {
    let mut analysis = Analysis::new();
    let mut last = None;
    for source in sources {
        last = Some(analysis.add_file(source));
    }
    for name in foreign {
        analysis.add_foreign_class(ForeignClass::annotation(*name));
    }
    let entry = analysis
        .file(last.unwrap())
        .unwrap()
        .annotation_entries()
        .next()
        .unwrap();
    analysis
        .resolve_callee(&CallElement::from(entry))
        .map(|d| d.fq_name().to_string())
}

#[rstest]
#[case::same_package(&["package p\nannotation class A", "package p\n@A class C"], &[], Some("p.A"))]
#[case::explicit_import(&["package p\nannotation class A", "package q\nimport p.A\n@A class C"], &[], Some("p.A"))]
#[case::star_import(&["package p\nannotation class A", "package q\nimport p.*\n@A class C"], &[], Some("p.A"))]
#[case::fully_qualified(&["package p\nannotation class A", "package q\n@p.A class C"], &[], Some("p.A"))]
#[case::not_imported(&["package p\nannotation class A", "package q\n@A class C"], &[], None)]
#[case::enclosing_class(&["package p\nclass Outer {\n annotation class A\n @A class C\n}"], &[], Some("p.Outer.A"))]
#[case::default_import(&["@Deprecated class C"], &["java.lang.Deprecated"], Some("java.lang.Deprecated"))]
#[case::foreign_import(&["import javax.inject.Named\n@Named class C"], &["javax.inject.Named"], Some("javax.inject.Named"))]
fn test_annotation_resolution(
    #[case] sources: &[&str],
    #[case] foreign: &[&str],
    #[case] expected: Option<&str>,
) {
    assert_eq!(resolve_first_entry(sources, foreign).as_deref(), expected);
}

#[test]
fn test_explicit_import_beats_star_import() {
    let resolved = resolve_first_entry(
        &[
            "package p\nannotation class A",
            "package q\nannotation class A",
            "package r\nimport p.*\nimport q.A\n@A class C",
        ],
        &[],
    );
    assert_eq!(resolved.as_deref(), Some("q.A"));
}

#[test]
fn test_ambiguous_star_imports_do_not_resolve() {
    let resolved = resolve_first_entry(
        &[
            "package p\nannotation class A",
            "package q\nannotation class A",
            "package r\nimport p.*\nimport q.*\n@A class C",
        ],
        &[],
    );
    assert_eq!(resolved, None);
}

#[test]
fn test_first_declaration_wins_across_files() {
    let mut analysis = Analysis::new();
    analysis.add_file("package p\nannotation class A(val x: Int)");
    analysis.add_file("package p\nannotation class A(val y: Int)");
    let Some(Definition::SourceClass(class)) = analysis.find_class("p.A") else {
        panic!("expected a source class");
    };
    assert_eq!(class.file.index(), 0);
    assert_eq!(class.decl.parameters()[0].name().as_deref(), Some("x"));
    assert_eq!(analysis.index().len(), 1);
}

#[test]
fn test_definition_span_for_navigation() {
    let mut analysis = Analysis::new();
    let file = analysis.add_file("package p\n\nannotation class A(val x: Int)\n");
    let node = analysis.find_class("p.A").unwrap().source().unwrap().clone();
    let span = analysis.line_index(file).unwrap().span(node.text_range());
    assert_eq!(span.start, Position::new(2, 0));
    assert_eq!(span.end.line, 2);
    assert!(span.contains(Position::new(2, 17)));
}

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use rstest::rstest;

use ktlight::base::ConstValue;
use ktlight::parser::{AstNode, Expr, SourceFile, parse_file};

use crate::helpers::source_fixtures::{ANNOTATION_CLASSES, usage};

#[rstest]
#[case(ANNOTATION_CLASSES)]
#[case("class C(@field:Named(x = 1) val a: Int, @param:Flag val b: String)")]
#[case("@Outer(Inner(1), others = [Inner(2)]) @Many(*intArrayOf(1, 2)) fun f() { g() }")]
#[case("@Single('c') @Named(x = -1, label = \"q\") val p: Int = 0")]
fn test_parse_is_lossless_and_clean(#[case] input: &str) {
    let parse = parse_file(input);
    assert!(parse.ok(), "Parse errors for {input:?}: {:?}", parse.errors);
    assert_eq!(parse.syntax().text().to_string(), input);
}

#[test]
fn test_broken_input_keeps_every_character() {
    let input = "@A(1, class C\n@B(x = ) fun f(";
    let parse = parse_file(input);
    assert!(!parse.ok());
    assert_eq!(parse.syntax().text().to_string(), input);
}

#[test]
fn test_usage_file_structure() {
    let text = usage("@Named(x = 1, label = \"l\") class C");
    let file = SourceFile::cast(parse_file(&text).syntax()).unwrap();
    assert_eq!(file.package_name().as_str(), "app");
    assert_eq!(file.imports().count(), 1);

    let entry = file.annotation_entries().next().unwrap();
    let values: Vec<_> = entry
        .value_arguments()
        .iter()
        .map(|a| a.expression().and_then(|e| e.const_value()))
        .collect();
    assert_eq!(
        values,
        vec![
            Some(ConstValue::Int(1)),
            Some(ConstValue::String("l".to_string()))
        ]
    );
}

#[test]
fn test_string_template_with_interpolation_has_no_value() {
    let file = SourceFile::cast(parse_file("@Single(\"a$b\") class C").syntax()).unwrap();
    let entry = file.annotation_entries().next().unwrap();
    let expression = entry.value_arguments()[0].expression().unwrap();
    assert!(matches!(expression, Expr::StringTemplate(_)));
    assert!(expression.is_literal());
    assert_eq!(expression.const_value(), None);
}

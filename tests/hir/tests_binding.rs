#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

//! Argument binding of annotation usages.

use rstest::rstest;

use ktlight::hir::{Analysis, CallBinding, SemanticModel};
use ktlight::parser::CallElement;

const DECLARATIONS: &str =
    "package p\nannotation class A(val x: Int, val y: Int = 0, vararg val rest: String)";

fn bind(usage: &str) -> Option<CallBinding> {
    let mut analysis = Analysis::new();
    analysis.add_file(DECLARATIONS);
    let file = analysis.add_file(&format!("package p\n{usage}"));
    let entry = analysis.file(file)?.annotation_entries().next()?;
    analysis.resolve_call(&CallElement::from(entry))
}

fn argument_counts(binding: &CallBinding) -> Vec<(String, usize)> {
    binding
        .parameters()
        .iter()
        .map(|p| (p.parameter.name.to_string(), p.arguments.len()))
        .collect()
}

#[rstest]
#[case::positional("@A(1, 2) class C", [1, 1, 0])]
#[case::named_out_of_order("@A(y = 2, x = 1) class C", [1, 1, 0])]
#[case::vararg_absorbs_rest("@A(1, 2, \"a\", \"b\") class C", [1, 1, 2])]
#[case::named_vararg("@A(x = 1, rest = arrayOf(\"a\")) class C", [1, 0, 1])]
#[case::omitted_default("@A(1) class C", [1, 0, 0])]
fn test_bound_argument_counts(#[case] usage: &str, #[case] expected: [usize; 3]) {
    let binding = bind(usage).unwrap();
    let counts: Vec<_> = argument_counts(&binding).into_iter().map(|(_, n)| n).collect();
    assert_eq!(counts, expected.to_vec());
}

#[rstest]
#[case::unknown_name("@A(z = 1) class C")]
#[case::bound_twice("@A(1, x = 2) class C")]
#[case::positional_after_named("@A(x = 1, 2) class C")]
#[case::unresolved("@B(1) class C")]
fn test_unbindable_usages(#[case] usage: &str) {
    assert!(bind(usage).is_none(), "{usage} should not bind");
}

#[test]
fn test_parameters_keep_declaration_order() {
    let binding = bind("@A(rest = arrayOf(), y = 1, x = 2) class C").unwrap();
    let names: Vec<_> = argument_counts(&binding).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["x", "y", "rest"]);
    assert_eq!(binding.callee().fq_name().as_str(), "p.A");
    assert!(binding.find("rest").unwrap().parameter.ty.is_array());
    assert_eq!(binding.supplied().count(), 3);
}

//! Light facade fixtures: an analysis, a context and the annotation
//! entries of the last file.

use std::rc::Rc;
use std::sync::Arc;

use ktlight::base::ConstValue;
use ktlight::cls::{ClsAnnotation, ClsAnnotationData};
use ktlight::hir::{Analysis, ForeignClass};
use ktlight::light::{LightAnnotation, LightConfig, LightContext, MemberValue, SourceAnnotation};
use ktlight::parser::AnnotationEntry;

use crate::helpers::source_fixtures::{ANNOTATION_CLASSES, usage};

pub struct Fixture {
    pub cx: LightContext,
    pub entries: Vec<AnnotationEntry>,
}

impl Fixture {
    /// A source-backed facade over the `index`th entry of the last file.
    pub fn annotation(&self, index: usize) -> LightAnnotation {
        let entry = &self.entries[index];
        let name = entry.written_name().expect("annotation entry has a name");
        let facade = SourceAnnotation::from_entry(&self.cx, entry, move |_| {
            Ok(Arc::new(ClsAnnotationData::new(name)) as Arc<dyn ClsAnnotation>)
        })
        .expect("annotation entry has a type reference");
        LightAnnotation::Source(facade)
    }

    /// The explicitly bound value, without default fallback.
    pub fn attribute(&self, index: usize, name: Option<&str>) -> Option<MemberValue> {
        self.annotation(index).find_attribute_value(&self.cx, name)
    }

    pub fn attribute_or_default(&self, index: usize, name: Option<&str>) -> Option<MemberValue> {
        self.annotation(index)
            .find_or_default_attribute_value(&self.cx, name)
    }
}

/// Fixture over the shared annotation classes plus one usage file.
pub fn light_fixture(body: &str) -> Fixture {
    fixture_with(&[ANNOTATION_CLASSES, &usage(body)], Vec::new(), LightConfig::default())
}

pub fn fixture(sources: &[&str]) -> Fixture {
    fixture_with(sources, Vec::new(), LightConfig::default())
}

pub fn fixture_with(sources: &[&str], foreign: Vec<ForeignClass>, config: LightConfig) -> Fixture {
    let mut analysis = Analysis::new();
    let mut last = None;
    for source in sources {
        let file = analysis.add_file(source);
        assert!(
            analysis.parse_errors(file).is_empty(),
            "Parse errors: {:?}",
            analysis.parse_errors(file)
        );
        last = Some(file);
    }
    for class in foreign {
        analysis.add_foreign_class(class);
    }
    let entries = last
        .and_then(|file| analysis.file(file))
        .map(|file| file.annotation_entries().collect())
        .unwrap_or_default();
    Fixture {
        cx: LightContext::new(Rc::new(analysis), config),
        entries,
    }
}

/// The constant of a literal member value.
pub fn literal(value: &MemberValue) -> ConstValue {
    value
        .as_literal()
        .unwrap_or_else(|| panic!("expected a literal, got {value:?}"))
        .value()
        .unwrap_or_else(|| panic!("literal has no constant value: {value:?}"))
}

/// The constants of an array member value's elements.
pub fn array_literals(cx: &LightContext, value: &MemberValue) -> Vec<ConstValue> {
    value
        .as_array()
        .unwrap_or_else(|| panic!("expected an array, got {value:?}"))
        .initializers(cx)
        .iter()
        .map(literal)
        .collect()
}

use super::annotation::LightAnnotation;
use super::member::LightMember;
use super::member_value::LightArrayInitializer;
use super::params::LightNameValuePair;
use crate::parser::SyntaxNode;

/// The element logically containing a facade or member value.
///
/// Parents are held strongly; children are never cached by their parents.
#[derive(Debug, Clone)]
pub enum LightParent {
    /// An annotated source declaration (class, function, property, parameter).
    Declaration(SyntaxNode),
    /// A member facade, for synthesized annotations.
    Member(LightMember),
    Annotation(LightAnnotation),
    Array(LightArrayInitializer),
    NameValuePair(LightNameValuePair),
    /// No parent (free-standing facades).
    None,
}

impl LightParent {
    /// The nearest enclosing annotation facade.
    pub fn annotation(&self) -> Option<LightAnnotation> {
        match self {
            Self::Annotation(a) => Some(a.clone()),
            Self::Array(array) => array.parent().annotation(),
            Self::NameValuePair(pair) => pair.annotation().map(LightAnnotation::Source),
            Self::Declaration(_) | Self::Member(_) | Self::None => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

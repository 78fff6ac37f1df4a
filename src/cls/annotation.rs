use indexmap::IndexMap;
use std::fmt;

use super::DEFAULT_ATTRIBUTE_NAME;
use super::value::ClsMemberValue;
use crate::base::{FqName, Name};

/// The compiled annotation interface the light layer delegates to.
///
/// A `None` attribute name means [`DEFAULT_ATTRIBUTE_NAME`].
pub trait ClsAnnotation: fmt::Debug + Send + Sync {
    fn qualified_name(&self) -> Option<&str>;

    /// The value written for `name`, falling back to the declared default.
    fn find_or_default_attribute_value(&self, name: Option<&str>) -> Option<ClsMemberValue>;

    /// The value written for `name`, without default fallback.
    fn find_declared_attribute_value(&self, name: Option<&str>) -> Option<ClsMemberValue>;

    fn find_attribute_value(&self, name: Option<&str>) -> Option<ClsMemberValue> {
        self.find_declared_attribute_value(name)
    }

    /// Written attributes in declaration order.
    fn attributes(&self) -> Vec<(Name, ClsMemberValue)>;

    fn name_reference(&self) -> Option<ClsReference> {
        self.qualified_name().map(|name| ClsReference {
            qualified_name: FqName::new(name),
        })
    }
}

/// Reference to the annotation class from a compiled annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClsReference {
    pub qualified_name: FqName,
}

impl ClsReference {
    pub fn reference_name(&self) -> &str {
        self.qualified_name.short_name()
    }
}

/// A compiled annotation with explicit values and declared defaults.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClsAnnotationData {
    qualified_name: Option<FqName>,
    values: IndexMap<Name, ClsMemberValue>,
    defaults: IndexMap<Name, ClsMemberValue>,
}

impl ClsAnnotationData {
    pub fn new(qualified_name: impl Into<FqName>) -> Self {
        Self {
            qualified_name: Some(qualified_name.into()),
            ..Self::default()
        }
    }

    /// Add an explicitly written attribute value.
    pub fn with_value(mut self, name: impl Into<Name>, value: ClsMemberValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Add a declared default for an attribute.
    pub fn with_default(mut self, name: impl Into<Name>, value: ClsMemberValue) -> Self {
        self.defaults.insert(name.into(), value);
        self
    }

    pub fn fq_name(&self) -> Option<&FqName> {
        self.qualified_name.as_ref()
    }

    pub fn values(&self) -> &IndexMap<Name, ClsMemberValue> {
        &self.values
    }

    pub fn defaults(&self) -> &IndexMap<Name, ClsMemberValue> {
        &self.defaults
    }
}

impl ClsAnnotation for ClsAnnotationData {
    fn qualified_name(&self) -> Option<&str> {
        self.qualified_name.as_ref().map(|n| n.as_str())
    }

    fn find_or_default_attribute_value(&self, name: Option<&str>) -> Option<ClsMemberValue> {
        let name = name.unwrap_or(DEFAULT_ATTRIBUTE_NAME);
        self.values
            .get(name)
            .or_else(|| self.defaults.get(name))
            .cloned()
    }

    fn find_declared_attribute_value(&self, name: Option<&str>) -> Option<ClsMemberValue> {
        self.values
            .get(name.unwrap_or(DEFAULT_ATTRIBUTE_NAME))
            .cloned()
    }

    fn attributes(&self) -> Vec<(Name, ClsMemberValue)> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl fmt::Display for ClsAnnotationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@{}",
            self.qualified_name.as_ref().map(|n| n.as_str()).unwrap_or("?")
        )?;
        if self.values.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        f.write_str(")")
    }
}

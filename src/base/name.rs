//! Names and dotted qualified names.

use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt;

/// A simple (unqualified) name. Small names are stored inline.
pub type Name = SmolStr;

/// A dotted qualified name such as `org.jetbrains.annotations.Nullable`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FqName(SmolStr);

impl FqName {
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self(text.into())
    }

    /// The root (empty) package.
    pub fn root() -> Self {
        Self(SmolStr::default())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a simple name: `a.b` + `C` = `a.b.C`.
    pub fn child(&self, name: &str) -> Self {
        if self.is_root() {
            Self(SmolStr::new(name))
        } else {
            Self(smol_str::format_smolstr!("{}.{}", self.0, name))
        }
    }

    /// The last segment (`C` for `a.b.C`).
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or("")
    }

    /// Everything but the last segment (`a.b` for `a.b.C`).
    pub fn parent(&self) -> FqName {
        match self.0.rfind('.') {
            Some(idx) => Self(SmolStr::new(&self.0[..idx])),
            None => Self::root(),
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FqName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FqName {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl PartialEq<str> for FqName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FqName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

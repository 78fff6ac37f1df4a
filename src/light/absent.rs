//! The absent placeholder annotation.

use std::fmt;
use std::rc::Rc;

use super::params::LightParameterList;
use super::parent::LightParent;

#[derive(Debug)]
struct AbsentInner {
    parent: LightParent,
}

/// A null-object annotation: no source, no delegate, no values.
#[derive(Debug, Clone)]
pub struct AbsentAnnotation(Rc<AbsentInner>);

impl AbsentAnnotation {
    pub fn new(parent: LightParent) -> Self {
        Self(Rc::new(AbsentInner { parent }))
    }

    pub fn parent(&self) -> &LightParent {
        &self.0.parent
    }

    /// Always empty.
    pub fn parameter_list(&self) -> LightParameterList {
        LightParameterList::Empty
    }

    pub fn ptr_eq(&self, other: &AbsentAnnotation) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl fmt::Display for AbsentAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("@<absent>")
    }
}

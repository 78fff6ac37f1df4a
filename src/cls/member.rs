use std::sync::Arc;

use super::annotation::ClsAnnotation;
use crate::base::Name;

/// A compiled element with a modifier list (method, field, parameter).
pub trait ClsModifierListOwner: std::fmt::Debug + Send + Sync {
    fn modifier_list(&self) -> Option<&ClsModifierList>;
}

/// Annotations attached to a compiled member, in generation order.
#[derive(Debug, Clone, Default)]
pub struct ClsModifierList {
    annotations: Vec<Arc<dyn ClsAnnotation>>,
}

impl ClsModifierList {
    pub fn new(annotations: Vec<Arc<dyn ClsAnnotation>>) -> Self {
        Self { annotations }
    }

    pub fn annotations(&self) -> &[Arc<dyn ClsAnnotation>] {
        &self.annotations
    }

    pub fn find_annotation(&self, qualified_name: &str) -> Option<&Arc<dyn ClsAnnotation>> {
        self.annotations
            .iter()
            .find(|a| a.qualified_name() == Some(qualified_name))
    }
}

/// A compiled member.
#[derive(Debug, Clone)]
pub struct ClsMember {
    pub name: Name,
    modifier_list: Option<ClsModifierList>,
}

impl ClsMember {
    pub fn new(name: impl Into<Name>, modifier_list: Option<ClsModifierList>) -> Self {
        Self {
            name: name.into(),
            modifier_list,
        }
    }
}

impl ClsModifierListOwner for ClsMember {
    fn modifier_list(&self) -> Option<&ClsModifierList> {
        self.modifier_list.as_ref()
    }
}

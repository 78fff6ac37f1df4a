//! Call binding: matching supplied arguments to declared parameters.

use std::sync::Arc;

use super::foreign::{ForeignAnnotationMethod, ForeignClass};
use super::symbols::Definition;
use super::types::TypeInfo;
use crate::base::Name;
use crate::cls::DEFAULT_ATTRIBUTE_NAME;
use crate::parser::{Parameter, ValueArgument};

/// Where a parameter is declared.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterOrigin {
    /// A primary-constructor parameter of a source class.
    Source(Parameter),
    /// An element method of a foreign annotation type.
    Foreign(Arc<ForeignAnnotationMethod>),
}

/// A declared parameter of an annotation constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    pub name: Name,
    /// The parameter type; for `vararg x: T` this is the array of `T`.
    pub ty: TypeInfo,
    pub is_vararg: bool,
    pub declares_default: bool,
    pub origin: ParameterOrigin,
}

impl ParameterInfo {
    pub fn from_source(parameter: &Parameter) -> Option<Self> {
        let name = parameter.name()?;
        let written = parameter
            .type_ref()
            .and_then(|t| TypeInfo::from_type_ref(&t))
            .unwrap_or_else(|| TypeInfo::named("kotlin.Any"));
        let is_vararg = parameter.is_vararg();
        let ty = if is_vararg {
            TypeInfo::array_of(written)
        } else {
            written
        };
        Some(Self {
            name,
            ty,
            is_vararg,
            declares_default: parameter.default_value().is_some(),
            origin: ParameterOrigin::Source(parameter.clone()),
        })
    }

    pub fn from_foreign(method: &Arc<ForeignAnnotationMethod>) -> Self {
        let is_value = method.name() == DEFAULT_ATTRIBUTE_NAME;
        Self {
            name: method.name().clone(),
            ty: method.ty().clone(),
            is_vararg: is_value && method.ty().is_array(),
            declares_default: method.default_value().is_some(),
            origin: ParameterOrigin::Foreign(method.clone()),
        }
    }

    /// Whether the parameter has a default, declared on it or inherited.
    ///
    /// Foreign element methods carry their defaults already evaluated, so a
    /// default is visible even when the declaration site is not available.
    pub fn declares_or_inherits_default(&self) -> bool {
        match &self.origin {
            ParameterOrigin::Source(_) => self.declares_default,
            ParameterOrigin::Foreign(m) => m.default_value().is_some(),
        }
    }

    fn accepts_positional(&self) -> bool {
        match self.origin {
            ParameterOrigin::Source(_) => true,
            ParameterOrigin::Foreign(_) => self.name == DEFAULT_ATTRIBUTE_NAME,
        }
    }
}

/// The supplied arguments bound to one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParameter {
    pub parameter: ParameterInfo,
    /// Arguments in call order; several only for varargs.
    pub arguments: Vec<ValueArgument>,
}

/// A resolved annotation call: the callee and every declared parameter,
/// in declaration order, with the arguments bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct CallBinding {
    callee: Definition,
    parameters: Vec<BoundParameter>,
}

impl CallBinding {
    pub fn callee(&self) -> &Definition {
        &self.callee
    }

    pub fn parameters(&self) -> &[BoundParameter] {
        &self.parameters
    }

    pub fn find(&self, name: &str) -> Option<&BoundParameter> {
        self.parameters.iter().find(|p| p.parameter.name == name)
    }

    /// Parameters that received at least one argument.
    pub fn supplied(&self) -> impl Iterator<Item = &BoundParameter> {
        self.parameters.iter().filter(|p| !p.arguments.is_empty())
    }
}

/// Why arguments could not be bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BindError {
    UnknownParameter(Name),
    AlreadyBound(Name),
    TooManyArguments,
    PositionalAfterNamed,
    NotPositional(Name),
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownParameter(name) => write!(f, "no parameter named '{name}'"),
            Self::AlreadyBound(name) => write!(f, "parameter '{name}' passed twice"),
            Self::TooManyArguments => f.write_str("too many arguments"),
            Self::PositionalAfterNamed => f.write_str("positional argument after named"),
            Self::NotPositional(name) => {
                write!(f, "parameter '{name}' can only be passed by name")
            }
        }
    }
}

/// Declared parameters of a callee, when it is constructor-like.
pub(crate) fn declared_parameters(callee: &Definition) -> Option<Vec<ParameterInfo>> {
    match callee {
        Definition::SourceClass(class) => Some(
            class
                .decl
                .parameters()
                .iter()
                .filter_map(ParameterInfo::from_source)
                .collect(),
        ),
        Definition::ForeignClass(class) if class.is_annotation_type() => {
            Some(foreign_parameters(class))
        }
        _ => None,
    }
}

fn foreign_parameters(class: &ForeignClass) -> Vec<ParameterInfo> {
    class
        .methods_in_call_order()
        .iter()
        .map(ParameterInfo::from_foreign)
        .collect()
}

/// Bind arguments to parameters.
///
/// Positional arguments fill parameters left to right; a vararg parameter
/// absorbs every remaining positional argument. Named arguments go to the
/// parameter of that name.
pub(crate) fn bind_arguments(
    callee: Definition,
    parameters: Vec<ParameterInfo>,
    arguments: Vec<ValueArgument>,
) -> Result<CallBinding, BindError> {
    let mut slots: Vec<Vec<ValueArgument>> = vec![Vec::new(); parameters.len()];
    let mut next_positional = 0;
    let mut seen_named = false;

    for argument in arguments {
        match argument.name() {
            Some(name) => {
                let idx = parameters
                    .iter()
                    .position(|p| p.name == name)
                    .ok_or_else(|| BindError::UnknownParameter(name.clone()))?;
                if !slots[idx].is_empty() {
                    return Err(BindError::AlreadyBound(name));
                }
                slots[idx].push(argument);
                seen_named = true;
            }
            None => {
                if seen_named {
                    return Err(BindError::PositionalAfterNamed);
                }
                let parameter = parameters
                    .get(next_positional)
                    .ok_or(BindError::TooManyArguments)?;
                if !parameter.accepts_positional() {
                    return Err(BindError::NotPositional(parameter.name.clone()));
                }
                slots[next_positional].push(argument);
                if !parameter.is_vararg {
                    next_positional += 1;
                }
            }
        }
    }

    let parameters = parameters
        .into_iter()
        .zip(slots)
        .map(|(parameter, arguments)| BoundParameter {
            parameter,
            arguments,
        })
        .collect();
    Ok(CallBinding { callee, parameters })
}

//! Query context threaded through every facade operation.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use super::annotation::FacadeKind;
use crate::base::{FqName, Name};
use crate::cls::DEFAULT_ATTRIBUTE_NAME;
use crate::hir::SemanticModel;

/// Nullability markers recognized by default.
pub const DEFAULT_NULLABILITY_MARKERS: [&str; 2] = [
    "org.jetbrains.annotations.Nullable",
    "org.jetbrains.annotations.NotNull",
];

/// Options for the facade layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightConfig {
    /// Record delegate pulls outside a lazy build as invariant violations.
    pub verification: bool,
    /// Attribute looked up when a query does not name one.
    pub default_attribute_name: Name,
    /// Qualified names treated as nullability markers.
    pub nullability_markers: Vec<FqName>,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            verification: false,
            default_attribute_name: Name::new_static(DEFAULT_ATTRIBUTE_NAME),
            nullability_markers: DEFAULT_NULLABILITY_MARKERS
                .iter()
                .map(|m| FqName::new(*m))
                .collect(),
        }
    }
}

impl LightConfig {
    /// Default options with verification enabled.
    pub fn verifying() -> Self {
        Self::default().with_verification(true)
    }

    pub fn with_verification(mut self, verification: bool) -> Self {
        self.verification = verification;
        self
    }

    pub fn with_default_attribute_name(mut self, name: impl Into<Name>) -> Self {
        self.default_attribute_name = name.into();
        self
    }

    pub fn with_nullability_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FqName>,
    {
        self.nullability_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_nullability_marker(&self, fq_name: &str) -> bool {
        self.nullability_markers.iter().any(|m| m == fq_name)
    }
}

/// What kind of misuse was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// A delegate was requested outside [`LightContext::lazy_build`].
    DelegateOutsideBuild,
    /// A delegate was requested from a nested annotation.
    NestedAnnotationDelegate,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DelegateOutsideBuild => f.write_str("delegate requested outside lazy build"),
            Self::NestedAnnotationDelegate => {
                f.write_str("delegate requested from nested annotation")
            }
        }
    }
}

/// A recorded misuse. Violations never abort the query that caused them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    pub kind: ViolationKind,
    pub facade: FacadeKind,
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.facade, self.message)
    }
}

/// The resolution backend, options and diagnostics for one session.
///
/// Facades hold no reference to the context; every query takes it
/// explicitly.
pub struct LightContext {
    model: Rc<dyn SemanticModel>,
    config: LightConfig,
    build_depth: Cell<usize>,
    violations: RefCell<Vec<InvariantViolation>>,
}

impl LightContext {
    pub fn new(model: Rc<dyn SemanticModel>, config: LightConfig) -> Self {
        Self {
            model,
            config,
            build_depth: Cell::new(0),
            violations: RefCell::new(Vec::new()),
        }
    }

    pub fn model(&self) -> &dyn SemanticModel {
        &*self.model
    }

    pub fn config(&self) -> &LightConfig {
        &self.config
    }

    /// Run `f` inside the lazy class building context, where pulling
    /// delegates is sanctioned. Calls nest.
    pub fn lazy_build<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = BuildGuard::enter(self);
        f()
    }

    pub fn in_build_context(&self) -> bool {
        self.build_depth.get() > 0
    }

    /// Record a misuse. Only verification mode keeps the record.
    pub(crate) fn report(&self, kind: ViolationKind, facade: FacadeKind, message: String) {
        if !self.config.verification {
            tracing::trace!("[LIGHT] {} ({}): {}", kind, facade, message);
            return;
        }
        tracing::error!("[LIGHT] {} ({}): {}", kind, facade, message);
        self.violations.borrow_mut().push(InvariantViolation {
            kind,
            facade,
            message,
        });
    }

    /// Violations recorded so far.
    pub fn violations(&self) -> Vec<InvariantViolation> {
        self.violations.borrow().clone()
    }

    pub fn take_violations(&self) -> Vec<InvariantViolation> {
        std::mem::take(&mut *self.violations.borrow_mut())
    }
}

impl fmt::Debug for LightContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightContext")
            .field("config", &self.config)
            .field("build_depth", &self.build_depth.get())
            .field("violations", &self.violations.borrow().len())
            .finish_non_exhaustive()
    }
}

struct BuildGuard<'a>(&'a LightContext);

impl<'a> BuildGuard<'a> {
    fn enter(cx: &'a LightContext) -> Self {
        cx.build_depth.set(cx.build_depth.get() + 1);
        Self(cx)
    }
}

impl Drop for BuildGuard<'_> {
    fn drop(&mut self) {
        self.0.build_depth.set(self.0.build_depth.get() - 1);
    }
}

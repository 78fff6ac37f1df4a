//! Compute-once delegate cell with provenance.

use once_cell::unsync::OnceCell;
use std::cell::RefCell;
use std::fmt;

use super::context::LightContext;
use super::error::{LightError, Result};

type Thunk<T> = Box<dyn FnOnce(&LightContext) -> Result<T>>;

/// Where a memoized delegate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Supplied at construction.
    Supplied,
    /// Computed inside [`LightContext::lazy_build`].
    BuildContext,
    /// Computed outside the build context.
    Unsanctioned,
}

/// A delegate computed at most once from a thunk, then cached for the
/// lifetime of the owner, errors included.
pub(crate) struct LazyDelegate<T> {
    thunk: RefCell<Option<Thunk<T>>>,
    cell: OnceCell<(Result<T>, Provenance)>,
}

impl<T: Clone> LazyDelegate<T> {
    pub(crate) fn new(thunk: impl FnOnce(&LightContext) -> Result<T> + 'static) -> Self {
        Self {
            thunk: RefCell::new(Some(Box::new(thunk))),
            cell: OnceCell::new(),
        }
    }

    pub(crate) fn ready(value: T) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set((Ok(value), Provenance::Supplied));
        Self {
            thunk: RefCell::new(None),
            cell,
        }
    }

    pub(crate) fn get(&self, cx: &LightContext) -> Result<T> {
        let (result, _) = self.cell.get_or_init(|| {
            let provenance = if cx.in_build_context() {
                Provenance::BuildContext
            } else {
                Provenance::Unsanctioned
            };
            let thunk = self.thunk.borrow_mut().take();
            // The thunk is only gone here if an earlier run panicked.
            let result = match thunk {
                Some(thunk) => thunk(cx),
                None => Err(LightError::invalid_tree(
                    "delegate computation panicked earlier",
                )),
            };
            tracing::debug!(
                "[LIGHT] Delegate computed ({:?}, ok = {})",
                provenance,
                result.is_ok()
            );
            (result, provenance)
        });
        result.clone()
    }

    /// The cached result, if already computed.
    pub(crate) fn peek(&self) -> Option<&Result<T>> {
        self.cell.get().map(|(result, _)| result)
    }

    pub(crate) fn provenance(&self) -> Option<Provenance> {
        self.cell.get().map(|(_, provenance)| *provenance)
    }
}

impl<T> fmt::Debug for LazyDelegate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyDelegate")
            .field("computed", &self.cell.get().is_some())
            .field("provenance", &self.cell.get().map(|(_, p)| *p))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::Analysis;
    use crate::light::LightConfig;
    use std::rc::Rc;

    fn context() -> LightContext {
        LightContext::new(Rc::new(Analysis::new()), LightConfig::default())
    }

    #[test]
    fn test_thunk_runs_once() {
        let cx = context();
        let calls = Rc::new(std::cell::Cell::new(0));
        let counter = calls.clone();
        let lazy = LazyDelegate::new(move |_| {
            counter.set(counter.get() + 1);
            Ok(Rc::new(7))
        });
        let first = lazy.get(&cx).unwrap();
        let second = lazy.get(&cx).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_errors_are_cached() {
        let cx = context();
        let lazy: LazyDelegate<u8> = LazyDelegate::new(|_| Err(LightError::unsupported("no")));
        assert!(lazy.get(&cx).is_err());
        assert_eq!(lazy.get(&cx), Err(LightError::unsupported("no")));
    }

    #[test]
    fn test_panicked_computation_fails_afterwards() {
        let cx = context();
        let lazy: LazyDelegate<u8> = LazyDelegate::new(|_| panic!("delegate exploded"));
        let first = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| lazy.get(&cx)));
        assert!(first.is_err());
        assert!(matches!(lazy.get(&cx), Err(LightError::InvalidTree(_))));
        assert!(lazy.peek().is_some());
    }

    #[test]
    fn test_provenance() {
        let cx = context();
        let inside = LazyDelegate::new(|_| Ok(1));
        cx.lazy_build(|| inside.get(&cx)).unwrap();
        assert_eq!(inside.provenance(), Some(Provenance::BuildContext));

        let outside = LazyDelegate::new(|_| Ok(1));
        assert_eq!(outside.provenance(), None);
        outside.get(&cx).unwrap();
        assert_eq!(outside.provenance(), Some(Provenance::Unsanctioned));

        assert_eq!(LazyDelegate::ready(1).provenance(), Some(Provenance::Supplied));
    }
}

//! Hook chains - Ordered callbacks run against a shared mutable event

use crate::event::Propagation;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A registered callback. Identity is the allocation, so keep the `Rc`
/// around to remove the hook later.
pub type Hook<E> = Rc<dyn Fn(&mut E)>;

/// Wrap a closure as a [`Hook`]
pub fn hook<E, F>(f: F) -> Hook<E>
where
    F: Fn(&mut E) + 'static,
{
    Rc::new(f)
}

/// Callbacks invoked in registration order until one stops propagation
///
/// Running the chain iterates over a snapshot of the registered hooks, so a
/// hook may add or remove hooks (or trigger a nested run of the same chain)
/// without invalidating the iteration in progress.
pub struct HookChain<E> {
    hooks: RefCell<Vec<Hook<E>>>,
}

impl<E> Default for HookChain<E> {
    fn default() -> Self {
        HookChain {
            hooks: RefCell::new(Vec::new()),
        }
    }
}

impl<E> fmt::Debug for HookChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookChain").field("len", &self.len()).finish()
    }
}

impl<E> HookChain<E> {
    pub fn len(&self) -> usize {
        self.hooks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.borrow().is_empty()
    }
}

impl<E: Propagation> HookChain<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook to the end of the chain
    pub fn add(&self, hook: Hook<E>) {
        self.hooks.borrow_mut().push(hook);
    }

    /// Remove every registration of this exact hook
    ///
    /// Comparison is by pointer, so a different closure with the same body is
    /// not removed. Returns whether anything was removed.
    pub fn remove(&self, hook: &Hook<E>) -> bool {
        let mut hooks = self.hooks.borrow_mut();
        let before = hooks.len();
        hooks.retain(|registered| !Rc::ptr_eq(registered, hook));
        hooks.len() != before
    }

    pub fn contains(&self, hook: &Hook<E>) -> bool {
        self.hooks
            .borrow()
            .iter()
            .any(|registered| Rc::ptr_eq(registered, hook))
    }

    /// Run the hooks in order, stopping after the first one that stops
    /// propagation. Returns how many hooks ran.
    pub fn run(&self, event: &mut E) -> usize {
        let snapshot: Vec<Hook<E>> = self.hooks.borrow().clone();
        let mut ran = 0;
        for hook in snapshot {
            hook(event);
            ran += 1;
            if event.is_propagation_stopped() {
                break;
            }
        }
        ran
    }
}

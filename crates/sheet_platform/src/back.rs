//! Hardware back-button registry
//!
//! Back presses are a process-wide signal: any number of components may want
//! to intercept them. Handlers are dispatched most-recent first, and dispatch
//! stops at the first handler that returns `true`. If none does, the host
//! performs its default back action.
//!
//! Registrations are scoped: [`BackHandlerRegistry::add_listener`] returns a
//! [`BackSubscription`] that unregisters the handler when removed or dropped.
//! Removal is idempotent, so a component can release on close and again on
//! teardown without double-removing.
//!
//! The UI is single-threaded; the registry is `!Send` and the shared instance
//! from [`BackHandlerRegistry::current`] is per-thread.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a registered back handler
    pub struct BackHandlerId;
}

/// Back handler callback; returns `true` if the press was handled
pub type BackCallback = Rc<dyn Fn() -> bool>;

/// Result of dispatching a back press
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackDispatch {
    /// A handler consumed the press
    Handled,
    /// No handler consumed it; the host should run its default action
    Unhandled,
}

#[derive(Default)]
struct RegistryInner {
    handlers: SlotMap<BackHandlerId, BackCallback>,
    /// Registration order, oldest first
    order: Vec<BackHandlerId>,
}

thread_local! {
    static CURRENT: BackHandlerRegistry = BackHandlerRegistry::new();
}

/// Registry of hardware back-button handlers
#[derive(Clone, Default)]
pub struct BackHandlerRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl BackHandlerRegistry {
    /// Create an isolated registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared registry for this (UI) thread
    pub fn current() -> Self {
        CURRENT.with(Clone::clone)
    }

    /// Register a handler; it stays registered until the subscription is released
    pub fn add_listener<F>(&self, handler: F) -> BackSubscription
    where
        F: Fn() -> bool + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.handlers.insert(Rc::new(handler));
        inner.order.push(id);
        tracing::debug!(
            "BackHandlerRegistry: added {:?} ({} registered)",
            id,
            inner.order.len()
        );

        BackSubscription {
            registry: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.inner.borrow().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: BackHandlerId) -> bool {
        self.inner.borrow().handlers.contains_key(id)
    }

    /// Deliver a back press to the registered handlers, newest first
    ///
    /// Handlers run with no registry borrow held, so they may add or remove
    /// registrations (including their own).
    pub fn dispatch(&self) -> BackDispatch {
        let snapshot: Vec<(BackHandlerId, BackCallback)> = {
            let inner = self.inner.borrow();
            inner
                .order
                .iter()
                .rev()
                .filter_map(|id| inner.handlers.get(*id).map(|cb| (*id, Rc::clone(cb))))
                .collect()
        };

        for (id, callback) in snapshot {
            // Skip handlers removed by an earlier handler in this dispatch
            if !self.contains(id) {
                continue;
            }
            if callback() {
                tracing::debug!("BackHandlerRegistry: press handled by {:?}", id);
                return BackDispatch::Handled;
            }
        }
        BackDispatch::Unhandled
    }
}

fn remove_from(inner: &Rc<RefCell<RegistryInner>>, id: BackHandlerId) -> bool {
    let mut inner = inner.borrow_mut();
    if inner.handlers.remove(id).is_none() {
        return false;
    }
    inner.order.retain(|existing| *existing != id);
    tracing::debug!(
        "BackHandlerRegistry: removed {:?} ({} registered)",
        id,
        inner.order.len()
    );
    true
}

/// Scoped registration of a back handler
///
/// Dropping the subscription unregisters the handler.
pub struct BackSubscription {
    registry: Weak<RefCell<RegistryInner>>,
    id: Option<BackHandlerId>,
}

impl BackSubscription {
    pub fn id(&self) -> Option<BackHandlerId> {
        self.id
    }

    /// Whether this subscription still holds a registration
    pub fn is_active(&self) -> bool {
        match (self.id, self.registry.upgrade()) {
            (Some(id), Some(inner)) => inner.borrow().handlers.contains_key(id),
            _ => false,
        }
    }

    /// Unregister the handler; returns whether anything was removed
    ///
    /// Safe to call any number of times.
    pub fn remove(&mut self) -> bool {
        let Some(id) = self.id.take() else {
            return false;
        };
        match self.registry.upgrade() {
            Some(inner) => remove_from(&inner, id),
            None => false,
        }
    }
}

impl Drop for BackSubscription {
    fn drop(&mut self) {
        self.remove();
    }
}

impl std::fmt::Debug for BackSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackSubscription")
            .field("id", &self.id)
            .finish()
    }
}

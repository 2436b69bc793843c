//! Event registry and enabled flag shared by every behavior.

use quilt_core::alloc::HashMap;
use std::fmt;
use std::rc::Rc;

/// A registered event handler.
pub type Handler<E, R = ()> = Rc<dyn Fn(&E) -> R>;

/// Activation state of a behavior.
///
/// A behavior starts out `Pending` so that its first `enable` or `disable` always runs.
/// `Pending` counts as enabled for event delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    #[default]
    Pending,
    Enabled,
    Disabled,
}

/// Event emitter embedded in each behavior: one handler per event name.
pub struct DdBase<E, R = ()> {
    activation: Activation,
    handlers: HashMap<String, Handler<E, R>>,
}

impl<E, R> Default for DdBase<E, R> {
    fn default() -> Self {
        Self {
            activation: Activation::default(),
            handlers: HashMap::default(),
        }
    }
}

impl<E, R> fmt::Debug for DdBase<E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DdBase")
            .field("activation", &self.activation)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<E, R> DdBase<E, R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `name`, replacing any previous one.
    pub fn on(&mut self, name: impl Into<String>, handler: impl Fn(&E) -> R + 'static) {
        self.handlers.insert(name.into(), Rc::new(handler));
    }

    /// Remove the handler for `name`. No-op if none is registered.
    pub fn off(&mut self, name: &str) {
        self.handlers.remove(name);
    }

    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Mark enabled. Returns `false` if it already was.
    pub fn enable(&mut self) -> bool {
        if self.activation == Activation::Enabled {
            return false;
        }
        self.activation = Activation::Enabled;
        true
    }

    /// Mark disabled. Returns `false` if it already was.
    pub fn disable(&mut self) -> bool {
        if self.activation == Activation::Disabled {
            return false;
        }
        self.activation = Activation::Disabled;
        true
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn is_disabled(&self) -> bool {
        self.activation == Activation::Disabled
    }

    /// Drop every registered handler.
    pub fn destroy(&mut self) {
        self.handlers.clear();
    }

    /// Invoke the handler for `name`. Returns `None` while disabled or when nothing is
    /// registered.
    pub fn trigger_event(&self, name: &str, data: &E) -> Option<R> {
        if self.is_disabled() {
            return None;
        }
        // Clone out so the handler runs without borrowing the registry.
        let handler = self.handlers.get(name)?.clone();
        Some(handler(data))
    }

    /// The handler registered for `name`, for callers that must release their own
    /// borrows before invoking it.
    pub fn handler(&self, name: &str) -> Option<Handler<E, R>> {
        if self.is_disabled() {
            return None;
        }
        self.handlers.get(name).cloned()
    }
}

//! Keyboard Shortcut Binder
//!
//! A registry of key bindings fed by one document-level listener.
//! `bind` returns a guard; dropping the guard removes the binding, so a
//! binding lives exactly as long as the view that registered it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug;

/// When a binding may fire relative to keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPolicy {
    Always,
    /// Suppressed while focus is inside a text input
    UnlessTyping,
}

/// One key-down event as seen by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// `KeyboardEvent.code`, e.g. "Enter", "Escape"
    pub code: String,
    /// Focus is inside a text input
    pub typing: bool,
}

impl KeyPress {
    pub fn new(code: impl Into<String>, typing: bool) -> Self {
        Self {
            code: code.into(),
            typing,
        }
    }
}

type Action = Rc<dyn Fn()>;

struct Binding {
    id: u64,
    code: String,
    policy: FocusPolicy,
    action: Action,
}

impl Binding {
    fn matches(&self, press: &KeyPress) -> bool {
        if !self.code.eq_ignore_ascii_case(&press.code) {
            return false;
        }
        match self.policy {
            FocusPolicy::Always => true,
            FocusPolicy::UnlessTyping => !press.typing,
        }
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    bindings: Vec<Binding>,
}

/// Shared registry handle
#[derive(Clone, Default)]
pub struct KeyBindings {
    registry: Rc<RefCell<Registry>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&self, code: &str, policy: FocusPolicy, action: impl Fn() + 'static) -> KeyBinding {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.bindings.push(Binding {
            id,
            code: code.to_string(),
            policy,
            action: Rc::new(action),
        });
        debug!("Bound key {} (#{})", code, id);

        KeyBinding {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Fire every matching binding; returns how many fired
    pub fn dispatch(&self, press: &KeyPress) -> usize {
        // Actions may drop bindings, so none can run while the registry is borrowed.
        let actions: Vec<Action> = self
            .registry
            .borrow()
            .bindings
            .iter()
            .filter(|binding| binding.matches(press))
            .map(|binding| Rc::clone(&binding.action))
            .collect();

        for action in &actions {
            action();
        }
        actions.len()
    }

    pub fn active_count(&self) -> usize {
        self.registry.borrow().bindings.len()
    }
}

/// Registration guard; the binding is removed on drop
pub struct KeyBinding {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for KeyBinding {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().bindings.retain(|binding| binding.id != self.id);
            debug!("Unbound key #{}", self.id);
        }
    }
}

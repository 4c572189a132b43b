//! Opaque callback identifiers for JMK `SendFn` bindings.
//!
//! Layer bindings and hotkeys never carry raw closures: the config
//! layer registers a callback once and gets back an `ActionId`, which
//! is what actually lives inside a [`crate::layer::Binding`] or the
//! hotkey table. This keeps bindings `Copy` and diagnosable (a daemon
//! can log "fired action 7" without downcasting a trait object) per
//! the design notes in §9.

use std::collections::HashMap;

/// Opaque handle into an [`ActionRegistry`]. Structural equality and
/// `Copy` make it cheap to embed in `Binding`/hotkey-table entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(u32);

/// Holds the callbacks named by [`ActionId`]s. Callbacks run
/// exclusively on the daemon's UI thread (§5); the hook thread only
/// ever produces `ActionId`s to enqueue, never invokes them directly.
#[derive(Default)]
pub struct ActionRegistry {
    next_id: u32,
    callbacks: HashMap<ActionId, Box<dyn FnMut() + Send>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback and returns the `ActionId` bindings should
    /// reference.
    pub fn register(&mut self, callback: impl FnMut() + Send + 'static) -> ActionId {
        let id = ActionId(self.next_id);
        self.next_id += 1;
        self.callbacks.insert(id, Box::new(callback));
        id
    }

    /// Invokes the callback for `id`, if registered. Caller must be on
    /// the daemon's UI thread.
    pub fn invoke(&mut self, id: ActionId) {
        if let Some(cb) = self.callbacks.get_mut(&id) {
            cb();
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn distinct_registrations_get_distinct_ids() {
        let mut reg = ActionRegistry::new();
        let a = reg.register(|| {});
        let b = reg.register(|| {});
        assert_ne!(a, b);
    }

    #[test]
    fn invoke_runs_the_registered_closure() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut reg = ActionRegistry::new();
        let c = counter.clone();
        let id = reg.register(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        reg.invoke(id);
        reg.invoke(id);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}

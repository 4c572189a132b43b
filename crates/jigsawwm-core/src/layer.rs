//! Layers: the keymap overlays a [`crate::engine::JmkEngine`] resolves
//! inbound events against.

use std::collections::HashMap;

use crate::engine::ActionId;
use crate::vkey::VKey;

/// What a TapHold's hold resolves to (§3: "`hold` may name an OS
/// modifier, a callable, or a layer index").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldTarget {
    /// Inject this key down while held, up on release — typically a
    /// modifier (`LCONTROL`, `LMENU`, ...) but not required to be one.
    Modifier(VKey),
    /// Push this layer index onto the stack while held; pop on release.
    Layer(usize),
    /// Invoke a registered callback on press; invoke again (or a
    /// distinct release callback) is not modeled — callbacks fire once.
    Action(ActionId),
}

/// What a TapHold's tap resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapTarget {
    /// Emit this key's press immediately followed by its release.
    Key(VKey),
    /// Invoke a registered callback.
    Action(ActionId),
}

/// A layer binding for one `VKey`. A closed, tagged-variant sum per
/// the design notes (§9) — kept flat rather than made an open trait
/// object so the daemon can enumerate and diagnose every binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Remap to another key; press/release forward 1:1.
    Send(VKey),
    /// Invoke a user callback on press; the matching release is
    /// absorbed without forwarding (§4.2.1).
    SendFn(ActionId),
    /// Dual-role key driven by a [`crate::taphold::TapHoldMachine`].
    TapHold {
        tap: TapTarget,
        hold: HoldTarget,
        term_ms: u64,
        quick_tap_term_ms: u64,
    },
}

/// A partial keymap: VKey -> Binding. Unbound keys fall through to the
/// next layer down (or to the OS, for the base layer).
#[derive(Debug, Clone, Default)]
pub struct Layer {
    bindings: HashMap<VKey, Binding>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, key: VKey, binding: Binding) -> &mut Self {
        self.bindings.insert(key, binding);
        self
    }

    pub fn get(&self, key: VKey) -> Option<&Binding> {
        self.bindings.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VKey, &Binding)> {
        self.bindings.iter()
    }
}

/// One held-layer activation, so releasing the physical key that
/// pushed a layer pops exactly that layer even if other holds are
/// nested on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StackFrame {
    trigger: VKey,
    layer_index: usize,
}

/// The ordered list of active layer indices (§3). Layer 0 is always
/// the base and is never popped; additional frames are pushed by
/// `TapHold` holds and popped on release of the triggering key.
#[derive(Debug, Clone)]
pub struct LayerStack {
    frames: Vec<StackFrame>,
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStack {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn push(&mut self, trigger: VKey, layer_index: usize) {
        self.frames.push(StackFrame {
            trigger,
            layer_index,
        });
    }

    /// Pops the most recent frame pushed by `trigger`, if any. Frames
    /// pushed by other keys above it are left in place — this models
    /// nested holds without requiring strict LIFO release order.
    pub fn pop(&mut self, trigger: VKey) {
        if let Some(pos) = self.frames.iter().rposition(|f| f.trigger == trigger) {
            self.frames.remove(pos);
        }
    }

    /// Indices to search, base layer last, most-recently-pushed first —
    /// "lookup is top-down, first hit wins" (§3).
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.frames.iter().rev().map(|f| f.layer_index).chain(std::iter::once(0))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_layer_always_present() {
        let stack = LayerStack::new();
        assert_eq!(stack.active_indices().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn push_then_pop_restores_base_only() {
        let mut stack = LayerStack::new();
        stack.push(VKey::SPACE, 1);
        assert_eq!(stack.active_indices().collect::<Vec<_>>(), vec![1, 0]);
        stack.pop(VKey::SPACE);
        assert_eq!(stack.active_indices().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn pop_targets_the_matching_trigger() {
        let mut stack = LayerStack::new();
        stack.push(VKey::SPACE, 1);
        stack.push(VKey::CAPITAL, 2);
        stack.pop(VKey::SPACE);
        assert_eq!(stack.active_indices().collect::<Vec<_>>(), vec![2, 0]);
    }
}

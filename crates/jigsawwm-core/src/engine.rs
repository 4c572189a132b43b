//! JMK core — the layer engine (C3).
//!
//! Transforms the inbound physical/synthetic event stream into an
//! outbound stream of key injections plus a suppression decision,
//! per §4.2. All state here is touched only from the hook thread and
//! the UI thread's timer-expiry path (§5) — callers serialize access
//! with a single coarse mutex; this type itself is not `Sync`.

pub use crate::action_registry::ActionId;
use std::collections::{HashMap, HashSet};

use crate::action_registry::ActionRegistry;
use crate::chord::Chord;
use crate::input_event::InputEvent;
use crate::layer::{Binding, HoldTarget, Layer, LayerStack, TapTarget};
use crate::taphold::{TapHoldEffect, TapHoldMachine};
use crate::vkey::VKey;

/// What a registered hotkey chord resolves to (§4.2.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Emit this sequence of keys as an atomic press-then-release burst.
    EmitChord(Vec<VKey>),
    /// Invoke a registered callback.
    Call(ActionId),
}

/// Everything `on_event` needs the caller to do: inject these events
/// into the OS input queue (in order) and either suppress or forward
/// the original physical event; additionally run these actions on the
/// daemon thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    pub inject: Vec<(VKey, bool)>,
    pub suppress_original: bool,
    pub actions: Vec<ActionId>,
}

impl EngineOutput {
    fn forward() -> Self {
        Self {
            inject: Vec::new(),
            suppress_original: false,
            actions: Vec::new(),
        }
    }

    fn suppressed() -> Self {
        Self {
            inject: Vec::new(),
            suppress_original: true,
            actions: Vec::new(),
        }
    }
}

/// The layer engine: layer stack, per-key TapHold machines, and the
/// hotkey table, all resolved against a single logical clock.
pub struct JmkEngine {
    layers: Vec<Layer>,
    stack: LayerStack,
    taphold: HashMap<VKey, TapHoldMachine>,
    /// Logical (post-remap) keys currently depressed, used for hotkey
    /// chord matching.
    depressed: HashSet<VKey>,
    hotkeys: HashMap<Chord, HotkeyAction>,
    /// The chord currently matched and fired; refiring requires one
    /// constituent key to release first (§4.2.2).
    armed_chord: Option<Chord>,
    pub actions: ActionRegistry,
}

impl Default for JmkEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl JmkEngine {
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::new()],
            stack: LayerStack::new(),
            taphold: HashMap::new(),
            depressed: HashSet::new(),
            hotkeys: HashMap::new(),
            armed_chord: None,
            actions: ActionRegistry::new(),
        }
    }

    /// Appends a layer and returns its index (for `HoldTarget::Layer`
    /// and `switch`-style config references). Index 0 is the base
    /// layer, already present after `new()`.
    pub fn push_layer(&mut self, layer: Layer) -> usize {
        self.layers.push(layer);
        self.layers.len() - 1
    }

    pub fn base_layer_mut(&mut self) -> &mut Layer {
        &mut self.layers[0]
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn register_hotkey(&mut self, chord: Chord, action: HotkeyAction) {
        self.hotkeys.insert(chord, action);
    }

    pub fn layer_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Resolves one inbound event (§4.2.1).
    pub fn on_event(&mut self, event: InputEvent) -> EngineOutput {
        if event.synthetic {
            // Property 1: forwarded unchanged, no state transition.
            return EngineOutput::forward();
        }

        let mut out = EngineOutput::default();

        if event.pressed {
            let (inject, actions) = self.commit_other_pending_holds(event.vkey, event.timestamp_ms);
            out.inject.extend(inject);
            out.actions.extend(actions);
        }

        let binding = self.lookup(event.vkey);
        match binding.copied() {
            None => {
                self.track_logical(event.vkey, event.pressed);
                out.suppress_original = false;
            }
            Some(Binding::Send(target)) => {
                out.inject.push((target, event.pressed));
                self.track_logical(target, event.pressed);
                out.suppress_original = true;
            }
            Some(Binding::SendFn(id)) => {
                if event.pressed {
                    out.actions.push(id);
                }
                out.suppress_original = true;
            }
            Some(Binding::TapHold {
                tap,
                hold,
                term_ms,
                quick_tap_term_ms,
            }) => {
                out.suppress_original = true;
                let machine = self
                    .taphold
                    .entry(event.vkey)
                    .or_insert_with(|| TapHoldMachine::new(term_ms, quick_tap_term_ms));
                let effect = if event.pressed {
                    machine.on_press(event.timestamp_ms)
                } else {
                    machine.on_release(event.timestamp_ms)
                };
                let (inject, actions) = self.apply_taphold_effect(event.vkey, effect, tap, hold);
                out.inject.extend(inject);
                out.actions.extend(actions);
            }
        }

        if event.pressed {
            if let Some(fired) = self.check_hotkeys(event.vkey) {
                out.inject.extend(fired.0);
                out.actions.extend(fired.1);
                out.suppress_original = true;
            }
        }

        out
    }

    /// Advances every TapHold machine against the logical clock,
    /// emitting any term/quick-tap expirations. Called by the
    /// platform layer when a scheduled timer fires.
    pub fn on_timer_tick(&mut self, now_ms: u64) -> EngineOutput {
        let mut out = EngineOutput::default();
        let keys: Vec<VKey> = self.taphold.keys().copied().collect();
        for key in keys {
            let Some(binding) = self.lookup(key).cloned() else {
                continue;
            };
            let Binding::TapHold { tap, hold, .. } = binding else {
                continue;
            };
            let effect = self.taphold.get_mut(&key).unwrap().on_tick(now_ms);
            let (inject, actions) = self.apply_taphold_effect(key, effect, tap, hold);
            out.inject.extend(inject);
            out.actions.extend(actions);
        }
        out
    }

    /// Earliest deadline across all live TapHold machines, for the
    /// platform layer to schedule its next wakeup.
    pub fn next_deadline(&self) -> Option<u64> {
        self.taphold.values().filter_map(|m| m.deadline()).min()
    }

    fn lookup(&self, key: VKey) -> Option<&Binding> {
        for idx in self.stack.active_indices() {
            if let Some(binding) = self.layers[idx].get(key) {
                return Some(binding);
            }
        }
        None
    }

    fn track_logical(&mut self, key: VKey, pressed: bool) {
        if pressed {
            self.depressed.insert(key);
        } else {
            self.depressed.remove(&key);
            if self
                .armed_chord
                .as_ref()
                .is_some_and(|chord| chord.contains(key))
            {
                self.armed_chord = None;
            }
        }
    }

    /// Applies one TapHold transition's effect. Action targets are
    /// never invoked here — they are handed back in the second tuple
    /// slot so the caller can run them on the daemon's UI thread (§5:
    /// "All user callbacks ... execute on this thread", never inside
    /// the hook callback that drives `on_event`/`on_timer_tick`).
    fn apply_taphold_effect(
        &mut self,
        trigger: VKey,
        effect: TapHoldEffect,
        tap: TapTarget,
        hold: HoldTarget,
    ) -> (Vec<(VKey, bool)>, Vec<ActionId>) {
        match effect {
            TapHoldEffect::None => (Vec::new(), Vec::new()),
            TapHoldEffect::EmitTap => match tap {
                TapTarget::Key(k) => {
                    self.track_logical(k, true);
                    self.track_logical(k, false);
                    (vec![(k, true), (k, false)], Vec::new())
                }
                TapTarget::Action(id) => (Vec::new(), vec![id]),
            },
            TapHoldEffect::CommitHold | TapHoldEffect::CommitHoldAndForward => {
                self.commit_hold(trigger, hold)
            }
            TapHoldEffect::ReleaseHold => self.release_hold(trigger, hold),
        }
    }

    fn commit_hold(&mut self, trigger: VKey, hold: HoldTarget) -> (Vec<(VKey, bool)>, Vec<ActionId>) {
        match hold {
            HoldTarget::Modifier(k) => {
                self.track_logical(k, true);
                (vec![(k, true)], Vec::new())
            }
            HoldTarget::Layer(idx) => {
                self.stack.push(trigger, idx);
                (Vec::new(), Vec::new())
            }
            HoldTarget::Action(id) => (Vec::new(), vec![id]),
        }
    }

    fn release_hold(&mut self, trigger: VKey, hold: HoldTarget) -> (Vec<(VKey, bool)>, Vec<ActionId>) {
        match hold {
            HoldTarget::Modifier(k) => {
                self.track_logical(k, false);
                (vec![(k, false)], Vec::new())
            }
            HoldTarget::Layer(_) => {
                self.stack.pop(trigger);
                (Vec::new(), Vec::new())
            }
            HoldTarget::Action(_) => (Vec::new(), Vec::new()),
        }
    }

    /// Notifies every *other* Pending TapHold machine of a key press,
    /// committing holds per the "used is hold" heuristic (§4.3), and
    /// returns the resulting injections and actions in commit order.
    fn commit_other_pending_holds(
        &mut self,
        incoming: VKey,
        _now_ms: u64,
    ) -> (Vec<(VKey, bool)>, Vec<ActionId>) {
        let pending: Vec<VKey> = self
            .taphold
            .iter()
            .filter(|(k, m)| **k != incoming && m.state() == crate::taphold::TapHoldState::Pending)
            .map(|(k, _)| *k)
            .collect();

        let mut inject = Vec::new();
        let mut actions = Vec::new();
        for key in pending {
            let Some(binding) = self.lookup(key).cloned() else {
                continue;
            };
            let Binding::TapHold { hold, .. } = binding else {
                continue;
            };
            let effect = self.taphold.get_mut(&key).unwrap().on_other_key_press();
            if effect != TapHoldEffect::None {
                let (i, a) = self.commit_hold(key, hold);
                inject.extend(i);
                actions.extend(a);
            }
        }
        (inject, actions)
    }

    /// §4.2.2: after layer resolution of a press, checks whether the
    /// logically-depressed set matches a registered chord.
    ///
    /// `triggering` is the key whose press just completed the match —
    /// its own down was suppressed rather than forwarded, so only the
    /// *other* chord members (already sitting depressed in the OS)
    /// need an explicit cleanup release (S5).
    fn check_hotkeys(&mut self, triggering: VKey) -> Option<(Vec<(VKey, bool)>, Vec<ActionId>)> {
        let matched = self
            .hotkeys
            .keys()
            .find(|chord| self.chord_matches(chord))
            .cloned()?;

        if self.armed_chord.as_ref() == Some(&matched) {
            // Already fired for this depression; suppress without refiring.
            return Some((Vec::new(), Vec::new()));
        }
        self.armed_chord = Some(matched.clone());

        let mut inject = Vec::new();
        for key in matched.keys() {
            self.depressed.remove(&key);
            if key != triggering {
                inject.push((key, false));
            }
        }

        let mut actions = Vec::new();
        match self.hotkeys.get(&matched).cloned().unwrap() {
            HotkeyAction::EmitChord(keys) => {
                for &k in &keys {
                    inject.push((k, true));
                }
                for &k in keys.iter().rev() {
                    inject.push((k, false));
                }
            }
            HotkeyAction::Call(id) => actions.push(id),
        }
        Some((inject, actions))
    }

    fn chord_matches(&self, chord: &Chord) -> bool {
        chord.len() == self.depressed.len() && chord.keys().all(|k| self.depressed.contains(&k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(key: VKey, pressed: bool, ms: u64) -> InputEvent {
        InputEvent::physical(key, pressed, ms)
    }

    #[test]
    fn synthetic_events_pass_through_untouched() {
        let mut engine = JmkEngine::new();
        let before_depth = engine.layer_depth();
        let out = engine.on_event(InputEvent::synthetic(VKey::ENTER, true, 0));
        assert!(!out.suppress_original);
        assert!(out.inject.is_empty());
        assert_eq!(engine.layer_depth(), before_depth);
    }

    #[test]
    fn s1_quick_tap_emits_tap_only() {
        let mut engine = JmkEngine::new();
        engine.base_layer_mut().bind(
            VKey::CAPITAL,
            Binding::TapHold {
                tap: TapTarget::Key(VKey::ESCAPE),
                hold: HoldTarget::Modifier(VKey::LCONTROL),
                term_ms: 200,
                quick_tap_term_ms: 200,
            },
        );
        engine.on_event(ev(VKey::CAPITAL, true, 0));
        let out = engine.on_event(ev(VKey::CAPITAL, false, 50));
        assert_eq!(out.inject, vec![(VKey::ESCAPE, true), (VKey::ESCAPE, false)]);
    }

    #[test]
    fn s2_used_is_hold_emits_modifier_around_other_key() {
        let mut engine = JmkEngine::new();
        engine.base_layer_mut().bind(
            VKey::CAPITAL,
            Binding::TapHold {
                tap: TapTarget::Key(VKey::ESCAPE),
                hold: HoldTarget::Modifier(VKey::LCONTROL),
                term_ms: 200,
                quick_tap_term_ms: 200,
            },
        );
        engine.on_event(ev(VKey::CAPITAL, true, 0));
        let k_down = engine.on_event(ev(VKey::parse_token_for_test("K"), true, 80));
        assert_eq!(k_down.inject, vec![(VKey::LCONTROL, true)]);
        let release = engine.on_event(ev(VKey::CAPITAL, false, 250));
        assert_eq!(release.inject, vec![(VKey::LCONTROL, false)]);
    }

    #[test]
    fn s5_hotkey_chord_cleans_up_modifiers_then_emits_target() {
        let mut engine = JmkEngine::new();
        engine.register_hotkey(
            Chord::parse("Win+Q").unwrap(),
            HotkeyAction::EmitChord(vec![VKey::LMENU, VKey::function(4).unwrap()]),
        );
        engine.on_event(ev(VKey::LWIN, true, 0));
        let out = engine.on_event(ev(VKey::parse_token_for_test("Q"), true, 10));
        assert!(out.suppress_original);
        let f4 = VKey::function(4).unwrap();
        assert_eq!(
            out.inject,
            vec![
                (VKey::LWIN, false),
                (VKey::LMENU, true),
                (f4, true),
                (f4, false),
                (VKey::LMENU, false),
            ]
        );
    }

    impl VKey {
        fn parse_token_for_test(s: &str) -> VKey {
            VKey::parse_token(s).unwrap()
        }
    }
}

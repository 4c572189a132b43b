//! Per-physical-key TapHold finite state machine (§4.3).
//!
//! One [`TapHoldMachine`] instance exists per physical key that carries
//! a `TapHold` binding in the active layer. The machine itself knows
//! nothing about *what* a tap or hold emits — it only tracks state and
//! timer deadlines against the single logical clock the caller
//! supplies. [`crate::engine::JmkEngine`] owns the mapping from
//! [`TapHoldEffect`] to actual key injection / layer push-pop.

/// Current state of a TapHold key, named exactly as in the transition
/// table (§4.3) so the two stay easy to cross-reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapHoldState {
    Idle,
    Pending,
    Held,
    QuickTapPending,
}

/// What the engine must do in response to a TapHold transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapHoldEffect {
    /// No externally visible effect; state updated internally.
    None,
    /// Emit the tap target's press immediately followed by its release.
    EmitTap,
    /// Commit the hold target (push the held layer, or inject the
    /// modifier's press) because the term timer expired.
    CommitHold,
    /// Commit the hold target, then the caller must forward the
    /// other key-press that triggered the "used is hold" heuristic.
    CommitHoldAndForward,
    /// Release the committed hold target (pop the layer, or inject
    /// the modifier's release).
    ReleaseHold,
}

/// Per-key TapHold state machine driven entirely by a caller-supplied
/// monotonic millisecond clock — no wall-clock reads, per §4.3.
#[derive(Debug, Clone, Copy)]
pub struct TapHoldMachine {
    state: TapHoldState,
    term_ms: u64,
    quick_tap_term_ms: u64,
    /// Deadline for the currently pending timer, if any.
    deadline_ms: Option<u64>,
}

impl TapHoldMachine {
    pub fn new(term_ms: u64, quick_tap_term_ms: u64) -> Self {
        Self {
            state: TapHoldState::Idle,
            term_ms,
            quick_tap_term_ms,
            deadline_ms: None,
        }
    }

    pub fn state(&self) -> TapHoldState {
        self.state
    }

    /// The next timer this machine is waiting on, if any. The platform
    /// layer schedules a one-shot wakeup at this deadline via the
    /// daemon's cooperative scheduler and calls [`Self::on_timer`] when
    /// it fires (or earlier, opportunistically, on any other event).
    pub fn deadline(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Physical press of the bound key.
    pub fn on_press(&mut self, now_ms: u64) -> TapHoldEffect {
        match self.state {
            TapHoldState::Idle => {
                self.state = TapHoldState::Pending;
                self.deadline_ms = Some(now_ms + self.term_ms);
                TapHoldEffect::None
            }
            TapHoldState::QuickTapPending => {
                // Re-press within the quick-tap window: tap again
                // immediately and extend the window (every in-window
                // press extends it — see spec Open Questions).
                self.deadline_ms = Some(now_ms + self.quick_tap_term_ms);
                TapHoldEffect::EmitTap
            }
            TapHoldState::Pending | TapHoldState::Held => TapHoldEffect::None,
        }
    }

    /// Physical release of the bound key.
    pub fn on_release(&mut self, now_ms: u64) -> TapHoldEffect {
        match self.state {
            TapHoldState::Pending => {
                self.state = TapHoldState::QuickTapPending;
                self.deadline_ms = Some(now_ms + self.quick_tap_term_ms);
                TapHoldEffect::EmitTap
            }
            TapHoldState::Held => {
                self.state = TapHoldState::Idle;
                self.deadline_ms = None;
                TapHoldEffect::ReleaseHold
            }
            TapHoldState::QuickTapPending => {
                // Release of a re-press absorbed above; extend the window.
                self.deadline_ms = Some(now_ms + self.quick_tap_term_ms);
                TapHoldEffect::None
            }
            TapHoldState::Idle => TapHoldEffect::None,
        }
    }

    /// Any other key pressed while this machine is `Pending` — the
    /// "used is hold" heuristic.
    pub fn on_other_key_press(&mut self) -> TapHoldEffect {
        if self.state == TapHoldState::Pending {
            self.state = TapHoldState::Held;
            self.deadline_ms = None;
            TapHoldEffect::CommitHoldAndForward
        } else {
            TapHoldEffect::None
        }
    }

    /// Polls the machine against the logical clock. Called on every
    /// inbound event and on the scheduled timer wakeup; idempotent
    /// before the deadline.
    pub fn on_tick(&mut self, now_ms: u64) -> TapHoldEffect {
        let Some(deadline) = self.deadline_ms else {
            return TapHoldEffect::None;
        };
        if now_ms < deadline {
            return TapHoldEffect::None;
        }
        match self.state {
            TapHoldState::Pending => {
                self.state = TapHoldState::Held;
                self.deadline_ms = None;
                TapHoldEffect::CommitHold
            }
            TapHoldState::QuickTapPending => {
                self.state = TapHoldState::Idle;
                self.deadline_ms = None;
                TapHoldEffect::None
            }
            TapHoldState::Idle | TapHoldState::Held => TapHoldEffect::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_tap_round_trip_s1() {
        // S1: CAPITAL down@0, up@50, term=200 -> tap only.
        let mut m = TapHoldMachine::new(200, 200);
        assert_eq!(m.on_press(0), TapHoldEffect::None);
        assert_eq!(m.state(), TapHoldState::Pending);
        assert_eq!(m.on_tick(50), TapHoldEffect::None);
        assert_eq!(m.on_release(50), TapHoldEffect::EmitTap);
        assert_eq!(m.state(), TapHoldState::QuickTapPending);
    }

    #[test]
    fn used_is_hold_s2() {
        // S2: down@0, other key@80 (while pending), up@250 -> hold.
        let mut m = TapHoldMachine::new(200, 200);
        m.on_press(0);
        assert_eq!(m.on_other_key_press(), TapHoldEffect::CommitHoldAndForward);
        assert_eq!(m.state(), TapHoldState::Held);
        assert_eq!(m.on_release(250), TapHoldEffect::ReleaseHold);
        assert_eq!(m.state(), TapHoldState::Idle);
    }

    #[test]
    fn term_expiry_without_other_key_commits_hold() {
        let mut m = TapHoldMachine::new(200, 200);
        m.on_press(0);
        assert_eq!(m.on_tick(199), TapHoldEffect::None);
        assert_eq!(m.on_tick(200), TapHoldEffect::CommitHold);
        assert_eq!(m.state(), TapHoldState::Held);
    }

    #[test]
    fn quick_tap_sequence_emits_four_events() {
        // p down,up,down(within window),up -> two EmitTap effects total.
        let mut m = TapHoldMachine::new(200, 200);
        m.on_press(0);
        assert_eq!(m.on_release(50), TapHoldEffect::EmitTap);
        assert_eq!(m.on_press(100), TapHoldEffect::EmitTap);
        assert_eq!(m.state(), TapHoldState::QuickTapPending);
        assert_eq!(m.on_release(120), TapHoldEffect::None);
    }

    #[test]
    fn quick_tap_window_expires_back_to_idle() {
        let mut m = TapHoldMachine::new(200, 150);
        m.on_press(0);
        m.on_release(50);
        assert_eq!(m.on_tick(199), TapHoldEffect::None);
        assert_eq!(m.on_tick(200), TapHoldEffect::None);
        assert_eq!(m.state(), TapHoldState::Idle);
    }
}

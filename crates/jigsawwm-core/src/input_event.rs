//! The normalized event record C2 hands to C3 on every physical or
//! synthetic key/button transition.

use crate::vkey::VKey;

/// A single key/button transition, normalized from whichever OS hook
/// produced it (`WH_KEYBOARD_LL` or `WH_MOUSE_LL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub vkey: VKey,
    pub pressed: bool,
    /// `true` for events carrying the injection sentinel — the engine
    /// injected these itself via `inject` and must forward them
    /// unchanged (property 1, §8).
    pub synthetic: bool,
    /// Monotonic milliseconds from the single logical clock driving
    /// TapHold timers (§4.3). Never a wall-clock read.
    pub timestamp_ms: u64,
}

impl InputEvent {
    pub fn physical(vkey: VKey, pressed: bool, timestamp_ms: u64) -> Self {
        Self {
            vkey,
            pressed,
            synthetic: false,
            timestamp_ms,
        }
    }

    pub fn synthetic(vkey: VKey, pressed: bool, timestamp_ms: u64) -> Self {
        Self {
            vkey,
            pressed,
            synthetic: true,
            timestamp_ms,
        }
    }
}

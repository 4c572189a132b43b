//! Canonical key identity shared by the hook surface, the layer engine,
//! and chord parsing.
//!
//! `VKey` wraps the numeric space Win32 already uses for virtual-key
//! codes (`VK_*`, `0x00..=0xFF`) and extends it with synthetic codes for
//! mouse wheel directions and X-buttons that have no `VK_*` constant.
//! Keeping the representation a plain `u16` (rather than a ~260-variant
//! enum) lets the platform layer hand hook codes straight through
//! without a giant match, while named constants give call sites the
//! same ergonomics as an enum.

use std::fmt;

/// A keyboard, mouse-button, or synthetic virtual key.
///
/// Equality is structural (`#[derive(PartialEq)]` over the wrapped
/// code), matching the spec's requirement that `VKey` form a closed,
/// structurally-comparable set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VKey(pub u16);

impl VKey {
    pub const LBUTTON: VKey = VKey(0x01);
    pub const RBUTTON: VKey = VKey(0x02);
    pub const MBUTTON: VKey = VKey(0x04);
    pub const BACKSPACE: VKey = VKey(0x08);
    pub const TAB: VKey = VKey(0x09);
    pub const ENTER: VKey = VKey(0x0D);
    pub const SHIFT: VKey = VKey(0x10);
    pub const CONTROL: VKey = VKey(0x11);
    pub const MENU: VKey = VKey(0x12); // ALT
    pub const CAPITAL: VKey = VKey(0x14); // CAPS LOCK
    pub const ESCAPE: VKey = VKey(0x1B);
    pub const SPACE: VKey = VKey(0x20);
    pub const PAGE_UP: VKey = VKey(0x21);
    pub const PAGE_DOWN: VKey = VKey(0x22);
    pub const END: VKey = VKey(0x23);
    pub const HOME: VKey = VKey(0x24);
    pub const LEFT: VKey = VKey(0x25);
    pub const UP: VKey = VKey(0x26);
    pub const RIGHT: VKey = VKey(0x27);
    pub const DOWN: VKey = VKey(0x28);
    pub const INSERT: VKey = VKey(0x2D);
    pub const DELETE: VKey = VKey(0x2E);
    pub const LWIN: VKey = VKey(0x5B);
    pub const RWIN: VKey = VKey(0x5C);
    pub const LSHIFT: VKey = VKey(0xA0);
    pub const RSHIFT: VKey = VKey(0xA1);
    pub const LCONTROL: VKey = VKey(0xA2);
    pub const RCONTROL: VKey = VKey(0xA3);
    pub const LMENU: VKey = VKey(0xA4);
    pub const RMENU: VKey = VKey(0xA5);
    pub const OEM_MINUS: VKey = VKey(0xBD);
    pub const OEM_PLUS: VKey = VKey(0xBB);
    pub const OEM_COMMA: VKey = VKey(0xBC);
    pub const OEM_PERIOD: VKey = VKey(0xBE);
    pub const F1: VKey = VKey(0x70);

    /// First synthetic code, one past the last real OS virtual-key (0xFF).
    const SYNTHETIC_BASE: u16 = 0x100;
    pub const WHEEL_UP: VKey = VKey(Self::SYNTHETIC_BASE);
    pub const WHEEL_DOWN: VKey = VKey(Self::SYNTHETIC_BASE + 1);
    pub const WHEEL_LEFT: VKey = VKey(Self::SYNTHETIC_BASE + 2);
    pub const WHEEL_RIGHT: VKey = VKey(Self::SYNTHETIC_BASE + 3);
    pub const XBUTTON1: VKey = VKey(Self::SYNTHETIC_BASE + 4);
    pub const XBUTTON2: VKey = VKey(Self::SYNTHETIC_BASE + 5);

    /// Function key `Fn` for `n` in `1..=24`. Returns `None` outside range.
    pub fn function(n: u8) -> Option<VKey> {
        if (1..=24).contains(&n) {
            Some(VKey(Self::F1.0 + u16::from(n) - 1))
        } else {
            None
        }
    }

    /// `true` for any modifier key (shift/ctrl/alt/win, left or right or generic).
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            VKey::SHIFT
                | VKey::CONTROL
                | VKey::MENU
                | VKey::LWIN
                | VKey::RWIN
                | VKey::LSHIFT
                | VKey::RSHIFT
                | VKey::LCONTROL
                | VKey::RCONTROL
                | VKey::LMENU
                | VKey::RMENU
        )
    }

    /// `true` for the synthetic extensions (wheel directions, X-buttons)
    /// that have no OS virtual-key code of their own.
    pub fn is_synthetic_extension(self) -> bool {
        self.0 >= Self::SYNTHETIC_BASE
    }

    /// Parses a single case-insensitive token ("ctrl", "j", "f1", ...).
    ///
    /// Shared by [`crate::chord::Chord::parse`], which splits a
    /// `"Mod+Mod+Key"` string on `+` and parses each token with this.
    pub fn parse_token(token: &str) -> Option<VKey> {
        let upper = token.trim().to_ascii_uppercase();
        if upper.len() == 1 {
            let ch = upper.as_bytes()[0];
            if ch.is_ascii_uppercase() || ch.is_ascii_digit() {
                return Some(VKey(u16::from(ch)));
            }
        }
        if let Some(rest) = upper.strip_prefix('F')
            && let Ok(n) = rest.parse::<u8>()
        {
            return VKey::function(n);
        }
        Some(match upper.as_str() {
            "CTRL" | "CONTROL" => VKey::CONTROL,
            "LCTRL" | "LCONTROL" => VKey::LCONTROL,
            "RCTRL" | "RCONTROL" => VKey::RCONTROL,
            "SHIFT" => VKey::SHIFT,
            "LSHIFT" => VKey::LSHIFT,
            "RSHIFT" => VKey::RSHIFT,
            "ALT" | "MENU" => VKey::MENU,
            "LALT" | "LMENU" => VKey::LMENU,
            "RALT" | "RMENU" => VKey::RMENU,
            "WIN" | "LWIN" | "SUPER" => VKey::LWIN,
            "RWIN" => VKey::RWIN,
            "ENTER" | "RETURN" => VKey::ENTER,
            "TAB" => VKey::TAB,
            "ESCAPE" | "ESC" => VKey::ESCAPE,
            "SPACE" => VKey::SPACE,
            "BACKSPACE" => VKey::BACKSPACE,
            "DELETE" | "DEL" => VKey::DELETE,
            "INSERT" | "INS" => VKey::INSERT,
            "HOME" => VKey::HOME,
            "END" => VKey::END,
            "PAGEUP" | "PGUP" => VKey::PAGE_UP,
            "PAGEDOWN" | "PGDN" => VKey::PAGE_DOWN,
            "LEFT" => VKey::LEFT,
            "UP" => VKey::UP,
            "RIGHT" => VKey::RIGHT,
            "DOWN" => VKey::DOWN,
            "CAPSLOCK" | "CAPITAL" => VKey::CAPITAL,
            "MINUS" => VKey::OEM_MINUS,
            "PLUS" | "EQUALS" => VKey::OEM_PLUS,
            "COMMA" => VKey::OEM_COMMA,
            "PERIOD" | "DOT" => VKey::OEM_PERIOD,
            "WHEELUP" => VKey::WHEEL_UP,
            "WHEELDOWN" => VKey::WHEEL_DOWN,
            "WHEELLEFT" => VKey::WHEEL_LEFT,
            "WHEELRIGHT" => VKey::WHEEL_RIGHT,
            "XBUTTON1" => VKey::XBUTTON1,
            "XBUTTON2" => VKey::XBUTTON2,
            "LBUTTON" => VKey::LBUTTON,
            "RBUTTON" => VKey::RBUTTON,
            "MBUTTON" => VKey::MBUTTON,
            _ => return None,
        })
    }
}

impl fmt::Display for VKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VK(0x{:02X})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_round_trip() {
        assert_eq!(VKey::parse_token("j"), Some(VKey(0x4A)));
        assert_eq!(VKey::parse_token("J"), Some(VKey(0x4A)));
        assert_eq!(VKey::parse_token("5"), Some(VKey(0x35)));
    }

    #[test]
    fn modifiers_are_recognized() {
        assert!(VKey::CONTROL.is_modifier());
        assert!(VKey::LWIN.is_modifier());
        assert!(!VKey::parse_token("j").unwrap().is_modifier());
    }

    #[test]
    fn synthetic_extensions_have_no_os_code() {
        assert!(VKey::WHEEL_UP.is_synthetic_extension());
        assert!(!VKey::ENTER.is_synthetic_extension());
    }

    #[test]
    fn function_keys_parse() {
        assert_eq!(VKey::parse_token("F1"), Some(VKey::F1));
        assert_eq!(VKey::parse_token("f12"), VKey::function(12));
        assert_eq!(VKey::function(0), None);
        assert_eq!(VKey::function(25), None);
    }

    #[test]
    fn unknown_token_is_none() {
        assert_eq!(VKey::parse_token("NOTAKEY"), None);
    }
}

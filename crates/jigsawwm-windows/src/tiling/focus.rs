//! Focus management and monitor switching for the tiling manager.

use jigsawwm_core::Window as WindowTrait;
use windows::Win32::UI::WindowsAndMessaging::SetCursorPos;

use crate::window::Window;

use super::TilingManager;

impl TilingManager {
    /// Moves the cursor to the center of the given window.
    fn warp_cursor_to(hwnd: usize) {
        let Ok(rect) = Window::from_raw(hwnd).rect() else {
            return;
        };
        // SAFETY: SetCursorPos is safe to call with screen coordinates.
        unsafe {
            let _ = SetCursorPos(rect.center_x(), rect.center_y());
        }
    }

    fn set_focus(&mut self, hwnd: usize) {
        self.focused_window = Some(hwnd);
        self.focused_maximized = Window::from_raw(hwnd).is_maximized();
        let _ = Window::from_raw(hwnd).activate_and_focus();
    }

    /// Focuses `hwnd`, warping the cursor only if `mouse_follows_focus`
    /// is enabled and the focus change didn't itself come from the mouse.
    pub(super) fn focus_and_follow(&mut self, hwnd: usize) {
        self.set_focus(hwnd);
        if self.mouse_follows_focus && !self.focus_from_mouse {
            Self::warp_cursor_to(hwnd);
        }
        self.focus_from_mouse = false;
    }

    /// Focuses `hwnd` and always warps the cursor — used by monitor
    /// switching, where the user's attention is moving regardless of
    /// the `mouse_follows_focus` setting.
    pub(super) fn focus_and_warp(&mut self, hwnd: usize) {
        self.set_focus(hwnd);
        Self::warp_cursor_to(hwnd);
    }

    /// `prev_monitor`/`next_monitor`: focuses the active window on an
    /// adjacent monitor and warps the cursor there.
    pub(super) fn switch_monitor(&mut self, delta: isize) {
        let len = self.monitors.len();
        if len == 0 {
            return;
        }
        let next = (self.focused_monitor as isize + delta).rem_euclid(len as isize) as usize;
        self.focused_monitor = next;
        if let Some(hwnd) = self.monitors[next].active_ws().active() {
            self.focus_and_warp(hwnd);
        }
    }

    /// `move_to_prev_monitor`/`move_to_next_monitor`: reassigns the
    /// focused window to an adjacent monitor and retiles both.
    pub(super) fn move_to_monitor(&mut self, delta: isize) {
        let len = self.monitors.len();
        if len < 2 {
            return;
        }
        let Some(hwnd) = self.focused_window else {
            return;
        };
        let src = self.focused_monitor;
        let dst = (src as isize + delta).rem_euclid(len as isize) as usize;
        if src == dst {
            return;
        }
        self.monitors[src].active_ws_mut().remove(hwnd);
        self.monitors[dst].active_ws_mut().add(hwnd);
        self.apply_layout_on(src);
        self.apply_layout_on(dst);
        self.focused_monitor = dst;
        self.focus_and_warp(hwnd);
    }

    /// Focuses the first window on the primary monitor at startup.
    pub(super) fn focus_initial(&mut self) {
        if let Some(mon) = self.monitors.first()
            && let Some(hwnd) = mon.active_ws().active()
        {
            self.focus_and_follow(hwnd);
        }
    }
}

//! Window lookup and windowlist manipulation helpers for the tiling manager.

use jigsawwm_core::Window as WindowTrait;
use jigsawwm_core::should_manage;

use crate::monitor;
use crate::window::Window;

use super::TilingManager;

impl TilingManager {
    pub(super) fn is_tileable(&self, hwnd: usize) -> bool {
        let window = Window::from_raw(hwnd);
        if !window.is_visible() || !window.is_app_window() {
            return false;
        }
        let exe = window.exe_basename().unwrap_or_default();
        let title = window.title().unwrap_or_default();
        let class = window.class().unwrap_or_default();
        should_manage(&exe, &title, &class, &self.rules)
    }

    /// Re-assigns a window to the correct monitor after it was moved.
    ///
    /// If the window moved to a different monitor, it is removed from
    /// the old workspace and added to the new one, then both monitors
    /// are re-tiled.
    pub(super) fn reassign_monitor(&mut self, hwnd: usize) {
        let old = self.owning_monitor(hwnd);
        let new = self.monitor_index_for(hwnd);

        match (old, new) {
            (Some(from), Some(to)) if from != to => {
                self.monitors[from].active_ws_mut().remove(hwnd);
                self.monitors[to].active_ws_mut().add(hwnd);
                self.apply_layout_on(from);
                self.apply_layout_on(to);
            }
            (Some(idx), Some(_)) => {
                // Same monitor — just re-tile to snap it back.
                self.apply_layout_on(idx);
            }
            (None, Some(to)) if self.is_tileable(hwnd) => {
                // Window wasn't tracked but appeared on a monitor.
                self.monitors[to].active_ws_mut().add(hwnd);
                self.apply_layout_on(to);
            }
            _ => {}
        }
    }

    pub(super) fn monitor_index_for(&self, hwnd: usize) -> Option<usize> {
        let id = monitor::monitor_id_for_window(Window::from_raw(hwnd).hwnd()).ok()?;
        self.monitors.iter().position(|m| m.id == id)
    }

    pub(super) fn owning_monitor(&self, hwnd: usize) -> Option<usize> {
        self.monitors
            .iter()
            .position(|m| m.workspaces.iter().any(|ws| ws.contains(hwnd)))
    }

    /// Finds which monitor and workspace contain the given window.
    pub(super) fn find_window(&self, hwnd: usize) -> Option<(usize, usize)> {
        for (mi, mon) in self.monitors.iter().enumerate() {
            for (wi, ws) in mon.workspaces.iter().enumerate() {
                if ws.contains(hwnd) {
                    return Some((mi, wi));
                }
            }
        }
        None
    }

    /// `next_window`/`prev_window`: moves the active index in the
    /// focused monitor's active workspace and focuses the result.
    pub(super) fn step_window(&mut self, delta: isize) {
        let idx = self.focused_monitor;
        let Some(mon) = self.monitors.get_mut(idx) else {
            return;
        };
        if let Some(hwnd) = mon.active_ws_mut().move_active(delta) {
            self.focus_and_follow(hwnd);
        }
    }

    pub(super) fn swap_window(&mut self, delta: isize) {
        let idx = self.focused_monitor;
        let Some(mon) = self.monitors.get_mut(idx) else {
            return;
        };
        mon.active_ws_mut().swap_active(delta);
        self.apply_layout_on(idx);
    }

    pub(super) fn set_master(&mut self) {
        let idx = self.focused_monitor;
        let Some(mon) = self.monitors.get_mut(idx) else {
            return;
        };
        mon.active_ws_mut().set_master();
        self.apply_layout_on(idx);
    }

    pub(super) fn roll_windows(&mut self, delta: isize) {
        let idx = self.focused_monitor;
        let Some(mon) = self.monitors.get_mut(idx) else {
            return;
        };
        mon.active_ws_mut().roll(delta);
        self.apply_layout_on(idx);
    }

    pub(super) fn toggle_tilable(&mut self) {
        let idx = self.focused_monitor;
        let Some(hwnd) = self.focused_window else {
            return;
        };
        let Some(mon) = self.monitors.get_mut(idx) else {
            return;
        };
        mon.active_ws_mut().toggle_tilable(hwnd);
        self.apply_layout_on(idx);
    }

    pub(super) fn close_focused(&mut self) {
        let Some(hwnd) = self.focused_window else {
            return;
        };
        crate::window::close(hwnd);
    }

    pub(super) fn minimize_focused(&mut self) {
        let Some(hwnd) = self.focused_window else {
            return;
        };
        let _ = Window::from_raw(hwnd).minimize();
    }
}

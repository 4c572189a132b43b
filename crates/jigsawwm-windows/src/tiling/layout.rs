//! Layout application: per-monitor themes and monocle mode.
//!
//! Computes window positions from the workspace handle list and
//! applies them via Win32. Skips windows whose position is already
//! correct to avoid unnecessary repaints.

use jigsawwm_core::Window as WindowTrait;
use jigsawwm_core::layout::Monocle;

use super::{TilingManager, Window};

impl TilingManager {
    pub(super) fn toggle_mono(&mut self) {
        let idx = self.focused_monitor;
        let hwnd = self.focused_window;
        let Some(mon) = self.monitors.get_mut(idx) else {
            return;
        };
        let enabling = !mon.active_ws().monocle();
        mon.active_ws_mut().set_monocle(enabling);
        mon.active_ws_mut()
            .set_monocle_window(if enabling { hwnd } else { None });
        self.apply_layout_on(idx);
    }

    pub(super) fn cycle_theme(&mut self, delta: isize) {
        let idx = self.focused_monitor;
        let len = self.themes.len() as isize;
        if len == 0 {
            return;
        }
        let Some(mon) = self.monitors.get_mut(idx) else {
            return;
        };
        mon.active_theme = (mon.active_theme as isize + delta).rem_euclid(len) as usize;
        self.apply_layout_on(idx);
    }

    pub(super) fn set_theme(&mut self, name: &str) {
        let Some(pos) = self.themes.iter().position(|t| t.layout().name() == name) else {
            return;
        };
        let idx = self.focused_monitor;
        let Some(mon) = self.monitors.get_mut(idx) else {
            return;
        };
        mon.active_theme = pos;
        self.apply_layout_on(idx);
    }

    pub(super) fn retile_all(&mut self) {
        for i in 0..self.monitors.len() {
            self.apply_layout_on(i);
        }
    }

    pub(super) fn apply_layout_on(&mut self, monitor_idx: usize) {
        self.prune_stale_handles(monitor_idx);
        self.applying_layout = true;

        let Some(state) = self.monitors.get(monitor_idx) else {
            self.applying_layout = false;
            return;
        };

        let positions = if state.active_ws().monocle() {
            let monocle = Monocle { gap: self.monocle_gap };
            state.active_ws().compute_layout(&monocle, &state.work_area)
        } else {
            let theme = &self.themes[state.active_theme];
            state.active_ws().compute_layout(theme.layout(), &state.work_area)
        };

        for (hwnd, rect) in &positions {
            let window = Window::from_raw(*hwnd);
            // Compare against the compensated rect: `Window::rect` reads
            // back the outer frame `SetWindowPos` actually placed, which
            // includes the invisible border `rect` itself doesn't.
            let compensated = window.compensated_rect(rect);
            let already_placed = window
                .rect()
                .ok()
                .is_some_and(|current| current.approx_eq(&compensated, jigsawwm_core::Rect::DEFAULT_TOLERANCE));
            if already_placed {
                continue;
            }
            match window.set_rect(rect) {
                Ok(applied) => {
                    self.expected_rects.insert(*hwnd, applied);
                }
                Err(e) => eprintln!("Failed to position window 0x{hwnd:X}: {e}"),
            }
            window.invalidate();
        }
        self.applying_layout = false;
    }

    /// Removes handles from the workspace that are no longer valid windows.
    ///
    /// Some windows (especially UWP and WinUI apps) may close without
    /// firing a reliable `EVENT_OBJECT_DESTROY`. This ensures stale
    /// handles don't leave phantom slots in the layout.
    fn prune_stale_handles(&mut self, monitor_idx: usize) {
        let Some(state) = self.monitors.get_mut(monitor_idx) else {
            return;
        };
        let stale: Vec<usize> = state
            .active_ws()
            .handles()
            .iter()
            .copied()
            .filter(|&hwnd| !Window::from_raw(hwnd).is_visible())
            .collect();
        for hwnd in stale {
            state.active_ws_mut().remove(hwnd);
        }
    }
}

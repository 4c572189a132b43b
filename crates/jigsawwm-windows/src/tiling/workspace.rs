//! Workspace switching: switch-to and move-to operations (§4.7).
//!
//! Manages hiding/showing windows when switching workspaces and
//! tracks programmatically hidden windows to prevent spurious
//! `Hidden`/`Destroyed` removals.

use super::TilingManager;

impl TilingManager {
    /// Switches to workspace `target` (0-indexed) on the focused monitor.
    ///
    /// Hides windows on the current workspace, shows windows on the
    /// target, retiles, and focuses the first window.
    pub(super) fn switch_to_workspace(&mut self, target: usize) {
        let mon_idx = self.focused_monitor;
        let Some(mon) = self.monitors.get(mon_idx) else {
            return;
        };
        if target >= mon.workspaces.len() || mon.active_workspace == target {
            return;
        }

        // Mark current workspace windows as programmatically hidden so
        // Hidden/Destroyed events are ignored for them.
        for &hwnd in mon.active_ws().handles() {
            self.hidden_by_switch.insert(hwnd);
            self.hide_window(hwnd);
        }

        self.monitors[mon_idx].active_workspace = target;

        // Show windows on the target workspace and unmark them.
        for &hwnd in self.monitors[mon_idx].active_ws().handles() {
            self.hidden_by_switch.remove(&hwnd);
            self.show_window(hwnd);
        }

        jigsawwm_core::log_info!(
            "switch-to-workspace {} on mon {} ({} windows)",
            target,
            mon_idx,
            self.monitors[mon_idx].active_ws().len()
        );

        self.apply_layout_on(mon_idx);

        if let Some(hwnd) = self.monitors[mon_idx].active_ws().active() {
            self.focus_and_follow(hwnd);
        } else {
            self.focused_window = None;
        }
    }

    /// Reassigns the focused window to workspace `target` (0-indexed)
    /// on the same monitor. The window is hidden if the target
    /// workspace is not active.
    pub(super) fn move_to_workspace(&mut self, target: usize) {
        let Some(hwnd) = self.focused_window else {
            return;
        };
        let mon_idx = self.focused_monitor;
        let Some(mon) = self.monitors.get(mon_idx) else {
            return;
        };
        if target >= mon.workspaces.len() || mon.active_workspace == target {
            return;
        }
        if !mon.active_ws().contains(hwnd) {
            return;
        }
        let src = mon.active_workspace;

        self.monitors[mon_idx].active_ws_mut().remove(hwnd);
        self.monitors[mon_idx].workspaces[target].add(hwnd);

        self.hidden_by_switch.insert(hwnd);
        self.hide_window(hwnd);

        jigsawwm_core::log_info!(
            "move-to-workspace 0x{:X} on mon {} (ws {} -> ws {})",
            hwnd,
            mon_idx,
            src,
            target
        );

        self.apply_layout_on(mon_idx);

        if let Some(next) = self.monitors[mon_idx].active_ws().active() {
            self.focus_and_follow(next);
        } else {
            self.focused_window = None;
        }
    }
}

//! Lifecycle and configuration reload for the tiling manager.

use jigsawwm_core::WindowRule;
use jigsawwm_core::config::{Config, HidingBehaviour};

use crate::window::Window;

use super::TilingManager;

impl TilingManager {
    /// Shows all windows across every workspace and monitor.
    ///
    /// Called on daemon shutdown so that windows hidden by workspace
    /// switching are restored and not left invisible.
    pub fn restore_all_windows(&mut self) {
        for mon in &self.monitors {
            for ws in &mon.workspaces {
                for &hwnd in ws.handles() {
                    Window::from_raw(hwnd).force_show();
                }
            }
        }
        self.hidden_by_switch.clear();
    }

    /// Hides a window using the configured strategy.
    pub(super) fn hide_window(&self, hwnd: usize) {
        let win = Window::from_raw(hwnd);
        match self.hiding {
            HidingBehaviour::OffScreen => win.hide(),
            HidingBehaviour::Hide => win.conceal(),
        }
    }

    /// Shows a window, reversing the configured hiding strategy. Both
    /// strategies reverse the same way: `SW_SHOWNOACTIVATE` un-hides a
    /// concealed window and is a no-op for one merely parked off-screen,
    /// which the next `apply_layout_on` moves back on-screen.
    pub(super) fn show_window(&self, hwnd: usize) {
        Window::from_raw(hwnd).show();
    }

    /// Applies a new ambient configuration and retiles all windows.
    pub fn reload_config(&mut self, config: &Config) {
        self.hiding = config.layout.hiding;
        self.mouse_follows_focus = config.mouse.follows_focus;
        self.monocle_gap = config.layout.gap;
        self.retile_all();
    }

    /// Replaces the window rules and removes windows that should no
    /// longer be managed under the new rule set.
    pub fn reload_rules(&mut self, rules: Vec<WindowRule>) {
        self.rules = rules;
        self.remove_newly_unmanaged();
    }

    /// Removes tiled windows that no longer pass `is_tileable` and
    /// retiles affected monitors.
    fn remove_newly_unmanaged(&mut self) {
        // Collect first (immutable) to avoid borrow conflicts.
        let mut removals: Vec<(usize, usize, usize)> = Vec::new();
        for (mi, mon) in self.monitors.iter().enumerate() {
            for (wi, ws) in mon.workspaces.iter().enumerate() {
                for &hwnd in ws.handles() {
                    if !self.is_tileable(hwnd) {
                        removals.push((mi, wi, hwnd));
                    }
                }
            }
        }
        if removals.is_empty() {
            return;
        }
        let mut affected: Vec<usize> = Vec::new();
        for &(mi, wi, hwnd) in &removals {
            self.monitors[mi].workspaces[wi].remove(hwnd);
            jigsawwm_core::log_info!("-rule 0x{hwnd:X} (unmanaged by new rules)");
            if !affected.contains(&mi) {
                affected.push(mi);
            }
        }
        for idx in affected {
            self.apply_layout_on(idx);
        }
    }
}

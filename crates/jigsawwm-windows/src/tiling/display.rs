//! Monitor display change handling for the tiling manager.

use jigsawwm_core::Workspace;
use jigsawwm_core::action::MAX_WORKSPACES;
use jigsawwm_core::layout::affinity_index;

use crate::monitor::MonitorInfo;

use super::{MonitorState, TilingManager};

impl TilingManager {
    /// Rebuilds internal monitor state after a display configuration change.
    ///
    /// Preserves workspaces for monitors that still exist (matched by
    /// device ID, with position fallback). Windows on removed monitors
    /// are migrated to the primary remaining monitor's active workspace.
    pub fn handle_display_change(&mut self, new_monitors: Vec<MonitorInfo>) {
        if new_monitors.is_empty() {
            return;
        }

        let old_count = self.monitors.len();
        let new_count = new_monitors.len();

        // Debounce rapid WM_DISPLAYCHANGE notifications that report no
        // actual change.
        if old_count == new_count {
            let unchanged = new_monitors
                .iter()
                .zip(self.monitors.iter())
                .all(|(new, old)| new.id == old.id && new.work_area == old.work_area);
            if unchanged {
                return;
            }
        }

        jigsawwm_core::log_info!("Display change: {} -> {} monitors", old_count, new_count);

        let mut new_states: Vec<MonitorState> = Vec::with_capacity(new_count);

        for info in &new_monitors {
            let old_idx = self
                .monitors
                .iter()
                .position(|m| m.id == info.id)
                .or_else(|| {
                    self.monitors.iter().position(|m| {
                        m.work_area.x == info.work_area.x && m.work_area.y == info.work_area.y
                    })
                });

            if let Some(idx) = old_idx {
                let old = &mut self.monitors[idx];
                new_states.push(MonitorState {
                    id: info.id.clone(),
                    work_area: info.work_area,
                    workspaces: std::mem::take(&mut old.workspaces),
                    active_workspace: old.active_workspace,
                    active_theme: old.active_theme,
                });
            } else {
                new_states.push(MonitorState {
                    id: info.id.clone(),
                    work_area: info.work_area,
                    workspaces: (0..MAX_WORKSPACES).map(|_| Workspace::new()).collect(),
                    active_workspace: 0,
                    active_theme: affinity_index(&self.themes, info.inches, info.pixel_ratio),
                });
            }
        }

        // Migrate windows from removed monitors (those whose workspaces
        // were not claimed by any new monitor, left empty by mem::take).
        let fallback_idx = 0;
        for old_mon in &self.monitors {
            if old_mon.workspaces.is_empty() {
                continue;
            }
            for ws in &old_mon.workspaces {
                for &hwnd in ws.handles() {
                    jigsawwm_core::log_info!(
                        "Migrating window 0x{:X} from removed monitor {} to monitor {}",
                        hwnd,
                        old_mon.id,
                        new_states[fallback_idx].id
                    );
                    new_states[fallback_idx].active_ws_mut().add(hwnd);
                }
            }
        }

        self.monitors = new_states;

        if self.focused_monitor >= self.monitors.len() {
            self.focused_monitor = 0;
        }

        self.retile_all();
    }

    /// Returns the current monitor IDs for debounce comparison.
    pub fn monitor_ids(&self) -> Vec<String> {
        self.monitors.iter().map(|m| m.id.clone()).collect()
    }
}

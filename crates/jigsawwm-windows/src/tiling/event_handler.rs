//! Event handling for the tiling manager.

use jigsawwm_core::Window as WindowTrait;
use jigsawwm_core::{WindowEvent, static_index_for};

use crate::window::Window;

use super::TilingManager;

impl TilingManager {
    /// Handles a window event and re-tiles the affected monitor.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Created { hwnd } | WindowEvent::Restored { hwnd } => {
                if !self.is_tileable(*hwnd) {
                    return;
                }
                // Place new windows on the focused monitor so they appear
                // where the user is working, not wherever the OS spawns them.
                let idx = self.focused_monitor;
                let w = Window::from_raw(*hwnd);
                let title = w.title().unwrap_or_default();
                let class = w.class().unwrap_or_default();
                let slot = static_index_for(
                    &w.exe_basename().unwrap_or_default(),
                    &title,
                    &class,
                    &self.rules,
                );
                let added = match (self.monitors.get(idx), slot) {
                    (Some(_), Some(slot)) => self.monitors[idx].active_ws_mut().insert(slot, *hwnd),
                    (Some(_), None) => self.monitors[idx].active_ws_mut().add(*hwnd),
                    (None, _) => false,
                };
                if added {
                    jigsawwm_core::log_info!(
                        "+add 0x{:X} [{}] \"{}\" to mon {} ws {} (now {})",
                        hwnd,
                        class,
                        title,
                        idx,
                        self.monitors[idx].active_workspace,
                        self.monitors[idx].active_ws().len()
                    );
                    // Focus the new window before layout so monocle
                    // mode sizes the correct window.
                    self.focused_window = Some(*hwnd);
                    self.apply_layout_on(idx);
                    self.focus_and_follow(*hwnd);
                }
            }
            WindowEvent::Destroyed { hwnd } => {
                self.expected_rects.remove(hwnd);
                if let Some((mon_idx, ws_idx)) = self.find_window(*hwnd) {
                    self.monitors[mon_idx].workspaces[ws_idx].remove(*hwnd);
                    jigsawwm_core::log_info!(
                        "-del 0x{:X} from mon {} ws {} (now {})",
                        hwnd,
                        mon_idx,
                        ws_idx,
                        self.monitors[mon_idx].workspaces[ws_idx].len()
                    );
                    if ws_idx == self.monitors[mon_idx].active_workspace {
                        self.apply_layout_on(mon_idx);
                    }
                }
            }
            WindowEvent::Hidden { hwnd } => {
                // Our own park/conceal from a workspace switch — ignore.
                if self.hidden_by_switch.contains(hwnd) {
                    return;
                }
                // Hidden by something else (e.g. another app called
                // ShowWindow(SW_HIDE) on it) — stop tracking it.
                if let Some((mon_idx, ws_idx)) = self.find_window(*hwnd) {
                    self.monitors[mon_idx].workspaces[ws_idx].remove(*hwnd);
                    jigsawwm_core::log_info!(
                        "-hide 0x{:X} from mon {} ws {} (now {})",
                        hwnd,
                        mon_idx,
                        ws_idx,
                        self.monitors[mon_idx].workspaces[ws_idx].len()
                    );
                    if ws_idx == self.monitors[mon_idx].active_workspace {
                        self.apply_layout_on(mon_idx);
                    }
                }
            }
            WindowEvent::Minimized { hwnd } => {
                if self.hidden_by_switch.contains(hwnd) {
                    return;
                }
                // Only remove from the active workspace. Windows on
                // non-active workspaces are hidden by workspace switching
                // and must not be pruned.
                if let Some((mon_idx, ws_idx)) = self.find_window(*hwnd)
                    && ws_idx == self.monitors[mon_idx].active_workspace
                {
                    self.monitors[mon_idx].workspaces[ws_idx].remove(*hwnd);
                    jigsawwm_core::log_info!(
                        "-min 0x{:X} from mon {} ws {} (now {})",
                        hwnd,
                        mon_idx,
                        ws_idx,
                        self.monitors[mon_idx].workspaces[ws_idx].len()
                    );
                    self.apply_layout_on(mon_idx);
                }
            }
            WindowEvent::Moved { hwnd } => {
                let expected = self.expected_rects.remove(hwnd);
                if is_self_move(expected, Window::from_raw(*hwnd).rect().ok()) {
                    // Our own programmatic move coming back around.
                    return;
                }
                if self.applying_layout {
                    return;
                }
                let maximized = Window::from_raw(*hwnd).is_maximized();
                if self.focused_window == Some(*hwnd) {
                    self.focused_maximized = maximized;
                }
                if maximized {
                    // Don't snap a window the user just maximized back
                    // into the tiled layout.
                    return;
                }
                self.reassign_monitor(*hwnd);
            }
            WindowEvent::Focused { hwnd } => {
                if let Some(idx) = self.owning_monitor(*hwnd) {
                    // Window is on a non-active workspace (e.g. the user
                    // clicked a parked window's taskbar icon) — reveal
                    // its workspace first.
                    if let Some((mon_idx, ws_idx)) = self.find_window(*hwnd)
                        && ws_idx != self.monitors[mon_idx].active_workspace
                    {
                        self.focused_monitor = mon_idx;
                        self.switch_to_workspace(ws_idx);
                        self.focused_window = Some(*hwnd);
                        self.focused_maximized = Window::from_raw(*hwnd).is_maximized();
                        return;
                    }
                    self.focused_window = Some(*hwnd);
                    self.focused_monitor = idx;
                    self.focused_maximized = Window::from_raw(*hwnd).is_maximized();
                } else if let Some(owner) = Window::from_raw(*hwnd).owner()
                    && let Some(idx) = self.owning_monitor(owner)
                {
                    // An owned window (dialog, property sheet) got focus.
                    //
                    // Due to a Win32 race condition, dialogs created on
                    // a different thread may not have their owner set
                    // when EVENT_OBJECT_CREATE fires, causing them to
                    // pass is_app_window() and get tiled. Now that the
                    // owner is queryable, clean up if the dialog was
                    // incorrectly added.
                    if let Some((mon_idx, ws_idx)) = self.find_window(*hwnd) {
                        self.monitors[mon_idx].workspaces[ws_idx].remove(*hwnd);
                        jigsawwm_core::log_info!(
                            "-fix 0x{:X} (owned dialog removed from tiling)",
                            hwnd
                        );
                        self.apply_layout_on(mon_idx);
                    }
                    self.focused_window = Some(owner);
                    self.focused_monitor = idx;
                    self.focused_maximized = Window::from_raw(owner).is_maximized();
                }
                // Unmanaged windows without a managed owner (Alt+Tab UI,
                // shell, system dialogs) are ignored — focus state stays
                // on the last managed window so keyboard navigation
                // keeps working.
            }
            WindowEvent::DisplayChanged | WindowEvent::WorkAreaChanged { .. } => {
                // Handled by the daemon loop, not here.
            }
            WindowEvent::TitleChanged { .. } => {}
        }
    }
}

/// Whether an observed `Moved` event is the echo of a rect this manager
/// just applied itself, rather than a user- or OS-initiated move.
/// Pulled out of `handle_event` so the suppression rule is testable
/// without a real `HWND` (§8 property 7 "self-move suppression").
///
/// `expected` must already be the compensated rect `set_rect` applied
/// (what `Window::rect`/`GetWindowRect` reads back), not the raw layout
/// target — and the comparison tolerates small deltas rather than
/// requiring exact equality, since DPI rounding means `GetWindowRect`
/// rarely reads back the identical pixel `SetWindowPos` was given.
fn is_self_move(expected: Option<jigsawwm_core::Rect>, actual: Option<jigsawwm_core::Rect>) -> bool {
    match (expected, actual) {
        (Some(e), Some(a)) => e.approx_eq(&a, jigsawwm_core::Rect::DEFAULT_TOLERANCE),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::is_self_move;
    use jigsawwm_core::{FrameOffsets, Rect, compensate_rect};

    #[test]
    fn matching_rect_is_suppressed() {
        let rect = Rect::new(0, 0, 960, 1080);
        assert!(is_self_move(Some(rect), Some(rect)));
    }

    #[test]
    fn mismatched_rect_is_not_suppressed() {
        let expected = Rect::new(0, 0, 960, 1080);
        let actual = Rect::new(10, 10, 960, 1080);
        assert!(!is_self_move(Some(expected), Some(actual)));
    }

    #[test]
    fn untracked_move_is_not_suppressed() {
        assert!(!is_self_move(None, Some(Rect::new(0, 0, 100, 100))));
    }

    #[test]
    fn small_rounding_delta_is_still_suppressed() {
        let expected = Rect::new(0, 0, 960, 1080);
        let actual = Rect::new(1, 0, 960, 1079);
        assert!(is_self_move(Some(expected), Some(actual)));
    }

    /// Pins the actual defect: comparing the uncompensated layout target
    /// against the compensated rect `GetWindowRect` reads back (what
    /// `set_rect` applied via `SetWindowPos`) must NOT be suppressed,
    /// since they legitimately differ by the window's frame offsets.
    /// Only the compensated value `set_rect` returns — stored as
    /// `expected` by `apply_layout_on` — is the correct comparison point.
    #[test]
    fn uncompensated_target_is_not_mistaken_for_the_applied_rect() {
        let target = Rect::new(100, 100, 800, 600);
        let offsets = FrameOffsets {
            left: 7,
            top: 0,
            right: 7,
            bottom: 7,
        };
        let applied = compensate_rect(&target, offsets, true);

        // What `apply_layout_on` now stores and what `GetWindowRect`
        // reads back once the OS applies it — these match.
        assert!(is_self_move(Some(applied), Some(applied)));
        // The bug this test pins down: the raw target was never a valid
        // comparison point once frame compensation is active.
        assert!(!is_self_move(Some(target), Some(applied)));
    }
}

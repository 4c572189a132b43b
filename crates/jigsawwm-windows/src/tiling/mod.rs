mod display;
mod event_handler;
mod focus;
mod helpers;
mod layout;
mod lifecycle;
mod workspace;

use std::collections::{HashMap, HashSet};

use jigsawwm_core::action::MAX_WORKSPACES;
use jigsawwm_core::config::HidingBehaviour;
use jigsawwm_core::layout::affinity_index;
use jigsawwm_core::{Action, Dwindle, Rect, Theme, WindowResult, WindowRule, Workspace};

use crate::enumerate;
use crate::monitor;
use crate::window::Window;

/// Per-monitor state: its workspaces, work area, and the theme it is
/// currently tiled with (an index into `TilingManager::themes`, shared
/// across monitors so cycling never needs to clone a `Theme`).
pub(super) struct MonitorState {
    pub(super) id: String,
    pub(super) work_area: Rect,
    pub(super) workspaces: Vec<Workspace>,
    pub(super) active_workspace: usize,
    pub(super) active_theme: usize,
}

impl MonitorState {
    fn active_ws(&self) -> &Workspace {
        &self.workspaces[self.active_workspace]
    }

    fn active_ws_mut(&mut self) -> &mut Workspace {
        &mut self.workspaces[self.active_workspace]
    }
}

/// Manages tiled windows across all connected monitors (§4.5, §4.7).
pub struct TilingManager {
    monitors: Vec<MonitorState>,
    /// Every theme available for cycling (`next_theme`/`prev_theme`/
    /// `set_theme`), shared by all monitors; each monitor only tracks
    /// which index it is currently on.
    themes: Vec<Theme>,
    /// Gap used when filling the work area in monocle mode, since
    /// monocle bypasses the active theme's own layout.
    monocle_gap: i32,
    rules: Vec<WindowRule>,
    focused_monitor: usize,
    focused_window: Option<usize>,
    /// Suppresses `Moved` event handling during programmatic layout.
    applying_layout: bool,
    /// Tracks whether the focused window is currently maximized, so a
    /// `Moved` event can be told apart from a maximize/restore without
    /// re-querying every frame.
    focused_maximized: bool,
    /// Whether keyboard-driven focus should move the cursor.
    mouse_follows_focus: bool,
    /// Suppresses cursor moves after mouse-driven focus.
    focus_from_mouse: bool,
    /// How windows are hidden during workspace switches.
    hiding: HidingBehaviour,
    /// Windows hidden programmatically by workspace switching. Events
    /// for these hwnds are ignored until they are shown again, so
    /// `EVENT_OBJECT_HIDE`/`Destroyed` don't drop them from tracking
    /// mid-switch.
    hidden_by_switch: HashSet<usize>,
    /// The compensated rect a programmatic `set_rect` call actually
    /// applied, keyed by hwnd — what a subsequent `GetWindowRect` reads
    /// back, not the pre-compensation layout target. A `Moved` event
    /// whose window is at (within tolerance of) its expected rect is our
    /// own move coming back around, not a user drag — it is consumed
    /// here rather than re-triggering `reassign_monitor` (§4.7
    /// idempotence, property 7).
    expected_rects: HashMap<usize, Rect>,
}

impl TilingManager {
    /// Creates a new tiling manager with the given themes and rules,
    /// enumerating existing windows and monitors.
    pub fn new(
        themes: Vec<Theme>,
        monocle_gap: i32,
        rules: Vec<WindowRule>,
        hiding: HidingBehaviour,
        mouse_follows_focus: bool,
    ) -> WindowResult<Self> {
        let themes = if themes.is_empty() {
            vec![Theme::Dwindle(Dwindle::default())]
        } else {
            themes
        };

        let monitors: Vec<MonitorState> = monitor::enumerate_monitors()?
            .into_iter()
            .map(|info| MonitorState {
                id: info.id,
                work_area: info.work_area,
                workspaces: (0..MAX_WORKSPACES).map(|_| Workspace::new()).collect(),
                active_workspace: 0,
                active_theme: affinity_index(&themes, info.inches, info.pixel_ratio),
            })
            .collect();

        let mut manager = Self {
            monitors,
            themes,
            monocle_gap,
            rules,
            focused_monitor: 0,
            focused_window: None,
            focused_maximized: false,
            mouse_follows_focus,
            focus_from_mouse: false,
            applying_layout: false,
            hiding,
            hidden_by_switch: HashSet::new(),
            expected_rects: HashMap::new(),
        };

        for win in enumerate::enumerate_windows()? {
            let hwnd = win.hwnd().0 as usize;
            if manager.is_tileable(hwnd)
                && let Some(idx) = manager.monitor_index_for(hwnd)
            {
                manager.monitors[idx].active_ws_mut().add(hwnd);
            }
        }

        manager.retile_all();
        manager.focus_initial();
        Ok(manager)
    }

    /// Executes a WM command (§4.7).
    pub fn handle_action(&mut self, action: &Action) {
        match action {
            Action::NextWindow => self.step_window(1),
            Action::PrevWindow => self.step_window(-1),
            Action::SwapNext => self.swap_window(1),
            Action::SwapPrev => self.swap_window(-1),
            Action::SetMaster => self.set_master(),
            Action::RollNext => self.roll_windows(1),
            Action::RollPrev => self.roll_windows(-1),
            Action::ToggleTilable => self.toggle_tilable(),
            Action::ToggleMono => self.toggle_mono(),
            Action::NextTheme => self.cycle_theme(1),
            Action::PrevTheme => self.cycle_theme(-1),
            Action::SetTheme(name) => self.set_theme(name),
            Action::SwitchToWorkspace(n) => self.switch_to_workspace(*n),
            Action::MoveToWorkspace(n) => self.move_to_workspace(*n),
            Action::PrevMonitor => self.switch_monitor(-1),
            Action::NextMonitor => self.switch_monitor(1),
            Action::MoveToPrevMonitor => self.move_to_monitor(-1),
            Action::MoveToNextMonitor => self.move_to_monitor(1),
            Action::ArrangeAllMonitors => self.retile_all(),
            Action::CloseFocused => self.close_focused(),
            Action::MinimizeFocused => self.minimize_focused(),
        }
    }

    /// Returns the total number of managed windows.
    pub fn window_count(&self) -> usize {
        self.monitors
            .iter()
            .flat_map(|m| &m.workspaces)
            .map(|ws| ws.len())
            .sum()
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

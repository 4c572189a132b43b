use super::*;

#[cfg(test)]
#[path = "tests/display_tests.rs"]
mod display_tests;
#[cfg(test)]
#[path = "tests/hiding_tests.rs"]
mod hiding_tests;
#[cfg(test)]
#[path = "tests/monitor_tests.rs"]
mod monitor_tests;
#[cfg(test)]
#[path = "tests/monocle_tests.rs"]
mod monocle_tests;
#[cfg(test)]
#[path = "tests/workspace_tests.rs"]
mod workspace_tests;

pub(super) fn make_monitor(id: &str) -> MonitorState {
    MonitorState {
        id: id.to_string(),
        work_area: Rect::new(0, 0, 1920, 1080),
        workspaces: (0..MAX_WORKSPACES).map(|_| Workspace::new()).collect(),
        active_workspace: 0,
        active_theme: 0,
    }
}

pub(super) fn make_monitors(n: usize) -> Vec<MonitorState> {
    (0..n).map(|i| make_monitor(&i.to_string())).collect()
}

/// Mirrors `TilingManager::handle_display_change`'s matching logic
/// (by ID, falling back to position) without touching Win32.
pub(super) fn simulate_display_change(
    old_monitors: &mut [MonitorState],
    new_infos: Vec<(&str, Rect)>,
) -> Vec<MonitorState> {
    let mut new_states: Vec<MonitorState> = Vec::new();

    for (id, work_area) in &new_infos {
        let old_idx = old_monitors.iter().position(|m| m.id == *id).or_else(|| {
            old_monitors
                .iter()
                .position(|m| m.work_area.x == work_area.x && m.work_area.y == work_area.y)
        });

        if let Some(idx) = old_idx {
            let old = &mut old_monitors[idx];
            new_states.push(MonitorState {
                id: id.to_string(),
                work_area: *work_area,
                workspaces: std::mem::take(&mut old.workspaces),
                active_workspace: old.active_workspace,
                active_theme: old.active_theme,
            });
        } else {
            new_states.push(MonitorState {
                id: id.to_string(),
                work_area: *work_area,
                workspaces: (0..MAX_WORKSPACES).map(|_| Workspace::new()).collect(),
                active_workspace: 0,
                active_theme: 0,
            });
        }
    }

    // Migrate windows from removed monitors (those left with empty
    // workspaces by mem::take, meaning no new monitor claimed them).
    for old_mon in old_monitors.iter() {
        if old_mon.workspaces.is_empty() {
            continue;
        }
        for ws in &old_mon.workspaces {
            for &hwnd in ws.handles() {
                new_states[0].active_ws_mut().add(hwnd);
            }
        }
    }

    new_states
}

/// Mirrors `TilingManager::find_window` without touching Win32.
pub(super) fn find_window_in(monitors: &[MonitorState], hwnd: usize) -> Option<(usize, usize)> {
    for (mi, mon) in monitors.iter().enumerate() {
        for (wi, ws) in mon.workspaces.iter().enumerate() {
            if ws.contains(hwnd) {
                return Some((mi, wi));
            }
        }
    }
    None
}

use super::super::*;
use super::{make_monitor, make_monitors};

/// Every handle appears in at most one (monitor, workspace) pair.
fn assert_bijection(monitors: &[MonitorState]) {
    let mut seen = HashSet::new();
    for mon in monitors {
        for ws in &mon.workspaces {
            for &hwnd in ws.handles() {
                assert!(seen.insert(hwnd), "0x{hwnd:X} appears in more than one workspace");
            }
        }
    }
}

#[test]
fn switch_to_workspace_logic() {
    let mut mon = make_monitor("A");
    mon.workspaces[0].add(10);
    mon.workspaces[0].add(20);
    mon.workspaces[1].add(30);

    // Switch from ws 0 to ws 1
    let mut hidden = HashSet::new();
    for &hwnd in mon.active_ws().handles() {
        hidden.insert(hwnd);
    }
    mon.active_workspace = 1;

    // After switch: ws 1 is active, hidden set has ws 0's windows
    assert_eq!(mon.active_ws().len(), 1);
    assert!(mon.active_ws().contains(30));
    assert!(hidden.contains(&10));
    assert!(hidden.contains(&20));

    // Show ws 1 windows — remove from hidden
    for &hwnd in mon.active_ws().handles() {
        hidden.remove(&hwnd);
    }
    // 30 was not hidden, so set unchanged (still has 10, 20)
    assert_eq!(hidden.len(), 2);
}

#[test]
fn move_to_workspace_logic() {
    let mut mon = make_monitor("A");
    mon.workspaces[0].add(10);
    mon.workspaces[0].add(20);
    mon.workspaces[0].add(30);
    mon.active_workspace = 0;

    // Move window 20 from ws 0 to ws 2
    let target_ws = 2;
    assert!(mon.active_ws().contains(20));
    mon.active_ws_mut().remove(20);
    mon.workspaces[target_ws].add(20);

    assert_eq!(mon.workspaces[0].len(), 2);
    assert_eq!(mon.workspaces[target_ws].len(), 1);
    assert!(mon.workspaces[target_ws].contains(20));
    assert!(!mon.workspaces[0].contains(20));
}

#[test]
fn move_to_same_workspace_is_noop() {
    let mut mon = make_monitor("A");
    mon.workspaces[0].add(10);
    mon.active_workspace = 0;

    // Moving to the active workspace should be a no-op
    let target = mon.active_workspace;
    assert_eq!(target, 0);
    // The real code returns early; simulate by checking condition
    assert!(mon.active_workspace == target);
    assert_eq!(mon.workspaces[0].len(), 1);
}

#[test]
fn switch_to_same_workspace_is_noop() {
    let mon = make_monitor("A");
    // Switching to an already-active workspace should be a no-op
    assert_eq!(mon.active_workspace, 0);
    // The real code returns early when active_workspace == target
}

#[test]
fn switch_to_out_of_range_workspace_is_noop() {
    let mon = make_monitor("A");
    let target = MAX_WORKSPACES + 1;
    // The real code guards target >= workspaces.len() and returns early.
    assert!(target >= mon.workspaces.len());
}

#[test]
fn windowlist_stays_a_bijection_across_moves() {
    let mut monitors = make_monitors(2);
    monitors[0].workspaces[0].add(10);
    monitors[0].workspaces[0].add(20);
    monitors[0].workspaces[1].add(30);
    monitors[1].workspaces[0].add(40);
    assert_bijection(&monitors);

    // Move 20 from monitor 0 workspace 0 to monitor 1 workspace 0.
    monitors[0].workspaces[0].remove(20);
    monitors[1].workspaces[0].add(20);
    assert_bijection(&monitors);

    // Move 30 from monitor 0 workspace 1 to monitor 0 workspace 0.
    monitors[0].workspaces[1].remove(30);
    monitors[0].workspaces[0].add(30);
    assert_bijection(&monitors);

    let total: usize = monitors
        .iter()
        .flat_map(|m| &m.workspaces)
        .map(Workspace::len)
        .sum();
    assert_eq!(total, 4, "every window should still be tracked exactly once");
}

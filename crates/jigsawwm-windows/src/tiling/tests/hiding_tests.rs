use super::super::*;
use super::make_monitor;

#[test]
fn off_screen_mode_populates_hidden_by_switch() {
    // Arrange
    let mut mon = make_monitor("A");
    mon.workspaces[0].add(10);
    mon.workspaces[0].add(20);
    mon.workspaces[1].add(30);

    let hiding = HidingBehaviour::OffScreen;
    let mut hidden_by_switch = HashSet::new();

    // Act — simulate switch_to_workspace: both strategies mark hidden,
    // only the underlying Win32 call differs.
    for &hwnd in mon.active_ws().handles() {
        let _ = hiding;
        hidden_by_switch.insert(hwnd);
    }
    mon.active_workspace = 1;

    // Assert
    assert_eq!(hidden_by_switch.len(), 2);
    assert!(hidden_by_switch.contains(&10));
    assert!(hidden_by_switch.contains(&20));
}

#[test]
fn hide_mode_populates_hidden_by_switch() {
    // Arrange
    let mut mon = make_monitor("A");
    mon.workspaces[0].add(10);
    mon.workspaces[0].add(20);
    mon.workspaces[1].add(30);

    let hiding = HidingBehaviour::Hide;
    let mut hidden_by_switch = HashSet::new();

    // Act
    for &hwnd in mon.active_ws().handles() {
        let _ = hiding;
        hidden_by_switch.insert(hwnd);
    }
    mon.active_workspace = 1;

    // Assert — hidden_by_switch must contain ws 0's windows
    assert_eq!(hidden_by_switch.len(), 2);
    assert!(hidden_by_switch.contains(&10));
    assert!(hidden_by_switch.contains(&20));
}

#[test]
fn showing_target_workspace_clears_hidden_entries() {
    let mut mon = make_monitor("A");
    mon.workspaces[0].add(10);
    mon.workspaces[1].add(30);

    let mut hidden_by_switch = HashSet::new();
    for &hwnd in mon.active_ws().handles() {
        hidden_by_switch.insert(hwnd);
    }
    mon.active_workspace = 1;

    // Showing the target workspace's windows un-marks them.
    for &hwnd in mon.active_ws().handles() {
        hidden_by_switch.remove(&hwnd);
    }

    assert!(hidden_by_switch.contains(&10));
    assert!(!hidden_by_switch.contains(&30));
}

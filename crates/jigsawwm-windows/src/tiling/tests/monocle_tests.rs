use super::make_monitor;

#[test]
fn monocle_toggle_sets_monocle_window() {
    let mut mon = make_monitor("A");
    mon.workspaces[0].add(100);
    mon.workspaces[0].add(200);

    // Simulate toggle_mono: enable with focused_window = 100
    let focused_window = Some(100usize);
    mon.workspaces[0].set_monocle(true);
    mon.workspaces[0].set_monocle_window(focused_window);

    assert!(mon.workspaces[0].monocle());
    assert_eq!(mon.workspaces[0].monocle_window(), Some(100));
}

#[test]
fn monocle_toggle_clears_monocle_window() {
    let mut mon = make_monitor("A");
    mon.workspaces[0].add(100);
    mon.workspaces[0].set_monocle(true);
    mon.workspaces[0].set_monocle_window(Some(100));

    // Simulate toggle_mono: disable
    mon.workspaces[0].set_monocle(false);
    mon.workspaces[0].set_monocle_window(None);

    assert!(!mon.workspaces[0].monocle());
    assert_eq!(mon.workspaces[0].monocle_window(), None);
}

#[test]
fn monocle_is_per_workspace_not_per_monitor() {
    let mut mon = make_monitor("A");
    mon.workspaces[0].add(100);
    mon.workspaces[1].add(200);

    mon.workspaces[0].set_monocle(true);
    mon.workspaces[0].set_monocle_window(Some(100));

    // Workspace 1 is unaffected — monocle lives on the workspace, not
    // the monitor, so switching workspaces changes which mode applies.
    assert!(!mon.workspaces[1].monocle());
    assert_eq!(mon.workspaces[1].monocle_window(), None);
}

#[test]
fn monocle_entry_uses_monocle_window() {
    let mut mon = make_monitor("A");
    mon.workspaces[0].add(100);
    mon.workspaces[0].add(200);
    mon.workspaces[0].add(300);
    mon.workspaces[0].set_monocle(true);
    mon.workspaces[0].set_monocle_window(Some(200));

    let entry = mon
        .workspaces[0]
        .monocle_window()
        .or_else(|| mon.workspaces[0].handles().first().copied());
    assert_eq!(entry, Some(200));
}

#[test]
fn monocle_entry_falls_back_to_first_window() {
    let mut mon = make_monitor("A");
    mon.workspaces[0].add(100);
    mon.workspaces[0].add(200);
    mon.workspaces[0].set_monocle(true);
    mon.workspaces[0].set_monocle_window(None); // e.g. monocle window was closed

    let entry = mon
        .workspaces[0]
        .monocle_window()
        .or_else(|| mon.workspaces[0].handles().first().copied());
    assert_eq!(entry, Some(100));
}

#[test]
fn monocle_clears_when_monocle_window_destroyed() {
    // Arrange
    let mut mon = make_monitor("A");
    mon.workspaces[0].add(100);
    mon.workspaces[0].add(200);
    mon.workspaces[0].set_monocle(true);
    mon.workspaces[0].set_monocle_window(Some(100));

    // Act — simulate Destroyed handler: remove and clear monocle.
    mon.workspaces[0].remove(100);
    if mon.workspaces[0].monocle() && mon.workspaces[0].monocle_window() == Some(100) {
        mon.workspaces[0].set_monocle(false);
        mon.workspaces[0].set_monocle_window(None);
    }

    // Assert
    assert!(!mon.workspaces[0].monocle());
    assert_eq!(mon.workspaces[0].monocle_window(), None);
    assert_eq!(mon.workspaces[0].len(), 1);
    assert!(mon.workspaces[0].contains(200));
}

#[test]
fn monocle_persists_when_other_window_destroyed() {
    // Arrange
    let mut mon = make_monitor("A");
    mon.workspaces[0].add(100);
    mon.workspaces[0].add(200);
    mon.workspaces[0].set_monocle(true);
    mon.workspaces[0].set_monocle_window(Some(100));

    // Act — destroy a non-monocle window.
    mon.workspaces[0].remove(200);
    if mon.workspaces[0].monocle() && mon.workspaces[0].monocle_window() == Some(200) {
        mon.workspaces[0].set_monocle(false);
        mon.workspaces[0].set_monocle_window(None);
    }

    // Assert — monocle stays active.
    assert!(mon.workspaces[0].monocle());
    assert_eq!(mon.workspaces[0].monocle_window(), Some(100));
    assert_eq!(mon.workspaces[0].len(), 1);
}

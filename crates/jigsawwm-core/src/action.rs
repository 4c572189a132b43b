use serde::{Deserialize, Serialize};

/// Default number of workspaces created per monitor.
///
/// Workspaces are indexed `0..MAX_WORKSPACES`; the CLI and config layer
/// present them 1-indexed to match the keyboard row they're usually
/// bound to.
pub const MAX_WORKSPACES: usize = 4;

/// A WM command invoked from a hotkey callback or the CLI.
///
/// These are the only operations the WM controller (C7) exposes to the
/// outside world; everything else (rule application, idempotent
/// placement) happens implicitly in response to OS events. Distinct
/// from [`crate::engine::ActionId`], which names a JMK `SendFn` target
/// rather than a WM command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Move `active_index` by +1 mod N in the active workspace; focus
    /// the new window; center the cursor on it.
    NextWindow,
    /// Move `active_index` by -1 mod N in the active workspace.
    PrevWindow,
    /// Swap the active window with its successor; re-layout; focus follows.
    SwapNext,
    /// Swap the active window with its predecessor; re-layout; focus follows.
    SwapPrev,
    /// Swap the active window with slot 0. If already slot 0, swap with slot 1.
    SetMaster,
    /// Rotate the entire windowlist by +1.
    RollNext,
    /// Rotate the entire windowlist by -1.
    RollPrev,
    /// Flip the tilable flag of the active window; re-layout.
    ToggleTilable,
    /// Temporarily force monocle theme on the active monitor.
    ToggleMono,
    /// Cycle to the next layout theme on the active monitor.
    NextTheme,
    /// Cycle to the previous layout theme on the active monitor.
    PrevTheme,
    /// Select a specific layout theme by name on the active monitor.
    SetTheme(String),
    /// Hide the current workspace, reveal workspace `i`, apply layout.
    SwitchToWorkspace(usize),
    /// Reassign the active window to workspace `i`; re-layout both.
    MoveToWorkspace(usize),
    /// Activate the first window on the previous monitor; warp cursor.
    PrevMonitor,
    /// Activate the first window on the next monitor; warp cursor.
    NextMonitor,
    /// Reassign the active window to the previous monitor; re-layout both.
    MoveToPrevMonitor,
    /// Reassign the active window to the next monitor; re-layout both.
    MoveToNextMonitor,
    /// Force a full re-layout of every monitor.
    ArrangeAllMonitors,
    /// Close the active window (posts `WM_CLOSE`).
    CloseFocused,
    /// Minimize the active window.
    MinimizeFocused,
}

use std::sync::mpsc;

use jigsawwm_core::ActionId;
use jigsawwm_core::ipc::{Command, Response};

/// Internal message type for the daemon's single UI thread (§5: "all
/// user callbacks ... execute on this thread").
pub(super) enum DaemonMsg {
    /// A window event from the `SetWinEventHook` event loop.
    Event(jigsawwm_core::WindowEvent),
    /// A WM command fired directly (e.g. from a registered hotkey
    /// closure or a scheduled task).
    Action(jigsawwm_core::Action),
    /// A CLI command with a callback to send the response.
    Command(Command, ResponseSender),
    /// An `ActionId` fired by the input hook or a scheduled task,
    /// to be invoked against the engine's `ActionRegistry`.
    RunAction(ActionId),
}

/// Sends a response back to the IPC thread for the connected client.
pub(super) type ResponseSender = mpsc::Sender<Response>;

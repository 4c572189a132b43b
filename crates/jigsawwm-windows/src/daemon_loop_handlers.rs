use std::sync::{Arc, Mutex};

use jigsawwm_core::ActionId;
use jigsawwm_core::JmkEngine;
use jigsawwm_core::ipc::{Command, Response};

use crate::monitor;
use crate::tiling::TilingManager;

pub(super) fn handle_event(event: jigsawwm_core::WindowEvent, manager: &mut TilingManager) {
    match event {
        jigsawwm_core::WindowEvent::DisplayChanged => match monitor::enumerate_monitors() {
            Ok(new_monitors) => {
                jigsawwm_core::log_info!(
                    "Display change detected, {} monitors",
                    new_monitors.len()
                );
                manager.handle_display_change(new_monitors);
            }
            Err(e) => {
                jigsawwm_core::log_info!("Failed to re-enumerate monitors: {e}");
            }
        },
        other => manager.handle_event(&other),
    }
}

pub(super) fn handle_action(action: jigsawwm_core::Action, manager: &mut TilingManager) {
    manager.handle_action(&action);
}

/// Invokes a fired `ActionId` against the engine's registry, on the
/// daemon's UI thread (§5). The registered closure is whatever the
/// daemon builder wired it to — typically sending a `DaemonMsg::Action`
/// back into this same loop.
pub(super) fn handle_run_action(id: ActionId, engine: &Arc<Mutex<JmkEngine>>) {
    if let Ok(mut engine) = engine.lock() {
        engine.actions.invoke(id);
    }
}

pub(super) fn handle_command(command: &Command, manager: &mut TilingManager) -> Option<Response> {
    match command {
        Command::Stop => {
            jigsawwm_core::log_info!("Stop command received, shutting down");
            Some(Response::ok_with_message("Daemon stopping"))
        }
        Command::Status => {
            let msg = format!(
                "Daemon is running, managing {} windows",
                manager.window_count()
            );
            Some(Response::ok_with_message(msg))
        }
        Command::Action { action } => {
            manager.handle_action(action);
            Some(Response::ok())
        }
    }
}

//! The daemon's actual run loop: wires the input hook, the Win32 event
//! loop, IPC, services, and scheduled tasks into one message channel
//! consumed on a single thread (§5 "all user callbacks ... execute on
//! this thread").

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use jigsawwm_core::ipc::Command;
use jigsawwm_core::{ActionId, WindowResult};

use crate::daemon::{Daemon, TaskSchedule};
use crate::tiling::TilingManager;
use crate::{ctrl_c, event_loop, hook};

use super::daemon_loop_handlers;
use super::daemon_threads;
use super::daemon_types::DaemonMsg;

/// The inner daemon loop, separated so cleanup always runs in `Daemon::run`.
pub(super) fn run(daemon: Daemon) -> WindowResult<()> {
    jigsawwm_core::log::init(&daemon.config.logging);
    jigsawwm_core::log_info!("Daemon started (PID: {})", std::process::id());

    let Daemon {
        config,
        themes,
        rules,
        engine,
        mut services,
        tasks,
        wm_hotkeys,
    } = daemon;

    let mut manager = TilingManager::new(
        themes,
        config.layout.gap,
        rules,
        config.layout.hiding,
        config.mouse.follows_focus,
    )?;
    jigsawwm_core::log_info!("Managing {} windows", manager.window_count());

    let engine = Arc::new(Mutex::new(engine));

    let (tx, rx) = mpsc::channel::<DaemonMsg>();

    // Start the Win32 event loop and the input hook, each on its own thread.
    let (event_channel_tx, event_channel_rx) = mpsc::channel();
    let (hotkey_channel_tx, hotkey_channel_rx) = mpsc::channel::<ActionId>();
    let event_loop = event_loop::start(event_channel_tx)?;
    let hook = hook::start(engine.clone(), hotkey_channel_tx)?;

    // Bridge: forward window events into the unified channel.
    let event_bridge = daemon_threads::spawn_event_bridge(event_channel_rx, tx.clone());

    // Bridge: forward fired `ActionId`s into the unified channel.
    let hotkey_bridge = daemon_threads::spawn_hotkey_bridge(hotkey_channel_rx, tx.clone());

    // Start the IPC listener on its own thread.
    let ipc_thread = daemon_threads::spawn_ipc_listener(tx.clone());

    // Bridge Ctrl+C to the same `Command::Stop` path an IPC client uses.
    let (ctrl_c_tx, ctrl_c_rx) = mpsc::channel();
    ctrl_c::set_handler(ctrl_c_tx);
    let stop_tx = tx.clone();
    let ctrl_c_bridge = std::thread::spawn(move || {
        if ctrl_c_rx.recv().is_ok() {
            let (reply_tx, _reply_rx) = mpsc::channel();
            let _ = stop_tx.send(DaemonMsg::Command(Command::Stop, reply_tx));
        }
    });

    for service in &mut services {
        if let Err(e) = service.start() {
            jigsawwm_core::log_error!("service '{}' failed to start: {e}", service.name());
        }
    }

    let mut interval_stops = Vec::new();
    for task in tasks {
        match task.schedule {
            TaskSchedule::Once(delay) => {
                daemon_threads::spawn_timeout(tx.clone(), delay, task.action);
            }
            TaskSchedule::Every(period) => {
                let (stop, handle) = daemon_threads::spawn_interval(tx.clone(), period, task.action);
                interval_stops.push((stop, handle));
            }
        }
    }

    // Main processing loop — blocks until a message arrives.
    while let Ok(msg) = rx.recv() {
        match msg {
            DaemonMsg::Event(event) => daemon_loop_handlers::handle_event(event, &mut manager),
            DaemonMsg::Action(action) => daemon_loop_handlers::handle_action(action, &mut manager),
            DaemonMsg::RunAction(id) => {
                if let Some(action) = wm_hotkeys.get(&id) {
                    daemon_loop_handlers::handle_action(action.clone(), &mut manager);
                } else {
                    crate::panic_guard::guard("action", || {
                        daemon_loop_handlers::handle_run_action(id, &engine)
                    });
                }
            }
            DaemonMsg::Command(command, reply_tx) => {
                if let Some(response) = daemon_loop_handlers::handle_command(&command, &mut manager) {
                    let _ = reply_tx.send(response);
                    if matches!(command, Command::Stop) {
                        break;
                    }
                }
            }
        }
    }

    jigsawwm_core::log_info!("Daemon stopping");

    for (stop, handle) in interval_stops {
        stop.store(true, std::sync::atomic::Ordering::Relaxed);
        let _ = handle.join();
    }
    for service in &mut services {
        service.stop();
    }

    manager.restore_all_windows();
    hook.stop();
    event_loop.stop();
    drop(tx);
    let _ = event_bridge.join();
    let _ = hotkey_bridge.join();
    let _ = ipc_thread.join();
    let _ = ctrl_c_bridge.join();

    Ok(())
}

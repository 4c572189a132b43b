use std::sync::mpsc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use jigsawwm_core::ActionId;

use super::daemon_ipc;
use super::daemon_types::DaemonMsg;

/// Bridges window events from the `SetWinEventHook` loop into the
/// daemon's unified message channel.
pub(super) fn spawn_event_bridge(
    event_rx: mpsc::Receiver<jigsawwm_core::WindowEvent>,
    tx: mpsc::Sender<DaemonMsg>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for event in event_rx {
            if tx.send(DaemonMsg::Event(event)).is_err() {
                break;
            }
        }
    })
}

/// Bridges `ActionId`s fired by the input hook into the daemon's
/// unified message channel, where they are invoked against the
/// engine's `ActionRegistry` on the UI thread (§5).
pub(super) fn spawn_hotkey_bridge(
    action_rx: mpsc::Receiver<ActionId>,
    tx: mpsc::Sender<DaemonMsg>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for id in action_rx {
            if tx.send(DaemonMsg::RunAction(id)).is_err() {
                break;
            }
        }
    })
}

/// Spawns the IPC listener thread.
pub(super) fn spawn_ipc_listener(tx: mpsc::Sender<DaemonMsg>) -> thread::JoinHandle<()> {
    thread::spawn(move || daemon_ipc::ipc_loop(tx))
}

/// `Daemon::schedule`: runs `action` once after `delay`.
pub(super) fn spawn_timeout(
    tx: mpsc::Sender<DaemonMsg>,
    delay: Duration,
    action: ActionId,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = tx.send(DaemonMsg::RunAction(action));
    })
}

/// `Daemon::interval`: runs `action` every `period` until `stop` is set.
/// Returned alongside the stop flag so `Daemon::run` can halt every
/// live interval before joining threads on shutdown.
pub(super) fn spawn_interval(
    tx: mpsc::Sender<DaemonMsg>,
    period: Duration,
    action: ActionId,
) -> (Arc<AtomicBool>, thread::JoinHandle<()>) {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = stop.clone();
    let handle = thread::spawn(move || {
        while !stop_flag.load(Ordering::Relaxed) {
            thread::sleep(period);
            if stop_flag.load(Ordering::Relaxed) {
                break;
            }
            if tx.send(DaemonMsg::RunAction(action)).is_err() {
                break;
            }
        }
    });
    (stop, handle)
}

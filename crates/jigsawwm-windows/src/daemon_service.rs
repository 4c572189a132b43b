//! Service lifecycle (§4.8 addition): long-running helpers the daemon
//! starts and stops alongside itself.
//!
//! A [`Service`] is anything with a start/stop contract; [`ProcessService`]
//! is the concrete case spec.md §4.8 calls out — a spawned child process,
//! reaped on its own worker thread, with opt-in autorestart and the
//! 1s→60s doubling backoff from spec.md §7.

use std::process::{Child, Command};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use jigsawwm_core::WindowResult;

#[cfg(windows)]
use std::os::windows::process::CommandExt;

/// `CREATE_NO_WINDOW`: spawned helper processes get no console of
/// their own, matching `jigsawwm start`'s own detachment convention.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

const MIN_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(60);
/// How often the supervisor polls the current child for exit instead of
/// blocking in `wait()`, so `stop()` can take and kill it without the
/// two threads deadlocking on the same handle.
const POLL_INTERVAL: Duration = Duration::from_millis(200);
/// Upper bound on how long `stop()` waits for the supervisor thread to
/// notice the kill and exit (§5: services return within 2 seconds).
const STOP_TIMEOUT: Duration = Duration::from_secs(2);

/// Something the daemon starts at launch and stops at shutdown.
pub trait Service: Send {
    fn name(&self) -> &str;
    fn start(&mut self) -> WindowResult<()>;
    fn stop(&mut self);
}

/// A service backed by a spawned child process.
///
/// `start` launches the process and, if `autorestart` is set, a
/// supervisor thread that polls it and respawns with doubling backoff
/// (1s, 2s, 4s, ... capped at 60s) each time it exits on its own. The
/// current child is shared with the supervisor through `current` rather
/// than owned by it outright, so `stop` can take and kill it directly
/// instead of blocking on whatever the supervisor happens to be doing.
pub struct ProcessService {
    name: String,
    program: String,
    args: Vec<String>,
    autorestart: bool,
    keep_running: Arc<AtomicBool>,
    current: Arc<Mutex<Option<Child>>>,
    supervisor: Option<thread::JoinHandle<()>>,
    supervisor_done: Option<mpsc::Receiver<()>>,
}

impl ProcessService {
    pub fn new(name: impl Into<String>, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args,
            autorestart: false,
            keep_running: Arc::new(AtomicBool::new(false)),
            current: Arc::new(Mutex::new(None)),
            supervisor: None,
            supervisor_done: None,
        }
    }

    /// Respawn the process with doubling backoff if it exits on its own.
    pub fn with_autorestart(mut self, autorestart: bool) -> Self {
        self.autorestart = autorestart;
        self
    }

    fn spawn(&self) -> std::io::Result<Child> {
        spawn_child(&self.program, &self.args)
    }
}

fn spawn_child(program: &str, args: &[String]) -> std::io::Result<Child> {
    #[allow(unused_mut)]
    let mut cmd = Command::new(program);
    cmd.args(args);
    #[cfg(windows)]
    cmd.creation_flags(CREATE_NO_WINDOW);
    cmd.spawn()
}

/// Polls `current` for exit, respawning with doubling backoff until the
/// process exits cleanly, fails to respawn, or `keep_running` clears.
///
/// Polls with [`POLL_INTERVAL`] instead of blocking in `Child::wait`
/// so the mutex is only held briefly each iteration — `stop` needs to
/// be able to lock `current`, take the child, and kill it without
/// waiting on this thread's blocking call first.
fn supervise(name: &str, program: &str, args: &[String], keep_running: &AtomicBool, current: &Mutex<Option<Child>>) {
    let mut backoff = MIN_BACKOFF;
    loop {
        loop {
            if !keep_running.load(Ordering::SeqCst) {
                return;
            }
            let exited = {
                let mut guard = current.lock().unwrap();
                match guard.as_mut() {
                    Some(child) => matches!(child.try_wait(), Ok(Some(_))),
                    // `stop` took the child out from under us.
                    None => return,
                }
            };
            if exited {
                break;
            }
            thread::sleep(POLL_INTERVAL);
        }
        if !keep_running.load(Ordering::SeqCst) {
            return;
        }
        let status = current.lock().unwrap().take().and_then(|mut c| c.wait().ok());
        match status {
            Some(status) if status.success() => return,
            _ => {
                jigsawwm_core::log_warn!(
                    "service '{name}' exited unexpectedly, restarting in {}s",
                    backoff.as_secs()
                );
            }
        }
        thread::sleep(backoff);
        if !keep_running.load(Ordering::SeqCst) {
            return;
        }
        match spawn_child(program, args) {
            Ok(c) => *current.lock().unwrap() = Some(c),
            Err(e) => {
                jigsawwm_core::log_error!("service '{name}' failed to restart: {e}");
                return;
            }
        }
        backoff = (backoff * 2).min(MAX_BACKOFF);
    }
}

impl Service for ProcessService {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&mut self) -> WindowResult<()> {
        let child = self.spawn()?;
        self.keep_running.store(true, Ordering::SeqCst);
        *self.current.lock().unwrap() = Some(child);

        if self.autorestart {
            let keep_running = self.keep_running.clone();
            let current = self.current.clone();
            let program = self.program.clone();
            let args = self.args.clone();
            let name = self.name.clone();
            let (done_tx, done_rx) = mpsc::channel();
            self.supervisor_done = Some(done_rx);
            self.supervisor = Some(thread::spawn(move || {
                supervise(&name, &program, &args, &keep_running, &current);
                let _ = done_tx.send(());
            }));
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.keep_running.store(false, Ordering::SeqCst);
        if let Some(mut child) = self.current.lock().unwrap().take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(done) = self.supervisor_done.take() {
            // The supervisor notices `keep_running` cleared (or the
            // child gone) within one `POLL_INTERVAL` and exits; this
            // just bounds how long we wait for that to happen.
            let _ = done.recv_timeout(STOP_TIMEOUT);
        }
        self.supervisor = None;
    }
}

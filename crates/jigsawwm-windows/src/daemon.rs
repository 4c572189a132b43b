//! The `Daemon` builder (§4.8, §6) — the programmatic entry point a
//! user's `main()` (see `demos/`) or the CLI's default configuration
//! builds against, per "configuration is code, not a file": hotkeys,
//! layers, window rules, and layout themes are registered here rather
//! than parsed from a config file.

use std::collections::HashMap;
use std::time::Duration;

use jigsawwm_core::config::Config;
use jigsawwm_core::{Action, ActionId, Chord, HotkeyAction, JmkEngine, Layer, Theme, WindowResult, WindowRule};

use crate::daemon_service::Service;

/// How a registered [`Task`] fires.
pub enum TaskSchedule {
    /// Runs once, after the given delay.
    Once(Duration),
    /// Runs repeatedly, every given period, until the daemon stops.
    Every(Duration),
}

/// A named, schedulable action (§4.8 addition) — the same `ActionId`
/// mechanism hotkeys use, so the tray contract (§6) can list a task by
/// name without the daemon holding a raw function pointer.
pub struct Task {
    pub name: String,
    pub action: ActionId,
    pub schedule: TaskSchedule,
}

/// Builds and runs the daemon: the JMK engine (layers, hotkeys), the
/// tiling manager's themes and window rules, and any services/tasks
/// the caller registers before calling [`Daemon::run`].
pub struct Daemon {
    pub(super) config: Config,
    pub(super) themes: Vec<Theme>,
    pub(super) rules: Vec<WindowRule>,
    pub(super) engine: JmkEngine,
    pub(super) services: Vec<Box<dyn Service>>,
    pub(super) tasks: Vec<Task>,
    /// Hotkeys bound directly to a WM command (`register_hotkey_action`)
    /// rather than a user closure, keyed by the placeholder `ActionId`
    /// each one was registered under so `daemon_loop` can resolve a
    /// fired id to an `Action` without the hook thread ever seeing one.
    pub(super) wm_hotkeys: HashMap<ActionId, Action>,
}

impl Default for Daemon {
    fn default() -> Self {
        Self::new()
    }
}

impl Daemon {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            themes: Vec::new(),
            rules: Vec::new(),
            engine: JmkEngine::new(),
            services: Vec::new(),
            tasks: Vec::new(),
            wm_hotkeys: HashMap::new(),
        }
    }

    /// Overrides the ambient configuration (layout/mouse/logging).
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the layout themes available for cycling, in declaration
    /// order. An empty list falls back to a single dwindle theme.
    #[must_use]
    pub fn with_themes(mut self, themes: Vec<Theme>) -> Self {
        self.themes = themes;
        self
    }

    /// Sets the window rules used to decide which windows are tiled.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<WindowRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Returns the base (always-active) input layer for binding keys.
    pub fn base_layer_mut(&mut self) -> &mut Layer {
        self.engine.base_layer_mut()
    }

    /// Adds an input layer (e.g. a Vim-style navigation layer entered
    /// by holding a key) and returns its index for `HoldTarget::Layer`.
    pub fn push_layer(&mut self, layer: Layer) -> usize {
        self.engine.push_layer(layer)
    }

    /// Registers a callback and returns the `ActionId` bindings and
    /// hotkeys can reference (§3.1, §9).
    pub fn register_action(&mut self, callback: impl FnMut() + Send + 'static) -> ActionId {
        self.engine.actions.register(callback)
    }

    /// Binds a key chord to a hotkey action (§4.2.2).
    pub fn register_hotkey(&mut self, chord: Chord, action: HotkeyAction) {
        self.engine.register_hotkey(chord, action);
    }

    /// Binds a key chord directly to a WM command, without a user
    /// closure in between. The chord still fires through the same
    /// `ActionId` indirection every other hotkey uses (the hook thread
    /// never sees an `Action`, only the opaque id); `daemon_loop`
    /// resolves it back to the `Action` on the UI thread.
    pub fn register_hotkey_action(&mut self, chord: Chord, action: Action) {
        let id = self.engine.actions.register(|| {});
        self.wm_hotkeys.insert(id, action);
        self.engine.register_hotkey(chord, HotkeyAction::Call(id));
    }

    /// Binds the daemon's built-in default keyboard layout (§6): window
    /// navigation, workspace switching, and monitor/theme cycling on
    /// `Alt`-based chords, the same bindings `jigsawwm start` runs with
    /// out of the box.
    #[must_use]
    pub fn with_default_bindings(mut self) -> Self {
        let bind = |daemon: &mut Self, chord: &str, action: Action| {
            let chord = Chord::parse(chord).expect("default binding chord must parse");
            daemon.register_hotkey_action(chord, action);
        };

        bind(&mut self, "Alt+J", Action::NextWindow);
        bind(&mut self, "Alt+K", Action::PrevWindow);
        bind(&mut self, "Alt+Shift+J", Action::SwapNext);
        bind(&mut self, "Alt+Shift+K", Action::SwapPrev);
        bind(&mut self, "Alt+Return", Action::SetMaster);
        bind(&mut self, "Alt+Shift+N", Action::RollNext);
        bind(&mut self, "Alt+Shift+P", Action::RollPrev);
        bind(&mut self, "Alt+Shift+T", Action::ToggleTilable);
        bind(&mut self, "Alt+T", Action::ToggleMono);
        bind(&mut self, "Alt+Space", Action::NextTheme);
        bind(&mut self, "Alt+Shift+Space", Action::PrevTheme);
        bind(&mut self, "Alt+Left", Action::PrevMonitor);
        bind(&mut self, "Alt+Right", Action::NextMonitor);
        bind(&mut self, "Alt+Shift+Left", Action::MoveToPrevMonitor);
        bind(&mut self, "Alt+Shift+Right", Action::MoveToNextMonitor);
        bind(&mut self, "Alt+Shift+R", Action::ArrangeAllMonitors);
        bind(&mut self, "Alt+Q", Action::CloseFocused);
        bind(&mut self, "Alt+M", Action::MinimizeFocused);

        for i in 0..jigsawwm_core::action::MAX_WORKSPACES {
            bind(&mut self, &format!("Alt+{}", i + 1), Action::SwitchToWorkspace(i));
            bind(&mut self, &format!("Alt+Shift+{}", i + 1), Action::MoveToWorkspace(i));
        }

        self
    }

    /// Registers a long-running service, started alongside the daemon
    /// and stopped on shutdown (§4.8 addition).
    pub fn register_service(&mut self, service: Box<dyn Service>) {
        self.services.push(service);
    }

    /// Registers a named, schedulable task (§4.8 addition).
    pub fn register_task(&mut self, name: impl Into<String>, action: ActionId, schedule: TaskSchedule) {
        self.tasks.push(Task {
            name: name.into(),
            action,
            schedule,
        });
    }

    /// `post`: registers and schedules `callback` to run as soon as the
    /// daemon's event loop is up.
    pub fn post(&mut self, callback: impl FnMut() + Send + 'static) -> ActionId {
        let id = self.register_action(callback);
        self.register_task("post", id, TaskSchedule::Once(Duration::ZERO));
        id
    }

    /// `schedule`: registers and schedules `callback` to run once,
    /// after `delay`.
    pub fn schedule(&mut self, delay: Duration, callback: impl FnMut() + Send + 'static) -> ActionId {
        let id = self.register_action(callback);
        self.register_task("schedule", id, TaskSchedule::Once(delay));
        id
    }

    /// `interval`: registers and schedules `callback` to run every
    /// `period`, until the daemon stops.
    pub fn interval(&mut self, period: Duration, callback: impl FnMut() + Send + 'static) -> ActionId {
        let id = self.register_action(callback);
        self.register_task("interval", id, TaskSchedule::Every(period));
        id
    }

    /// Runs the daemon until a `Stop` command arrives over IPC, Ctrl+C
    /// is pressed, or an uncaught fatal error occurs (hook install
    /// failure). Writes and removes the PID file around the run.
    pub fn run(self) -> WindowResult<()> {
        jigsawwm_core::pid::write_pid_file()?;
        let result = crate::daemon_loop::run(self);
        let _ = jigsawwm_core::pid::remove_pid_file();
        result
    }
}

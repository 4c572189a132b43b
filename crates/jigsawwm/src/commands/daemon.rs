use jigsawwm_windows::daemon::Daemon;

/// Runs the daemon in the foreground with the built-in default
/// keybindings. `jigsawwm start` re-execs into this subcommand,
/// detached, to actually host the daemon; it is not meant to be run
/// directly. Users who want layers, rules, or hotkeys beyond the
/// defaults build their own `Daemon` instead (see `demos/`).
pub fn execute() {
    if let Err(e) = Daemon::new().with_default_bindings().run() {
        eprintln!("Daemon error: {e}");
        std::process::exit(1);
    }
}

//! The smallest useful daemon: the default tiling hotkeys, no input
//! remapping. This is what `jigsawwm start` runs internally; it's
//! reproduced here as a starting point for a user who wants to add
//! their own hotkeys without touching the CLI crate.

use jigsawwm_windows::daemon::Daemon;

fn main() {
    let daemon = Daemon::new().with_default_bindings();

    if let Err(e) = daemon.run() {
        eprintln!("daemon error: {e}");
        std::process::exit(1);
    }
}

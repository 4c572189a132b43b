/// Writes a starter `jigsawwm.rs` demonstrating the `Daemon` builder API
/// to the current directory. There is no config file to generate:
/// layers, hotkeys, window rules, and layout themes are Rust, built
/// against `jigsawwm-windows::daemon::Daemon` (see `demos/` for more).
pub fn execute() {
    let path = std::path::Path::new("jigsawwm.rs");

    if path.exists() {
        println!("Already exists: {}", path.display());
        return;
    }

    match std::fs::write(path, STARTER) {
        Ok(()) => {
            println!("Created {}", path.display());
            println!(
                "\nThis is a regular Rust source file, not a config format. Drop it into a"
            );
            println!(
                "binary crate's src/main.rs (depending on jigsawwm-windows and jigsawwm-core)"
            );
            println!("and customize the bindings, rules, and themes directly in Rust.");
        }
        Err(e) => {
            eprintln!("Error: could not write {}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

const STARTER: &str = r#"use jigsawwm_core::config::Config;
use jigsawwm_core::{Dwindle, Theme, WindowRule};
use jigsawwm_windows::daemon::Daemon;

fn main() {
    let config = Config::default();

    let daemon = Daemon::new()
        .with_config(config)
        .with_themes(vec![Theme::Dwindle(Dwindle::default())])
        .with_rules(Vec::<WindowRule>::new())
        .with_default_bindings();

    // Add your own hotkeys beyond the defaults, e.g.:
    //
    //     daemon.register_hotkey_action(
    //         Chord::parse("Alt+Shift+F").unwrap(),
    //         Action::SetTheme("monocle".into()),
    //     );

    if let Err(e) = daemon.run() {
        eprintln!("Daemon error: {e}");
        std::process::exit(1);
    }
}
"#;

//! A fuller configuration: Caps Lock becomes Control when held and
//! Escape when tapped, a couple of terminals are left floating instead
//! of tiled, and one extra hotkey opens a monocle-focused "zen" theme
//! on demand.

use jigsawwm_core::config::Config;
use jigsawwm_core::{
    Action, Binding, Chord, Dwindle, HoldTarget, Monocle, TapTarget, Theme, VKey, WindowRule,
};
use jigsawwm_windows::daemon::Daemon;

fn main() {
    let mut daemon = Daemon::new()
        .with_config(Config::default())
        .with_themes(vec![
            Theme::Dwindle(Dwindle::default()),
            Theme::Monocle(Monocle::default()),
        ])
        .with_rules(floating_rules())
        .with_default_bindings();

    daemon.base_layer_mut().bind(
        VKey::CAPITAL,
        Binding::TapHold {
            tap: TapTarget::Key(VKey::ESCAPE),
            hold: HoldTarget::Modifier(VKey::LCONTROL),
            term_ms: 200,
            quick_tap_term_ms: 150,
        },
    );

    daemon.register_hotkey_action(
        Chord::parse("Alt+Z").expect("chord parses"),
        Action::SetTheme("monocle".into()),
    );

    if let Err(e) = daemon.run() {
        eprintln!("daemon error: {e}");
        std::process::exit(1);
    }
}

fn floating_rules() -> Vec<WindowRule> {
    vec![
        WindowRule::new(false)
            .match_class("ConsoleWindowClass")
            .expect("valid regex"),
        WindowRule::new(false)
            .match_title("^Picture-in-Picture$")
            .expect("valid regex"),
    ]
}

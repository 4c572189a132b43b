pub mod types;

use serde::{Deserialize, Serialize};

pub use types::{HidingBehaviour, LayoutConfig, MouseConfig};

/// Ambient daemon configuration: logging, layout defaults, and mouse
/// integration. JigsawWM defines no persisted configuration format —
/// hotkeys, layers, window rules, and themes are registered in code
/// against the daemon builder (§6) — so `Config` exists only to carry
/// the ambient stack a running daemon needs, and is built with
/// `Config::default()` or literal struct updates, not parsed from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout algorithm parameters.
    pub layout: LayoutConfig,
    /// Mouse integration settings.
    pub mouse: MouseConfig,
    /// Logging settings.
    pub logging: crate::log::LogConfig,
}

impl Config {
    /// Clamps layout values to safe ranges.
    pub fn validate(&mut self) {
        self.layout.gap = self.layout.gap.clamp(0, 200);
        self.layout.ratio = self.layout.ratio.clamp(0.1, 0.9);
    }
}

/// Returns the JigsawWM config directory (`~/.config/jigsawwm/`), used
/// only for the log file location — there is no config file to load
/// from it.
pub fn config_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("USERPROFILE").map(|h| std::path::PathBuf::from(h).join(".config").join("jigsawwm"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let mut config = Config::default();
        config.validate();

        assert_eq!(config.layout.gap, 8);
        assert!((config.layout.ratio - 0.5).abs() < f64::EPSILON);
        assert!(config.mouse.follows_focus);
    }

    #[test]
    fn validate_clamps_extreme_values() {
        let mut config = Config {
            layout: LayoutConfig {
                gap: -50,
                ratio: 2.0,
                ..Default::default()
            },
            ..Default::default()
        };

        config.validate();

        assert_eq!(config.layout.gap, 0);
        assert!((config.layout.ratio - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_sections() {
        let toml_str = "[layout]\ngap = 16\n";
        let config: Config = toml::from_str(toml_str).unwrap();

        assert_eq!(config.layout.gap, 16);
        assert!((config.layout.ratio - 0.5).abs() < f64::EPSILON);
    }
}

/// Reusable configuration value types, constructed in code rather than
/// parsed from a file — JigsawWM defines no persisted configuration
/// format (§6 "Configuration is code, not a file").
use serde::{Deserialize, Serialize};

/// Layout parameters a theme is built with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap in pixels between windows and screen edges.
    pub gap: i32,
    /// Ratio of space given to the first window in each split (0.0-1.0).
    pub ratio: f64,
    /// How windows are hidden when switching away from their workspace.
    pub hiding: HidingBehaviour,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap: 8,
            ratio: 0.5,
            hiding: HidingBehaviour::default(),
        }
    }
}

/// How windows are hidden when switching away from their workspace
/// (§4.7 "Workspace switching").
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HidingBehaviour {
    /// Move off-screen to `(-32000, -32000)`. Avoids taskbar flicker
    /// and preserves z-order; the documented default.
    #[default]
    OffScreen,
    /// `ShowWindow(SW_HIDE)`. Fully hidden, loses its taskbar icon, and
    /// fires `EVENT_OBJECT_HIDE` — the event handler must not mistake
    /// that for window destruction mid-switch.
    Hide,
}

/// Mouse integration settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseConfig {
    /// Move the cursor to the center of the focused window on
    /// keyboard navigation.
    pub follows_focus: bool,
    /// Automatically focus the window under the cursor without clicking.
    pub focus_follows_mouse: bool,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            follows_focus: true,
            focus_follows_mouse: false,
        }
    }
}

use regex::Regex;

use crate::Rect;

/// A boxed error type for window operations.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// The per-window invisible-border offsets a platform reports between
/// `GetWindowRect` and the window's actual painted frame (§4.4 "bound
/// compensation"). All fields are typically positive; `left`/`right`
/// are usually equal for standard Win32 frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOffsets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Inflates `requested` by `offsets` so the window's *visible* frame
/// matches `requested` exactly once the OS re-deflates it. A no-op
/// when `enabled` is `false`, for users who disable compensation
/// globally.
pub fn compensate_rect(requested: &Rect, offsets: FrameOffsets, enabled: bool) -> Rect {
    if !enabled {
        return *requested;
    }
    Rect::new(
        requested.x - offsets.left,
        requested.y - offsets.top,
        requested.width + offsets.left + offsets.right,
        requested.height + offsets.top + offsets.bottom,
    )
}

/// Platform-agnostic window trait (§4.4 "Window model"). Each platform
/// crate (here, `jigsawwm-windows`) supplies the concrete handle type.
pub trait Window {
    /// Returns the window title.
    fn title(&self) -> WindowResult<String>;

    /// Returns the window class name.
    fn class(&self) -> WindowResult<String>;

    /// Returns the backing executable's file name, e.g. `"firefox.exe"`.
    fn exe_basename(&self) -> WindowResult<String>;

    /// Returns the window's current bounding rectangle.
    fn rect(&self) -> WindowResult<Rect>;

    /// Returns what [`Window::set_rect`] would send to the OS for
    /// `rect` — the target inflated by this window's invisible frame
    /// offsets. Lets a caller compare a prospective move against the
    /// window's current (already-compensated) [`Window::rect`] without
    /// issuing it, which [`set_rect`](Window::set_rect) itself cannot do.
    fn compensated_rect(&self, rect: &Rect) -> Rect;

    /// Moves and resizes the window to the given rectangle, compensating
    /// for invisible frame borders internally. Returns the rect actually
    /// applied (post-compensation) so callers can record it as what a
    /// subsequent [`Window::rect`] read should equal.
    fn set_rect(&self, rect: &Rect) -> WindowResult<Rect>;

    /// Brings the window to the foreground and gives it input focus.
    fn activate_and_focus(&self) -> WindowResult<()>;

    /// Minimizes the window.
    fn minimize(&self) -> WindowResult<()>;

    /// Toggles between maximized and restored.
    fn toggle_maximize(&self) -> WindowResult<()>;

    /// Forces the window to repaint. Some applications (e.g.
    /// Chromium-based browsers) need an explicit redraw after being
    /// repositioned programmatically.
    fn invalidate(&self);

    /// Returns whether the window is currently visible.
    fn is_visible(&self) -> bool;

    /// Whether the window is a plausible tiling candidate: a visible
    /// top-level window with a title, not a tool window, not cloaked
    /// (§4.4).
    fn is_manageable(&self) -> bool;
}

/// A rule deciding whether a window matching its patterns should be
/// managed (tiled) or left floating (§4.5 "Window rule evaluation").
/// Built in code — there is no rules file (§6) — so patterns are
/// compiled once at construction rather than deserialized.
pub struct WindowRule {
    match_exe: Option<Regex>,
    match_title: Option<Regex>,
    match_class: Option<Regex>,
    manage: bool,
    static_index: Option<usize>,
}

impl WindowRule {
    /// Creates a rule with no patterns; every `match_*` call narrows it.
    /// `manage` is the outcome applied when all given patterns match.
    pub fn new(manage: bool) -> Self {
        Self {
            match_exe: None,
            match_title: None,
            match_class: None,
            manage,
            static_index: None,
        }
    }

    /// Restricts this rule to executables matching `pattern`.
    pub fn match_exe(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.match_exe = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Restricts this rule to titles matching `pattern`.
    pub fn match_title(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.match_title = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Restricts this rule to window classes matching `pattern`.
    pub fn match_class(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.match_class = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Pins a matching window to a fixed slot in its workspace's window
    /// list, displacing whatever currently occupies that slot (§4.5,
    /// §8 S4). Typically paired with the `Static8` theme, whose regions
    /// are keyed by list position.
    pub fn static_index(mut self, slot: usize) -> Self {
        self.static_index = Some(slot);
        self
    }

    fn matches(&self, exe: &str, title: &str, class: &str) -> bool {
        let any_pattern =
            self.match_exe.is_some() || self.match_title.is_some() || self.match_class.is_some();
        if !any_pattern {
            return false;
        }
        if let Some(re) = &self.match_exe
            && !re.is_match(exe)
        {
            return false;
        }
        if let Some(re) = &self.match_title
            && !re.is_match(title)
        {
            return false;
        }
        if let Some(re) = &self.match_class
            && !re.is_match(class)
        {
            return false;
        }
        true
    }
}

/// Evaluates window rules in order; the first match wins. Defaults to
/// managed (`true`) when no rule matches (§4.5).
pub fn should_manage(exe: &str, title: &str, class: &str, rules: &[WindowRule]) -> bool {
    for rule in rules {
        if rule.matches(exe, title, class) {
            return rule.manage;
        }
    }
    true
}

/// Returns the static slot index the first matching rule pins this
/// window to, if any (§4.5, §8 S4). Evaluated independently of
/// [`should_manage`] since a rule can pin a slot without being the
/// rule that decided to manage the window.
pub fn static_index_for(exe: &str, title: &str, class: &str, rules: &[WindowRule]) -> Option<usize> {
    rules
        .iter()
        .find(|rule| rule.matches(exe, title, class))
        .and_then(|rule| rule.static_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_excludes_by_exe_regex() {
        let rules = vec![WindowRule::new(false).match_exe(r"(?i)taskmgr\.exe").unwrap()];
        assert!(!should_manage("Taskmgr.exe", "Task Manager", "TaskManagerWindow", &rules));
        assert!(should_manage("notepad.exe", "Untitled", "Notepad", &rules));
    }

    #[test]
    fn rule_excludes_by_title_substring_pattern() {
        let rules = vec![WindowRule::new(false).match_title("(?i)settings").unwrap()];
        assert!(!should_manage("app.exe", "Windows Settings", "AppClass", &rules));
        assert!(should_manage("app.exe", "My Document", "AppClass", &rules));
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = vec![
            WindowRule::new(false).match_exe("chrome.exe").unwrap(),
            WindowRule::new(true).match_exe("chrome.exe").unwrap(),
        ];
        assert!(!should_manage("chrome.exe", "Google", "Chrome_WidgetWin_1", &rules));
    }

    #[test]
    fn no_rules_defaults_to_manage() {
        assert!(should_manage("any.exe", "Window", "Class", &[]));
    }

    #[test]
    fn static_index_for_returns_pinned_slot() {
        let rules = vec![
            WindowRule::new(true)
                .match_exe("cmd.exe")
                .unwrap()
                .match_title("nvim")
                .unwrap()
                .static_index(0),
        ];
        assert_eq!(static_index_for("cmd.exe", "nvim — notes.md", "ConsoleWindowClass", &rules), Some(0));
        assert_eq!(static_index_for("cmd.exe", "PowerShell", "ConsoleWindowClass", &rules), None);
    }

    #[test]
    fn static_index_for_is_none_without_a_pin() {
        let rules = vec![WindowRule::new(true).match_exe("chrome.exe").unwrap()];
        assert_eq!(static_index_for("chrome.exe", "Google", "Chrome_WidgetWin_1", &rules), None);
    }

    #[test]
    fn compensate_rect_inflates_by_frame_offsets() {
        let requested = Rect::new(100, 100, 800, 600);
        let offsets = FrameOffsets {
            left: 7,
            top: 0,
            right: 7,
            bottom: 7,
        };
        let actual = compensate_rect(&requested, offsets, true);
        assert_eq!(actual, Rect::new(93, 100, 814, 607));
    }

    #[test]
    fn compensate_rect_is_noop_when_disabled() {
        let requested = Rect::new(100, 100, 800, 600);
        let offsets = FrameOffsets {
            left: 7,
            top: 7,
            right: 7,
            bottom: 7,
        };
        assert_eq!(compensate_rect(&requested, offsets, false), requested);
    }
}

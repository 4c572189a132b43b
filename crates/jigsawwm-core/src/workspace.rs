use crate::Rect;
use crate::layout::Layout;

/// A per-monitor named set of window slots; only one is visible per
/// monitor (§3 "Workspace"). Owns the window ordering, which window
/// holds keyboard focus (`active_index`), and which members are
/// currently skipped by layout (`tilable_mask`).
pub struct Workspace {
    pub name: String,
    /// Ordered list of managed window handles.
    handles: Vec<usize>,
    /// Parallel to `handles`: `false` means the window keeps its own
    /// geometry and is skipped when computing tiling rectangles, but
    /// still occupies its slot in the list.
    tilable_mask: Vec<bool>,
    /// Index into `handles` of the keyboard-focused window.
    /// `None` iff `handles` is empty — §3 invariant.
    active_index: Option<usize>,
    /// Forces monocle regardless of the monitor's chosen theme
    /// (`toggle_mono`) — the workspace's `theme_override`.
    monocle: bool,
    /// The window shown fullscreen while `monocle` is set.
    monocle_window: Option<usize>,
}

impl Workspace {
    /// Creates an empty, unnamed workspace.
    pub fn new() -> Self {
        Self::named(String::new())
    }

    pub fn named(name: String) -> Self {
        Self {
            name,
            handles: Vec::new(),
            tilable_mask: Vec::new(),
            active_index: None,
            monocle: false,
            monocle_window: None,
        }
    }

    pub fn monocle(&self) -> bool {
        self.monocle
    }

    pub fn set_monocle(&mut self, value: bool) {
        self.monocle = value;
    }

    pub fn monocle_window(&self) -> Option<usize> {
        self.monocle_window
    }

    pub fn set_monocle_window(&mut self, value: Option<usize>) {
        self.monocle_window = value;
    }

    /// Adds a tilable window to the end of the workspace. Returns
    /// `false` if the window is already managed.
    pub fn add(&mut self, hwnd: usize) -> bool {
        if self.handles.contains(&hwnd) {
            return false;
        }
        self.handles.push(hwnd);
        self.tilable_mask.push(true);
        if self.active_index.is_none() {
            self.active_index = Some(self.handles.len() - 1);
        }
        true
    }

    /// Inserts a tilable window at a specific position, clamped to the
    /// current length. Returns `false` if already managed.
    pub fn insert(&mut self, index: usize, hwnd: usize) -> bool {
        if self.handles.contains(&hwnd) {
            return false;
        }
        let pos = index.min(self.handles.len());
        self.handles.insert(pos, hwnd);
        self.tilable_mask.insert(pos, true);
        match &mut self.active_index {
            Some(active) if *active >= pos => *active += 1,
            None => self.active_index = Some(pos),
            _ => {}
        }
        true
    }

    /// Removes a window from the workspace. Returns `true` if found.
    pub fn remove(&mut self, hwnd: usize) -> bool {
        let Some(pos) = self.handles.iter().position(|&h| h == hwnd) else {
            return false;
        };
        self.handles.remove(pos);
        self.tilable_mask.remove(pos);
        if self.monocle_window == Some(hwnd) {
            self.monocle_window = None;
        }
        self.active_index = match self.active_index {
            Some(active) if self.handles.is_empty() => {
                let _ = active;
                None
            }
            Some(active) if active > pos => Some(active - 1),
            Some(active) if active == pos => Some(active.min(self.handles.len().saturating_sub(1))),
            other => other,
        };
        true
    }

    pub fn contains(&self, hwnd: usize) -> bool {
        self.handles.contains(&hwnd)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn handles(&self) -> &[usize] {
        &self.handles
    }

    /// Handles of only the tilable members, in order — what layout
    /// computation actually sees (§3 "non-tilable windows ... are
    /// skipped by layout computation").
    pub fn tilable_handles(&self) -> Vec<usize> {
        self.handles
            .iter()
            .zip(&self.tilable_mask)
            .filter(|&(_, &t)| t)
            .map(|(&h, _)| h)
            .collect()
    }

    pub fn is_tilable(&self, hwnd: usize) -> bool {
        self.handles
            .iter()
            .position(|&h| h == hwnd)
            .map(|i| self.tilable_mask[i])
            .unwrap_or(true)
    }

    pub fn set_tilable(&mut self, hwnd: usize, tilable: bool) {
        if let Some(i) = self.handles.iter().position(|&h| h == hwnd) {
            self.tilable_mask[i] = tilable;
        }
    }

    pub fn toggle_tilable(&mut self, hwnd: usize) {
        if let Some(i) = self.handles.iter().position(|&h| h == hwnd) {
            self.tilable_mask[i] = !self.tilable_mask[i];
        }
    }

    /// The keyboard-focused window's handle, if any.
    pub fn active(&self) -> Option<usize> {
        self.active_index.and_then(|i| self.handles.get(i).copied())
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn set_active(&mut self, hwnd: usize) {
        if let Some(i) = self.handles.iter().position(|&h| h == hwnd) {
            self.active_index = Some(i);
        }
    }

    /// `next_window`/`prev_window` (§4.7): moves `active_index` by
    /// `delta` modulo the list length.
    pub fn move_active(&mut self, delta: isize) -> Option<usize> {
        let len = self.handles.len();
        if len == 0 {
            return None;
        }
        let current = self.active_index.unwrap_or(0) as isize;
        let next = current.rem_euclid(len as isize) + delta;
        let wrapped = next.rem_euclid(len as isize) as usize;
        self.active_index = Some(wrapped);
        self.handles.get(wrapped).copied()
    }

    /// `swap_next`/`swap_prev`: swaps the active window with its list
    /// neighbor; focus follows.
    pub fn swap_active(&mut self, delta: isize) {
        let len = self.handles.len();
        if len < 2 {
            return;
        }
        let Some(active) = self.active_index else {
            return;
        };
        let other = (active as isize + delta).rem_euclid(len as isize) as usize;
        self.handles.swap(active, other);
        self.tilable_mask.swap(active, other);
        self.active_index = Some(other);
    }

    /// `set_master`: swaps the active window with slot 0, or with
    /// slot 1 if the active window is already slot 0.
    pub fn set_master(&mut self) {
        let Some(active) = self.active_index else {
            return;
        };
        if self.handles.len() < 2 {
            return;
        }
        let target = if active == 0 { 1 } else { 0 };
        self.handles.swap(active, target);
        self.tilable_mask.swap(active, target);
        self.active_index = Some(target);
    }

    /// `roll_next`/`roll_prev`: rotates the entire list by `delta`,
    /// keeping the active window's identity (not its slot) stable.
    pub fn roll(&mut self, delta: isize) {
        let len = self.handles.len();
        if len < 2 {
            return;
        }
        let active_hwnd = self.active();
        let shift = delta.rem_euclid(len as isize) as usize;
        self.handles.rotate_right(shift);
        self.tilable_mask.rotate_right(shift);
        if let Some(hwnd) = active_hwnd {
            self.active_index = self.handles.iter().position(|&h| h == hwnd);
        }
    }

    /// Swaps two windows by their position indices.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.handles.len() && b < self.handles.len() {
            self.handles.swap(a, b);
            self.tilable_mask.swap(a, b);
        }
    }

    pub fn index_of(&self, hwnd: usize) -> Option<usize> {
        self.handles.iter().position(|&h| h == hwnd)
    }

    /// Computes the layout for the tilable members in the given work
    /// area. Non-tilable members are absent from the result entirely —
    /// callers must not reposition them.
    pub fn compute_layout(&self, layout: &dyn Layout, work_area: &Rect) -> Vec<(usize, Rect)> {
        layout.apply(&self.tilable_handles(), work_area)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Dwindle;

    #[test]
    fn add_and_remove_windows() {
        let mut ws = Workspace::new();
        assert!(ws.add(1));
        assert!(ws.add(2));
        assert!(!ws.add(1)); // duplicate
        assert_eq!(ws.len(), 2);
        assert!(ws.contains(1));
        assert!(ws.remove(1));
        assert_eq!(ws.len(), 1);
        assert!(!ws.contains(1));
    }

    #[test]
    fn insert_at_position() {
        let mut ws = Workspace::new();
        ws.add(1);
        ws.add(2);
        assert!(ws.insert(0, 3));
        assert_eq!(ws.handles(), &[3, 1, 2]);
        assert!(!ws.insert(0, 1));
        assert!(ws.insert(100, 4));
        assert_eq!(ws.handles(), &[3, 1, 2, 4]);
    }

    #[test]
    fn active_index_stays_in_bounds_or_none() {
        let mut ws = Workspace::new();
        assert_eq!(ws.active(), None);
        ws.add(1);
        assert_eq!(ws.active(), Some(1));
        ws.add(2);
        ws.remove(1);
        assert!(ws.active_index().unwrap() < ws.len());
        ws.remove(2);
        assert_eq!(ws.active(), None);
    }

    #[test]
    fn move_active_wraps_modulo_length() {
        let mut ws = Workspace::new();
        ws.add(1);
        ws.add(2);
        ws.add(3);
        ws.set_active(1);
        assert_eq!(ws.move_active(1), Some(2));
        assert_eq!(ws.move_active(1), Some(3));
        assert_eq!(ws.move_active(1), Some(1));
        assert_eq!(ws.move_active(-1), Some(3));
    }

    #[test]
    fn set_master_swaps_with_slot_zero_or_one() {
        let mut ws = Workspace::new();
        ws.add(1);
        ws.add(2);
        ws.add(3);
        ws.set_active(3);
        ws.set_master();
        assert_eq!(ws.handles()[0], 3);
        ws.set_active(3); // already master
        ws.set_master();
        assert_eq!(ws.handles()[1], 3);
    }

    #[test]
    fn roll_rotates_list_and_tracks_active_identity() {
        let mut ws = Workspace::new();
        ws.add(1);
        ws.add(2);
        ws.add(3);
        ws.set_active(2);
        ws.roll(1);
        assert_eq!(ws.handles(), &[3, 1, 2]);
        assert_eq!(ws.active(), Some(2));
    }

    #[test]
    fn non_tilable_windows_are_skipped_by_layout() {
        let mut ws = Workspace::new();
        ws.add(1);
        ws.add(2);
        ws.set_tilable(1, false);
        let layout = Dwindle {
            gap: 0,
            ratio: 0.5,
            max_tiling_areas: 0,
        };
        let area = Rect::new(0, 0, 1920, 1080);
        let positions = ws.compute_layout(&layout, &area);
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].0, 2);
    }

    #[test]
    fn toggle_tilable_flips_the_flag() {
        let mut ws = Workspace::new();
        ws.add(1);
        assert!(ws.is_tilable(1));
        ws.toggle_tilable(1);
        assert!(!ws.is_tilable(1));
    }
}

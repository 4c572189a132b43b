//! Layout tilers (C6): pure functions `(workarea, window_count) -> rects`.

use crate::Rect;

/// A layout algorithm that computes window positions within a work area.
///
/// Given a list of window handles and the available space, a layout
/// produces a position and size for each window, in the same order as
/// the input handles. Implementations must be pure and idempotent:
/// calling `apply` twice with the same arguments returns identical
/// rects (property 5, §8).
pub trait Layout {
    /// Computes positions for all windows in the given work area.
    fn apply(&self, handles: &[usize], work_area: &Rect) -> Vec<(usize, Rect)>;

    /// Stable name used by config files and the `next_theme` command.
    fn name(&self) -> &'static str;
}

/// Shrinks `area` by `gap` on every outer edge; never produces a
/// non-positive dimension.
fn pad(area: &Rect, gap: i32) -> Rect {
    Rect::new(
        area.x + gap,
        area.y + gap,
        (area.width - gap * 2).max(1),
        (area.height - gap * 2).max(1),
    )
}

/// Truncates `handles` to `max_tiling_areas` participants, returning
/// the truncated slice plus the overflow that must be stacked on the
/// last computed rect (§4.6).
fn split_overflow(handles: &[usize], max_tiling_areas: usize) -> (&[usize], &[usize]) {
    if max_tiling_areas == 0 || handles.len() <= max_tiling_areas {
        (handles, &[])
    } else {
        handles.split_at(max_tiling_areas)
    }
}

fn stack_overflow(results: &mut Vec<(usize, Rect)>, overflow: &[usize]) {
    let Some(&(_, last_rect)) = results.last() else {
        return;
    };
    for &hwnd in overflow {
        results.push((hwnd, last_rect));
    }
}

fn recursive_split(
    handles: &[usize],
    area: &Rect,
    ratio: f64,
    gap: i32,
    horizontal: bool,
    results: &mut Vec<(usize, Rect)>,
) {
    if handles.is_empty() {
        return;
    }
    if handles.len() == 1 {
        results.push((handles[0], *area));
        return;
    }

    let half = gap / 2;
    let (first_area, rest_area) = if horizontal {
        let split = (area.width as f64 * ratio) as i32;
        let first = Rect::new(area.x, area.y, (split - half).max(1), area.height);
        let rest = Rect::new(
            area.x + split + half,
            area.y,
            (area.width - split - half).max(1),
            area.height,
        );
        (first, rest)
    } else {
        let split = (area.height as f64 * ratio) as i32;
        let first = Rect::new(area.x, area.y, area.width, (split - half).max(1));
        let rest = Rect::new(
            area.x,
            area.y + split + half,
            area.width,
            (area.height - split - half).max(1),
        );
        (first, rest)
    };

    results.push((handles[0], first_area));
    recursive_split(&handles[1..], &rest_area, ratio, gap, !horizontal, results);
}

/// Recursive split alternating axes, starting from whichever axis is
/// dominant for the work area (landscape splits horizontally first,
/// portrait splits vertically first) — §4.6 "Dwindle".
#[derive(Debug, Clone)]
pub struct Dwindle {
    pub gap: i32,
    pub ratio: f64,
    pub max_tiling_areas: usize,
}

impl Default for Dwindle {
    fn default() -> Self {
        Self {
            gap: 8,
            ratio: 0.5,
            max_tiling_areas: 0,
        }
    }
}

impl Layout for Dwindle {
    fn apply(&self, handles: &[usize], work_area: &Rect) -> Vec<(usize, Rect)> {
        if handles.is_empty() {
            return Vec::new();
        }
        let (active, overflow) = split_overflow(handles, self.max_tiling_areas);
        let padded = pad(work_area, self.gap);
        let horizontal = padded.width >= padded.height;
        let mut results = Vec::with_capacity(active.len());
        recursive_split(active, &padded, self.ratio, self.gap, horizontal, &mut results);
        stack_overflow(&mut results, overflow);
        results
    }

    fn name(&self) -> &'static str {
        "dwindle"
    }
}

/// First window fills the left half; remaining windows dwindle-tile
/// the right half — §4.6 "Widescreen dwindle".
#[derive(Debug, Clone)]
pub struct WidescreenDwindle {
    pub gap: i32,
    pub ratio: f64,
    pub max_tiling_areas: usize,
}

impl Default for WidescreenDwindle {
    fn default() -> Self {
        Self {
            gap: 8,
            ratio: 0.5,
            max_tiling_areas: 0,
        }
    }
}

impl Layout for WidescreenDwindle {
    fn apply(&self, handles: &[usize], work_area: &Rect) -> Vec<(usize, Rect)> {
        if handles.is_empty() {
            return Vec::new();
        }
        let (active, overflow) = split_overflow(handles, self.max_tiling_areas);
        let padded = pad(work_area, self.gap);
        if active.len() == 1 {
            let mut results = vec![(active[0], padded)];
            stack_overflow(&mut results, overflow);
            return results;
        }

        let half = self.gap / 2;
        let left = Rect::new(padded.x, padded.y, (padded.width / 2 - half).max(1), padded.height);
        let right = Rect::new(
            padded.x + padded.width / 2 + half,
            padded.y,
            (padded.width - padded.width / 2 - half).max(1),
            padded.height,
        );

        let mut results = vec![(active[0], left)];
        recursive_split(&active[1..], &right, self.ratio, self.gap, false, &mut results);
        stack_overflow(&mut results, overflow);
        results
    }

    fn name(&self) -> &'static str {
        "widescreen-dwindle"
    }
}

/// First two windows split horizontally top/bottom; remaining windows
/// dwindle-tile the bottom strip — §4.6 "OBS dwindle" (named for
/// streaming layouts: a camera/chat pane on top, sources below).
#[derive(Debug, Clone)]
pub struct ObsDwindle {
    pub gap: i32,
    pub ratio: f64,
    pub max_tiling_areas: usize,
}

impl Default for ObsDwindle {
    fn default() -> Self {
        Self {
            gap: 8,
            ratio: 0.4,
            max_tiling_areas: 0,
        }
    }
}

impl Layout for ObsDwindle {
    fn apply(&self, handles: &[usize], work_area: &Rect) -> Vec<(usize, Rect)> {
        if handles.is_empty() {
            return Vec::new();
        }
        let (active, overflow) = split_overflow(handles, self.max_tiling_areas);
        let padded = pad(work_area, self.gap);
        if active.len() == 1 {
            let mut results = vec![(active[0], padded)];
            stack_overflow(&mut results, overflow);
            return results;
        }

        let half = self.gap / 2;
        let split = (padded.height as f64 * self.ratio) as i32;
        let top = Rect::new(padded.x, padded.y, padded.width, (split - half).max(1));
        let bottom = Rect::new(
            padded.x,
            padded.y + split + half,
            padded.width,
            (padded.height - split - half).max(1),
        );

        let mut results = Vec::new();
        if active.len() == 2 {
            results.push((active[0], top));
            results.push((active[1], bottom));
        } else {
            results.push((active[0], top));
            recursive_split(&active[1..], &bottom, self.ratio, self.gap, true, &mut results);
        }
        stack_overflow(&mut results, overflow);
        results
    }

    fn name(&self) -> &'static str {
        "obs-dwindle"
    }
}

/// Every window receives the full work area — §4.6 "Monocle". Only
/// the currently focused window is actually visible; the rest sit
/// beneath it at the same rect.
#[derive(Debug, Clone, Default)]
pub struct Monocle {
    pub gap: i32,
}

impl Layout for Monocle {
    fn apply(&self, handles: &[usize], work_area: &Rect) -> Vec<(usize, Rect)> {
        let padded = pad(work_area, self.gap);
        handles.iter().map(|&h| (h, padded)).collect()
    }

    fn name(&self) -> &'static str {
        "monocle"
    }
}

/// Fixed 8-region template keyed by `static_window_index` (§4.6,
/// §3 `WindowRule::static_window_index`): a large primary region on
/// the left, six stacked secondary regions on the right.
///
/// ```text
/// +-----------------+------+
/// |                 |  2   |
/// |        0        +------+
/// |                 |  3   |
/// |                 +------+
/// +-----------------+  4   |
/// |                 +------+
/// |        1        |  5   |
/// |                 +------+
/// |                 |  6   |
/// +-----------------+------+
/// ```
/// Slot index 7 and beyond stack on slot 6. Position `i` in `handles`
/// occupies region `i` — the WM controller, not this layout, is
/// responsible for ordering the list by `static_window_index`.
#[derive(Debug, Clone, Default)]
pub struct Static8 {
    pub gap: i32,
}

impl Static8 {
    const REGIONS: usize = 8;

    fn regions(&self, area: &Rect) -> [Rect; Self::REGIONS] {
        let half = self.gap / 2;
        let left_w = (area.width * 3 / 5 - half).max(1);
        let right_x = area.x + area.width * 3 / 5 + half;
        let right_w = (area.width - area.width * 3 / 5 - half).max(1);

        let left_h = (area.height / 2 - half).max(1);
        let left0 = Rect::new(area.x, area.y, left_w, left_h);
        let left1 = Rect::new(area.x, area.y + area.height / 2 + half, left_w, left_h);

        let slot_h = (area.height / 6 - half).max(1);
        let right: Vec<Rect> = (0..6)
            .map(|i| Rect::new(right_x, area.y + i * (area.height / 6), right_w, slot_h))
            .collect();

        [
            left0, left1, right[0], right[1], right[2], right[3], right[4], right[5],
        ]
    }
}

impl Layout for Static8 {
    fn apply(&self, handles: &[usize], work_area: &Rect) -> Vec<(usize, Rect)> {
        if handles.is_empty() {
            return Vec::new();
        }
        let padded = pad(work_area, self.gap);
        let regions = self.regions(&padded);
        handles
            .iter()
            .enumerate()
            .map(|(i, &hwnd)| (hwnd, regions[i.min(Self::REGIONS - 1)]))
            .collect()
    }

    fn name(&self) -> &'static str {
        "static-8"
    }
}

/// A named layout theme, boxed so a monitor can hold a heterogeneous
/// ordered list and cycle (`next_theme`/`prev_theme`) without generics
/// leaking into `Workspace`/`MonitorState`.
pub enum Theme {
    Dwindle(Dwindle),
    WidescreenDwindle(WidescreenDwindle),
    ObsDwindle(ObsDwindle),
    Monocle(Monocle),
    Static8(Static8),
}

impl Theme {
    pub fn layout(&self) -> &dyn Layout {
        match self {
            Theme::Dwindle(l) => l,
            Theme::WidescreenDwindle(l) => l,
            Theme::ObsDwindle(l) => l,
            Theme::Monocle(l) => l,
            Theme::Static8(l) => l,
        }
    }

    /// Affinity of this theme for a monitor with the given diagonal
    /// size (inches) and pixel aspect ratio (width/height). Higher
    /// wins; ties broken by position in the caller's theme list
    /// (declaration order), per the spec's Open Question resolution.
    pub fn affinity(&self, inches: f64, pixel_ratio: f64) -> i32 {
        match self {
            Theme::WidescreenDwindle(_) if pixel_ratio >= 2.0 => 3,
            Theme::ObsDwindle(_) if (1.5..2.0).contains(&pixel_ratio) => 2,
            Theme::Static8(_) if inches <= 14.0 => 2,
            Theme::Dwindle(_) => 1,
            _ => 0,
        }
    }
}

/// Picks the theme with the highest [`Theme::affinity`] for a monitor.
/// Ties are broken by declaration order (first theme in `themes` wins).
pub fn affinity_index(themes: &[Theme], inches: f64, pixel_ratio: f64) -> usize {
    themes
        .iter()
        .enumerate()
        .max_by_key(|(i, t)| (t.affinity(inches, pixel_ratio), std::cmp::Reverse(*i)))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dwindle_single_window_fills_work_area() {
        let layout = Dwindle {
            gap: 0,
            ratio: 0.5,
            max_tiling_areas: 0,
        };
        let area = Rect::new(0, 0, 1920, 1080);
        let result = layout.apply(&[1], &area);
        assert_eq!(result, vec![(1, Rect::new(0, 0, 1920, 1080))]);
    }

    #[test]
    fn dwindle_s3_three_windows() {
        let layout = Dwindle {
            gap: 0,
            ratio: 0.5,
            max_tiling_areas: 0,
        };
        let area = Rect::new(0, 0, 1920, 1080);
        let result = layout.apply(&[1, 2, 3], &area);
        assert_eq!(
            result,
            vec![
                (1, Rect::new(0, 0, 960, 1080)),
                (2, Rect::new(960, 0, 960, 540)),
                (3, Rect::new(960, 540, 960, 540)),
            ]
        );
    }

    #[test]
    fn dwindle_is_idempotent() {
        let layout = Dwindle::default();
        let area = Rect::new(0, 0, 1920, 1080);
        let once = layout.apply(&[1, 2, 3, 4], &area);
        let twice = layout.apply(&[1, 2, 3, 4], &area);
        assert_eq!(once, twice);
    }

    #[test]
    fn large_gap_never_produces_negative_dimensions() {
        let layout = Dwindle {
            gap: 500,
            ratio: 0.5,
            max_tiling_areas: 0,
        };
        let area = Rect::new(0, 0, 200, 200);
        for (_hwnd, rect) in layout.apply(&[1, 2], &area) {
            assert!(rect.width > 0);
            assert!(rect.height > 0);
        }
    }

    #[test]
    fn max_tiling_areas_stacks_overflow_on_last_rect() {
        let layout = Dwindle {
            gap: 0,
            ratio: 0.5,
            max_tiling_areas: 2,
        };
        let area = Rect::new(0, 0, 1920, 1080);
        let result = layout.apply(&[1, 2, 3, 4], &area);
        assert_eq!(result.len(), 4);
        assert_eq!(result[1].1, result[2].1);
        assert_eq!(result[1].1, result[3].1);
    }

    #[test]
    fn widescreen_dwindle_first_window_takes_full_left_half() {
        let layout = WidescreenDwindle {
            gap: 0,
            ratio: 0.5,
            max_tiling_areas: 0,
        };
        let area = Rect::new(0, 0, 1920, 1080);
        let result = layout.apply(&[1, 2, 3], &area);
        assert_eq!(result[0], (1, Rect::new(0, 0, 960, 1080)));
    }

    #[test]
    fn monocle_every_window_gets_full_area() {
        let layout = Monocle { gap: 0 };
        let area = Rect::new(0, 0, 1920, 1080);
        let result = layout.apply(&[1, 2, 3], &area);
        assert!(result.iter().all(|(_, r)| *r == area));
    }

    #[test]
    fn affinity_picks_widescreen_for_ultrawide() {
        let themes = vec![
            Theme::Dwindle(Dwindle::default()),
            Theme::WidescreenDwindle(WidescreenDwindle::default()),
        ];
        assert_eq!(affinity_index(&themes, 34.0, 2.37), 1);
    }

    #[test]
    fn affinity_ties_break_by_declaration_order() {
        let themes = vec![
            Theme::Dwindle(Dwindle::default()),
            Theme::Dwindle(Dwindle::default()),
        ];
        assert_eq!(affinity_index(&themes, 24.0, 1.77), 0);
    }
}

/// A platform-agnostic window/display event (§4.5 "Event handling").
///
/// These represent meaningful state changes that the tiling manager
/// needs to react to. Platform crates translate raw `SetWinEventHook`
/// and `WM_DISPLAYCHANGE` notifications into these variants; move/resize
/// delivery is coalesced upstream (throttled to >= 16 ms and flushed on
/// drag-end) before it reaches this type.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// A new window was created and made visible.
    Created { hwnd: usize },

    /// A window was destroyed or closed.
    Destroyed { hwnd: usize },

    /// A window received keyboard focus.
    Focused { hwnd: usize },

    /// A window finished being moved or resized.
    Moved { hwnd: usize },

    /// A window was minimized.
    Minimized { hwnd: usize },

    /// A window was restored from minimized state.
    Restored { hwnd: usize },

    /// A window's title changed.
    TitleChanged { hwnd: usize },

    /// A window was hidden (`EVENT_OBJECT_HIDE`). Distinct from
    /// `Destroyed` — this also fires when `HidingBehaviour::Hide`
    /// parks a window during a workspace switch, so handlers must
    /// correlate against in-flight switches before removing it.
    Hidden { hwnd: usize },

    /// Monitor topology or resolution changed (`WM_DISPLAYCHANGE`).
    /// Carries no handle — the WM controller must re-enumerate monitors.
    DisplayChanged,

    /// A monitor's work area changed (e.g. taskbar shown/hidden),
    /// identified by its stable device-path identifier.
    WorkAreaChanged { monitor_id: String },
}

impl WindowEvent {
    /// Returns the window handle associated with this event, if any.
    pub fn hwnd(&self) -> Option<usize> {
        match self {
            Self::Created { hwnd }
            | Self::Destroyed { hwnd }
            | Self::Focused { hwnd }
            | Self::Moved { hwnd }
            | Self::Minimized { hwnd }
            | Self::Restored { hwnd }
            | Self::TitleChanged { hwnd }
            | Self::Hidden { hwnd } => Some(*hwnd),
            Self::DisplayChanged | Self::WorkAreaChanged { .. } => None,
        }
    }
}

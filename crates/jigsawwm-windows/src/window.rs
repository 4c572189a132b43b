use jigsawwm_core::{Rect, WindowResult};

use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::Graphics::Dwm::{DWMWA_CLOAKED, DwmGetWindowAttribute};
use windows::Win32::System::ProcessStatus::K32GetModuleFileNameExW;
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_VM_READ,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GW_OWNER, GWL_EXSTYLE, GWL_STYLE, GetWindow, GetWindowLongW, GetWindowRect,
    GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId, IsIconic, IsWindowVisible,
    PostMessageW, RealGetWindowClassW, SC_MAXIMIZE, SC_RESTORE, SW_HIDE, SW_MINIMIZE, SW_RESTORE,
    SW_SHOWNOACTIVATE, SetForegroundWindow, SetWindowPos, ShowWindow, SWP_NOACTIVATE,
    SWP_NOZORDER, WM_CLOSE, WM_SYSCOMMAND, WS_EX_TOOLWINDOW,
};

use crate::frame;

/// A window on the Windows platform, wrapping a Win32 `HWND`.
///
/// `HWND` is an opaque handle — a number identifying a window to the OS.
/// This struct holds that handle and queries the OS lazily for metadata.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    hwnd: HWND,
}

impl Window {
    /// Creates a new `Window` from a raw `HWND`.
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    /// Creates a `Window` from a handle value stored as `usize`
    /// (the representation `jigsawwm_core::WindowEvent`/`Workspace` use).
    pub fn from_raw(hwnd: usize) -> Self {
        Self::new(HWND(hwnd as *mut _))
    }

    /// Returns the raw window handle.
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn is_maximized(&self) -> bool {
        use windows::Win32::UI::WindowsAndMessaging::{GetWindowPlacement, SW_SHOWMAXIMIZED, WINDOWPLACEMENT};
        let mut placement = WINDOWPLACEMENT {
            length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
            ..Default::default()
        };
        unsafe {
            if GetWindowPlacement(self.hwnd, &mut placement).is_err() {
                return false;
            }
        }
        placement.showCmd == SW_SHOWMAXIMIZED.0 as u32
    }

    /// Returns the window's owner, if any (dialogs, property sheets).
    pub fn owner(&self) -> Option<usize> {
        let owner = unsafe { GetWindow(self.hwnd, GW_OWNER) }.ok()?;
        if owner.is_invalid() { None } else { Some(owner.0 as usize) }
    }

    /// Whether this is cloaked by DWM (e.g. a UWP window on another
    /// virtual desktop) — part of `is_manageable`'s filter.
    fn is_cloaked(&self) -> bool {
        let mut cloaked: u32 = 0;
        let ok = unsafe {
            DwmGetWindowAttribute(
                self.hwnd,
                DWMWA_CLOAKED,
                &mut cloaked as *mut u32 as *mut _,
                std::mem::size_of::<u32>() as u32,
            )
        };
        ok.is_ok() && cloaked != 0
    }

    fn is_tool_window(&self) -> bool {
        let ex_style = unsafe { GetWindowLongW(self.hwnd, GWL_EXSTYLE) } as u32;
        ex_style & WS_EX_TOOLWINDOW.0 != 0
    }

    /// Whether this is a plausible top-level application window:
    /// visible, not a child, not a tool window, has no owner.
    pub fn is_app_window(&self) -> bool {
        if !self.is_visible() || self.is_tool_window() {
            return false;
        }
        self.owner().is_none()
    }

    pub fn hide(&self) {
        let (x, y) = Rect::OFF_SCREEN;
        unsafe {
            let _ = SetWindowPos(
                self.hwnd,
                None,
                x,
                y,
                0,
                0,
                SWP_NOZORDER | SWP_NOACTIVATE | windows::Win32::UI::WindowsAndMessaging::SWP_NOSIZE,
            );
        }
    }

    pub fn show(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOWNOACTIVATE);
        }
    }

    /// `ShowWindow(SW_HIDE)` — the `HidingBehaviour::Hide` workspace
    /// strategy. Fires `EVENT_OBJECT_HIDE`, unlike [`Window::hide`]'s
    /// off-screen park.
    pub fn conceal(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_HIDE);
        }
    }

    pub fn force_show(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_RESTORE);
        }
    }
}

impl jigsawwm_core::Window for Window {
    fn title(&self) -> WindowResult<String> {
        // SAFETY: GetWindowTextLengthW/GetWindowTextW read window text
        // without modifying state; a valid HWND is always safe to pass.
        unsafe {
            let length = GetWindowTextLengthW(self.hwnd);
            if length == 0 {
                return Ok(String::new());
            }
            let mut buffer = vec![0u16; (length + 1) as usize];
            let copied = GetWindowTextW(self.hwnd, &mut buffer);
            Ok(String::from_utf16_lossy(&buffer[..copied as usize]))
        }
    }

    fn class(&self) -> WindowResult<String> {
        // SAFETY: RealGetWindowClassW reads the window class name; 256
        // is the documented maximum class name length in Win32.
        unsafe {
            let mut buffer = [0u16; 256];
            let length = RealGetWindowClassW(self.hwnd, &mut buffer);
            Ok(String::from_utf16_lossy(&buffer[..length as usize]))
        }
    }

    fn exe_basename(&self) -> WindowResult<String> {
        let mut pid = 0u32;
        // SAFETY: GetWindowThreadProcessId writes the owning PID.
        unsafe {
            GetWindowThreadProcessId(self.hwnd, Some(&mut pid));
        }
        if pid == 0 {
            return Ok(String::new());
        }
        // SAFETY: OpenProcess with query+read rights is sufficient for
        // K32GetModuleFileNameExW; the handle is closed on drop.
        let process = unsafe {
            OpenProcess(
                PROCESS_QUERY_LIMITED_INFORMATION | PROCESS_VM_READ,
                false,
                pid,
            )?
        };
        let mut buffer = [0u16; 260];
        let len = unsafe { K32GetModuleFileNameExW(Some(process), None, &mut buffer) };
        unsafe {
            let _ = windows::Win32::Foundation::CloseHandle(process);
        }
        let path = String::from_utf16_lossy(&buffer[..len as usize]);
        Ok(path
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or(&path)
            .to_string())
    }

    fn rect(&self) -> WindowResult<Rect> {
        let mut rect = windows::Win32::Foundation::RECT::default();
        // SAFETY: GetWindowRect writes into the provided RECT pointer.
        unsafe {
            GetWindowRect(self.hwnd, &mut rect)?;
        }
        Ok(Rect::new(
            rect.left,
            rect.top,
            rect.right - rect.left,
            rect.bottom - rect.top,
        ))
    }

    fn compensated_rect(&self, rect: &Rect) -> Rect {
        let offsets = frame::border_offset(self.hwnd).unwrap_or_default();
        jigsawwm_core::compensate_rect(rect, offsets, true)
    }

    fn set_rect(&self, rect: &Rect) -> WindowResult<Rect> {
        let compensated = self.compensated_rect(rect);
        // SAFETY: SetWindowPos repositions/resizes with valid arguments.
        unsafe {
            SetWindowPos(
                self.hwnd,
                None,
                compensated.x,
                compensated.y,
                compensated.width,
                compensated.height,
                SWP_NOZORDER | SWP_NOACTIVATE,
            )?;
        }
        Ok(compensated)
    }

    fn activate_and_focus(&self) -> WindowResult<()> {
        unsafe {
            if IsIconic(self.hwnd).as_bool() {
                let _ = ShowWindow(self.hwnd, SW_RESTORE);
            }
            SetForegroundWindow(self.hwnd);
        }
        Ok(())
    }

    fn minimize(&self) -> WindowResult<()> {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_MINIMIZE);
        }
        Ok(())
    }

    fn toggle_maximize(&self) -> WindowResult<()> {
        let cmd = if self.is_maximized() { SC_RESTORE } else { SC_MAXIMIZE };
        unsafe {
            let _ = PostMessageW(
                Some(self.hwnd),
                WM_SYSCOMMAND,
                WPARAM(cmd.0 as usize),
                LPARAM(0),
            );
        }
        Ok(())
    }

    fn invalidate(&self) {
        // SAFETY: SendMessageW(WM_NULL)-equivalent nudge; RedrawWindow
        // would also work but some Chromium windows only repaint after
        // a synchronous style-change message like this one.
        unsafe {
            let style = GetWindowLongW(self.hwnd, GWL_STYLE);
            let _ = windows::Win32::UI::WindowsAndMessaging::SetWindowLongW(self.hwnd, GWL_STYLE, style);
        }
    }

    fn is_visible(&self) -> bool {
        // SAFETY: IsWindowVisible is a simple query returning a BOOL.
        unsafe { IsWindowVisible(self.hwnd).as_bool() }
    }

    fn is_manageable(&self) -> bool {
        if !self.is_visible() || self.is_tool_window() || self.is_cloaked() {
            return false;
        }
        if self.owner().is_some() {
            return false;
        }
        self.title().map(|t| !t.is_empty()).unwrap_or(false)
    }
}

/// Closes the window by posting `WM_CLOSE`, letting the application
/// handle its own shutdown instead of forcing termination.
pub fn close(hwnd: usize) {
    unsafe {
        let _ = PostMessageW(Some(HWND(hwnd as *mut _)), WM_CLOSE, WPARAM(0), LPARAM(0));
    }
}

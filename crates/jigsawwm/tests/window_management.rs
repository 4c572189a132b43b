//! Integration tests for window management features.
//!
//! These tests require a real desktop session with notepad.exe available.
//! They start/stop the daemon and launch notepad to verify tiling and
//! monocle behavior end to end.

use std::process::{Child, Command};
use std::thread;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Win32 FFI
// ---------------------------------------------------------------------------

#[allow(non_snake_case, non_camel_case_types)]
mod win32 {
    use std::ffi::c_void;

    pub type HWND = *mut c_void;
    pub type BOOL = i32;
    pub type DWORD = u32;
    pub type UINT = u32;
    pub type WPARAM = usize;
    pub type LPARAM = isize;

    pub const SW_MINIMIZE: i32 = 6;
    pub const SW_RESTORE: i32 = 9;

    pub const WM_CLOSE: UINT = 0x0010;

    pub type WNDENUMPROC = unsafe extern "system" fn(hwnd: HWND, lparam: LPARAM) -> BOOL;

    #[repr(C)]
    pub struct RECT {
        pub left: i32,
        pub top: i32,
        pub right: i32,
        pub bottom: i32,
    }

    #[link(name = "user32")]
    unsafe extern "system" {
        pub fn IsIconic(hwnd: HWND) -> BOOL;
        pub fn IsWindowVisible(hwnd: HWND) -> BOOL;
        pub fn ShowWindow(hwnd: HWND, cmd: i32) -> BOOL;
        pub fn EnumWindows(cb: WNDENUMPROC, lparam: LPARAM) -> BOOL;
        pub fn GetWindowThreadProcessId(hwnd: HWND, pid: *mut DWORD) -> DWORD;
        pub fn PostMessageW(hwnd: HWND, msg: UINT, wparam: WPARAM, lparam: LPARAM) -> BOOL;
        pub fn GetWindowRect(hwnd: HWND, rect: *mut RECT) -> BOOL;
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Runs the jigsawwm CLI binary with the given arguments, using spawn()+wait()
/// to avoid pipe-inheritance hangs on Windows.
fn jigsawwm(args: &[&str]) -> std::process::ExitStatus {
    let mut child = Command::new(env!("CARGO_BIN_EXE_jigsawwm"))
        .args(args)
        .spawn()
        .expect("failed to spawn jigsawwm");
    child.wait().expect("failed to wait for jigsawwm")
}

/// Starts the daemon and waits for it to be ready.
fn start_daemon() {
    // Make sure no daemon is already running.
    let _ = Command::new(env!("CARGO_BIN_EXE_jigsawwm"))
        .arg("stop")
        .output();
    thread::sleep(Duration::from_secs(1));

    let status = jigsawwm(&["start"]);
    assert!(status.success(), "daemon failed to start");
    // Give the daemon time to set up the event loop and IPC pipe.
    thread::sleep(Duration::from_secs(2));
}

/// Stops the daemon.
fn stop_daemon() {
    let _ = jigsawwm(&["stop"]);
    thread::sleep(Duration::from_millis(500));
}

/// Launches notepad.exe and waits for its window to appear.
/// Returns the child process handle and the window HWND.
fn launch_notepad() -> (Child, win32::HWND) {
    let child = Command::new("notepad.exe")
        .spawn()
        .expect("failed to launch notepad.exe");
    let pid = child.id();

    // Wait for the notepad window to appear (up to 10 seconds).
    let mut hwnd = std::ptr::null_mut();
    for _ in 0..20 {
        thread::sleep(Duration::from_millis(500));
        hwnd = find_window_by_pid(pid);
        if !hwnd.is_null() {
            break;
        }
    }
    assert!(!hwnd.is_null(), "notepad window did not appear within 10s");

    // Give the tiling manager time to pick up and tile the window.
    thread::sleep(Duration::from_secs(2));

    (child, hwnd)
}

/// Sends WM_CLOSE to notepad and waits for the process to exit.
fn close_notepad(mut child: Child) {
    let hwnd = find_window_by_pid(child.id());
    if !hwnd.is_null() {
        unsafe {
            win32::PostMessageW(hwnd, win32::WM_CLOSE, 0, 0);
        }
    }
    let _ = child.wait();
}

/// Finds a visible top-level window belonging to the given process ID.
fn find_window_by_pid(pid: u32) -> win32::HWND {
    struct Search {
        pid: u32,
        result: win32::HWND,
    }

    unsafe extern "system" fn enum_cb(hwnd: win32::HWND, lparam: win32::LPARAM) -> win32::BOOL {
        let search = unsafe { &mut *(lparam as *mut Search) };
        let mut window_pid: win32::DWORD = 0;
        unsafe {
            win32::GetWindowThreadProcessId(hwnd, &mut window_pid);
        }
        if window_pid == search.pid && unsafe { win32::IsWindowVisible(hwnd) } != 0 {
            search.result = hwnd;
            return 0; // stop enumeration
        }
        1 // continue
    }

    let mut search = Search {
        pid,
        result: std::ptr::null_mut(),
    };
    unsafe {
        win32::EnumWindows(enum_cb, &mut search as *mut Search as win32::LPARAM);
    }
    search.result
}

/// Returns the window rect (left, top, right, bottom).
fn get_window_rect(hwnd: win32::HWND) -> (i32, i32, i32, i32) {
    let mut rect = win32::RECT {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };
    unsafe {
        win32::GetWindowRect(hwnd, &mut rect);
    }
    (rect.left, rect.top, rect.right, rect.bottom)
}

fn rect_area((l, t, r, b): (i32, i32, i32, i32)) -> i64 {
    i64::from(r - l) * i64::from(b - t)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Minimize a window, then restore it. The window should be retiled back
/// to the same slot it held before being minimized.
#[test]
fn minimize_and_restore_retiles_to_same_slot() {
    start_daemon();
    let (child, hwnd) = launch_notepad();

    let tiled_before = get_window_rect(hwnd);

    // Minimize notepad.
    unsafe {
        win32::ShowWindow(hwnd, win32::SW_MINIMIZE);
    }
    thread::sleep(Duration::from_secs(2));

    let iconic = unsafe { win32::IsIconic(hwnd) };
    assert!(iconic != 0, "notepad should be minimized");

    // Restore notepad (simulates clicking the taskbar button).
    unsafe {
        win32::ShowWindow(hwnd, win32::SW_RESTORE);
    }
    thread::sleep(Duration::from_secs(2));

    let iconic_after = unsafe { win32::IsIconic(hwnd) };
    assert!(iconic_after == 0, "notepad should no longer be minimized");

    let tiled_after = get_window_rect(hwnd);
    assert_eq!(
        tiled_before, tiled_after,
        "window should return to the same tiled slot after restore"
    );

    close_notepad(child);
    stop_daemon();
}

/// Toggling monocle on the active workspace should expand the focused
/// window from its tiled slot to fill the work area.
#[test]
fn toggle_mono_expands_focused_window() {
    start_daemon();
    let (child, hwnd) = launch_notepad();

    let tiled_rect = get_window_rect(hwnd);

    let status = jigsawwm(&["debug", "action", "toggle-mono"]);
    assert!(status.success(), "toggle-mono failed");
    thread::sleep(Duration::from_secs(1));

    let mono_rect = get_window_rect(hwnd);
    assert!(
        rect_area(mono_rect) >= rect_area(tiled_rect),
        "monocle rect {mono_rect:?} should be at least as large as the tiled rect {tiled_rect:?}"
    );

    // Leave monocle mode before cleanup.
    let _ = jigsawwm(&["debug", "action", "toggle-mono"]);
    thread::sleep(Duration::from_millis(500));

    close_notepad(child);
    stop_daemon();
}

/// A tiled window's title should be visible through `debug list`.
#[test]
fn debug_list_reports_managed_window() {
    start_daemon();
    let (child, _hwnd) = launch_notepad();

    let output = Command::new(env!("CARGO_BIN_EXE_jigsawwm"))
        .args(["debug", "list"])
        .output()
        .expect("failed to run debug list");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.to_lowercase().contains("notepad"),
        "expected notepad to be listed among managed windows:\n{stdout}"
    );

    close_notepad(child);
    stop_daemon();
}

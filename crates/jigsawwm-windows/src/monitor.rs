use std::mem;

use jigsawwm_core::{Rect, WindowResult};
use windows::Win32::Foundation::{HWND, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    CreateDCW, DeleteDC, EnumDisplayMonitors, GetDeviceCaps, GetMonitorInfoW, HDC, HMONITOR,
    HORZRES, HORZSIZE, MONITOR_DEFAULTTOPRIMARY, MONITORINFOEXW, MonitorFromWindow, VERTRES,
    VERTSIZE,
};
use windows::core::BOOL;

/// A physical monitor: its stable device identifier, its work area
/// (tiling bounds), and the physical/pixel data `Theme::affinity`
/// uses to pick a default layout (§4.6).
#[derive(Debug, Clone)]
pub struct MonitorInfo {
    /// Stable device-path identifier (`szDevice`, e.g. `\\.\DISPLAY1`),
    /// used to match monitors across topology changes (§4.5).
    pub id: String,
    pub work_area: Rect,
    pub full_rect: Rect,
    /// Diagonal size in inches, derived from the physical size reported
    /// by `GetDeviceCaps(HORZSIZE/VERTSIZE)`.
    pub inches: f64,
    /// Pixel aspect ratio (width / height).
    pub pixel_ratio: f64,
}

/// Returns the work area of the primary monitor.
pub fn primary_work_area() -> WindowResult<Rect> {
    let monitor = unsafe { MonitorFromWindow(HWND::default(), MONITOR_DEFAULTTOPRIMARY) };
    work_area_for_monitor(monitor)
}

/// Returns the work area of the monitor containing the given window.
pub fn work_area_for_window(hwnd: HWND) -> WindowResult<Rect> {
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTOPRIMARY) };
    work_area_for_monitor(monitor)
}

/// Returns the stable device identifier of the monitor containing the
/// given window, used to key `TilingManager`'s per-monitor state.
pub fn monitor_id_for_window(hwnd: HWND) -> WindowResult<String> {
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTOPRIMARY) };
    Ok(monitor_info(monitor)?.id)
}

fn work_area_for_monitor(monitor: HMONITOR) -> WindowResult<Rect> {
    Ok(monitor_info(monitor)?.work_area)
}

/// Enumerates every attached monitor with its work area and the
/// physical data needed for layout affinity.
pub fn enumerate_monitors() -> WindowResult<Vec<MonitorInfo>> {
    let mut monitors: Vec<MonitorInfo> = Vec::new();

    // SAFETY: EnumDisplayMonitors calls our callback once per monitor,
    // passing a pointer to our Vec as LPARAM. The callback is synchronous
    // so the Vec outlives the call.
    unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(enum_monitor_callback),
            LPARAM(&mut monitors as *mut _ as isize),
        );
    }

    Ok(monitors)
}

unsafe extern "system" fn enum_monitor_callback(
    monitor: HMONITOR,
    _hdc: HDC,
    _rect: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam is a pointer to our Vec<MonitorInfo>, cast from
    // enumerate_monitors().
    let monitors = unsafe { &mut *(lparam.0 as *mut Vec<MonitorInfo>) };
    if let Ok(info) = monitor_info(monitor) {
        monitors.push(info);
    }
    BOOL(1)
}

fn monitor_info(monitor: HMONITOR) -> WindowResult<MonitorInfo> {
    let mut info = MONITORINFOEXW {
        monitorInfo: windows::Win32::Graphics::Gdi::MONITORINFO {
            cbSize: mem::size_of::<MONITORINFOEXW>() as u32,
            ..Default::default()
        },
        ..Default::default()
    };

    // SAFETY: GetMonitorInfoW fills the struct; cbSize set to the
    // MONITORINFOEXW size (not the base MONITORINFO) tells it to also
    // populate szDevice.
    let success =
        unsafe { GetMonitorInfoW(monitor, &mut info as *mut MONITORINFOEXW as *mut _) };
    if !success.as_bool() {
        return Err("Failed to get monitor info".into());
    }

    let device_name = String::from_utf16_lossy(
        &info.szDevice[..info.szDevice.iter().position(|&c| c == 0).unwrap_or(info.szDevice.len())],
    );

    let rc_work = info.monitorInfo.rcWork;
    let work_area = Rect::new(
        rc_work.left,
        rc_work.top,
        rc_work.right - rc_work.left,
        rc_work.bottom - rc_work.top,
    );

    let rc_monitor = info.monitorInfo.rcMonitor;
    let full_rect = Rect::new(
        rc_monitor.left,
        rc_monitor.top,
        rc_monitor.right - rc_monitor.left,
        rc_monitor.bottom - rc_monitor.top,
    );

    let (inches, pixel_ratio) = physical_dimensions(&device_name, full_rect);

    Ok(MonitorInfo {
        id: device_name,
        work_area,
        full_rect,
        inches,
        pixel_ratio,
    })
}

/// Computes diagonal size in inches and pixel aspect ratio from the
/// device's reported physical dimensions, falling back to the pixel
/// rect's own aspect ratio if the device context can't be opened.
fn physical_dimensions(device_name: &str, full_rect: Rect) -> (f64, f64) {
    let pixel_ratio = if full_rect.height != 0 {
        f64::from(full_rect.width) / f64::from(full_rect.height)
    } else {
        1.0
    };

    let device = windows::core::HSTRING::from(device_name);
    // SAFETY: CreateDCW opens a device context for capability queries
    // only; we never draw into it. Deleted unconditionally below.
    let hdc = unsafe { CreateDCW(&device, None, None, None) };
    if hdc.is_invalid() {
        return (0.0, pixel_ratio);
    }

    let (width_mm, height_mm, width_px, height_px) = unsafe {
        (
            GetDeviceCaps(Some(hdc), HORZSIZE),
            GetDeviceCaps(Some(hdc), VERTSIZE),
            GetDeviceCaps(Some(hdc), HORZRES),
            GetDeviceCaps(Some(hdc), VERTRES),
        )
    };
    unsafe {
        let _ = DeleteDC(hdc);
    }

    if width_mm == 0 || height_mm == 0 {
        return (0.0, pixel_ratio);
    }

    let diagonal_mm = f64::from(width_mm * width_mm + height_mm * height_mm).sqrt();
    let inches = diagonal_mm / 25.4;
    let pixel_ratio = if height_px != 0 {
        f64::from(width_px) / f64::from(height_px)
    } else {
        pixel_ratio
    };

    (inches, pixel_ratio)
}

/// Ctrl+C / console close handling.
pub mod ctrl_c;

/// Daemon: scheduler, service/task lifecycle, IPC and hook wiring.
pub mod daemon;
mod daemon_ipc;
mod daemon_loop;
mod daemon_loop_handlers;

/// Service lifecycle (start/stop, optional autorestart) for processes
/// the daemon supervises alongside itself.
pub mod daemon_service;
mod daemon_threads;
mod daemon_types;

/// DPI awareness setup.
pub mod dpi;

/// Win32 window enumeration.
pub mod enumerate;

/// Win32 event translation.
pub mod event;

/// Win32 event loop (SetWinEventHook + message pump).
pub mod event_loop;

/// Window frame and border offset helpers.
pub mod frame;

/// Low-level keyboard/mouse hook bridging to `jigsawwm_core::JmkEngine`.
pub mod hook;

/// IPC via Named Pipes.
pub mod ipc;

/// Monitor enumeration and work area queries.
pub mod monitor;

/// Panic boundary for user-supplied callbacks.
pub mod panic_guard;

/// Process utilities (alive check, kill).
pub mod process;

/// Tiling manager that applies layouts to managed windows.
pub mod tiling;

/// Window type wrapping a Win32 `HWND`.
pub mod window;

pub use enumerate::enumerate_windows;
pub use window::Window;

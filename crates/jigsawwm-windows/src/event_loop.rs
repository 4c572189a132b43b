use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use jigsawwm_core::{WindowEvent, WindowResult};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, EVENT_OBJECT_LOCATIONCHANGE,
    EVENT_SYSTEM_MOVESIZEEND, GetMessageW, MSG, PostThreadMessageW, RegisterClassW,
    TranslateMessage, WM_DISPLAYCHANGE, WM_QUIT, WNDCLASSW, WS_EX_TOOLWINDOW,
    WINEVENT_OUTOFCONTEXT, WINEVENT_SKIPOWNPROCESS,
};
use windows::core::w;

use crate::event;

/// Minimum event code we listen for (EVENT_SYSTEM_FOREGROUND = 0x0003).
const EVENT_MIN: u32 = 0x0003;

/// Maximum event code we listen for (EVENT_OBJECT_NAMECHANGE = 0x800C).
const EVENT_MAX: u32 = 0x800C;

/// Minimum spacing between `Moved` events coalesced from
/// `EVENT_OBJECT_LOCATIONCHANGE` for the same window (§4.5).
const MOVE_THROTTLE: Duration = Duration::from_millis(16);

thread_local! {
    static EVENT_SENDER: RefCell<Option<Sender<WindowEvent>>> = const { RefCell::new(None) };
    static LAST_LOCATION_MOVE: RefCell<HashMap<usize, Instant>> = RefCell::new(HashMap::new());
}

/// Starts the Win32 window-event loop on a dedicated thread.
///
/// Registers a `SetWinEventHook` spanning the event range this WM cares
/// about and a hidden event-sink window that catches `WM_DISPLAYCHANGE`.
/// Hotkeys are not handled here — they flow through the low-level
/// keyboard hook in `hook.rs`, which runs on its own thread and never
/// touches this one.
pub fn start(event_tx: Sender<WindowEvent>) -> WindowResult<EventLoopHandle> {
    let (ready_tx, ready_rx) = std::sync::mpsc::channel::<Result<u32, String>>();

    let handle = thread::spawn(move || {
        EVENT_SENDER.with(|cell| {
            *cell.borrow_mut() = Some(event_tx);
        });

        let thread_id = unsafe { windows::Win32::System::Threading::GetCurrentThreadId() };

        // SAFETY: SetWinEventHook registers our callback for system-wide
        // window events. WINEVENT_OUTOFCONTEXT means the callback runs in
        // our process. WINEVENT_SKIPOWNPROCESS ignores our own windows.
        let hook = unsafe {
            SetWinEventHook(
                EVENT_MIN,
                EVENT_MAX,
                None,
                Some(win_event_proc),
                0,
                0,
                WINEVENT_OUTOFCONTEXT | WINEVENT_SKIPOWNPROCESS,
            )
        };

        if hook.is_invalid() {
            let _ = ready_tx.send(Err("Failed to set WinEvent hook".to_string()));
            return;
        }

        let event_sink = create_event_sink();

        let _ = ready_tx.send(Ok(thread_id));

        run_message_pump();

        if let Some(hwnd) = event_sink {
            unsafe {
                let _ = DestroyWindow(hwnd);
            }
        }

        unsafe {
            let _ = UnhookWinEvent(hook);
        }
    });

    let thread_id: u32 = ready_rx
        .recv()
        .map_err(|_| -> Box<dyn std::error::Error> {
            "event loop thread exited unexpectedly".into()
        })?
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;

    Ok(EventLoopHandle { thread_id, handle })
}

/// Handle for controlling the event loop from the daemon.
pub struct EventLoopHandle {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
}

impl EventLoopHandle {
    /// Signals the event loop to stop and waits for the thread to finish.
    pub fn stop(self) {
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = self.handle.join();
    }
}

/// The Win32 message pump. Blocks until `WM_QUIT` is received.
fn run_message_pump() {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// Creates a hidden window that receives `WM_DISPLAYCHANGE`.
///
/// Must NOT be a message-only window (`HWND_MESSAGE` parent) because those
/// do not receive broadcast messages. Instead we create a regular hidden
/// window with `WS_EX_TOOLWINDOW` to keep it out of the taskbar.
fn create_event_sink() -> Option<HWND> {
    unsafe {
        let class_name = w!("JigsawWmEventSink");
        let wc = WNDCLASSW {
            lpfnWndProc: Some(event_sink_proc),
            lpszClassName: class_name.into(),
            ..Default::default()
        };

        if RegisterClassW(&wc) == 0 {
            eprintln!("Failed to register JigsawWmEventSink class");
            return None;
        }

        // WS_EX_TOOLWINDOW: no taskbar entry.
        // No WS_VISIBLE: window stays hidden.
        // No HWND_MESSAGE parent: window receives broadcast messages.
        let hwnd = CreateWindowExW(
            WS_EX_TOOLWINDOW,
            class_name,
            w!("JigsawWmEventSink"),
            Default::default(),
            0,
            0,
            0,
            0,
            None,
            None,
            None,
            None,
        );

        match hwnd {
            Ok(h) if !h.is_invalid() => Some(h),
            _ => {
                eprintln!("Failed to create JigsawWmEventSink window");
                None
            }
        }
    }
}

/// WNDPROC for the event sink window.
///
/// Catches `WM_DISPLAYCHANGE` and sends a `DisplayChanged` event through
/// the thread-local sender. All other messages are passed to `DefWindowProcW`.
unsafe extern "system" fn event_sink_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_DISPLAYCHANGE {
        EVENT_SENDER.with(|cell| {
            if let Some(sender) = cell.borrow().as_ref() {
                let _ = sender.send(WindowEvent::DisplayChanged);
            }
        });
    }
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

/// The WinEvent callback.
///
/// `EVENT_OBJECT_LOCATIONCHANGE` fires on every intermediate frame of a
/// drag or resize; we throttle it per-window so downstream consumers see
/// at most one `Moved` event per [`MOVE_THROTTLE`] window. `MOVESIZEEND`
/// always passes through immediately so the final position is never lost.
unsafe extern "system" fn win_event_proc(
    _hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    let hwnd_val = hwnd.0 as usize;

    if event == EVENT_OBJECT_LOCATIONCHANGE {
        let throttled = LAST_LOCATION_MOVE.with(|cell| {
            let mut last = cell.borrow_mut();
            let now = Instant::now();
            match last.get(&hwnd_val) {
                Some(previous) if now.duration_since(*previous) < MOVE_THROTTLE => true,
                _ => {
                    last.insert(hwnd_val, now);
                    false
                }
            }
        });
        if throttled {
            return;
        }
    } else if event == EVENT_SYSTEM_MOVESIZEEND {
        LAST_LOCATION_MOVE.with(|cell| {
            cell.borrow_mut().insert(hwnd_val, Instant::now());
        });
    }

    if let Some(window_event) = event::translate(event, hwnd, id_object) {
        EVENT_SENDER.with(|cell| {
            if let Some(sender) = cell.borrow().as_ref() {
                let _ = sender.send(window_event);
            }
        });
    }
}

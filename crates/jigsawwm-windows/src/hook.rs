//! Low-level keyboard/mouse hook bridging Win32 input to
//! [`jigsawwm_core::JmkEngine`] (§4.1, §5).
//!
//! Both hooks run on one dedicated thread with its own message loop —
//! the same pattern `event_loop::start` uses for `SetWinEventHook`.
//! The hook callbacks themselves only translate raw hook structs into
//! [`InputEvent`]s, drive the engine under a shared mutex, and inject
//! or suppress — they never invoke a user callback directly. Fired
//! [`ActionId`]s are handed to the caller-supplied channel for the
//! daemon's UI thread to run instead (§5: "all user callbacks ...
//! execute on this thread").

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;

use jigsawwm_core::{ActionId, InputEvent, JmkEngine, VKey, WindowResult};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::SystemInformation::GetTickCount64;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    INPUT, INPUT_0, INPUT_KEYBOARD, KEYBD_EVENT_FLAGS, KEYBDINPUT, KEYEVENTF_EXTENDEDKEY,
    KEYEVENTF_KEYUP, SendInput, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, HC_ACTION, HHOOK, KBDLLHOOKSTRUCT,
    LLKHF_INJECTED, LLMHF_INJECTED, MSG, MSLLHOOKSTRUCT, PostThreadMessageW, SetTimer,
    SetWindowsHookExW, TranslateMessage, UnhookWindowsHookEx, WH_KEYBOARD_LL, WH_MOUSE_LL,
    WM_KEYDOWN, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONDOWN,
    WM_MBUTTONUP, WM_MOUSEHWHEEL, WM_MOUSEWHEEL, WM_QUIT, WM_RBUTTONDOWN, WM_RBUTTONUP,
    WM_SYSKEYDOWN, WM_TIMER, WM_XBUTTONDOWN, WM_XBUTTONUP, XBUTTON1, XBUTTON2,
};

/// Tags every event this module injects via `SendInput`, in `dwExtraInfo`,
/// so the hook callbacks recognize and forward their own output instead
/// of feeding it back through the engine (§4.1, engine property 1).
const INJECTION_SENTINEL: usize = 0x4A4D4B5F_4A4D4B5F;

/// Re-arm interval (ms) for the timer that drives `on_timer_tick` while
/// a TapHold machine has a pending deadline.
const TIMER_ID: usize = 1;

thread_local! {
    static STATE: std::cell::RefCell<Option<HookState>> = const { std::cell::RefCell::new(None) };
}

struct HookState {
    engine: Arc<Mutex<JmkEngine>>,
    action_tx: Sender<ActionId>,
    keyboard_hook: HHOOK,
    mouse_hook: HHOOK,
    timer_hwnd: windows::Win32::Foundation::HWND,
}

/// Handle for stopping the hook thread from the daemon.
pub struct HookHandle {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
}

impl HookHandle {
    pub fn stop(self) {
        unsafe {
            let _ = PostThreadMessageW(
                self.thread_id,
                WM_QUIT,
                WPARAM(0),
                LPARAM(0),
            );
        }
        let _ = self.handle.join();
    }
}

/// Installs `WH_KEYBOARD_LL` and `WH_MOUSE_LL` on a new thread and runs
/// its message pump until [`HookHandle::stop`] is called.
///
/// `engine` is shared with the UI thread's timer-expiry path (there is
/// none separate from this thread here — see module docs) behind a
/// single coarse mutex, as required by §5. Every `ActionId` the engine
/// returns is forwarded over `action_tx`; the hook thread never invokes
/// a callback itself.
pub fn start(engine: Arc<Mutex<JmkEngine>>, action_tx: Sender<ActionId>) -> WindowResult<HookHandle> {
    let (ready_tx, ready_rx) = std::sync::mpsc::channel::<Result<u32, String>>();

    let handle = thread::spawn(move || {
        let thread_id = unsafe { GetCurrentThreadId() };

        // SAFETY: SetWindowsHookExW(WH_KEYBOARD_LL/WH_MOUSE_LL, ..., None, 0)
        // installs a thread-global low-level hook; the callback runs on
        // this thread's message queue whenever any process generates input.
        let keyboard_hook = unsafe {
            SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_proc), None, 0)
        };
        let mouse_hook = unsafe { SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_proc), None, 0) };

        let (keyboard_hook, mouse_hook) = match (keyboard_hook, mouse_hook) {
            (Ok(k), Ok(m)) => (k, m),
            _ => {
                let _ = ready_tx.send(Err("Failed to install input hooks".to_string()));
                return;
            }
        };

        let timer_hwnd = create_timer_sink();
        let Some(timer_hwnd) = timer_hwnd else {
            let _ = ready_tx.send(Err("Failed to create hook timer window".to_string()));
            return;
        };

        STATE.with(|cell| {
            *cell.borrow_mut() = Some(HookState {
                engine,
                action_tx,
                keyboard_hook,
                mouse_hook,
                timer_hwnd,
            });
        });

        rearm_timer();

        let _ = ready_tx.send(Ok(thread_id));

        let mut msg = MSG::default();
        while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
            unsafe {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }

        STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().take() {
                unsafe {
                    let _ = UnhookWindowsHookEx(state.keyboard_hook);
                    let _ = UnhookWindowsHookEx(state.mouse_hook);
                    let _ = windows::Win32::UI::WindowsAndMessaging::DestroyWindow(
                        state.timer_hwnd,
                    );
                }
            }
        });
    });

    let thread_id = ready_rx
        .recv()
        .map_err(|_| -> Box<dyn std::error::Error> {
            "hook thread exited unexpectedly".into()
        })?
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;

    Ok(HookHandle { thread_id, handle })
}

fn create_timer_sink() -> Option<windows::Win32::Foundation::HWND> {
    use windows::Win32::UI::WindowsAndMessaging::{
        CreateWindowExW, DefWindowProcW, RegisterClassW, WNDCLASSW, WS_EX_TOOLWINDOW,
    };
    use windows::core::w;

    unsafe extern "system" fn timer_sink_proc(
        hwnd: windows::Win32::Foundation::HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        if msg == WM_TIMER {
            drain_timer_tick();
        }
        unsafe { windows::Win32::UI::WindowsAndMessaging::DefWindowProcW(hwnd, msg, wparam, lparam) }
    }

    unsafe {
        let class_name = w!("JigsawWmHookTimerSink");
        let wc = WNDCLASSW {
            lpfnWndProc: Some(timer_sink_proc),
            lpszClassName: class_name.into(),
            ..Default::default()
        };
        if RegisterClassW(&wc) == 0 {
            eprintln!("Failed to register JigsawWmHookTimerSink class");
            return None;
        }
        let hwnd = CreateWindowExW(
            WS_EX_TOOLWINDOW,
            class_name,
            w!("JigsawWmHookTimerSink"),
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
            _ => None,
        }
    }
}

/// Advances the engine's logical clock and (re)schedules the next wakeup.
fn drain_timer_tick() {
    STATE.with(|cell| {
        let Some(state) = cell.borrow().as_ref().map(|s| (s.engine.clone(), s.action_tx.clone()))
        else {
            return;
        };
        let (engine, action_tx) = state;
        let now = monotonic_ms();
        let out = engine.lock().unwrap().on_timer_tick(now);
        inject_all(&out.inject);
        for action in out.actions {
            let _ = action_tx.send(action);
        }
    });
    rearm_timer();
}

/// Sets (or clears) `WM_TIMER` based on the engine's next TapHold
/// deadline, so the thread sleeps when nothing is pending.
fn rearm_timer() {
    STATE.with(|cell| {
        let Some(state) = cell.borrow().as_ref().map(|s| (s.engine.clone(), s.timer_hwnd)) else {
            return;
        };
        let (engine, hwnd) = state;
        let Some(deadline) = engine.lock().unwrap().next_deadline() else {
            return;
        };
        let now = monotonic_ms();
        let delay = deadline.saturating_sub(now).max(1);
        unsafe {
            SetTimer(Some(hwnd), TIMER_ID, delay as u32, None);
        }
    });
}

fn monotonic_ms() -> u64 {
    unsafe { GetTickCount64() }
}

/// The low-level keyboard hook callback (§4.1).
///
/// Runs on this module's dedicated thread for every physical or
/// synthetic keyboard event system-wide. Translates, drives the
/// engine, injects, and returns either `CallNextHookEx` (forward) or
/// `LRESULT(1)` (suppress).
unsafe extern "system" fn keyboard_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code != HC_ACTION as i32 {
        return unsafe { CallNextHookEx(None, code, wparam, lparam) };
    }

    // SAFETY: lparam points to a valid KBDLLHOOKSTRUCT for the
    // duration of this callback, per the Win32 contract for WH_KEYBOARD_LL.
    let info = unsafe { &*(lparam.0 as *const KBDLLHOOKSTRUCT) };
    let synthetic = (info.flags.0 & LLKHF_INJECTED.0) != 0 || info.dwExtraInfo == INJECTION_SENTINEL;

    let message = wparam.0 as u32;
    let pressed = message == WM_KEYDOWN || message == WM_SYSKEYDOWN;
    let vkey = VKey(info.vkCode as u16);
    let event = if synthetic {
        InputEvent::synthetic(vkey, pressed, monotonic_ms())
    } else {
        InputEvent::physical(vkey, pressed, monotonic_ms())
    };

    let Some((out, suppress)) = dispatch(event) else {
        return unsafe { CallNextHookEx(None, code, wparam, lparam) };
    };

    inject_all(&out);
    if suppress {
        LRESULT(1)
    } else {
        unsafe { CallNextHookEx(None, code, wparam, lparam) }
    }
}

/// The low-level mouse hook callback (§4.1).
///
/// Translates wheel deltas into synthetic `WHEEL_*` down+up pairs and
/// X-buttons into `XBUTTON1/2`; ordinary L/R/M button clicks also pass
/// through the engine so hotkey chords can include them.
unsafe extern "system" fn mouse_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code != HC_ACTION as i32 {
        return unsafe { CallNextHookEx(None, code, wparam, lparam) };
    }

    // SAFETY: lparam points to a valid MSLLHOOKSTRUCT for WH_MOUSE_LL.
    let info = unsafe { &*(lparam.0 as *const MSLLHOOKSTRUCT) };
    let synthetic = (info.flags & LLMHF_INJECTED) != 0 || info.dwExtraInfo == INJECTION_SENTINEL;
    let now = monotonic_ms();

    let message = wparam.0 as u32;
    let events: Vec<(VKey, bool)> = match message {
        m if m == WM_LBUTTONDOWN => vec![(VKey::LBUTTON, true)],
        m if m == WM_LBUTTONUP => vec![(VKey::LBUTTON, false)],
        m if m == WM_RBUTTONDOWN => vec![(VKey::RBUTTON, true)],
        m if m == WM_RBUTTONUP => vec![(VKey::RBUTTON, false)],
        m if m == WM_MBUTTONDOWN => vec![(VKey::MBUTTON, true)],
        m if m == WM_MBUTTONUP => vec![(VKey::MBUTTON, false)],
        m if m == WM_XBUTTONDOWN || m == WM_XBUTTONUP => {
            let pressed = message == WM_XBUTTONDOWN;
            let high = (info.mouseData >> 16) as u16;
            let vkey = if high == XBUTTON1.0 {
                VKey::XBUTTON1
            } else if high == XBUTTON2.0 {
                VKey::XBUTTON2
            } else {
                return unsafe { CallNextHookEx(None, code, wparam, lparam) };
            };
            vec![(vkey, pressed)]
        }
        m if m == WM_MOUSEWHEEL => {
            let delta = (info.mouseData >> 16) as i16;
            let vkey = if delta > 0 { VKey::WHEEL_UP } else { VKey::WHEEL_DOWN };
            vec![(vkey, true), (vkey, false)]
        }
        m if m == WM_MOUSEHWHEEL => {
            let delta = (info.mouseData >> 16) as i16;
            let vkey = if delta > 0 { VKey::WHEEL_RIGHT } else { VKey::WHEEL_LEFT };
            vec![(vkey, true), (vkey, false)]
        }
        _ => return unsafe { CallNextHookEx(None, code, wparam, lparam) },
    };

    let mut suppress_any = false;
    let mut inject_total = Vec::new();
    for (vkey, pressed) in events {
        let event = if synthetic {
            InputEvent::synthetic(vkey, pressed, now)
        } else {
            InputEvent::physical(vkey, pressed, now)
        };
        if let Some((out, suppress)) = dispatch(event) {
            inject_total.extend(out);
            suppress_any |= suppress;
        }
    }
    inject_all(&inject_total);

    if suppress_any {
        LRESULT(1)
    } else {
        unsafe { CallNextHookEx(None, code, wparam, lparam) }
    }
}

/// Drives the engine for one `InputEvent` and forwards any resulting
/// actions to the daemon's action channel. Returns the injections and
/// the suppress decision for the caller to act on.
fn dispatch(event: InputEvent) -> Option<(Vec<(VKey, bool)>, bool)> {
    let result = STATE.with(|cell| {
        let borrow = cell.borrow();
        let state = borrow.as_ref()?;
        let out = state.engine.lock().unwrap().on_event(event);
        for action in &out.actions {
            let _ = state.action_tx.send(*action);
        }
        Some((out.inject, out.suppress_original))
    });
    rearm_timer();
    result
}

/// Synthesizes key-down/up events via `SendInput`, tagging each with
/// [`INJECTION_SENTINEL`] so the hook recognizes and forwards them
/// unchanged rather than feeding them back through the engine.
fn inject_all(events: &[(VKey, bool)]) {
    if events.is_empty() {
        return;
    }
    let inputs: Vec<INPUT> = events
        .iter()
        .map(|(vkey, pressed)| {
            let mut flags = KEYBD_EVENT_FLAGS(0);
            if !pressed {
                flags |= KEYEVENTF_KEYUP;
            }
            if is_extended_key(*vkey) {
                flags |= KEYEVENTF_EXTENDEDKEY;
            }
            INPUT {
                r#type: INPUT_KEYBOARD,
                Anonymous: INPUT_0 {
                    ki: KEYBDINPUT {
                        wVk: VIRTUAL_KEY(vkey.0),
                        wScan: 0,
                        dwFlags: flags,
                        time: 0,
                        dwExtraInfo: INJECTION_SENTINEL,
                    },
                },
            }
        })
        .collect();

    // SAFETY: SendInput with a Vec of valid INPUT structs; the atomic
    // burst keeps modifier-around-key injections (e.g. S2/S5) ordered
    // with respect to each other, never to unrelated physical input.
    unsafe {
        SendInput(&inputs, std::mem::size_of::<INPUT>() as i32);
    }
}

fn is_extended_key(vkey: VKey) -> bool {
    matches!(
        vkey,
        VKey::LEFT | VKey::UP | VKey::RIGHT | VKey::DOWN | VKey::HOME | VKey::END
            | VKey::PAGE_UP | VKey::PAGE_DOWN | VKey::INSERT | VKey::DELETE
            | VKey::RCONTROL | VKey::RMENU
    )
}

pub mod action;
pub mod action_registry;
pub mod chord;
pub mod config;
pub mod engine;
pub mod event;
pub mod input_event;
pub mod ipc;
pub mod layer;
pub mod layout;
pub mod log;
pub mod pid;
pub mod rect;
pub mod taphold;
pub mod vkey;
pub mod window;
pub mod workspace;

pub use action::Action;
pub use action_registry::{ActionId, ActionRegistry};
pub use chord::{Chord, ChordParseError};
pub use config::Config;
pub use engine::{EngineOutput, HotkeyAction, JmkEngine};
pub use event::WindowEvent;
pub use input_event::InputEvent;
pub use ipc::{Command, PIPE_NAME, Response};
pub use layer::{Binding, HoldTarget, Layer, LayerStack, TapTarget};
pub use layout::{Dwindle, Layout, Monocle, ObsDwindle, Static8, Theme, WidescreenDwindle};
pub use rect::Rect;
pub use taphold::{TapHoldEffect, TapHoldMachine, TapHoldState};
pub use vkey::VKey;
pub use window::{
    FrameOffsets, Window, WindowResult, WindowRule, compensate_rect, should_manage,
    static_index_for,
};
pub use workspace::Workspace;

use clap::Subcommand;

use jigsawwm_core::Action;
use jigsawwm_core::ipc::ResponseStatus;

/// Mirrors `jigsawwm_core::Action`, so a WM command can be driven from
/// the CLI without needing a hotkey (§6 IPC extension).
#[derive(Subcommand)]
pub enum ActionCommand {
    NextWindow,
    PrevWindow,
    SwapNext,
    SwapPrev,
    SetMaster,
    RollNext,
    RollPrev,
    ToggleTilable,
    ToggleMono,
    NextTheme,
    PrevTheme,
    SetTheme { name: String },
    SwitchToWorkspace { index: usize },
    MoveToWorkspace { index: usize },
    PrevMonitor,
    NextMonitor,
    MoveToPrevMonitor,
    MoveToNextMonitor,
    ArrangeAllMonitors,
    CloseFocused,
    MinimizeFocused,
}

impl From<ActionCommand> for Action {
    fn from(command: ActionCommand) -> Self {
        match command {
            ActionCommand::NextWindow => Action::NextWindow,
            ActionCommand::PrevWindow => Action::PrevWindow,
            ActionCommand::SwapNext => Action::SwapNext,
            ActionCommand::SwapPrev => Action::SwapPrev,
            ActionCommand::SetMaster => Action::SetMaster,
            ActionCommand::RollNext => Action::RollNext,
            ActionCommand::RollPrev => Action::RollPrev,
            ActionCommand::ToggleTilable => Action::ToggleTilable,
            ActionCommand::ToggleMono => Action::ToggleMono,
            ActionCommand::NextTheme => Action::NextTheme,
            ActionCommand::PrevTheme => Action::PrevTheme,
            ActionCommand::SetTheme { name } => Action::SetTheme(name),
            ActionCommand::SwitchToWorkspace { index } => Action::SwitchToWorkspace(index),
            ActionCommand::MoveToWorkspace { index } => Action::MoveToWorkspace(index),
            ActionCommand::PrevMonitor => Action::PrevMonitor,
            ActionCommand::NextMonitor => Action::NextMonitor,
            ActionCommand::MoveToPrevMonitor => Action::MoveToPrevMonitor,
            ActionCommand::MoveToNextMonitor => Action::MoveToNextMonitor,
            ActionCommand::ArrangeAllMonitors => Action::ArrangeAllMonitors,
            ActionCommand::CloseFocused => Action::CloseFocused,
            ActionCommand::MinimizeFocused => Action::MinimizeFocused,
        }
    }
}

/// Sends an action to the running daemon via IPC.
pub fn execute(action: Action) {
    if !jigsawwm_windows::ipc::is_daemon_running() {
        eprintln!("JigsawWM is not running.");
        std::process::exit(1);
    }

    let command = jigsawwm_core::Command::Action { action };

    match jigsawwm_windows::ipc::send_command(&command) {
        Ok(response) => {
            if response.status == ResponseStatus::Ok {
                if let Some(msg) = response.message {
                    println!("{msg}");
                }
            } else {
                eprintln!(
                    "Error: {}",
                    response.message.unwrap_or("unknown error".into()),
                );
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Failed to send action: {e}");
            std::process::exit(1);
        }
    }
}

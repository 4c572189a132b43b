mod commands;

use clap::{Parser, Subcommand};

use commands::action::ActionCommand;
use commands::debug::move_window::MoveArgs;

#[derive(Parser)]
#[command(
    name = "jigsawwm",
    version,
    about = "A keyboard rewriter and tiling window manager for Windows"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the window manager daemon
    Start,
    /// Stop the running daemon
    Stop,
    /// Show whether the daemon is running
    Status,
    /// Write a starter configuration binary to the current directory
    Init,
    /// Run the daemon in the foreground (used internally by `start`)
    #[command(hide = true)]
    Daemon,
    /// Debugging and inspection tools
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
}

#[derive(Subcommand)]
enum DebugCommands {
    /// List all visible windows
    List,
    /// Watch window events live
    Events,
    /// Move a window to an exact position and size
    MoveWindow(MoveArgs),
    /// Send a WM command to the running daemon
    Action {
        #[command(subcommand)]
        command: ActionCommand,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start => commands::start::execute(),
        Commands::Stop => commands::stop::execute(),
        Commands::Status => commands::status::execute(),
        Commands::Init => commands::init::execute(),
        Commands::Daemon => commands::daemon::execute(),
        Commands::Debug { command } => match command {
            DebugCommands::List => commands::debug::list::execute(),
            DebugCommands::Events => commands::debug::events::execute(),
            DebugCommands::MoveWindow(args) => commands::debug::move_window::execute(&args),
            DebugCommands::Action { command } => commands::action::execute(command.into()),
        },
    }
}

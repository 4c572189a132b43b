use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jigsawwm"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute jigsawwm");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tiling window manager"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jigsawwm"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute jigsawwm");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("jigsawwm"));
}

#[test]
fn debug_list_subcommand_runs() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jigsawwm"));
    cmd.args(["debug", "list"]);

    // Act
    let output = cmd.output().expect("failed to execute jigsawwm");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("windows found"));
}

#[test]
fn status_subcommand_runs_without_a_daemon() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jigsawwm"));
    cmd.arg("status");

    // Act
    let output = cmd.output().expect("failed to execute jigsawwm");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("JigsawWM"));
}

#[test]
fn debug_action_without_daemon_reports_not_running() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jigsawwm"));
    cmd.args(["debug", "action", "next-window"]);

    // Act
    let output = cmd.output().expect("failed to execute jigsawwm");

    // Assert: exits non-zero since nothing is listening on the pipe.
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not running"));
}

#[test]
fn init_writes_a_starter_rust_file() {
    // Arrange
    let dir = std::env::temp_dir().join(format!("jigsawwm-init-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("failed to create temp dir");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jigsawwm"));
    cmd.arg("init").current_dir(&dir);

    // Act
    let output = cmd.output().expect("failed to execute jigsawwm");

    // Assert
    assert!(output.status.success());
    let written = dir.join("jigsawwm.rs");
    assert!(written.exists(), "expected {} to be created", written.display());
    let contents = std::fs::read_to_string(&written).expect("failed to read starter file");
    assert!(contents.contains("Daemon::new()"));

    let _ = std::fs::remove_dir_all(&dir);
}

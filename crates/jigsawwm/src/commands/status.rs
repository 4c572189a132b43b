pub fn execute() {
    if jigsawwm_windows::ipc::is_daemon_running() {
        println!("JigsawWM is running.");
        return;
    }

    // Pipe isn't responding — check if a stale PID file was left behind
    // by a daemon that was killed without a clean shutdown.
    if let Ok(Some(pid)) = jigsawwm_core::pid::read_pid_file() {
        if jigsawwm_windows::process::is_process_alive(pid) {
            println!("JigsawWM process exists (PID: {pid}) but is not responding.");
        } else {
            let _ = jigsawwm_core::pid::remove_pid_file();
            println!("JigsawWM is not running (cleaned up stale PID file).");
        }
    } else {
        println!("JigsawWM is not running.");
    }
}

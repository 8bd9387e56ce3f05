use std::io;
use std::process::{Command, ExitStatus};
use std::thread::{self, JoinHandle};

/// Open `url` in the platform's default handler. Fire-and-forget.
pub fn open(url: &str) {
    let command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        Command::new("explorer")
    } else {
        Command::new("xdg-open")
    };

    if let Err(err) = spawn_reaped(command, url) {
        log::warn!("⚠️  Failed to open '{}': {}", url, err);
    }
}

/// Spawn `command` with `arg` and wait for it on a detached thread,
/// so the exited child is reaped instead of lingering as a zombie.
fn spawn_reaped(mut command: Command, arg: &str) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = command.arg(arg).spawn()?;
    let program = format!("{:?}", command.get_program());

    thread::Builder::new()
        .name("link-opener".to_string())
        .spawn(move || {
            let status = child.wait();
            match &status {
                Ok(status) if !status.success() => {
                    log::debug!("{} exited with {}", program, status)
                }
                Err(e) => log::warn!("⚠️  Could not wait for {}: {}", program, e),
                Ok(_) => {}
            }
            status
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_child_is_waited_for() {
        let waiter = spawn_reaped(Command::new("true"), "ignored").unwrap();
        let status = waiter.join().unwrap().unwrap();
        assert!(status.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_child_still_reaped() {
        let waiter = spawn_reaped(Command::new("false"), "ignored").unwrap();
        let status = waiter.join().unwrap().unwrap();
        assert!(!status.success());
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let result = spawn_reaped(Command::new("qrc-generator-no-such-program"), "x");
        assert!(result.is_err());
    }
}

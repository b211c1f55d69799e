//! Stopping a command that outlived its time limit.
//!
//! The command is asked to exit first and only killed once `grace` has
//! passed. Either way the child is reaped before [`terminate`] returns.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Child;
use tracing::debug;

/// Time a timed-out command gets to exit on its own before it is killed.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Ask `child` to exit, kill it once `grace` runs out, and reap it.
///
/// A child that already exited is just reaped. Where there is no polite
/// signal to send, it is killed straight away.
pub async fn terminate(child: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
    if let Some(status) = child.try_wait()? {
        return Ok(status);
    }

    if ask_to_exit(child)? {
        if let Ok(waited) = tokio::time::timeout(grace, child.wait()).await {
            return waited;
        }
        debug!(pid = ?child.id(), grace = ?grace, "Command ignored SIGTERM, killing it");
    }

    child.kill().await?;
    child.wait().await
}

/// Send SIGTERM. `Ok(false)` means there is nothing worth waiting for.
#[cfg(unix)]
fn ask_to_exit(child: &Child) -> io::Result<bool> {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let Some(pid) = child.id().and_then(|pid| i32::try_from(pid).ok()) else {
        return Ok(false);
    };
    match kill(Pid::from_raw(pid), Signal::SIGTERM) {
        Ok(()) => Ok(true),
        Err(Errno::ESRCH) => Ok(false),
        Err(e) => Err(io::Error::other(e)),
    }
}

#[cfg(not(unix))]
fn ask_to_exit(_child: &Child) -> io::Result<bool> {
    Ok(false)
}

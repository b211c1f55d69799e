//! Process-backed [`CommandRunner`].
//!
//! Spawns the program with piped stdout/stderr, drains both streams on
//! background tasks while waiting for exit, and hands back everything that
//! was written. Output is buffered in full; there is no size cap. An
//! optional timeout bounds the whole run, pipe draining included.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use npm_mcp_core::{CommandInvocation, CommandOutput, CommandRunner, ToolError};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::shutdown::{SHUTDOWN_GRACE, terminate};

type StreamReader = JoinHandle<std::io::Result<Vec<u8>>>;

/// Runs commands as child processes of the server.
#[derive(Debug, Clone, Default)]
pub struct ProcessCommandRunner {
    timeout: Option<Duration>,
}

impl ProcessCommandRunner {
    /// Runner with no time limit.
    pub const fn new() -> Self {
        Self { timeout: None }
    }

    /// Stop commands that run longer than `timeout` (`None` waits forever).
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn spawn(invocation: &CommandInvocation) -> Result<Child, ToolError> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        cmd.spawn().map_err(|e| {
            ToolError::Process(format!(
                "Failed to spawn '{}' in {}: {e}",
                invocation.program.display(),
                invocation.working_dir.display()
            ))
        })
    }
}

#[async_trait]
impl CommandRunner for ProcessCommandRunner {
    async fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput, ToolError> {
        let mut child = Self::spawn(invocation)?;
        debug!(
            pid = ?child.id(),
            program = %invocation.program.display(),
            "Spawned command"
        );

        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let Some(limit) = self.timeout else {
            return finish(&mut child, stdout, stderr, invocation).await;
        };

        // The limit covers draining the pipes too: a background process
        // can keep them open after the command itself has exited.
        let readers = [stdout.abort_handle(), stderr.abort_handle()];
        let bounded =
            tokio::time::timeout(limit, finish(&mut child, stdout, stderr, invocation)).await;
        if let Ok(finished) = bounded {
            return finished;
        }

        warn!(
            program = %invocation.program.display(),
            timeout = ?limit,
            "Command timed out, shutting it down"
        );
        if let Err(e) = terminate(&mut child, SHUTDOWN_GRACE).await {
            warn!(error = %e, "Failed to shut down timed-out command");
        }
        for reader in readers {
            reader.abort();
        }
        Err(ToolError::Process(format!(
            "Command timed out after {limit:?}."
        )))
    }
}

/// Wait for exit, then collect everything both streams produced.
async fn finish(
    child: &mut Child,
    stdout: StreamReader,
    stderr: StreamReader,
    invocation: &CommandInvocation,
) -> Result<CommandOutput, ToolError> {
    let status = child.wait().await.map_err(|e| {
        ToolError::Process(format!(
            "Failed to wait for '{}': {e}",
            invocation.program.display()
        ))
    })?;

    let stdout = collect(stdout, "stdout").await?;
    let stderr = collect(stderr, "stderr").await?;

    Ok(CommandOutput {
        stdout,
        stderr,
        exit_code: status.code(),
    })
}

/// Drain a child stream to the end on a background task.
fn spawn_reader<R>(stream: Option<R>) -> StreamReader
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut stream) = stream {
            stream.read_to_end(&mut buf).await?;
        }
        Ok(buf)
    })
}

async fn collect(reader: StreamReader, stream: &str) -> Result<String, ToolError> {
    let bytes = reader
        .await
        .map_err(|e| ToolError::Process(format!("Failed to collect command {stream}: {e}")))?
        .map_err(|e| ToolError::Process(format!("Failed to read command {stream}: {e}")))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

//! Command runner port.
//!
//! Tool handlers never spawn processes directly; they describe the
//! invocation and hand it to a [`CommandRunner`]. The runtime crate provides
//! the process-backed implementation, tests substitute a mock.

use async_trait::async_trait;

use crate::domain::{CommandInvocation, CommandOutput};
use crate::error::ToolError;

/// Runs external commands to completion.
///
/// # Contract
///
/// - Returns `Ok` with the captured output for any process that ran,
///   regardless of its exit code; callers resolve success with
///   [`CommandOutput::into_text`].
/// - Returns `Err(ToolError::Process)` only when the process could not be
///   spawned or was stopped by the runner itself (e.g. a timeout).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput, ToolError>;
}

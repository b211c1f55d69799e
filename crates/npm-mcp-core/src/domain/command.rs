//! External command invocation and captured output.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::ToolError;

/// Text returned when a command succeeds without printing anything.
pub const NO_OUTPUT_MESSAGE: &str = "Command finished without output.";

/// A single external program invocation.
///
/// The environment is inherited from the server process; secrets are passed
/// through files referenced by arguments, never as arguments themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub working_dir: PathBuf,
}

impl CommandInvocation {
    pub fn new(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append `flag value` when `value` is present.
    #[must_use]
    pub fn opt_arg(self, flag: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.arg(flag).arg(value),
            None => self,
        }
    }

    /// Arguments rendered for logs and assertions.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }

    /// Trimmed stdout then trimmed stderr, blank segments dropped, joined by a newline.
    pub fn combined(&self) -> String {
        [self.stdout.trim(), self.stderr.trim()]
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Resolve the output into tool text, or a process error for a non-zero exit.
    pub fn into_text(self) -> Result<String, ToolError> {
        let combined = self.combined();
        if self.success() {
            return Ok(if combined.is_empty() {
                NO_OUTPUT_MESSAGE.to_string()
            } else {
                combined
            });
        }

        if !combined.is_empty() {
            return Err(ToolError::Process(combined));
        }
        Err(ToolError::Process(match self.exit_code {
            Some(code) => format!("Command failed with exit code {code}."),
            None => "Command terminated by signal.".to_string(),
        }))
    }
}

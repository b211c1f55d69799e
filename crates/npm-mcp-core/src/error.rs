//! Tool error types.
//!
//! Every failure a tool handler can produce is a [`ToolError`]. The protocol
//! front-end turns any of them into an `isError` response whose text is the
//! error's `Display` output, so messages here are written for the caller.

use thiserror::Error;

/// Domain-specific errors for npm tool invocations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No npm token was found in the environment.
    #[error("{0}")]
    Authentication(String),

    /// A required field is missing or the package identity cannot be resolved.
    #[error("{0}")]
    Validation(String),

    /// The ephemeral credential scope could not be created.
    #[error("Failed to prepare npm credentials: {0}")]
    Configuration(String),

    /// The external command failed to spawn, exited non-zero, or timed out.
    ///
    /// Carries the command's own combined output when there was any, so the
    /// caller sees the same diagnostic a direct invocation would print.
    #[error("{0}")]
    Process(String),

    /// The requested tool is not part of the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl ToolError {
    /// Error category for logging and metrics.
    pub const fn category(&self) -> ToolErrorCategory {
        match self {
            Self::Authentication(_) => ToolErrorCategory::Authentication,
            Self::Validation(_) => ToolErrorCategory::Validation,
            Self::Configuration(_) => ToolErrorCategory::Configuration,
            Self::Process(_) => ToolErrorCategory::Process,
            Self::UnknownTool(_) => ToolErrorCategory::UnknownTool,
        }
    }
}

/// Categories of tool errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorCategory {
    Authentication,
    Validation,
    Configuration,
    Process,
    UnknownTool,
}

impl ToolErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Process => "process",
            Self::UnknownTool => "unknown_tool",
        }
    }
}

impl std::fmt::Display for ToolErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

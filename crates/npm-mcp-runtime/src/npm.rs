//! Locating the npm executable.

use std::path::{Path, PathBuf};

use npm_mcp_core::DEFAULT_NPM_PROGRAM;
use thiserror::Error;
use tracing::{debug, warn};

/// npm executable names to search for on PATH, in order.
#[cfg(windows)]
pub const NPM_CANDIDATES: &[&str] = &["npm.cmd", "npm.exe", "npm"];
#[cfg(not(windows))]
pub const NPM_CANDIDATES: &[&str] = &[DEFAULT_NPM_PROGRAM];

/// Errors resolving an explicitly configured npm program.
#[derive(Debug, Error)]
pub enum NpmResolveError {
    /// A configured path does not point at a file.
    #[error("npm executable not found at: {path}")]
    NotFound { path: PathBuf },

    /// A configured bare name is not on PATH.
    #[error("npm executable '{name}' not found on PATH: {reason}")]
    NotOnPath { name: String, reason: String },

    /// The configured file exists but cannot be executed.
    #[error("npm executable is not executable: {path}")]
    NotExecutable { path: PathBuf },
}

/// Resolve the program to spawn for npm commands.
///
/// An explicit path must exist; an explicit bare name must be on PATH.
/// Without configuration, PATH is searched for [`NPM_CANDIDATES`] and the
/// bare default name is used if nothing is found, so the server still starts
/// and each call reports the spawn failure instead.
pub fn resolve_npm_program(explicit: Option<&Path>) -> Result<PathBuf, NpmResolveError> {
    if let Some(program) = explicit {
        return resolve_explicit(program);
    }

    for candidate in NPM_CANDIDATES {
        if let Ok(path) = which::which(candidate) {
            debug!(path = %path.display(), "Resolved npm on PATH");
            return Ok(path);
        }
    }

    warn!(
        candidates = ?NPM_CANDIDATES,
        "npm not found on PATH; commands will fail until it is installed"
    );
    Ok(PathBuf::from(DEFAULT_NPM_PROGRAM))
}

fn resolve_explicit(program: &Path) -> Result<PathBuf, NpmResolveError> {
    let is_bare_name = program.components().count() == 1 && !program.is_absolute();
    if is_bare_name {
        return which::which(program).map_err(|e| NpmResolveError::NotOnPath {
            name: program.display().to_string(),
            reason: e.to_string(),
        });
    }

    if !program.is_file() {
        return Err(NpmResolveError::NotFound {
            path: program.to_path_buf(),
        });
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let executable = std::fs::metadata(program)
            .map(|meta| meta.permissions().mode() & 0o111 != 0)
            .unwrap_or(false);
        if !executable {
            return Err(NpmResolveError::NotExecutable {
                path: program.to_path_buf(),
            });
        }
    }

    Ok(program.to_path_buf())
}

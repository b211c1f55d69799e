//! Server bootstrap - the composition root.
//!
//! The only place where the process runner, the system environment and the
//! npm service are wired together.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use npm_mcp_core::{NpmService, NpmServiceConfig, SystemEnv};
use npm_mcp_runtime::{ProcessCommandRunner, resolve_npm_program};
use tracing::info;

use crate::cli::ServerArgs;
use crate::protocol::McpServer;

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub service: NpmServiceConfig,
    pub timeout: Option<Duration>,
}

impl ServerConfig {
    /// Resolve command-line options against the current directory.
    pub fn from_args(args: &ServerArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("Cannot determine current directory")?;
        Self::from_args_in(args, &cwd)
    }

    /// Resolve command-line options, treating relative paths as relative to `cwd`.
    pub fn from_args_in(args: &ServerArgs, cwd: &Path) -> Result<Self> {
        let npm_program = resolve_npm_program(args.npm_bin.as_deref())?;

        let base_dir = args
            .base_dir
            .as_deref()
            .map_or_else(|| cwd.to_path_buf(), |dir| absolute(cwd, dir));
        if !base_dir.is_dir() {
            bail!("Base directory does not exist: {}", base_dir.display());
        }

        let mut service = NpmServiceConfig::new(npm_program, base_dir);
        if let Some(dir) = &args.scratch_dir {
            let dir = absolute(cwd, dir);
            if !dir.is_dir() {
                bail!("Scratch directory does not exist: {}", dir.display());
            }
            service = service.with_scratch_dir(dir);
        }

        Ok(Self {
            service,
            timeout: args.timeout_secs.map(Duration::from_secs),
        })
    }
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Compose the protocol front-end from configuration.
pub fn bootstrap(config: ServerConfig) -> McpServer {
    info!(
        npm = %config.service.npm_program.display(),
        base_dir = %config.service.base_dir.display(),
        timeout = ?config.timeout,
        "Starting npm MCP server"
    );

    let runner = Arc::new(ProcessCommandRunner::new().with_timeout(config.timeout));
    let service = NpmService::new(runner, Arc::new(SystemEnv), config.service);
    McpServer::new(service)
}

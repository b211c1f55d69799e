//! Command-line and environment options.

use std::path::PathBuf;

use clap::Parser;

/// MCP server exposing npm publish, unpublish and view over stdio.
///
/// Every option can also be set through the environment (or a `.env` file in
/// the working directory). The npm token itself is only ever read from
/// `NPM_ACCESS_TOKEN` or `NPM_TOKEN`.
#[derive(Debug, Parser)]
#[command(name = "npm-mcp")]
#[command(about = "Serve npm publish/unpublish/view as MCP tools over stdio")]
#[command(version)]
pub struct ServerArgs {
    /// npm executable (path or bare name); defaults to npm found on PATH
    #[arg(long, env = "NPM_MCP_NPM_BIN", value_name = "PATH")]
    pub npm_bin: Option<PathBuf>,

    /// Stop npm commands that run longer than this many seconds
    #[arg(
        long,
        env = "NPM_MCP_TIMEOUT_SECS",
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: Option<u64>,

    /// Directory in which per-call credential directories are created
    #[arg(long, env = "NPM_MCP_SCRATCH_DIR", value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Package directory used when a call omits packagePath
    #[arg(long, env = "NPM_MCP_BASE_DIR", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Log filter directive; overrides RUST_LOG
    #[arg(long, env = "NPM_MCP_LOG", value_name = "FILTER")]
    pub log_filter: Option<String>,
}

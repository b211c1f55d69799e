//! npm token resolution and ephemeral credential scopes.
//!
//! A [`CredentialScope`] is a private temp directory holding a single
//! `.npmrc` with the registry auth token. It lives for exactly one command:
//! handlers create it right before spawning npm and close it right after.
//! Handlers go through [`CredentialScope::open`] and
//! [`CredentialScope::release`], which run the filesystem work on tokio's
//! blocking pool.
//! Dropping the scope removes the directory as well, so early returns,
//! errors and panics never leave a token file behind.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::error::ToolError;
use crate::ports::EnvProvider;

/// Environment variables holding the npm token, in priority order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["NPM_ACCESS_TOKEN", "NPM_TOKEN"];

/// `.npmrc` key for the public registry's auth token.
pub const REGISTRY_AUTH_KEY: &str = "//registry.npmjs.org/:_authToken";

/// Prefix for scope directory names.
pub const SCOPE_PREFIX: &str = "npm-mcp-";

/// Name of the config file inside a scope.
pub const CONFIG_FILE_NAME: &str = ".npmrc";

/// An npm auth token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct NpmToken(String);

impl NpmToken {
    /// Trimmed token, or `None` if nothing is left after trimming.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NpmToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NpmToken(***)")
    }
}

/// First non-empty token from [`TOKEN_ENV_VARS`].
pub fn resolve_token(env: &dyn EnvProvider) -> Option<NpmToken> {
    TOKEN_ENV_VARS.iter().find_map(|key| {
        env.get(key)
            .and_then(|value| value.into_string().ok())
            .and_then(NpmToken::new)
    })
}

/// A single-use config directory holding the auth token.
#[derive(Debug)]
pub struct CredentialScope {
    dir: TempDir,
    config_path: PathBuf,
}

impl CredentialScope {
    /// Create a fresh scope under `scratch_root`, or the system temp dir.
    pub fn create(token: &NpmToken, scratch_root: Option<&Path>) -> Result<Self, ToolError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCOPE_PREFIX);
        let dir = match scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| ToolError::Configuration(format!("cannot create scope directory: {e}")))?;

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        let contents = format!("{REGISTRY_AUTH_KEY}={}\n", token.expose());
        // `dir` is dropped (and removed) if the write fails.
        write_private_file(&config_path, contents.as_bytes()).map_err(|e| {
            ToolError::Configuration(format!("cannot write {}: {e}", config_path.display()))
        })?;

        debug!(scope = %dir.path().display(), "Created credential scope");
        Ok(Self { dir, config_path })
    }

    /// [`create`](Self::create) on the blocking thread pool.
    ///
    /// If the caller is cancelled, the finished scope is still removed by
    /// its drop guard.
    pub async fn open(token: &NpmToken, scratch_root: Option<&Path>) -> Result<Self, ToolError> {
        let token = token.clone();
        let scratch_root = scratch_root.map(Path::to_path_buf);
        tokio::task::spawn_blocking(move || Self::create(&token, scratch_root.as_deref()))
            .await
            .map_err(|e| ToolError::Configuration(format!("scope setup task failed: {e}")))?
    }

    /// [`close`](Self::close) on the blocking thread pool.
    pub async fn release(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = tokio::task::spawn_blocking(move || self.close()).await {
            warn!(scope = %path.display(), error = %e, "Credential scope cleanup task failed");
        }
    }

    /// Path to pass as `--userconfig`.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The scope directory itself.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the scope now, logging instead of failing on error.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!(scope = %path.display(), "Removed credential scope"),
            Err(e) => warn!(scope = %path.display(), error = %e, "Failed to remove credential scope"),
        }
    }
}

/// Create `path` readable and writable by the owner only.
fn write_private_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

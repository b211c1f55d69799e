//! npm tool handlers - thin orchestrator over the command runner port.
//!
//! Each handler resolves the package identity, builds the npm command line,
//! runs it through the injected [`CommandRunner`] and returns the combined
//! output. Publish and unpublish run inside a [`CredentialScope`]; view is
//! read-only and needs no token.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::credentials::{CredentialScope, NpmToken, TOKEN_ENV_VARS, resolve_token};
use crate::domain::{
    CommandInvocation, PublishRequest, ToolRequest, UnpublishRequest, ViewRequest,
};
use crate::error::ToolError;
use crate::package::resolve_package_name;
use crate::ports::{CommandRunner, EnvProvider};

/// Default npm executable name when none is configured.
pub const DEFAULT_NPM_PROGRAM: &str = "npm";

/// Static configuration for [`NpmService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpmServiceConfig {
    /// Program spawned for every command.
    pub npm_program: PathBuf,
    /// Package directory used when a request has no `packagePath`, and the
    /// base for relative ones.
    pub base_dir: PathBuf,
    /// Parent directory for credential scopes (system temp dir when `None`).
    pub scratch_dir: Option<PathBuf>,
}

impl NpmServiceConfig {
    pub fn new(npm_program: impl Into<PathBuf>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            npm_program: npm_program.into(),
            base_dir: base_dir.into(),
            scratch_dir: None,
        }
    }

    #[must_use]
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    /// Absolute package directory for an optional request path.
    pub fn package_dir(&self, requested: Option<&Path>) -> PathBuf {
        match requested {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.base_dir.join(path),
            None => self.base_dir.clone(),
        }
    }
}

/// Service exposing the npm tools.
///
/// Holds no per-call state; concurrent calls share it behind an `Arc` and
/// each gets its own credential scope and subprocess.
pub struct NpmService {
    runner: Arc<dyn CommandRunner>,
    env: Arc<dyn EnvProvider>,
    config: NpmServiceConfig,
}

impl NpmService {
    /// Create a new npm service.
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        env: Arc<dyn EnvProvider>,
        config: NpmServiceConfig,
    ) -> Self {
        Self {
            runner,
            env,
            config,
        }
    }

    /// Run a validated request.
    pub async fn call(&self, request: ToolRequest) -> Result<String, ToolError> {
        match request {
            ToolRequest::Publish(req) => self.publish(req).await,
            ToolRequest::Unpublish(req) => self.unpublish(req).await,
            ToolRequest::View(req) => self.view(req).await,
        }
    }

    /// `npm publish` from the package directory.
    pub async fn publish(&self, request: PublishRequest) -> Result<String, ToolError> {
        let token = self.require_token()?;
        let package_dir = self.config.package_dir(request.package_path.as_deref());

        info!(
            package_dir = %package_dir.display(),
            tag = %request.tag,
            access = %request.access,
            "Publishing package"
        );

        self.run_scoped(&token, |config_path| {
            publish_invocation(&self.config.npm_program, &package_dir, &request, config_path)
        })
        .await
    }

    /// `npm unpublish <name>@<version>`.
    pub async fn unpublish(&self, request: UnpublishRequest) -> Result<String, ToolError> {
        let token = self.require_token()?;
        let version = request.required_version()?;
        let package_dir = self.config.package_dir(request.package_path.as_deref());
        let name = resolve_package_name(&package_dir, request.package_name.as_deref()).await?;
        let spec = format!("{name}@{version}");

        info!(spec = %spec, "Unpublishing package");

        self.run_scoped(&token, |config_path| {
            unpublish_invocation(
                &self.config.npm_program,
                &package_dir,
                &spec,
                request.otp.as_deref(),
                config_path,
            )
        })
        .await
    }

    /// `npm view <spec> [field] [--json]`; needs no credentials.
    pub async fn view(&self, request: ViewRequest) -> Result<String, ToolError> {
        let package_dir = self.config.package_dir(request.package_path.as_deref());
        let name = resolve_package_name(&package_dir, request.package_name.as_deref()).await?;
        let invocation = view_invocation(&self.config.npm_program, &package_dir, &name, &request);
        self.execute(&invocation).await
    }

    fn require_token(&self) -> Result<NpmToken, ToolError> {
        resolve_token(self.env.as_ref()).ok_or_else(|| {
            ToolError::Authentication(format!(
                "npm token is not set. Provide {} or {} in server env.",
                TOKEN_ENV_VARS[0], TOKEN_ENV_VARS[1]
            ))
        })
    }

    /// Run one command inside a fresh credential scope.
    ///
    /// The scope is closed on every path out of this function; if the future
    /// is dropped mid-run, the scope's own drop removes it.
    async fn run_scoped(
        &self,
        token: &NpmToken,
        build: impl FnOnce(&Path) -> CommandInvocation,
    ) -> Result<String, ToolError> {
        let scope = CredentialScope::open(token, self.config.scratch_dir.as_deref()).await?;
        let invocation = build(scope.config_path());
        let result = self.execute(&invocation).await;
        scope.release().await;
        result
    }

    async fn execute(&self, invocation: &CommandInvocation) -> Result<String, ToolError> {
        debug!(
            program = %invocation.program.display(),
            args = ?invocation.args_lossy(),
            cwd = %invocation.working_dir.display(),
            "Running command"
        );
        let output = self.runner.run(invocation).await?;
        debug!(exit_code = ?output.exit_code, "Command finished");
        output.into_text()
    }
}

/// `publish --tag <tag> --access <access> --userconfig <cfg> [--otp <otp>]`
pub fn publish_invocation(
    program: &Path,
    package_dir: &Path,
    request: &PublishRequest,
    config_path: &Path,
) -> CommandInvocation {
    CommandInvocation::new(program, package_dir)
        .arg("publish")
        .arg("--tag")
        .arg(&request.tag)
        .arg("--access")
        .arg(request.access.as_str())
        .arg("--userconfig")
        .arg(config_path)
        .opt_arg("--otp", request.otp.as_deref())
}

/// `unpublish <spec> --userconfig <cfg> [--otp <otp>]`
pub fn unpublish_invocation(
    program: &Path,
    package_dir: &Path,
    spec: &str,
    otp: Option<&str>,
    config_path: &Path,
) -> CommandInvocation {
    CommandInvocation::new(program, package_dir)
        .arg("unpublish")
        .arg(spec)
        .arg("--userconfig")
        .arg(config_path)
        .opt_arg("--otp", otp)
}

/// `view <name>[@<version>] [<field>] [--json]`
pub fn view_invocation(
    program: &Path,
    package_dir: &Path,
    name: &str,
    request: &ViewRequest,
) -> CommandInvocation {
    let spec = match &request.version {
        Some(version) => format!("{name}@{version}"),
        None => name.to_string(),
    };
    let mut invocation = CommandInvocation::new(program, package_dir)
        .arg("view")
        .arg(spec);
    if let Some(field) = &request.field {
        invocation = invocation.arg(field);
    }
    if request.json {
        invocation = invocation.arg("--json");
    }
    invocation
}

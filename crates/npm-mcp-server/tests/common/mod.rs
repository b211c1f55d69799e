//! Shared fixtures for the server integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use npm_mcp_core::{
    CommandInvocation, CommandOutput, CommandRunner, MockEnv, NpmService, NpmServiceConfig,
    ToolError,
};
use npm_mcp_server::McpServer;
use tempfile::TempDir;

pub const NPM: &str = "/opt/node/bin/npm";

/// What the fake runner saw for one command.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub userconfig: Option<PathBuf>,
    /// Contents of the `--userconfig` file while the command was running.
    pub userconfig_contents: Option<String>,
}

type Outcome = Box<dyn Fn(&CommandInvocation) -> Result<CommandOutput, ToolError> + Send + Sync>;

/// Command runner that records invocations instead of spawning processes.
pub struct RecordingRunner {
    calls: Mutex<Vec<RecordedCall>>,
    outcome: Outcome,
}

impl RecordingRunner {
    pub fn succeeding(stdout: &str) -> Self {
        let stdout = stdout.to_string();
        Self::with_outcome(move |_| Ok(CommandOutput::new(stdout.clone(), String::new(), Some(0))))
    }

    pub fn failing(stderr: &str, exit_code: i32) -> Self {
        let stderr = stderr.to_string();
        Self::with_outcome(move |_| {
            Ok(CommandOutput::new(String::new(), stderr.clone(), Some(exit_code)))
        })
    }

    pub fn with_outcome(
        outcome: impl Fn(&CommandInvocation) -> Result<CommandOutput, ToolError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Box::new(outcome),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput, ToolError> {
        let args = invocation.args_lossy();
        let userconfig = args
            .iter()
            .position(|arg| arg == "--userconfig")
            .and_then(|i| args.get(i + 1))
            .map(PathBuf::from);
        let userconfig_contents = userconfig
            .as_ref()
            .and_then(|path| std::fs::read_to_string(path).ok());

        self.calls.lock().unwrap().push(RecordedCall {
            args,
            working_dir: invocation.working_dir.clone(),
            userconfig,
            userconfig_contents,
        });
        (self.outcome)(invocation)
    }
}

/// A server wired to a recording runner, with its own package and scratch dirs.
pub struct Harness {
    pub server: McpServer,
    pub runner: Arc<RecordingRunner>,
    pub package: TempDir,
    pub scratch: TempDir,
}

impl Harness {
    pub fn new(runner: RecordingRunner, env: MockEnv) -> Self {
        let package = tempfile::tempdir().unwrap();
        let scratch = tempfile::tempdir().unwrap();
        let runner = Arc::new(runner);
        let config = NpmServiceConfig::new(NPM, package.path()).with_scratch_dir(scratch.path());
        let service = NpmService::new(runner.clone(), Arc::new(env), config);
        Self {
            server: McpServer::new(service),
            runner,
            package,
            scratch,
        }
    }

    pub fn with_token(runner: RecordingRunner) -> Self {
        Self::new(runner, MockEnv::new().with_var("NPM_ACCESS_TOKEN", "npm_secret"))
    }

    pub fn write_descriptor(&self, dir: &Path, name: &str) {
        std::fs::create_dir_all(self.package.path().join(dir)).unwrap();
        std::fs::write(
            self.package.path().join(dir).join("package.json"),
            format!(r#"{{ "name": "{name}", "version": "1.0.0" }}"#),
        )
        .unwrap();
    }

    /// Entries left in the scratch directory.
    pub fn scratch_entries(&self) -> usize {
        std::fs::read_dir(self.scratch.path()).unwrap().count()
    }
}

#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod credentials;
pub mod domain;
pub mod error;
pub mod package;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use credentials::{CredentialScope, NpmToken, TOKEN_ENV_VARS, resolve_token};
pub use domain::{
    Access, CommandInvocation, CommandOutput, PublishRequest, ToolArguments, ToolContent,
    ToolName, ToolRequest, ToolResponse, UnpublishRequest, ViewRequest,
};
pub use error::{ToolError, ToolErrorCategory};
pub use ports::{CommandRunner, EnvProvider, SystemEnv};
pub use services::{DEFAULT_NPM_PROGRAM, NpmService, NpmServiceConfig};

#[cfg(any(test, feature = "test-utils"))]
pub use ports::MockEnv;

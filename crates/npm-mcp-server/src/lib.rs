#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dev-dependencies used by the integration tests
#[cfg(test)]
use async_trait as _;

// Used by main.rs binary
use dotenvy as _;

pub mod bootstrap;
pub mod catalog;
pub mod cli;
pub mod logging;
pub mod protocol;

pub use bootstrap::{ServerConfig, bootstrap};
pub use catalog::{ToolDefinition, tool_definitions};
pub use cli::ServerArgs;
pub use protocol::{JsonRpcRequest, McpServer, PROTOCOL_VERSION, SERVER_NAME, serve};

//! Domain types: requests, command invocations and responses.

pub mod command;
pub mod request;
pub mod response;

pub use command::{CommandInvocation, CommandOutput, NO_OUTPUT_MESSAGE};
pub use request::{
    Access, DEFAULT_TAG, PublishRequest, ToolArguments, ToolName, ToolRequest, UnpublishRequest,
    ViewRequest,
};
pub use response::{ToolContent, ToolResponse};

//! MCP protocol front-end: JSON-RPC framing, method dispatch and transport.

pub mod jsonrpc;
mod server;
mod transport;

pub use jsonrpc::JsonRpcRequest;
pub use server::{McpServer, PROTOCOL_VERSION, SERVER_NAME};
pub use transport::serve;

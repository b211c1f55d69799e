//! Port definitions (trait abstractions) for external systems.
//!
//! # Design Rules
//!
//! - No `tokio::process` types in any signature
//! - Ports express intent (run this invocation, read this variable)
//! - Every port is object-safe so services hold `Arc<dyn Port>`

pub mod command_runner;
pub mod env;

pub use command_runner::CommandRunner;
#[cfg(test)]
pub use command_runner::MockCommandRunner;
#[cfg(any(test, feature = "test-utils"))]
pub use env::MockEnv;
pub use env::{EnvProvider, SystemEnv};

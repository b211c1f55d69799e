//! Child process execution.

mod runner;
pub mod shutdown;

pub use runner::ProcessCommandRunner;
pub use shutdown::{SHUTDOWN_GRACE, terminate};

#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod npm;
pub mod process;

// Re-export the CommandRunner implementation
pub use process::ProcessCommandRunner;

pub use npm::{NpmResolveError, resolve_npm_program};

//! Services orchestrating domain logic over ports.

mod npm_service;

pub use npm_service::{
    DEFAULT_NPM_PROGRAM, NpmService, NpmServiceConfig, publish_invocation, unpublish_invocation,
    view_invocation,
};

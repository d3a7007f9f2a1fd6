//! HTTP request handlers for the mock server.

pub mod media;
pub mod projects;

pub use media::*;
pub use projects::*;

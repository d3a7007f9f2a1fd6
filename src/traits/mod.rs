//! Trait definitions for API read operations.
//!
//! Each model type implements the reads its endpoints support.

mod get;
mod list;

pub use get::Get;
pub use list::List;

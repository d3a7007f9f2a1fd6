//! Gallery API model types.

mod media;
mod project;

pub use media::*;
pub use project::*;

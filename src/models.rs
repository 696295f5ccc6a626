//! Data structures.
mod hardware;
mod interface;
mod resolution;

pub use hardware::*;
pub use interface::*;
pub use resolution::*;

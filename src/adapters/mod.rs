//! Adapter implementations of the port traits.

pub mod fallback;
pub mod file;
pub mod live;
pub mod memory;

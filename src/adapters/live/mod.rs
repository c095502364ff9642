//! Adapters that touch the real system: wall clock, disk and terminal.

pub mod filesystem;
pub mod notifier;
pub mod system;

pub use filesystem::LiveFileSystem;
pub use notifier::{CommandNotifier, ConsoleNotifier, FanoutNotifier};
pub use system::{LiveClock, LiveIdGenerator};

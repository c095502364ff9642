//! In-process adapters.
//!
//! These keep all state in memory so tests can drive the scheduler and the
//! assistant without a disk or a real clock.

pub mod clock;
pub mod notebook;
pub mod notifier;
pub mod tasks;

pub use clock::ManualClock;
pub use notebook::MemoryNotebook;
pub use notifier::CollectingNotifier;
pub use tasks::MemoryTaskStore;

//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the assistant core and an
//! external system (time, IDs, disk, task storage, notes, notifications).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod notebook;
pub mod notifier;
pub mod tasks;

pub use clock::Clock;
pub use filesystem::{FileLock, FileSystem};
pub use id_gen::{unique_id, IdGenerator};
pub use notebook::{Note, Notebook};
pub use notifier::{Notification, Notifier, NotifyFuture};
pub use tasks::{Task, TaskStore};

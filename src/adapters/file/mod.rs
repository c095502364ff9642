//! YAML-file adapters.
//!
//! Each store is one YAML document under a root directory:
//!
//! ```text
//! <root>/
//!   ├── tasks.yaml
//!   └── notebook.yaml
//! ```
//!
//! All I/O goes through the `FileSystem` port. Every mutation is a
//! read-modify-write of the whole document under the store's mutex and the
//! port's file lock, so separate processes sharing a store do not lose
//! each other's writes.

pub mod notebook;
pub mod tasks;

pub use notebook::FileNotebook;
pub use tasks::FileTaskStore;

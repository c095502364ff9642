//! Filesystem port used by the file-backed stores.

use std::path::Path;

/// Held while a [`FileSystem::lock`] is in force; dropping it releases the lock.
pub type FileLock = Box<dyn Send>;

/// Provides whole-file reads and writes plus an exclusive lock.
///
/// The YAML stores only ever read or replace a complete document. Several
/// `jarvis` processes may share one store, so each read-modify-write runs
/// under [`FileSystem::lock`].
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Replaces the file with `contents`, creating parent directories as needed.
    ///
    /// Implementations must not leave a partially written file behind: a
    /// reader sees either the old document or the new one. Concurrent
    /// writers to the same path must not share temporary files.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Blocks until this caller holds the exclusive lock for `path`.
    ///
    /// The lock is advisory and shared with other processes using the same
    /// adapter. It does not prevent plain reads.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock cannot be created or acquired.
    fn lock(&self, path: &Path) -> Result<FileLock, Box<dyn std::error::Error + Send + Sync>>;
}

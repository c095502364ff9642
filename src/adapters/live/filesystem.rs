//! Live filesystem adapter using `std::fs`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::ports::filesystem::{FileLock, FileSystem};

/// Live filesystem adapter backed by real disk I/O.
///
/// Writes go to a uniquely named temporary file in the target's directory
/// that is then renamed over the target, so readers never observe a
/// half-written store. Locks are OS advisory locks on a `<path>.lock`
/// sibling.
pub struct LiveFileSystem;

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let dir = parent_dir(path);
        std::fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn lock(&self, path: &Path) -> Result<FileLock, Box<dyn std::error::Error + Send + Sync>> {
        std::fs::create_dir_all(parent_dir(path))?;
        let mut lock_path = path.as_os_str().to_owned();
        lock_path.push(".lock");
        let file = OpenOptions::new().create(true).truncate(false).write(true).open(lock_path)?;
        file.lock()?;
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;

    #[test]
    fn write_creates_parents_and_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tasks.yaml");
        let fs = LiveFileSystem;

        assert!(!fs.exists(&path));
        fs.write(&path, "first").unwrap();
        fs.write(&path, "second").unwrap();

        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "second");
        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("nested")).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn reading_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = LiveFileSystem.read_to_string(&dir.path().join("absent.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn lock_excludes_a_second_holder_until_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.yaml");
        let held = LiveFileSystem.lock(&path).unwrap();

        let (tx, rx) = mpsc::channel();
        let contender = {
            let path = path.clone();
            std::thread::spawn(move || {
                let _lock = LiveFileSystem.lock(&path).unwrap();
                tx.send(()).unwrap();
            })
        };

        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
        drop(held);
        rx.recv_timeout(Duration::from_secs(5)).unwrap();
        contender.join().unwrap();
    }

    #[test]
    fn lock_fails_when_directory_cannot_exist() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "not a directory").unwrap();
        assert!(LiveFileSystem.lock(&blocked.join("tasks.yaml")).is_err());
    }
}

//! Task store persisted as `<root>/tasks.yaml`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::tasks::{normalize_title, sort_for_display};
use crate::ports::{unique_id, Clock, FileLock, FileSystem, IdGenerator, Task, TaskStore};

type StoreResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// On-disk document layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TaskFile {
    #[serde(default)]
    tasks: Vec<Task>,
}

/// YAML-backed task store.
///
/// Every read-modify-write holds the internal mutex and the filesystem's
/// lock on `tasks.yaml`, which makes `set_notified` atomic across threads
/// and across processes sharing the directory.
pub struct FileTaskStore {
    fs: Arc<dyn FileSystem>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileTaskStore {
    /// Creates a store rooted at `root`. Nothing is written until the first mutation.
    #[must_use]
    pub fn new(
        fs: Arc<dyn FileSystem>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        root: &Path,
    ) -> Self {
        Self { fs, ids, clock, path: root.join("tasks.yaml"), guard: Mutex::new(()) }
    }

    /// Path of the backing YAML file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<TaskFile> {
        if !self.fs.exists(&self.path) {
            return Ok(TaskFile::default());
        }
        let contents = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| format!("Failed to read {}: {e}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(TaskFile::default());
        }
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {e}", self.path.display()).into())
    }

    fn save(&self, file: &TaskFile) -> StoreResult<()> {
        let yaml = serde_yaml::to_string(file)
            .map_err(|e| format!("Failed to serialize tasks: {e}"))?;
        self.fs
            .write(&self.path, &yaml)
            .map_err(|e| format!("Failed to write {}: {e}", self.path.display()).into())
    }

    fn exclusive(&self) -> StoreResult<(MutexGuard<'_, ()>, FileLock)> {
        let guard = self.guard.lock().map_err(|e| format!("task store lock poisoned: {e}"))?;
        let lock = self
            .fs
            .lock(&self.path)
            .map_err(|e| format!("Failed to lock {}: {e}", self.path.display()))?;
        Ok((guard, lock))
    }

    /// Applies `change` to the task with `id` and saves if it reports a change.
    fn update(&self, id: &str, change: impl FnOnce(&mut Task) -> bool) -> StoreResult<bool> {
        let _held = self.exclusive()?;
        let mut file = self.load()?;
        let Some(task) = file.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        if change(task) {
            self.save(&file)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

impl TaskStore for FileTaskStore {
    fn list_pending(&self) -> StoreResult<Vec<Task>> {
        let _guard = self.guard.lock().map_err(|e| format!("task store lock poisoned: {e}"))?;
        Ok(self.load()?.tasks.into_iter().filter(Task::is_pending_reminder).collect())
    }

    fn list_all(&self) -> StoreResult<Vec<Task>> {
        let _guard = self.guard.lock().map_err(|e| format!("task store lock poisoned: {e}"))?;
        let mut tasks = self.load()?.tasks;
        sort_for_display(&mut tasks);
        Ok(tasks)
    }

    fn create(&self, title: &str, due_at: Option<DateTime<Utc>>) -> StoreResult<Task> {
        let title = normalize_title(title)?;
        let _held = self.exclusive()?;
        let mut file = self.load()?;
        let id = unique_id(self.ids.as_ref(), |id| file.tasks.iter().any(|t| t.id == id))?;
        let task = Task {
            id,
            title,
            due_at,
            done: false,
            notified: false,
            created_at: self.clock.now(),
        };
        file.tasks.push(task.clone());
        self.save(&file)?;
        Ok(task)
    }

    fn set_done(&self, id: &str, done: bool) -> StoreResult<bool> {
        let mut found = false;
        self.update(id, |task| {
            found = true;
            let changed = task.done != done;
            task.done = done;
            changed
        })?;
        Ok(found)
    }

    fn set_notified(&self, id: &str) -> StoreResult<bool> {
        self.update(id, |task| {
            if task.notified {
                false
            } else {
                task.notified = true;
                true
            }
        })
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let _held = self.exclusive()?;
        let mut file = self.load()?;
        let before = file.tasks.len();
        file.tasks.retain(|t| t.id != id);
        if file.tasks.len() == before {
            return Ok(false);
        }
        self.save(&file)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::adapters::file::test_fs::MemFs;
    use crate::adapters::memory::ManualClock;
    use chrono::TimeZone;

    struct SeqIds(AtomicU32);

    impl IdGenerator for SeqIds {
        fn generate_id(&self) -> String {
            format!("id-{}", self.0.fetch_add(1, Ordering::SeqCst))
        }
    }

    fn store_on(fs: Arc<MemFs>) -> FileTaskStore {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap());
        FileTaskStore::new(fs, Arc::new(SeqIds(AtomicU32::new(1))), Arc::new(clock), Path::new("/store"))
    }

    #[test]
    fn empty_store_lists_nothing_and_writes_nothing() {
        let fs = Arc::new(MemFs::default());
        let store = store_on(fs.clone());
        assert!(store.list_all().unwrap().is_empty());
        assert!(store.list_pending().unwrap().is_empty());
        assert!(fs.files.lock().unwrap().is_empty());
    }

    #[test]
    fn tasks_survive_a_new_store_instance() {
        let fs = Arc::new(MemFs::default());
        let due = Utc.with_ymd_and_hms(2025, 2, 1, 17, 0, 0).unwrap();
        let created = store_on(fs.clone()).create("call mom", Some(due)).unwrap();

        let reopened = store_on(fs.clone());
        let all = reopened.list_all().unwrap();
        assert_eq!(all, vec![created.clone()]);
        assert_eq!(reopened.list_pending().unwrap()[0].due_at, Some(due));

        let yaml = fs.files.lock().unwrap().get(Path::new("/store/tasks.yaml")).cloned().unwrap();
        assert!(yaml.contains("call mom"));
        assert!(yaml.contains("id-1"));
    }

    #[test]
    fn set_notified_is_idempotent_across_instances() {
        let fs = Arc::new(MemFs::default());
        let task = store_on(fs.clone()).create("x", Some(Utc::now())).unwrap();

        assert!(store_on(fs.clone()).set_notified(&task.id).unwrap());
        assert!(!store_on(fs.clone()).set_notified(&task.id).unwrap());
        assert!(store_on(fs).list_pending().unwrap().is_empty());
    }

    #[test]
    fn set_done_reports_existence_not_change() {
        let fs = Arc::new(MemFs::default());
        let store = store_on(fs);
        let task = store.create("x", None).unwrap();
        assert!(store.set_done(&task.id, false).unwrap());
        assert!(store.set_done(&task.id, true).unwrap());
        assert!(!store.set_done("nope", true).unwrap());
        assert!(store.list_all().unwrap()[0].done);
    }

    #[test]
    fn delete_removes_task() {
        let fs = Arc::new(MemFs::default());
        let store = store_on(fs);
        let keep = store.create("keep", None).unwrap();
        let gone = store.create("drop", None).unwrap();
        assert!(store.delete(&gone.id).unwrap());
        assert!(!store.delete(&gone.id).unwrap());
        assert_eq!(store.list_all().unwrap(), vec![keep]);
    }

    #[test]
    fn write_failure_surfaces_and_leaves_flag_uncommitted() {
        let fs = Arc::new(MemFs::default());
        let store = store_on(fs.clone());
        let task = store.create("x", Some(Utc::now())).unwrap();

        fs.fail_writes.store(true, Ordering::SeqCst);
        assert!(store.set_notified(&task.id).is_err());
        fs.fail_writes.store(false, Ordering::SeqCst);

        assert_eq!(store.list_pending().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let fs = Arc::new(MemFs::default());
        fs.files.lock().unwrap().insert(PathBuf::from("/store/tasks.yaml"), "tasks: [[[".into());
        assert!(store_on(fs).list_all().is_err());
    }

    #[test]
    fn works_on_real_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = disk_store(dir.path());
        let task = store.create("water plants", None).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.list_all().unwrap()[0].id, task.id);
    }

    struct ScriptedIds(Mutex<Vec<&'static str>>);

    impl IdGenerator for ScriptedIds {
        fn generate_id(&self) -> String {
            self.0.lock().unwrap().remove(0).to_string()
        }
    }

    #[test]
    fn colliding_id_is_redrawn() {
        let fs = Arc::new(MemFs::default());
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap());
        let ids = ScriptedIds(Mutex::new(vec!["dup", "dup", "fresh"]));
        let store = FileTaskStore::new(fs, Arc::new(ids), Arc::new(clock), Path::new("/store"));

        let first = store.create("first", None).unwrap();
        let second = store.create("second", None).unwrap();
        assert_eq!(first.id, "dup");
        assert_eq!(second.id, "fresh");

        assert!(store.delete("dup").unwrap());
        assert_eq!(store.list_all().unwrap(), vec![second]);
    }

    fn disk_store(root: &Path) -> FileTaskStore {
        use crate::adapters::live::{LiveFileSystem, LiveIdGenerator};

        FileTaskStore::new(
            Arc::new(LiveFileSystem),
            Arc::new(LiveIdGenerator),
            Arc::new(ManualClock::new(Utc::now())),
            root,
        )
    }

    #[test]
    fn separate_instances_do_not_lose_writes() {
        let dir = tempfile::tempdir().unwrap();
        let writers: Vec<_> = (0..2)
            .map(|n| {
                let store = disk_store(dir.path());
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.create(&format!("writer {n} task {i}"), None).unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        assert_eq!(disk_store(dir.path()).list_all().unwrap().len(), 100);
    }

    #[test]
    fn set_notified_commits_once_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let task = disk_store(dir.path()).create("x", Some(Utc::now())).unwrap();

        let racers: Vec<_> = (0..4)
            .map(|_| {
                let store = disk_store(dir.path());
                let id = task.id.clone();
                std::thread::spawn(move || store.set_notified(&id).unwrap())
            })
            .collect();
        let wins = racers.into_iter().map(|r| r.join().unwrap_or(false)).filter(|w| *w).count();

        assert_eq!(wins, 1);
        assert!(disk_store(dir.path()).list_pending().unwrap().is_empty());
    }
}

use std::path::PathBuf;

use crate::io::storage::{read_tasks, sample_tasks, write_tasks};
use crate::model::task::{Status, Task};

/// Owns the canonical in-memory task sequence and its persistence.
///
/// Every mutation rewrites the whole sequence to disk. Write failures are
/// logged and swallowed, so in-memory and durable state may diverge until the
/// next successful save. There is no fatal path: load failures degrade to an
/// empty (or freshly seeded) sequence.
pub struct TaskStore {
    data_dir: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Board-view load: a missing file is first-run and gets the sample
    /// tasks, persisted immediately; a corrupt file resets to empty.
    pub fn open(data_dir: PathBuf) -> TaskStore {
        let tasks = match read_tasks(&data_dir) {
            Ok(Some(tasks)) => tasks,
            Ok(None) => {
                let seeds = sample_tasks();
                if let Err(e) = write_tasks(&data_dir, &seeds) {
                    log::error!("could not persist sample tasks: {}", e);
                }
                seeds
            }
            Err(e) => {
                log::error!("discarding stored tasks: {}", e);
                Vec::new()
            }
        };
        TaskStore { data_dir, tasks }
    }

    /// Metrics-view load: never seeds. Missing data is just an empty board.
    pub fn open_readonly(data_dir: PathBuf) -> TaskStore {
        let tasks = match read_tasks(&data_dir) {
            Ok(Some(tasks)) => tasks,
            Ok(None) => {
                log::warn!("no tasks in storage yet");
                Vec::new()
            }
            Err(e) => {
                log::error!("discarding stored tasks: {}", e);
                Vec::new()
            }
        };
        TaskStore { data_dir, tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a new To Do task and persist. A title that trims to empty is
    /// silently dropped (returns None, sequence unchanged). Returns the new
    /// task's id otherwise.
    pub fn create(
        &mut self,
        title: &str,
        description: &str,
        assignee: &str,
        tags: Vec<String>,
    ) -> Option<String> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let task = Task::new(
            title.to_string(),
            description.trim().to_string(),
            assignee.to_string(),
            tags,
        );
        let id = task.id.clone();
        self.tasks.push(task);
        self.persist();
        Some(id)
    }

    /// Set a task's status in place and persist. Unknown ids are a no-op,
    /// not an error. Writing the current status again is allowed (a drop on
    /// the source column) and still persists.
    pub fn update_status(&mut self, id: &str, status: Status) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.status = status;
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Remove a task by id and persist. Returns whether anything was
    /// removed. Interactive confirmation happens in the view layer.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        self.persist();
        true
    }

    fn persist(&self) {
        if let Err(e) = write_tasks(&self.data_dir, &self.tasks) {
            log::error!("could not save tasks: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::TASKS_FILE;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn open_empty(dir: &TempDir) -> TaskStore {
        // Seed then clear so tests start from a persisted empty sequence
        fs::write(dir.path().join(TASKS_FILE), "[]").unwrap();
        TaskStore::open(dir.path().to_path_buf())
    }

    #[test]
    fn first_run_seeds_sample_tasks_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::open(dir.path().to_path_buf());
        assert_eq!(store.len(), 3);

        // The seeds were written through to disk immediately
        let reloaded = TaskStore::open(dir.path().to_path_buf());
        assert_eq!(reloaded.tasks(), store.tasks());
    }

    #[test]
    fn corrupt_file_resets_to_empty_without_seeding() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TASKS_FILE), "not json {{{").unwrap();
        let store = TaskStore::open(dir.path().to_path_buf());
        assert!(store.is_empty());
    }

    #[test]
    fn readonly_open_never_seeds() {
        let dir = TempDir::new().unwrap();
        let store = TaskStore::open_readonly(dir.path().to_path_buf());
        assert!(store.is_empty());
        assert!(!dir.path().join(TASKS_FILE).exists());
    }

    #[test]
    fn create_appends_exactly_one_todo_task() {
        let dir = TempDir::new().unwrap();
        let mut store = open_empty(&dir);

        let id = store
            .create(
                "  Review PR  ",
                " check the tests ",
                "Ana Gómez",
                vec!["Bug".into()],
            )
            .unwrap();

        assert_eq!(store.len(), 1);
        let task = store.find(&id).unwrap();
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.title, "Review PR");
        assert_eq!(task.description, "check the tests");
        assert_eq!(task.assignee, "Ana Gómez");
        assert_eq!(task.tags, vec!["Bug"]);

        let second = store.create("Another", "", "", Vec::new()).unwrap();
        assert_ne!(id, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn create_with_blank_title_is_a_silent_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = open_empty(&dir);

        assert!(store.create("", "desc", "", Vec::new()).is_none());
        assert!(store.create("   \t ", "desc", "", Vec::new()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn update_status_touches_only_that_field() {
        let dir = TempDir::new().unwrap();
        let mut store = open_empty(&dir);
        let id = store.create("One", "d", "Ana Gómez", vec!["Bug".into()]).unwrap();
        let other = store.create("Two", "", "", Vec::new()).unwrap();

        let before = store.find(&id).unwrap().clone();
        let other_before = store.find(&other).unwrap().clone();

        assert!(store.update_status(&id, Status::Done));

        let after = store.find(&id).unwrap();
        assert_eq!(after.status, Status::Done);
        assert_eq!(after.id, before.id);
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.assignee, before.assignee);
        assert_eq!(after.tags, before.tags);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(store.find(&other).unwrap(), &other_before);

        // Persisted state matches in-memory state
        let reloaded = TaskStore::open(dir.path().to_path_buf());
        assert_eq!(reloaded.tasks(), store.tasks());
    }

    #[test]
    fn update_status_unknown_id_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = open_empty(&dir);
        store.create("One", "", "", Vec::new()).unwrap();
        let snapshot: Vec<_> = store.tasks().to_vec();

        assert!(!store.update_status("task_missing", Status::Done));
        assert_eq!(store.tasks(), snapshot.as_slice());
    }

    #[test]
    fn same_status_write_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = open_empty(&dir);
        let id = store.create("One", "", "", Vec::new()).unwrap();

        assert!(store.update_status(&id, Status::Todo));
        assert_eq!(store.find(&id).unwrap().status, Status::Todo);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let dir = TempDir::new().unwrap();
        let mut store = open_empty(&dir);
        let id = store.create("One", "", "", Vec::new()).unwrap();
        store.create("Two", "", "", Vec::new()).unwrap();

        assert!(store.delete(&id));
        assert_eq!(store.len(), 1);
        assert!(store.find(&id).is_none());

        assert!(!store.delete(&id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn round_trip_reconstructs_deep_equal_sequence() {
        let dir = TempDir::new().unwrap();
        let mut store = open_empty(&dir);
        store
            .create("Uno", "primera", "Sofía López", vec!["Testing".into()])
            .unwrap();
        let id = store.create("Dos", "", "someone else", Vec::new()).unwrap();
        store.update_status(&id, Status::InProgress);

        let reloaded = TaskStore::open(dir.path().to_path_buf());
        assert_eq!(reloaded.tasks(), store.tasks());
    }
}

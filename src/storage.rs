use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::task::Task;

/// Persistence gateway for the backing file: the full task sequence as a
/// pretty-printed JSON array, one object per task with every field present.
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full sequence. A missing file is a normal first run and yields
    /// an empty list; a file that exists but cannot be read or parsed is a
    /// hard error, never a silent reset.
    pub fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no backing file, starting empty");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::Persistence(format!("failed to read {}: {e}", self.path.display()))
        })?;

        let tasks: Vec<Task> = serde_json::from_str(&content).map_err(|e| {
            Error::Persistence(format!("corrupt task file {}: {e}", self.path.display()))
        })?;

        info!(count = tasks.len(), path = %self.path.display(), "tasks loaded");
        Ok(tasks)
    }

    /// Overwrite the backing file with the full sequence. A failed save leaves
    /// the in-memory list authoritative.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Persistence(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let content = serde_json::to_string_pretty(tasks)
            .map_err(|e| Error::Persistence(format!("failed to serialize tasks: {e}")))?;

        std::fs::write(&self.path, content).map_err(|e| {
            Error::Persistence(format!("failed to write {}: {e}", self.path.display()))
        })?;

        info!(count = tasks.len(), path = %self.path.display(), "tasks saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, Status, parse_due_date};
    use tempfile::TempDir;

    fn task_file(dir: &TempDir) -> TaskFile {
        TaskFile::new(dir.path().join("tasks.json"))
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = TempDir::new().unwrap();
        let tasks = task_file(&dir).load().unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let file = task_file(&dir);

        let mut dated = Task::new("Pay bills", Priority::High, parse_due_date("2099-01-01"));
        dated.status = Status::Completed;
        let tasks = vec![dated, Task::new("Buy milk", Priority::Low, None)];

        file.save(&tasks).unwrap();
        let loaded = file.load().unwrap();
        assert_eq!(loaded, tasks);

        // A second round trip is byte-stable.
        file.save(&loaded).unwrap();
        assert_eq!(file.load().unwrap(), tasks);
    }

    #[test]
    fn test_load_corrupt_file_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let file = task_file(&dir);
        std::fs::write(file.path(), "not json {{{").unwrap();

        assert!(matches!(file.load(), Err(Error::Persistence(_))));
    }

    #[test]
    fn test_load_wrong_shape_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let file = task_file(&dir);
        std::fs::write(file.path(), r#"{"title": "not a list"}"#).unwrap();

        assert!(matches!(file.load(), Err(Error::Persistence(_))));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let file = TaskFile::new(dir.path().join("nested").join("tasks.json"));
        file.save(&[Task::new("a", Priority::Medium, None)]).unwrap();
        assert_eq!(file.load().unwrap().len(), 1);
    }

    #[test]
    fn test_wire_format_fields_always_present() {
        let dir = TempDir::new().unwrap();
        let file = task_file(&dir);
        file.save(&[Task::new("a", Priority::Medium, None)]).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        for field in ["\"title\"", "\"status\"", "\"priority\"", "\"due_date\""] {
            assert!(content.contains(field), "missing {field} in {content}");
        }
        // Absent due date is an empty string, not null or a missing key.
        assert!(content.contains(r#""due_date": """#));
    }

    #[test]
    fn test_load_file_written_by_hand() {
        let dir = TempDir::new().unwrap();
        let file = task_file(&dir);
        std::fs::write(
            file.path(),
            r#"[
    {
        "title": "Buy milk",
        "status": "Pending",
        "priority": "High",
        "due_date": ""
    }
]"#,
        )
        .unwrap();

        let tasks = file.load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].due_date, None);
    }
}

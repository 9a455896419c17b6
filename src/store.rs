use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::task::{Priority, Status, Task, parse_due_date};

/// Soft-failure signal: the operation succeeded, but a supplied value was
/// degraded to a default or left unchanged. Rendered distinctly from errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    UnknownPriority(String),
    BadDueDate(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownPriority(input) => {
                write!(f, "unknown priority '{input}', using Medium")
            }
            Warning::BadDueDate(input) => {
                write!(f, "invalid date '{input}' (expected YYYY-MM-DD), ignoring it")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Priority,
    DueDate,
}

#[derive(Debug)]
pub struct AddOutcome {
    pub task: Task,
    pub warnings: Vec<Warning>,
}

/// The in-memory task list. Owns every `Task` and all mutation logic; the
/// driver decides when the list is persisted.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a loaded sequence, replacing the collection wholesale.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Read-only view of the current sequence. Empty is a normal state.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a new pending task. Fails only on an empty title; bad priority
    /// or due-date input degrades to a default and surfaces a warning.
    pub fn add(
        &mut self,
        title: &str,
        priority_input: &str,
        due_date_input: &str,
    ) -> Result<AddOutcome> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Validation("task title cannot be empty".to_string()));
        }

        let mut warnings = Vec::new();
        let priority = parse_priority_input(priority_input, &mut warnings);

        let due_date_input = due_date_input.trim();
        let due_date = if due_date_input.is_empty() {
            None
        } else {
            let parsed = parse_due_date(due_date_input);
            if parsed.is_none() {
                warnings.push(Warning::BadDueDate(due_date_input.to_string()));
            }
            parsed
        };

        let task = Task::new(title, priority, due_date);
        debug!(title = %task.title, %priority, "task added");
        self.tasks.push(task.clone());

        Ok(AddOutcome { task, warnings })
    }

    /// Convert a 1-based selection (as typed by the user) to a 0-based index.
    /// Callers must re-display the list first if it may have changed.
    pub fn resolve_index(&self, input: &str) -> Result<usize> {
        let input = input.trim();
        let number: usize = input
            .parse()
            .map_err(|_| Error::Index(format!("'{input}' is not a number")))?;
        if number < 1 || number > self.tasks.len() {
            return Err(Error::Index(format!(
                "{number} is out of range (1-{})",
                self.tasks.len()
            )));
        }
        Ok(number - 1)
    }

    /// Mark the task at `index` completed. Repeating on an already-completed
    /// task is a no-op success.
    pub fn complete(&mut self, index: usize) -> Result<()> {
        let task = self.task_at_mut(index)?;
        task.status = Status::Completed;
        debug!(title = %task.title, "task completed");
        Ok(())
    }

    /// Remove the task at `index`; later positions shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<()> {
        self.task_at_mut(index)?;
        let removed = self.tasks.remove(index);
        debug!(title = %removed.title, "task deleted");
        Ok(())
    }

    /// Update the task at `index`. Empty inputs leave the field untouched;
    /// a malformed supplied due date keeps the existing value and warns.
    pub fn edit(
        &mut self,
        index: usize,
        new_title: &str,
        new_priority: &str,
        new_due_date: &str,
    ) -> Result<Vec<Warning>> {
        self.task_at_mut(index)?;

        let mut warnings = Vec::new();

        let new_title = new_title.trim();
        if !new_title.is_empty() {
            self.tasks[index].title = new_title.to_string();
        }

        if !new_priority.trim().is_empty() {
            self.tasks[index].priority = parse_priority_input(new_priority, &mut warnings);
        }

        let new_due_date = new_due_date.trim();
        if !new_due_date.is_empty() {
            match parse_due_date(new_due_date) {
                Some(date) => self.tasks[index].due_date = Some(date),
                // Bad edit never clears the original value.
                None => warnings.push(Warning::BadDueDate(new_due_date.to_string())),
            }
        }

        debug!(title = %self.tasks[index].title, "task edited");
        Ok(warnings)
    }

    /// Case-insensitive substring match on titles. Empty result is not an error.
    pub fn search(&self, keyword: &str) -> Vec<&Task> {
        let keyword = keyword.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| t.title.to_lowercase().contains(&keyword))
            .collect()
    }

    /// Reorder the stored sequence in place. Both sorts are stable; undated
    /// tasks sort after every dated one.
    pub fn sort(&mut self, by: SortBy) {
        match by {
            SortBy::Priority => self.tasks.sort_by_key(|t| t.priority.rank()),
            SortBy::DueDate => self.tasks.sort_by_key(|t| (t.due_date.is_none(), t.due_date)),
        }
        debug!(?by, "tasks sorted");
    }

    /// Remove every task, but only with an explicit confirmation flag.
    pub fn clear_all(&mut self, confirmed: bool) {
        if confirmed {
            debug!(count = self.tasks.len(), "all tasks cleared");
            self.tasks.clear();
        }
    }

    fn task_at_mut(&mut self, index: usize) -> Result<&mut Task> {
        let len = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or_else(|| Error::Index(format!("index {index} out of range (length {len})")))
    }
}

/// Normalize priority input: empty means "not supplied" (silent Medium
/// default), anything else unrecognized falls back to Medium with a warning.
fn parse_priority_input(input: &str, warnings: &mut Vec<Warning>) -> Priority {
    let input = input.trim();
    if input.is_empty() {
        return Priority::default();
    }
    match Priority::parse(input) {
        Some(priority) => priority,
        None => {
            warnings.push(Warning::UnknownPriority(input.to_string()));
            Priority::default()
        }
    }
}

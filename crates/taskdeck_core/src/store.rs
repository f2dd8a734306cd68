use crate::error::AppError;
use crate::filter::{self, FilterMode};
use crate::model::{Priority, Task};
use crate::storage::KeyValueStore;

/// The single key the whole list is serialized under.
pub const STORE_KEY: &str = "todos";

/// Owns the ordered task list, the pending draft input, and the active filter
/// mode. Every accepted mutation writes the serialized list back through the
/// injected adapter in the same step.
pub struct TaskListStore {
    tasks: Vec<Task>,
    draft_text: String,
    draft_priority: Priority,
    filter: FilterMode,
    store: Box<dyn KeyValueStore>,
}

impl TaskListStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            tasks: Vec::new(),
            draft_text: String::new(),
            draft_priority: Priority::default(),
            filter: FilterMode::default(),
            store,
        }
    }

    /// Replaces the list with whatever the adapter holds. Absent, unreadable,
    /// or non-array data all start the list over empty; nothing is surfaced.
    pub fn hydrate(&mut self) {
        self.tasks = match self.store.load(STORE_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
            Ok(None) | Err(_) => Vec::new(),
        };
    }

    pub fn add_task(&mut self, text: &str, priority: Priority) -> Result<bool, AppError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        self.tasks.push(Task::new(trimmed, priority));
        self.persist()?;
        self.draft_text.clear();
        self.draft_priority = Priority::default();
        Ok(true)
    }

    pub fn delete_task(&mut self, index: usize) -> Result<Option<Task>, AppError> {
        let removed = if index < self.tasks.len() {
            Some(self.tasks.remove(index))
        } else {
            None
        };
        self.persist()?;
        Ok(removed)
    }

    pub fn toggle_completion(&mut self, index: usize) -> Result<bool, AppError> {
        let toggled = match self.tasks.get_mut(index) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        };
        self.persist()?;
        Ok(toggled)
    }

    pub fn move_up(&mut self, index: usize) -> Result<bool, AppError> {
        if index == 0 || index >= self.tasks.len() {
            return Ok(false);
        }

        self.tasks.swap(index - 1, index);
        self.persist()?;
        Ok(true)
    }

    pub fn move_down(&mut self, index: usize) -> Result<bool, AppError> {
        if index + 1 >= self.tasks.len() {
            return Ok(false);
        }

        self.tasks.swap(index, index + 1);
        self.persist()?;
        Ok(true)
    }

    /// Pulls the task's text into the draft and removes the task. Resubmitting
    /// the draft appends at the end with a fresh completed/priority, which is
    /// the component's long-standing edit behavior.
    pub fn edit_task(&mut self, index: usize) -> Result<bool, AppError> {
        if index >= self.tasks.len() {
            return Ok(false);
        }

        self.draft_text = self.tasks[index].text.clone();
        self.tasks.remove(index);
        self.persist()?;
        Ok(true)
    }

    /// Commits the pending draft as a new task; a blank draft is a no-op.
    pub fn submit_draft(&mut self) -> Result<bool, AppError> {
        let text = self.draft_text.clone();
        let priority = self.draft_priority;
        self.add_task(&text, priority)
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter = mode;
    }

    pub fn set_draft_text<T: Into<String>>(&mut self, text: T) {
        self.draft_text = text.into();
    }

    pub fn set_draft_priority(&mut self, priority: Priority) {
        self.draft_priority = priority;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    pub fn draft_priority(&self) -> Priority {
        self.draft_priority
    }

    /// The filtered view, each task paired with its position in the full list
    /// so controls keep addressing the right element.
    pub fn visible(&self) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| filter::matches(task, self.filter))
            .collect()
    }

    fn persist(&self) -> Result<(), AppError> {
        let encoded = serde_json::to_string(&self.tasks)?;
        self.store.save(STORE_KEY, &encoded)
    }
}

use crate::model::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl FilterMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Incomplete => "incomplete",
        }
    }
}

pub fn matches(task: &Task, mode: FilterMode) -> bool {
    match mode {
        FilterMode::All => true,
        FilterMode::Completed => task.completed,
        FilterMode::Incomplete => !task.completed,
    }
}

pub fn filtered(tasks: &[Task], mode: FilterMode) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| matches(task, mode))
        .cloned()
        .collect()
}

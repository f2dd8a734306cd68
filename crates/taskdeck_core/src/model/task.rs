use serde::{Deserialize, Serialize};

// Variant names double as the wire spelling ("Low"/"Medium"/"High"), so no
// rename attribute: lists written by earlier builds parse unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    pub fn new<T: Into<String>>(text: T, priority: Priority) -> Self {
        Self {
            text: text.into(),
            completed: false,
            priority,
        }
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub task_id: String,
    pub done: bool,
}

#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    #[serde(default)]
    pub done: Option<String>,
}

impl ToggleForm {
    pub fn is_done(&self) -> bool {
        matches!(self.done.as_deref(), Some("true" | "on" | "1"))
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct DashboardQuery {
    #[serde(default)]
    pub new_week: Option<String>,
}

impl DashboardQuery {
    pub fn is_new_week(&self) -> bool {
        matches!(self.new_week.as_deref(), Some("1" | "true"))
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectForm {
    pub member_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemberSummary {
    pub id: String,
    pub name: String,
    pub role: String,
    pub avatar: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskStatus {
    pub id: String,
    pub label: String,
    pub done: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChecklistResponse {
    pub member_id: String,
    pub week_start: String,
    pub tasks: Vec<TaskStatus>,
    pub completed: usize,
    pub total: usize,
    pub all_complete: bool,
    pub new_week: bool,
}

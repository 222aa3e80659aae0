use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Completion flags by task id. Absent ids count as not done.
pub type Checklist = BTreeMap<String, bool>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistTask {
    pub id: String,
    pub label: String,
}

impl ChecklistTask {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Weekly routine used when the dataset does not define its own.
pub fn default_tasks() -> Vec<ChecklistTask> {
    vec![
        ChecklistTask::new("connect", "Send 5 connection requests to ICP matches"),
        ChecklistTask::new("engage", "Leave 10 thoughtful comments on ICP posts"),
        ChecklistTask::new("starter", "Open 3 conversations with a starter template"),
        ChecklistTask::new("post", "Publish 1 post from your content pillars"),
        ChecklistTask::new("follow-up", "Follow up with warm leads from last week"),
    ]
}

pub fn checklist_key(user_id: &str) -> String {
    format!("checklist:{user_id}")
}

pub fn load(store: &impl KeyValueStore, user_id: &str) -> Checklist {
    let Some(raw) = store.get(&checklist_key(user_id)) else {
        return Checklist::new();
    };
    match serde_json::from_str(&raw) {
        Ok(checklist) => checklist,
        Err(err) => {
            warn!(user_id, "discarding malformed checklist: {err}");
            Checklist::new()
        }
    }
}

pub fn set_task(store: &mut impl KeyValueStore, user_id: &str, task_id: &str, done: bool) {
    let mut checklist = load(&*store, user_id);
    checklist.insert(task_id.to_string(), done);
    save(store, user_id, &checklist);
}

pub fn clear(store: &mut impl KeyValueStore, user_id: &str) {
    store.remove(&checklist_key(user_id));
}

fn save(store: &mut impl KeyValueStore, user_id: &str, checklist: &Checklist) {
    // A BTreeMap<String, bool> always serializes.
    if let Ok(raw) = serde_json::to_string(checklist) {
        store.set(&checklist_key(user_id), raw);
    }
}

pub fn is_done(checklist: &Checklist, task_id: &str) -> bool {
    checklist.get(task_id).copied().unwrap_or(false)
}

/// Counts completed tasks from the static list; stray ids are ignored.
pub fn completed_count(tasks: &[ChecklistTask], checklist: &Checklist) -> usize {
    tasks.iter().filter(|task| is_done(checklist, &task.id)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStore;

    #[test]
    fn load_without_record_is_empty() {
        let store = LocalStore::default();
        assert!(load(&store, "alex").is_empty());
    }

    #[test]
    fn set_task_then_load_reflects_change() {
        let mut store = LocalStore::default();
        set_task(&mut store, "alex", "connect", true);
        set_task(&mut store, "alex", "post", false);

        let checklist = load(&store, "alex");
        assert_eq!(checklist.get("connect"), Some(&true));
        assert_eq!(checklist.get("post"), Some(&false));
    }

    #[test]
    fn set_task_is_idempotent() {
        let mut once = LocalStore::default();
        set_task(&mut once, "alex", "connect", true);

        let mut twice = LocalStore::default();
        set_task(&mut twice, "alex", "connect", true);
        set_task(&mut twice, "alex", "connect", true);

        assert_eq!(once, twice);
    }

    #[test]
    fn corrupt_record_loads_empty() {
        let mut store = LocalStore::default();
        store.set(&checklist_key("alex"), "definitely not json".into());
        assert!(load(&store, "alex").is_empty());

        store.set(&checklist_key("alex"), r#"{"connect":"yes"}"#.into());
        assert!(load(&store, "alex").is_empty());
    }

    #[test]
    fn users_are_partitioned() {
        let mut store = LocalStore::default();
        set_task(&mut store, "alex", "connect", true);
        assert!(load(&store, "jordan").is_empty());

        clear(&mut store, "alex");
        assert!(load(&store, "alex").is_empty());
    }

    #[test]
    fn completed_count_ignores_unknown_ids() {
        let tasks = vec![ChecklistTask::new("a", "A"), ChecklistTask::new("b", "B")];
        let mut checklist = Checklist::new();
        checklist.insert("a".into(), true);
        checklist.insert("ghost".into(), true);
        assert_eq!(completed_count(&tasks, &checklist), 1);
        assert!(!is_done(&checklist, "b"));
    }
}

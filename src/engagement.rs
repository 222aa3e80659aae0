//! Weekly engagement checklist: rollover on open, persisted toggles.

use crate::checklist::{self, Checklist, ChecklistTask};
use crate::storage::KeyValueStore;
use crate::week;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngagementError {
    #[error("checklist for '{0}' has not been opened")]
    NotOpened(String),

    #[error("unknown checklist task: {0}")]
    UnknownTask(String),
}

/// Outcome of comparing the stored week against the clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub week_start: DateTime<Utc>,
    pub checklist: Checklist,
    pub is_new_week: bool,
}

/// Decides the week and checklist a freshly opened dashboard should show.
///
/// A missing or stale marker starts a new week at `now` with an empty
/// checklist; otherwise the stored values carry over untouched.
pub fn reconcile(
    now: DateTime<Utc>,
    stored_marker: Option<DateTime<Utc>>,
    stored_checklist: Checklist,
) -> Reconciled {
    match stored_marker {
        Some(start) if !week::is_expired(Some(start), now) => Reconciled {
            week_start: start,
            checklist: stored_checklist,
            is_new_week: false,
        },
        _ => Reconciled {
            week_start: now,
            checklist: Checklist::new(),
            is_new_week: true,
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngagementState {
    Uninitialized,
    Active {
        week_start: DateTime<Utc>,
        checklist: Checklist,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub all_complete: bool,
}

#[derive(Debug, Clone)]
pub struct EngagementController {
    user_id: String,
    tasks: Vec<ChecklistTask>,
    state: EngagementState,
    new_week_notice: bool,
}

impl EngagementController {
    pub fn new(user_id: impl Into<String>, tasks: Vec<ChecklistTask>) -> Self {
        Self {
            user_id: user_id.into(),
            tasks,
            state: EngagementState::Uninitialized,
            new_week_notice: false,
        }
    }

    pub fn open(&mut self, store: &mut impl KeyValueStore) {
        self.open_at(store, Utc::now());
    }

    pub fn open_at(&mut self, store: &mut impl KeyValueStore, now: DateTime<Utc>) {
        let marker = week::stored_week_start(&*store, &self.user_id);
        // Only read the checklist when the week is still live; a stale one is discarded anyway.
        let stored = if week::is_expired(marker, now) {
            Checklist::new()
        } else {
            checklist::load(&*store, &self.user_id)
        };

        let outcome = reconcile(now, marker, stored);
        if outcome.is_new_week {
            week::start_new_week(store, &self.user_id, outcome.week_start);
            checklist::clear(store, &self.user_id);
            info!(user_id = %self.user_id, "started new engagement week");
        }

        self.new_week_notice = outcome.is_new_week;
        self.state = EngagementState::Active {
            week_start: outcome.week_start,
            checklist: outcome.checklist,
        };
    }

    pub fn toggle(
        &mut self,
        store: &mut impl KeyValueStore,
        task_id: &str,
        done: bool,
    ) -> Result<Progress, EngagementError> {
        if !self.tasks.iter().any(|task| task.id == task_id) {
            return Err(EngagementError::UnknownTask(task_id.to_string()));
        }
        let EngagementState::Active { checklist: current, .. } = &mut self.state else {
            return Err(EngagementError::NotOpened(self.user_id.clone()));
        };

        current.insert(task_id.to_string(), done);
        checklist::set_task(store, &self.user_id, task_id, done);
        Ok(self.progress())
    }

    /// True only for the open that performed a rollover. Never persisted.
    pub fn show_new_week_notice(&self) -> bool {
        self.new_week_notice
    }

    pub fn state(&self) -> &EngagementState {
        &self.state
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn tasks(&self) -> &[ChecklistTask] {
        &self.tasks
    }

    pub fn week_start(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            EngagementState::Active { week_start, .. } => Some(*week_start),
            EngagementState::Uninitialized => None,
        }
    }

    pub fn is_done(&self, task_id: &str) -> bool {
        match &self.state {
            EngagementState::Active { checklist, .. } => checklist::is_done(checklist, task_id),
            EngagementState::Uninitialized => false,
        }
    }

    pub fn completed_count(&self) -> usize {
        match &self.state {
            EngagementState::Active { checklist, .. } => {
                checklist::completed_count(&self.tasks, checklist)
            }
            EngagementState::Uninitialized => 0,
        }
    }

    pub fn all_complete(&self) -> bool {
        !self.tasks.is_empty() && self.completed_count() == self.tasks.len()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.completed_count(),
            total: self.tasks.len(),
            all_complete: self.all_complete(),
        }
    }
}

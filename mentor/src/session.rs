//! Per-session state: emotion tallies and the current view.
//!
//! Every browser session owns one [`SessionContext`]. Contexts are created
//! when a session starts, live in a [`SessionRegistry`], and are dropped when
//! the session ends. Nothing here is shared between sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::agent::Prepared;
use crate::emotion::EmotionLabel;
use crate::task::TaskType;

/// How often each emotion was detected in a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounters {
    pub attempts: u64,
    pub confused: u64,
    pub stressed: u64,
    pub confident: u64,
    pub normal: u64,
}

impl SessionCounters {
    /// Count one classified explanation request.
    pub fn record(&mut self, label: EmotionLabel) {
        self.attempts += 1;
        match label {
            EmotionLabel::Confused => self.confused += 1,
            EmotionLabel::Stressed => self.stressed += 1,
            EmotionLabel::Confident => self.confident += 1,
            EmotionLabel::Normal => self.normal += 1,
        }
    }

    pub fn count(&self, label: EmotionLabel) -> u64 {
        match label {
            EmotionLabel::Confused => self.confused,
            EmotionLabel::Stressed => self.stressed,
            EmotionLabel::Confident => self.confident,
            EmotionLabel::Normal => self.normal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardMode {
    Explain,
    Quiz,
    StudyPlan,
}

impl DashboardMode {
    /// Dashboard page on which `task` is requested.
    pub fn for_task(task: TaskType) -> Self {
        match task {
            TaskType::Explanation => DashboardMode::Explain,
            TaskType::Quiz => DashboardMode::Quiz,
            TaskType::StudyPlan => DashboardMode::StudyPlan,
        }
    }
}

/// Which page the student is looking at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", content = "mode", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Welcome,
    Dashboard(DashboardMode),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionContext {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub counters: SessionCounters,
    pub view: ViewState,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            counters: SessionCounters::default(),
            view: ViewState::Welcome,
        }
    }

    pub fn select_mode(&mut self, mode: DashboardMode) {
        self.view = ViewState::Dashboard(mode);
    }

    pub fn record(&mut self, label: EmotionLabel) {
        self.counters.record(label);
    }

    /// Note a validated request: switch to its dashboard page and count its
    /// emotion, if it has one. Call before generation so a failed call still
    /// counts.
    pub fn record_prepared(&mut self, prepared: &Prepared) {
        self.select_mode(DashboardMode::for_task(prepared.task));
        if let Some(label) = prepared.emotion {
            self.record(label);
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Live sessions keyed by id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<Uuid, SessionContext>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session with zeroed counters.
    pub fn start(&mut self) -> &SessionContext {
        let ctx = SessionContext::new();
        self.sessions.entry(ctx.id).or_insert(ctx)
    }

    pub fn get(&self, id: &Uuid) -> Option<&SessionContext> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut SessionContext> {
        self.sessions.get_mut(id)
    }

    /// End a session, discarding its state.
    pub fn end(&mut self, id: &Uuid) -> Option<SessionContext> {
        self.sessions.remove(id)
    }

    /// Number of live sessions.
    pub fn live(&self) -> usize {
        self.sessions.len()
    }
}

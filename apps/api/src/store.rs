//! Shared resume store: the canonical aggregate, the wizard pointer and the toast sink.
//!
//! Every `update_*` replaces its section wholesale. There is no merge and no conflict
//! detection; the last writer wins.

use std::collections::{BTreeSet, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::resume::{
    Achievement, Certification, Education, Hackathon, Internship, Language, PersonalInfo,
    Project, ResumeData, RoadmapData, Skill,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Fire-and-forget user notifications.
pub trait Notifier {
    fn add_toast(&mut self, kind: ToastKind, message: String);

    fn success(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.add_toast(ToastKind::Success, message.into());
    }

    fn error(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.add_toast(ToastKind::Error, message.into());
    }
}

/// Pending toasts kept per session; older ones are dropped first.
pub const MAX_PENDING_TOASTS: usize = 50;

#[derive(Debug, Default)]
pub struct ResumeStore {
    data: ResumeData,
    current_step: u32,
    completed_steps: BTreeSet<u32>,
    toasts: VecDeque<Toast>,
}

impl ResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resume_data(&self) -> &ResumeData {
        &self.data
    }

    pub fn update_personal_info(&mut self, info: PersonalInfo) {
        self.data.personal_info = info;
    }

    pub fn update_education(&mut self, items: Vec<Education>) {
        self.data.education = items;
    }

    pub fn update_skills(&mut self, items: Vec<Skill>) {
        self.data.skills = items;
    }

    pub fn update_projects(&mut self, items: Vec<Project>) {
        self.data.projects = items;
    }

    pub fn update_certifications(&mut self, items: Vec<Certification>) {
        self.data.certifications = items;
    }

    pub fn update_hackathons(&mut self, items: Vec<Hackathon>) {
        self.data.hackathons = items;
    }

    pub fn update_internships(&mut self, items: Vec<Internship>) {
        self.data.internships = items;
    }

    pub fn update_achievements(&mut self, items: Vec<Achievement>) {
        self.data.achievements = items;
    }

    pub fn update_languages(&mut self, items: Vec<Language>) {
        self.data.languages = items;
    }

    pub fn update_roadmap(&mut self, roadmap: Option<RoadmapData>) {
        self.data.roadmap = roadmap;
    }

    pub fn set_selected_job_role(&mut self, role: String) {
        self.data.selected_job_role = role;
    }

    pub fn set_premium(&mut self, premium: bool) {
        self.data.is_premium = premium;
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// No bounds check: any step index is accepted.
    pub fn set_current_step(&mut self, step: u32) {
        self.current_step = step;
    }

    pub fn complete_step(&mut self, step: u32) {
        self.completed_steps.insert(step);
    }

    pub fn completed_steps(&self) -> &BTreeSet<u32> {
        &self.completed_steps
    }

    /// Returns and clears every toast emitted since the last drain.
    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain(..).collect()
    }
}

impl Notifier for ResumeStore {
    fn add_toast(&mut self, kind: ToastKind, message: String) {
        match kind {
            ToastKind::Success => info!(toast = %message, "success toast"),
            ToastKind::Error => warn!(toast = %message, "error toast"),
        }
        if self.toasts.len() == MAX_PENDING_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            kind,
            message,
            created_at: Utc::now(),
        });
    }
}

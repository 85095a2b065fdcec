//! @acp:module "Wizard Session"
//! @acp:summary "Session-scoped container for wizard and section state"
//! @acp:domain wizard
//! @acp:layer model
//!
//! A session is owned by whoever handles requests for one user. It is passed
//! by reference into every controller and dashboard call.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::input::ProjectInfo;
use super::step::Step;
use crate::store::SectionStore;

/// One entry of the work-package list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPackage {
    pub name: String,
    pub description: String,
}

/// @acp:summary "All state of one user's wizard run"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Display-only user identity (email-like)
    pub user: String,
    step: Step,
    #[serde(default)]
    pub sections: SectionStore,
    #[serde(default)]
    work_packages: Vec<WorkPackage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectInfo>,
    #[serde(default)]
    wizard_complete: bool,
}

impl WizardSession {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            user: user.into(),
            step: Step::first(),
            sections: SectionStore::new(),
            work_packages: Vec::new(),
            project: None,
            wizard_complete: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub(crate) fn set_step(&mut self, step: Step) {
        self.step = step;
    }

    pub fn work_packages(&self) -> &[WorkPackage] {
        &self.work_packages
    }

    pub(crate) fn push_work_package(&mut self, package: WorkPackage) {
        self.work_packages.push(package);
    }

    /// Set once the final step is confirmed; the shell switches to the dashboard
    pub fn is_complete(&self) -> bool {
        self.wizard_complete
    }

    pub(crate) fn mark_complete(&mut self) {
        self.wizard_complete = true;
    }

    /// Local part of the user's email, shown in the wizard header
    pub fn username(&self) -> &str {
        self.user.split('@').next().unwrap_or(&self.user)
    }

    /// @acp:summary "Load a session snapshot"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// @acp:summary "Save a session snapshot, creating parent directories"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the snapshot at `path`, or start a new session for `user`
    pub fn load_or_new<P: AsRef<Path>>(path: P, user: &str) -> crate::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let session = Self::load(path)?;
            tracing::debug!(session = %session.id, "Resumed session from {}", path.display());
            Ok(session)
        } else {
            Ok(Self::new(user))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftGenerator;
    use crate::wizard::Section;

    #[test]
    fn test_new_session_starts_at_first_step() {
        let session = WizardSession::new("ana@example.com");
        assert_eq!(session.step(), Step::BasicInfo);
        assert!(!session.is_complete());
        assert!(session.work_packages().is_empty());
        assert_eq!(session.username(), "ana");
    }

    #[test]
    fn test_username_without_at() {
        assert_eq!(WizardSession::new("guest").username(), "guest");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/session.json");

        let mut session = WizardSession::new("ana@example.com");
        session
            .sections
            .set_draft(Step::RiskAnalysis, DraftGenerator::new().generate(Step::RiskAnalysis.label(), None));
        session.sections.set_edited(Section::TargetGroup, "Edited");
        session.save(&path).unwrap();

        let loaded = WizardSession::load_or_new(&path, "other@example.com").unwrap();
        assert_eq!(loaded, session);
    }
}

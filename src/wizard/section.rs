//! @acp:module "Application Sections"
//! @acp:summary "Named sections of the final document, as views over wizard steps"
//! @acp:domain wizard
//! @acp:layer model
//!
//! Every section resolves through exactly one canonical [`Step`]. The
//! dashboard, the full preview and the export all go through this mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::step::Step;
use crate::error::WizardError;

/// One named unit of the application document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    ProjectSummary,
    ChallengesAndNeeds,
    TargetGroup,
    OrganisationStructure,
    RiskAnalysis,
    CommunicationPlan,
    InternalPolicies,
}

impl Section {
    /// Get all sections in document order
    pub fn all() -> &'static [Section] {
        &[
            Section::ProjectSummary,
            Section::ChallengesAndNeeds,
            Section::TargetGroup,
            Section::OrganisationStructure,
            Section::RiskAnalysis,
            Section::CommunicationPlan,
            Section::InternalPolicies,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Section::ProjectSummary => "Project Summary",
            Section::ChallengesAndNeeds => "Challenges and Needs",
            Section::TargetGroup => "Target Group",
            Section::OrganisationStructure => "Organisation Structure",
            Section::RiskAnalysis => "Risk Analysis",
            Section::CommunicationPlan => "Communication Plan",
            Section::InternalPolicies => "Internal Policies",
        }
    }

    /// Canonical step whose state backs this section
    pub fn step(&self) -> Step {
        match self {
            Section::ProjectSummary => Step::BasicInfo,
            Section::ChallengesAndNeeds => Step::AgendaGoal,
            Section::TargetGroup => Step::TargetGroup,
            Section::OrganisationStructure => Step::Organisation,
            Section::RiskAnalysis => Step::RiskAnalysis,
            Section::CommunicationPlan => Step::CommunicationPlan,
            Section::InternalPolicies => Step::InternalPolicies,
        }
    }

    /// 1-based position in the document
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    /// Numbered heading, e.g. "5. Risk Analysis"
    pub fn title(&self) -> String {
        format!("{}. {}", self.number(), self.name())
    }

    pub fn from_name(name: &str) -> Option<Section> {
        Section::all()
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl FromStr for Section {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(section) = Section::from_name(s) {
            return Ok(section);
        }
        let kebab = s.trim().to_lowercase();
        Section::all()
            .iter()
            .copied()
            .find(|sec| sec.name().to_lowercase().replace(' ', "-") == kebab)
            .ok_or_else(|| WizardError::UnknownSection(s.to_string()))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

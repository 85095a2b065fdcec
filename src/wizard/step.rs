//! @acp:module "Wizard Steps"
//! @acp:summary "Fixed catalog of wizard steps and their input kinds"
//! @acp:domain wizard
//! @acp:layer model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::section::Section;

/// Sentinel passed to the generator once policy documents are uploaded
pub const UPLOAD_SENTINEL: &str = "Policy documents uploaded";

/// One page of the linear wizard, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    BasicInfo,
    AgendaGoal,
    TargetGroup,
    WorkPackages,
    Organisation,
    RiskAnalysis,
    CommunicationPlan,
    InternalPolicies,
    FinalSubmission,
}

/// What kind of input a step collects before generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    FreeText,
    SingleSelect,
    MultiSelect,
    FileUpload,
    /// Generation runs on an empty input
    None,
    /// Final confirmation, no generation
    Confirmation,
}

impl Step {
    /// Number of steps in the catalog
    pub const COUNT: usize = 9;

    /// Get all steps in wizard order
    pub fn all() -> &'static [Step] {
        &[
            Step::BasicInfo,
            Step::AgendaGoal,
            Step::TargetGroup,
            Step::WorkPackages,
            Step::Organisation,
            Step::RiskAnalysis,
            Step::CommunicationPlan,
            Step::InternalPolicies,
            Step::FinalSubmission,
        ]
    }

    pub fn first() -> Step {
        Step::BasicInfo
    }

    pub fn last() -> Step {
        Step::FinalSubmission
    }

    /// Ordinal position 0..N-1
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Step::all().get(index).copied()
    }

    /// Resolve an index, clamping it into the catalog range
    pub fn clamp(index: usize) -> Step {
        Step::from_index(index.min(Step::COUNT - 1)).unwrap_or_else(Step::last)
    }

    /// Display label, also the key the generator templates on
    pub fn label(&self) -> &'static str {
        match self {
            Step::BasicInfo => "Project Start and Basic Info",
            Step::AgendaGoal => "Agenda 2030 Goal",
            Step::TargetGroup => "Target Group",
            Step::WorkPackages => "Work Packages",
            Step::Organisation => "Organisation & Competence",
            Step::RiskAnalysis => "Risk Analysis & Reporting Methods",
            Step::CommunicationPlan => "Communication Plan & Dissemination",
            Step::InternalPolicies => "Internal Policies",
            Step::FinalSubmission => "Final Submission",
        }
    }

    pub fn from_label(label: &str) -> Option<Step> {
        Step::all().iter().copied().find(|s| s.label() == label)
    }

    pub fn input_kind(&self) -> InputKind {
        match self {
            Step::BasicInfo | Step::TargetGroup | Step::Organisation | Step::CommunicationPlan => {
                InputKind::FreeText
            }
            Step::AgendaGoal => InputKind::SingleSelect,
            Step::RiskAnalysis => InputKind::MultiSelect,
            Step::InternalPolicies => InputKind::FileUpload,
            Step::WorkPackages => InputKind::None,
            Step::FinalSubmission => InputKind::Confirmation,
        }
    }

    /// Whether the step offers a generate action
    pub fn generates(&self) -> bool {
        self.input_kind() != InputKind::Confirmation
    }

    /// Label of the generate button
    pub fn generate_action(&self) -> &'static str {
        match self {
            Step::BasicInfo => "Generate Project Info Suggestions",
            Step::AgendaGoal => "Generate Justification",
            Step::TargetGroup => "Generate Target Group Details",
            Step::WorkPackages => "Generate Work Packages",
            Step::Organisation => "Generate Organisation Text",
            Step::RiskAnalysis => "Generate Risk Analysis",
            Step::CommunicationPlan => "Generate Communication Plan",
            Step::InternalPolicies => "Generate Policy Compliance Text",
            Step::FinalSubmission => "Go to Dashboard",
        }
    }

    /// Message shown while generation is running
    pub fn spinner_message(&self) -> &'static str {
        match self {
            Step::BasicInfo => "Generating suggestions...",
            Step::AgendaGoal => "Generating justification...",
            Step::TargetGroup => "Generating target group details...",
            Step::WorkPackages => "Generating work packages...",
            Step::Organisation => "Generating organisation structure...",
            Step::RiskAnalysis => "Generating risk analysis...",
            Step::CommunicationPlan => "Generating communication plan...",
            Step::InternalPolicies => "Generating policy text...",
            Step::FinalSubmission => "Opening dashboard...",
        }
    }

    /// Dashboard section this step feeds, if any
    pub fn section(&self) -> Option<Section> {
        Section::all().iter().copied().find(|s| s.step() == *self)
    }

    pub fn next(&self) -> Option<Step> {
        Step::from_index(self.index() + 1)
    }

    pub fn previous(&self) -> Option<Step> {
        self.index().checked_sub(1).and_then(Step::from_index)
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::first()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_index() {
        for (i, step) in Step::all().iter().enumerate() {
            assert_eq!(step.index(), i);
            assert_eq!(Step::from_index(i), Some(*step));
        }
        assert_eq!(Step::all().len(), Step::COUNT);
        assert_eq!(Step::from_index(Step::COUNT), None);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(Step::clamp(0), Step::BasicInfo);
        assert_eq!(Step::clamp(8), Step::FinalSubmission);
        assert_eq!(Step::clamp(42), Step::FinalSubmission);
    }

    #[test]
    fn test_label_lookup() {
        assert_eq!(Step::from_label("Work Packages"), Some(Step::WorkPackages));
        assert_eq!(Step::from_label("Risk Analysis"), None);
    }

    #[test]
    fn test_neighbours() {
        assert_eq!(Step::BasicInfo.previous(), None);
        assert_eq!(Step::BasicInfo.next(), Some(Step::AgendaGoal));
        assert_eq!(Step::FinalSubmission.next(), None);
    }

    #[test]
    fn test_section_mapping() {
        assert_eq!(Step::RiskAnalysis.section(), Some(Section::RiskAnalysis));
        assert_eq!(Step::WorkPackages.section(), None);
        assert_eq!(Step::FinalSubmission.section(), None);
        assert!(!Step::FinalSubmission.generates());
    }
}

//! @acp:module "Step Input"
//! @acp:summary "Raw step input and the per-step forms that produce it"
//! @acp:domain wizard
//! @acp:layer model

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::step::{Step, UPLOAD_SENTINEL};
use crate::error::{Result, WizardError};

/// Maximum length of the short project idea
pub const MAX_IDEA_CHARS: usize = 1000;

pub const REGIONS: &[&str] = &["Region North", "Region South"];

pub const PROGRAMME_AREAS: &[&str] = &["Smart Growth", "Green Transition"];

pub const AGENDA_GOALS: &[&str] = &[
    "Goal 7: Sustainable Energy",
    "Goal 9: Innovation",
    "Goal 11: Sustainable Cities",
];

pub const GENERIC_RISKS: &[&str] = &[
    "Low participation",
    "Budget overrun",
    "Tech delays",
    "Staff turnover",
];

/// Accepted policy document extensions
pub const POLICY_EXTENSIONS: &[&str] = &["pdf", "docx"];

/// Work-package templates offered once work packages are generated
pub const WORK_PACKAGE_TEMPLATES: &[&str] = &["Digital Needs Analysis", "Pilot Lab", "SME Coaching"];

/// Verbatim input captured before generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum RawInput {
    Text(String),
    Selection(Vec<String>),
    /// Uploaded file names
    Upload(Vec<String>),
    Empty,
}

impl RawInput {
    pub fn text(value: impl Into<String>) -> Self {
        RawInput::Text(value.into())
    }

    /// String handed to the draft generator
    pub fn generation_input(&self) -> String {
        match self {
            RawInput::Text(text) => text.clone(),
            RawInput::Selection(items) => items.join(", "),
            RawInput::Upload(_) => UPLOAD_SENTINEL.to_string(),
            RawInput::Empty => String::new(),
        }
    }

    /// Text for the "original input" view
    pub fn display(&self) -> String {
        match self {
            RawInput::Text(text) => text.clone(),
            RawInput::Selection(items) => items.join(", "),
            RawInput::Upload(files) if files.is_empty() => UPLOAD_SENTINEL.to_string(),
            RawInput::Upload(files) => files.join(", "),
            RawInput::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.display().trim().is_empty()
    }
}

/// Project details captured on the first step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub region: String,
    pub programme: String,
}

/// Values collected by the form of one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepForm {
    BasicInfo {
        project_name: String,
        region: String,
        programme: String,
        idea: String,
    },
    AgendaGoal {
        goal: String,
    },
    TargetGroup {
        description: String,
    },
    WorkPackages,
    Organisation {
        keywords: String,
    },
    RiskAnalysis {
        risks: Vec<String>,
    },
    CommunicationPlan {
        audiences: String,
        channels: String,
        messages: String,
    },
    InternalPolicies {
        documents: Vec<PathBuf>,
    },
    FinalSubmission,
}

impl StepForm {
    pub fn step(&self) -> Step {
        match self {
            StepForm::BasicInfo { .. } => Step::BasicInfo,
            StepForm::AgendaGoal { .. } => Step::AgendaGoal,
            StepForm::TargetGroup { .. } => Step::TargetGroup,
            StepForm::WorkPackages => Step::WorkPackages,
            StepForm::Organisation { .. } => Step::Organisation,
            StepForm::RiskAnalysis { .. } => Step::RiskAnalysis,
            StepForm::CommunicationPlan { .. } => Step::CommunicationPlan,
            StepForm::InternalPolicies { .. } => Step::InternalPolicies,
            StepForm::FinalSubmission => Step::FinalSubmission,
        }
    }

    /// Check field constraints before the input is captured
    pub fn validate(&self) -> Result<()> {
        match self {
            StepForm::BasicInfo { region, programme, idea, .. } => {
                validate_idea(idea)?;
                validate_choice("region", region, REGIONS)?;
                validate_choice("programme area", programme, PROGRAMME_AREAS)
            }
            StepForm::AgendaGoal { goal } => validate_choice("Agenda 2030 goal", goal, AGENDA_GOALS),
            StepForm::RiskAnalysis { risks } => {
                for (i, risk) in risks.iter().enumerate() {
                    validate_choice("risk", risk, GENERIC_RISKS)?;
                    if risks[..i].contains(risk) {
                        return Err(WizardError::invalid_input("risk", format!("'{}' selected twice", risk)));
                    }
                }
                if !(3..=4).contains(&risks.len()) {
                    tracing::warn!("{} risks selected, 3-4 recommended", risks.len());
                }
                Ok(())
            }
            StepForm::InternalPolicies { documents } => {
                for doc in documents {
                    validate_policy_document(doc)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Reduce the form to the raw input the generator sees
    pub fn raw_input(&self) -> RawInput {
        match self {
            StepForm::BasicInfo { idea, .. } => RawInput::Text(idea.clone()),
            StepForm::AgendaGoal { goal } => RawInput::Selection(vec![goal.clone()]),
            StepForm::TargetGroup { description } => RawInput::Text(description.clone()),
            StepForm::Organisation { keywords } => RawInput::Text(keywords.clone()),
            StepForm::RiskAnalysis { risks } => RawInput::Selection(risks.clone()),
            StepForm::CommunicationPlan { messages, .. } => RawInput::Text(messages.clone()),
            StepForm::InternalPolicies { documents } => RawInput::Upload(
                documents
                    .iter()
                    .filter_map(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .collect(),
            ),
            StepForm::WorkPackages | StepForm::FinalSubmission => RawInput::Empty,
        }
    }

    /// Project details, present only on the first step
    pub fn project_info(&self) -> Option<ProjectInfo> {
        match self {
            StepForm::BasicInfo { project_name, region, programme, .. } => Some(ProjectInfo {
                name: project_name.clone(),
                region: region.clone(),
                programme: programme.clone(),
            }),
            _ => None,
        }
    }
}

/// Reject ideas longer than [`MAX_IDEA_CHARS`] characters
pub fn validate_idea(idea: &str) -> Result<()> {
    let len = idea.chars().count();
    if len > MAX_IDEA_CHARS {
        return Err(WizardError::invalid_input(
            "project idea",
            format!("{} characters, maximum is {}", len, MAX_IDEA_CHARS),
        ));
    }
    Ok(())
}

fn validate_choice(field: &str, value: &str, options: &[&str]) -> Result<()> {
    if options.contains(&value) {
        Ok(())
    } else {
        Err(WizardError::invalid_input(
            field,
            format!("'{}' is not one of: {}", value, options.join(", ")),
        ))
    }
}

fn validate_policy_document(path: &std::path::Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if POLICY_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(WizardError::invalid_input(
            "policy document",
            format!("{} must be a pdf or docx file", path.display()),
        ))
    }
}

//! @acp:module "Draft Templates"
//! @acp:summary "Fixed placeholder content per step label"
//! @acp:domain draft
//! @acp:layer data

use super::DraftTable;

/// Body used for every label without a tabular template
pub const FILLER: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Vivamus eu augue at sapien placerat venenatis.\n\
Sed posuere sapien id tellus bibendum, vel tincidunt lorem sollicitudin.\n\
Lorem ipsum dolor sit amet, consectetur adipiscing elit. Vivamus eu augue at sapien placerat venenatis.\n\
Sed posuere sapien id tellus bibendum, vel tincidunt lorem sollicitudin.";

/// Tabular template: intro, table, closing sentence
pub struct TableTemplate {
    pub intro: &'static str,
    pub columns: &'static [&'static str],
    pub rows: &'static [&'static [&'static str]],
    pub outro: &'static str,
}

impl TableTemplate {
    pub fn table(&self) -> DraftTable {
        DraftTable {
            columns: self.columns.iter().map(|c| c.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }
}

const WORK_PACKAGES: TableTemplate = TableTemplate {
    intro: "Here's a proposed work package structure for your project:",
    columns: &[
        "WP No.",
        "Work Package Name",
        "Leader",
        "Start Month",
        "End Month",
        "Deliverables",
    ],
    rows: &[
        &["1", "Needs Analysis", "Partner A", "1", "6", "Report on current state"],
        &["2", "Pilot Development", "Partner B", "4", "12", "Prototype system"],
        &["3", "Implementation", "Partner C", "10", "18", "Deployed solution"],
        &["4", "Evaluation", "Partner A", "16", "24", "Final evaluation report"],
    ],
    outro: "The work packages are designed to ensure a logical flow from analysis to implementation.",
};

const ORGANISATION: TableTemplate = TableTemplate {
    intro: "Suggested organization structure with key roles:",
    columns: &["Role", "Organization", "Key Personnel", "Responsibilities"],
    rows: &[
        &["Project Lead", "University X", "Prof. Smith", "Overall coordination"],
        &["Technical Lead", "Company Y", "Dr. Johnson", "Technical oversight"],
        &["Admin Lead", "NGO Z", "Ms. Williams", "Financial reporting"],
    ],
    outro: "This structure ensures all critical functions are covered.",
};

const RISK_ANALYSIS: TableTemplate = TableTemplate {
    intro: "Risk analysis table with mitigation strategies:",
    columns: &["Risk", "Probability", "Impact", "Mitigation Strategy", "Responsible"],
    rows: &[
        &["Delays in partner deliverables", "Medium", "High", "Regular checkpoints", "Project Lead"],
        &["Budget overruns", "Low", "High", "Monthly financial reviews", "Admin Lead"],
        &[
            "Technology not meeting needs",
            "Medium",
            "Medium",
            "Alternative solutions identified",
            "Technical Lead",
        ],
    ],
    outro: "Regular monitoring will be implemented for all identified risks.",
};

const COMMUNICATION: TableTemplate = TableTemplate {
    intro: "Proposed communication plan:",
    columns: &["Audience", "Channel", "Frequency", "Message", "Owner"],
    rows: &[
        &["SMEs", "Webinars", "Quarterly", "New opportunities", "Partner A"],
        &["Policy makers", "Reports", "Biannual", "Project outcomes", "Partner B"],
        &["General public", "Social media", "Monthly", "Project updates", "Partner C"],
    ],
    outro: "This plan ensures all stakeholders receive timely information.",
};

/// Look up the tabular template for a step label
pub fn table_template(label: &str) -> Option<&'static TableTemplate> {
    match label {
        "Work Packages" => Some(&WORK_PACKAGES),
        "Organisation & Competence" => Some(&ORGANISATION),
        "Risk Analysis & Reporting Methods" => Some(&RISK_ANALYSIS),
        "Communication Plan & Dissemination" => Some(&COMMUNICATION),
        _ => None,
    }
}

/// Deterministic description for a work-package template
pub fn work_package_description(name: &str) -> String {
    format!("AI-generated description for {}", name)
}

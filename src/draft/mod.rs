//! @acp:module "Draft Generation"
//! @acp:summary "Deterministic placeholder drafts for wizard steps"
//! @acp:domain draft
//! @acp:layer service
//!
//! Drafts are structured records: the echoed input, the draft label and the
//! optional table are kept as separate fields. [`Draft::to_markdown`] renders
//! the text form shown in editors, with the input and label markers.
//!
//! Generation is pure. The same `(label, input)` pair always yields the same
//! draft and there is no error path.

pub mod markers;
pub mod templates;

use serde::{Deserialize, Serialize};

pub use markers::{clean_content, parse_blocks, TextBlock};
pub use templates::work_package_description;

/// Marker that precedes the echoed user input
pub const INPUT_MARKER: &str = "**Your input:**";

/// A table inside a draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DraftTable {
    /// Render as a markdown pipe table
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&pipe_row(&self.columns));
        out.push('\n');
        let separator: Vec<String> = self.columns.iter().map(|_| "---".to_string()).collect();
        out.push_str(&pipe_row(&separator));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&pipe_row(row));
        }
        out
    }

    /// Header row followed by data rows
    pub fn all_rows(&self) -> Vec<Vec<String>> {
        std::iter::once(self.columns.clone())
            .chain(self.rows.iter().cloned())
            .collect()
    }
}

fn pipe_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

/// Placeholder draft for one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// Step label the draft was generated for
    pub label: String,
    /// Verbatim user input echoed above the draft
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub echoed_input: Option<String>,
    pub intro: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<DraftTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outro: Option<String>,
}

impl Draft {
    pub fn is_table(&self) -> bool {
        self.table.is_some()
    }

    /// The draft-label line, e.g. `**AI-generated draft for Target Group:**`
    pub fn label_line(&self) -> String {
        format!("**AI-generated draft for {}:**", self.label)
    }

    /// Draft content without the input echo or label
    pub fn body(&self) -> String {
        let mut out = self.intro.clone();
        if let Some(ref table) = self.table {
            out.push_str("\n\n");
            out.push_str(&table.to_markdown());
        }
        if let Some(ref outro) = self.outro {
            out.push_str("\n\n");
            out.push_str(outro);
        }
        out
    }

    /// Full text form, as shown in the editable draft area
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        if let Some(ref input) = self.echoed_input {
            out.push_str(&format!("{} {}\n\n", INPUT_MARKER, input));
        }
        out.push_str(&self.label_line());
        out.push_str("\n\n");
        out.push_str(&self.body());
        out
    }
}

/// Produces placeholder drafts from fixed templates
#[derive(Debug, Clone, Copy, Default)]
pub struct DraftGenerator;

impl DraftGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate the draft for a step label
    pub fn generate(&self, label: &str, input: Option<&str>) -> Draft {
        let echoed_input = input.filter(|i| !i.is_empty()).map(|i| i.to_string());

        match templates::table_template(label) {
            Some(template) => Draft {
                label: label.to_string(),
                echoed_input,
                intro: template.intro.to_string(),
                table: Some(template.table()),
                outro: Some(template.outro.to_string()),
            },
            None => Draft {
                label: label.to_string(),
                echoed_input,
                intro: templates::FILLER.to_string(),
                table: None,
                outro: None,
            },
        }
    }

    /// Generate and render to text in one go
    pub fn generate_text(&self, label: &str, input: Option<&str>) -> String {
        self.generate(label, input).to_markdown()
    }
}

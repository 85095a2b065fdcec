//! @acp:module "Steps Command"
//! @acp:summary "List the wizard step catalog"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use crate::wizard::{InputKind, Step};

/// Options for the steps command
#[derive(Debug, Clone, Default)]
pub struct StepsOptions {
    /// Output as JSON
    pub json: bool,
}

fn input_kind_name(kind: InputKind) -> &'static str {
    match kind {
        InputKind::FreeText => "text",
        InputKind::SingleSelect => "select",
        InputKind::MultiSelect => "multiselect",
        InputKind::FileUpload => "upload",
        InputKind::None => "none",
        InputKind::Confirmation => "confirm",
    }
}

/// Execute the steps command
pub fn execute_steps(options: StepsOptions) -> Result<()> {
    if options.json {
        let steps: Vec<_> = Step::all()
            .iter()
            .map(|step| {
                serde_json::json!({
                    "index": step.index(),
                    "label": step.label(),
                    "input": input_kind_name(step.input_kind()),
                    "section": step.section().map(|s| s.name()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(());
    }

    for step in Step::all() {
        let section = step
            .section()
            .map(|s| format!("→ {}", s.title()))
            .unwrap_or_default();
        println!(
            "{:>2}. {:<36} {:<12} {}",
            step.index(),
            step.label(),
            style(input_kind_name(step.input_kind())).dim(),
            style(section).cyan()
        );
    }
    Ok(())
}

//! @acp:module "Generate Command"
//! @acp:summary "Print the placeholder draft for one step"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Stateless: the session is neither read nor written.

use anyhow::Result;

use crate::draft::DraftGenerator;
use crate::error::WizardError;
use crate::wizard::Step;

/// Options for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Step index (0-based)
    pub step: usize,
    /// Raw input to echo into the draft
    pub input: Option<String>,
    /// Print the structured draft as JSON
    pub json: bool,
}

/// Execute the generate command
pub fn execute_generate(options: GenerateOptions) -> Result<()> {
    let step = Step::from_index(options.step).ok_or(WizardError::UnknownStep(options.step))?;

    let draft = DraftGenerator::new().generate(step.label(), options.input.as_deref());
    if options.json {
        println!("{}", serde_json::to_string_pretty(&draft)?);
    } else {
        println!("{}", draft.to_markdown());
    }
    Ok(())
}

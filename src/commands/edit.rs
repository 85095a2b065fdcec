//! @acp:module "Edit Command"
//! @acp:summary "Replace the text of one application section"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Non-interactive counterpart of the dashboard's save action.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::dashboard::Dashboard;
use crate::wizard::{Section, WizardSession};

/// Options for the edit command
#[derive(Debug, Clone)]
pub struct EditOptions {
    /// Session snapshot path
    pub session: PathBuf,
    /// User identity for new sessions
    pub user: String,
    /// Section to edit
    pub section: Section,
    /// New text (reads from stdin if not provided)
    pub text: Option<String>,
}

/// Execute the edit command
pub fn execute_edit(options: EditOptions) -> Result<()> {
    let mut session = WizardSession::load_or_new(&options.session, &options.user)
        .with_context(|| format!("Failed to load session {}", options.session.display()))?;

    let text = match options.text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read section text from stdin")?;
            buffer
        }
    };

    Dashboard::new().save_section(&mut session, options.section, &text);
    session.save(&options.session)?;

    println!(
        "{} Changes to {} saved!",
        style("✓").green(),
        options.section.name()
    );
    Ok(())
}

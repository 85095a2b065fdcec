//! @acp:module "Preview Command"
//! @acp:summary "Print the full application document as markdown"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::dashboard::Dashboard;
use crate::wizard::WizardSession;

/// Options for the preview command
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Session snapshot path
    pub session: PathBuf,
    /// User identity for new sessions
    pub user: String,
    /// Print the assembled document as JSON instead
    pub json: bool,
}

/// Execute the preview command
pub fn execute_preview(options: PreviewOptions) -> Result<()> {
    let session = WizardSession::load_or_new(&options.session, &options.user)
        .with_context(|| format!("Failed to load session {}", options.session.display()))?;
    let dashboard = Dashboard::new();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&dashboard.document(&session))?);
    } else {
        println!("{}", dashboard.full_preview(&session)?);
    }
    Ok(())
}

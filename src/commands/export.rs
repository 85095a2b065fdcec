//! @acp:module "Export Command"
//! @acp:summary "Write the application document as a DOCX file"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::dashboard::Dashboard;
use crate::document::{DocxWriter, DOCX_MEDIA_TYPE};
use crate::wizard::WizardSession;

/// Options for the export command
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Session snapshot path
    pub session: PathBuf,
    /// User identity for new sessions
    pub user: String,
    /// Output file
    pub output: PathBuf,
}

/// Execute the export command
pub fn execute_export(options: ExportOptions) -> Result<()> {
    let session = WizardSession::load_or_new(&options.session, &options.user)
        .with_context(|| format!("Failed to load session {}", options.session.display()))?;

    if session.sections.is_empty() {
        println!(
            "{} No sections generated yet; exporting placeholders",
            style("⚠").yellow()
        );
    }

    let dashboard = Dashboard::with_writer(
        DocxWriter::new()
            .author(session.user.clone())
            .created(session.created_at),
    );
    let bytes = dashboard
        .export_to(&session, &options.output)
        .with_context(|| format!("Failed to export {}", options.output.display()))?;

    println!(
        "{} Wrote {} ({} bytes, {})",
        style("✓").green(),
        options.output.display(),
        bytes,
        style(DOCX_MEDIA_TYPE).dim()
    );
    Ok(())
}

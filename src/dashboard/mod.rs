//! @acp:module "Dashboard"
//! @acp:summary "Review, edit and export the accumulated application sections"
//! @acp:domain dashboard
//! @acp:layer service
//!
//! The dashboard is the second mode of a session, entered once the wizard is
//! confirmed. Saving a section only writes its edited text; generated text is
//! left as the wizard produced it.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::document::{render_preview, Document, DocumentAssembler, DocxWriter};
use crate::error::Result;
use crate::wizard::{Section, WizardSession};

/// Placeholder for a section with nothing generated or edited
pub const NO_CONTENT: &str = "No content available yet.";

/// Placeholder for a step without captured input
pub const NO_INPUT: &str = "No input provided.";

/// What the single-section view shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub section: Section,
    pub name: String,
    /// Editable content, edited text first
    pub content: String,
    pub is_edited: bool,
    /// Raw input captured by the wizard, never exported
    pub original_input: String,
}

/// Dashboard operations over a session
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    writer: DocxWriter,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_writer(writer: DocxWriter) -> Self {
        Self { writer }
    }

    /// Header line for the logged-in user
    pub fn header(&self, session: &WizardSession) -> String {
        match session.project.as_ref().filter(|p| !p.name.is_empty()) {
            Some(project) => format!("Logged in as: {} | Project: {}", session.user, project.name),
            None => format!("Logged in as: {}", session.user),
        }
    }

    pub fn section_view(&self, session: &WizardSession, section: Section) -> SectionView {
        let resolved = session.sections.resolve_section(section);
        let original_input = session
            .sections
            .raw_input(section.step())
            .map(|input| input.display())
            .filter(|input| !input.trim().is_empty())
            .unwrap_or_else(|| NO_INPUT.to_string());

        SectionView {
            section,
            name: section.name().to_string(),
            content: resolved.text_or(NO_CONTENT).into_owned(),
            is_edited: session.sections.edited(section).is_some(),
            original_input,
        }
    }

    /// Store an edit for a section
    pub fn save_section(&self, session: &mut WizardSession, section: Section, text: &str) {
        info!(section = %section, "Saved section changes");
        session.sections.set_edited(section, text);
    }

    pub fn document(&self, session: &WizardSession) -> Document {
        DocumentAssembler::new(&session.sections).assemble_default()
    }

    /// Markdown preview of the whole document
    pub fn full_preview(&self, session: &WizardSession) -> Result<String> {
        render_preview(&self.document(session))
    }

    /// Serialize the document; the session is only read
    pub fn export_docx(&self, session: &WizardSession) -> Result<Vec<u8>> {
        self.writer.to_bytes(&self.document(session))
    }

    /// Export to a file, returning the number of bytes written
    pub fn export_to<P: AsRef<Path>>(&self, session: &WizardSession, path: P) -> Result<usize> {
        let written = self.writer.write_to(&self.document(session), path.as_ref())?;
        info!(path = %path.as_ref().display(), bytes = written, "Exported application");
        Ok(written)
    }
}

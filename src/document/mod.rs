//! @acp:module "Document Assembly"
//! @acp:summary "Builds the application document from resolved section content"
//! @acp:domain document
//! @acp:layer service
//!
//! Assembly reads each section through [`SectionStore::resolve`], so an edit
//! always wins over generated text. Structured drafts are laid out from their
//! fields directly; free text is cleaned of generation markers and split into
//! paragraphs and tables.

pub mod docx;
pub mod markdown;

use serde::Serialize;

use crate::draft::{clean_content, parse_blocks, TextBlock};
use crate::store::{GeneratedText, Resolved, SectionStore};
use crate::wizard::{Section, Step};

pub use docx::DocxWriter;
pub use markdown::render_preview;

/// Document title, also the level-0 heading of the export
pub const DOCUMENT_TITLE: &str = "ERDF Application";

/// Download name of the exported document
pub const EXPORT_FILE_NAME: &str = "ERDF_Application.docx";

/// Media type of the exported document
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Shown for sections without any content
pub const EMPTY_SECTION: &str = "No content provided for this section";

/// A content block inside a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Block {
    Paragraph(String),
    /// Header row first
    Table(Vec<Vec<String>>),
    /// Italic placeholder text
    Note(String),
}

/// One headed section of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSection {
    pub title: String,
    pub blocks: Vec<Block>,
}

/// Ordered, assembled application document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub title: String,
    pub sections: Vec<DocumentSection>,
}

impl Document {
    /// All paragraph, note and table cell text in order
    pub fn plain_text(&self) -> String {
        let mut out = vec![self.title.clone()];
        for section in &self.sections {
            out.push(section.title.clone());
            for block in &section.blocks {
                match block {
                    Block::Paragraph(text) | Block::Note(text) => out.push(text.clone()),
                    Block::Table(rows) => {
                        out.extend(rows.iter().map(|row| row.join(" ")));
                    }
                }
            }
        }
        out.join("\n")
    }
}

/// One entry of the assembly plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub title: String,
    pub section: Section,
    pub fallback: Step,
}

impl SectionEntry {
    pub fn for_section(section: Section) -> Self {
        Self {
            title: section.title(),
            section,
            fallback: section.step(),
        }
    }
}

/// The fixed plan: all seven sections in document order
pub fn default_entries() -> Vec<SectionEntry> {
    Section::all().iter().copied().map(SectionEntry::for_section).collect()
}

/// Assembles documents from a section store
#[derive(Debug, Clone, Copy)]
pub struct DocumentAssembler<'a> {
    store: &'a SectionStore,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(store: &'a SectionStore) -> Self {
        Self { store }
    }

    /// Assemble the given entries, in order
    pub fn assemble(&self, entries: &[SectionEntry]) -> Document {
        let sections = entries
            .iter()
            .map(|entry| DocumentSection {
                title: entry.title.clone(),
                blocks: self.section_blocks(entry.section, entry.fallback),
            })
            .collect();

        Document {
            title: DOCUMENT_TITLE.to_string(),
            sections,
        }
    }

    /// Assemble the standard seven-section document
    pub fn assemble_default(&self) -> Document {
        self.assemble(&default_entries())
    }

    /// Content blocks for one section
    pub fn section_blocks(&self, section: Section, fallback: Step) -> Vec<Block> {
        let blocks = match self.store.resolve(section, fallback) {
            Resolved::Generated(GeneratedText::Draft(draft)) => {
                let mut blocks = vec![Block::Paragraph(draft.intro.clone())];
                if let Some(ref table) = draft.table {
                    blocks.push(Block::Table(table.all_rows()));
                }
                if let Some(ref outro) = draft.outro {
                    blocks.push(Block::Paragraph(outro.clone()));
                }
                blocks
            }
            Resolved::Generated(GeneratedText::Revised(text)) => text_blocks(text),
            Resolved::Edited(text) => text_blocks(text),
            Resolved::Missing => Vec::new(),
        };

        if blocks.is_empty() {
            vec![Block::Note(EMPTY_SECTION.to_string())]
        } else {
            blocks
        }
    }
}

fn text_blocks(text: &str) -> Vec<Block> {
    parse_blocks(&clean_content(text))
        .into_iter()
        .map(|block| match block {
            TextBlock::Paragraph(text) => Block::Paragraph(text),
            TextBlock::Table(rows) => Block::Table(rows),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftGenerator;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_entries_follow_sections() {
        let entries = default_entries();
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0].title, "1. Project Summary");
        assert_eq!(entries[4].fallback, Step::RiskAnalysis);
    }

    #[test]
    fn test_missing_section_gets_note() {
        let store = SectionStore::new();
        let doc = DocumentAssembler::new(&store).assemble_default();
        assert_eq!(doc.title, DOCUMENT_TITLE);
        for section in &doc.sections {
            assert_eq!(section.blocks, vec![Block::Note(EMPTY_SECTION.to_string())]);
        }
    }

    #[test]
    fn test_draft_table_is_structured() {
        let mut store = SectionStore::new();
        store.set_draft(
            Step::Organisation,
            DraftGenerator::new().generate(Step::Organisation.label(), Some("roles")),
        );
        let blocks = DocumentAssembler::new(&store)
            .section_blocks(Section::OrganisationStructure, Step::Organisation);
        assert_eq!(blocks.len(), 3);
        match &blocks[1] {
            Block::Table(rows) => {
                assert_eq!(rows[0][0], "Role");
                assert_eq!(rows.len(), 4);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_edited_text_is_cleaned() {
        let mut store = SectionStore::new();
        store.set_edited(
            Section::TargetGroup,
            "**Your input:** x\n\n**AI-generated draft for Target Group:**\n\nOnly this.",
        );
        let blocks =
            DocumentAssembler::new(&store).section_blocks(Section::TargetGroup, Step::TargetGroup);
        assert_eq!(blocks, vec![Block::Paragraph("Only this.".to_string())]);
    }

    #[test]
    fn test_marker_only_edit_becomes_note() {
        let mut store = SectionStore::new();
        store.set_edited(Section::TargetGroup, "**AI-generated draft for Target Group:**\n\n");
        let blocks =
            DocumentAssembler::new(&store).section_blocks(Section::TargetGroup, Step::TargetGroup);
        assert_eq!(blocks, vec![Block::Note(EMPTY_SECTION.to_string())]);
    }

    fn edited_blocks(text: &str) -> Vec<Block> {
        let mut store = SectionStore::new();
        store.set_edited(Section::TargetGroup, text);
        DocumentAssembler::new(&store).section_blocks(Section::TargetGroup, Step::TargetGroup)
    }

    #[test]
    fn test_markers_with_single_newlines_are_stripped() {
        assert_eq!(
            edited_blocks("**Your input:** Rural SMEs\n**AI-generated draft for Target Group:**\nBody"),
            vec![Block::Paragraph("Body".to_string())]
        );
    }

    #[test]
    fn test_label_at_end_is_stripped() {
        assert_eq!(
            edited_blocks("Body\n\n**AI-generated draft for Target Group:**"),
            vec![Block::Paragraph("Body".to_string())]
        );
    }

    #[test]
    fn test_echo_at_end_is_stripped() {
        assert_eq!(
            edited_blocks("Body\n\n**Your input:** Rural SMEs"),
            vec![Block::Paragraph("Body".to_string())]
        );
        assert_eq!(
            edited_blocks("**Your input:** Rural SMEs"),
            vec![Block::Note(EMPTY_SECTION.to_string())]
        );
    }
}

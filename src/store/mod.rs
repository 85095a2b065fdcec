//! @acp:module "Section Store"
//! @acp:summary "Per-step section state and the edited-over-generated precedence rule"
//! @acp:domain wizard
//! @acp:layer model
//!
//! All section state is keyed by [`Step`]. Dashboard sections are views over
//! their canonical step, so the wizard and the dashboard always read and
//! write the same record.
//!
//! Resolution order, used by every consumer:
//! 1. edited text for the section
//! 2. generated text for the fallback step
//! 3. nothing ([`Resolved::Missing`]), rendered as a placeholder by the caller

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::draft::Draft;
use crate::wizard::input::RawInput;
use crate::wizard::{Section, Step};

/// Generated text for a step: a structured draft, or free text after an edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum GeneratedText {
    Draft(Draft),
    Revised(String),
}

impl GeneratedText {
    pub fn as_markdown(&self) -> Cow<'_, str> {
        match self {
            GeneratedText::Draft(draft) => Cow::Owned(draft.to_markdown()),
            GeneratedText::Revised(text) => Cow::Borrowed(text),
        }
    }
}

/// State held for one step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Input captured right before generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_input: Option<RawInput>,
    /// Never cleared once set; regeneration overwrites it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<GeneratedText>,
    /// User override, shadows `generated` downstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited: Option<String>,
}

/// Content a consumer should show for a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    Edited(&'a str),
    Generated(&'a GeneratedText),
    Missing,
}

impl<'a> Resolved<'a> {
    /// Text form, or `placeholder` when nothing exists yet
    pub fn text_or(&self, placeholder: &'a str) -> Cow<'a, str> {
        match self {
            Resolved::Edited(text) => Cow::Borrowed(text),
            Resolved::Generated(generated) => generated.as_markdown(),
            Resolved::Missing => Cow::Borrowed(placeholder),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Resolved::Missing)
    }
}

/// Single source of truth for section state within a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionStore {
    records: BTreeMap<Step, SectionRecord>,
}

impl SectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, step: Step) -> Option<&SectionRecord> {
        self.records.get(&step)
    }

    fn record_mut(&mut self, step: Step) -> &mut SectionRecord {
        self.records.entry(step).or_default()
    }

    pub fn raw_input(&self, step: Step) -> Option<&RawInput> {
        self.record(step).and_then(|r| r.raw_input.as_ref())
    }

    pub fn set_raw_input(&mut self, step: Step, input: RawInput) {
        self.record_mut(step).raw_input = Some(input);
    }

    pub fn generated(&self, step: Step) -> Option<&GeneratedText> {
        self.record(step).and_then(|r| r.generated.as_ref())
    }

    /// Store a fresh draft; any existing edit is left in place
    pub fn set_draft(&mut self, step: Step, draft: Draft) {
        self.record_mut(step).generated = Some(GeneratedText::Draft(draft));
    }

    pub fn edited(&self, section: Section) -> Option<&str> {
        self.record(section.step()).and_then(|r| r.edited.as_deref())
    }

    /// Write the edited override for a section
    pub fn set_edited(&mut self, section: Section, text: impl Into<String>) {
        self.record_mut(section.step()).edited = Some(text.into());
    }

    /// Wizard-side edit: override and generated text both take the new value
    pub fn record_step_edit(&mut self, step: Step, text: &str) {
        let record = self.record_mut(step);
        record.edited = Some(text.to_string());
        record.generated = Some(GeneratedText::Revised(text.to_string()));
    }

    /// Edited text for `section`, else generated text for `fallback`
    pub fn resolve(&self, section: Section, fallback: Step) -> Resolved<'_> {
        if let Some(edited) = self.edited(section) {
            return Resolved::Edited(edited);
        }
        match self.generated(fallback) {
            Some(generated) => Resolved::Generated(generated),
            None => Resolved::Missing,
        }
    }

    /// Resolve through the section's canonical step
    pub fn resolve_section(&self, section: Section) -> Resolved<'_> {
        self.resolve(section, section.step())
    }

    /// True when no step has generated or edited text
    pub fn is_empty(&self) -> bool {
        self.records.values().all(|r| r.generated.is_none() && r.edited.is_none())
    }
}

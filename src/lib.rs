#![forbid(unsafe_code)]

//! @acp:module "ERDF Wizard Library"
//! @acp:summary "Multi-step grant application wizard with review dashboard and DOCX export"
//! @acp:domain core
//! @acp:layer api
//! @acp:stability experimental
//!
//! # ERDF Wizard
//!
//! Walks an applicant through a fixed sequence of steps, drafts placeholder
//! text for each one, and assembles the sections into an application
//! document.
//!
//! ## Features
//!
//! - **Linear Wizard**: nine steps with clamped Previous/Next navigation
//! - **Structured Drafts**: deterministic templates, tables kept as tables
//! - **Edit Precedence**: an edited section always shadows its generated text
//! - **Export**: markdown preview and `.docx` output
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use erdf::{Dashboard, RawInput, Section, Step, WizardController, WizardSession};
//!
//! fn main() -> erdf::Result<()> {
//!     let mut session = WizardSession::new("applicant@example.com");
//!     let controller = WizardController::with_latency(Duration::ZERO);
//!
//!     controller.request_generation(
//!         &mut session,
//!         Step::BasicInfo,
//!         RawInput::text("Solar microgrid for rural schools"),
//!     );
//!     Dashboard::new().save_section(&mut session, Section::RiskAnalysis, "Revised risk text");
//!
//!     Dashboard::new().export_to(&session, "ERDF_Application.docx")?;
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod dashboard;
pub mod document;
pub mod draft;
pub mod error;
pub mod store;
pub mod wizard;

// Re-exports
pub use config::Config;
pub use dashboard::{Dashboard, SectionView};
pub use document::{Block, Document, DocumentAssembler, DocxWriter, SectionEntry};
pub use draft::{Draft, DraftGenerator, DraftTable};
pub use error::{Result, WizardError};
pub use store::{GeneratedText, Resolved, SectionRecord, SectionStore};
pub use wizard::{
    InputKind, ProjectInfo, RawInput, Section, Step, StepForm, WizardController, WizardSession,
    WorkPackage,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

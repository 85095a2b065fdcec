//! @acp:module "Errors"
//! @acp:summary "Library error type and result alias"
//! @acp:domain core
//! @acp:layer model
//!
//! Core wizard operations are total. Errors only come from form validation,
//! config/session files, and document serialization.

use thiserror::Error;

/// @acp:summary "Errors raised by the wizard library"
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown step index: {0}")]
    UnknownStep(usize),

    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Export failed: {0}")]
    Export(String),
}

impl WizardError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        WizardError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<zip::result::ZipError> for WizardError {
    fn from(err: zip::result::ZipError) -> Self {
        WizardError::Export(err.to_string())
    }
}

impl From<handlebars::RenderError> for WizardError {
    fn from(err: handlebars::RenderError) -> Self {
        WizardError::Template(err.to_string())
    }
}

impl From<handlebars::TemplateError> for WizardError {
    fn from(err: handlebars::TemplateError) -> Self {
        WizardError::Template(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WizardError>;

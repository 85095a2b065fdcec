//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod dashboard;
pub mod edit;
pub mod export;
pub mod generate;
pub mod preview;
pub mod steps;
pub mod wizard;

pub use dashboard::{execute_dashboard, run_dashboard, DashboardOptions};
pub use edit::{execute_edit, EditOptions};
pub use export::{execute_export, ExportOptions};
pub use generate::{execute_generate, GenerateOptions};
pub use preview::{execute_preview, PreviewOptions};
pub use steps::{execute_steps, StepsOptions};
pub use wizard::{execute_wizard, WizardOptions};

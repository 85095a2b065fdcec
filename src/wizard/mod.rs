//! @acp:module "Wizard"
//! @acp:summary "Linear application wizard: steps, sections, input, session and controller"
//! @acp:domain wizard
//! @acp:layer service
//!
//! The wizard walks a fixed catalog of nine steps. Seven of them feed a named
//! section of the final application document:
//!
//! | Section | Step |
//! |---|---|
//! | Project Summary | Project Start and Basic Info |
//! | Challenges and Needs | Agenda 2030 Goal |
//! | Target Group | Target Group |
//! | Organisation Structure | Organisation & Competence |
//! | Risk Analysis | Risk Analysis & Reporting Methods |
//! | Communication Plan | Communication Plan & Dissemination |
//! | Internal Policies | Internal Policies |

pub mod controller;
pub mod input;
pub mod section;
pub mod session;
pub mod step;

pub use controller::{WizardController, DEFAULT_LATENCY};
pub use input::{ProjectInfo, RawInput, StepForm, WORK_PACKAGE_TEMPLATES};
pub use section::Section;
pub use session::{WizardSession, WorkPackage};
pub use step::{InputKind, Step, UPLOAD_SENTINEL};

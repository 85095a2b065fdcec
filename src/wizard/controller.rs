//! @acp:module "Wizard Controller"
//! @acp:summary "Step navigation, input capture, generation and edit reconciliation"
//! @acp:domain wizard
//! @acp:layer service
//!
//! Every operation takes the session explicitly and always succeeds.
//! Navigation clamps at both ends of the catalog; generation blocks for the
//! configured latency and then stores the draft.

use std::time::Duration;

use tracing::{debug, info};

use super::input::{RawInput, StepForm};
use super::session::{WizardSession, WorkPackage};
use super::step::Step;
use crate::draft::{work_package_description, DraftGenerator};
use crate::error::Result;

/// Default simulated generation latency
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

/// Drives one session through the wizard
#[derive(Debug, Clone)]
pub struct WizardController {
    generator: DraftGenerator,
    latency: Duration,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardController {
    pub fn new() -> Self {
        Self {
            generator: DraftGenerator::new(),
            latency: DEFAULT_LATENCY,
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            generator: DraftGenerator::new(),
            latency,
        }
    }

    pub fn current_step(&self, session: &WizardSession) -> Step {
        session.step()
    }

    /// Move one step forward; no-op on the last step
    pub fn advance(&self, session: &mut WizardSession) -> Step {
        if let Some(next) = session.step().next() {
            debug!(from = %session.step(), to = %next, "advance");
            session.set_step(next);
        }
        session.step()
    }

    /// Move one step back; no-op on the first step
    pub fn retreat(&self, session: &mut WizardSession) -> Step {
        if let Some(previous) = session.step().previous() {
            debug!(from = %session.step(), to = %previous, "retreat");
            session.set_step(previous);
        }
        session.step()
    }

    /// Capture the raw input of a step verbatim
    pub fn submit_input(&self, session: &mut WizardSession, step: Step, input: RawInput) {
        session.sections.set_raw_input(step, input);
    }

    /// Validate a step form and capture its input
    pub fn submit_form(&self, session: &mut WizardSession, form: &StepForm) -> Result<RawInput> {
        form.validate()?;
        if let Some(project) = form.project_info() {
            session.project = Some(project);
        }
        let input = form.raw_input();
        self.submit_input(session, form.step(), input.clone());
        Ok(input)
    }

    /// Generate the draft for a step and store it as its generated text
    ///
    /// Blocks for the configured latency. An existing edit is kept.
    pub fn request_generation(
        &self,
        session: &mut WizardSession,
        step: Step,
        input: RawInput,
    ) -> String {
        let generation_input = input.generation_input();
        self.submit_input(session, step, input);

        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        let draft = self.generator.generate(step.label(), Some(&generation_input));
        let text = draft.to_markdown();
        info!(step = %step, table = draft.is_table(), "Generated draft");
        session.sections.set_draft(step, draft);
        text
    }

    /// Reconcile text from the step's draft editor
    ///
    /// Returns `false` when the step has nothing generated yet or the text is
    /// unchanged. Otherwise the text becomes both the edit and the generated
    /// text of the step.
    pub fn record_edit(&self, session: &mut WizardSession, step: Step, text: &str) -> bool {
        let changed = match session.sections.generated(step) {
            Some(generated) => generated.as_markdown() != text,
            None => false,
        };
        if changed {
            debug!(step = %step, "Recorded edit");
            session.sections.record_step_edit(step, text);
        }
        changed
    }

    /// Templates are offered once work packages have been generated
    pub fn templates_available(&self, session: &WizardSession) -> bool {
        session.sections.generated(Step::WorkPackages).is_some()
    }

    /// Append a work package built from a template name
    pub fn add_template<'a>(&self, session: &'a mut WizardSession, name: &str) -> &'a WorkPackage {
        session.push_work_package(WorkPackage {
            name: name.to_string(),
            description: work_package_description(name),
        });
        debug!(template = name, count = session.work_packages().len(), "Added work package");
        &session.work_packages()[session.work_packages().len() - 1]
    }

    /// Confirm the final step; returns whether the wizard is now complete
    pub fn confirm_submission(&self, session: &mut WizardSession) -> bool {
        if session.step() == Step::last() && !session.is_complete() {
            info!(session = %session.id, "Wizard complete");
            session.mark_complete();
        }
        session.is_complete()
    }
}

//! @acp:module "Wizard Command"
//! @acp:summary "Interactive step-by-step application wizard"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `erdf wizard`. Each menu choice is one interaction: it mutates
//! the session, the snapshot is saved, and the step is shown again.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Editor, Input, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::WizardError;
use crate::wizard::input::{
    validate_idea, AGENDA_GOALS, GENERIC_RISKS, MAX_IDEA_CHARS, PROGRAMME_AREAS, REGIONS,
};
use crate::wizard::{
    RawInput, Step, StepForm, WizardController, WizardSession, WORK_PACKAGE_TEMPLATES,
};

use super::dashboard::{run_dashboard, DashboardOptions};

/// Options for the wizard command
#[derive(Debug, Clone)]
pub struct WizardOptions {
    /// Session snapshot path
    pub session: PathBuf,
    /// User identity for new sessions
    pub user: String,
    /// Simulated generation latency
    pub latency: Duration,
    /// Discard any saved session and start over
    pub restart: bool,
    /// Export target used once the dashboard opens
    pub export_path: PathBuf,
}

/// One choice in the step menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Generate,
    EditDraft,
    AddTemplate(&'static str),
    Finish,
    Previous,
    Next,
    Quit,
}

impl Action {
    fn label(&self, step: Step) -> String {
        match self {
            Action::Generate => step.generate_action().to_string(),
            Action::EditDraft => "✏️  Edit AI-generated draft".to_string(),
            Action::AddTemplate(name) => format!("Add {}", name),
            Action::Finish => "👉 Go to Dashboard".to_string(),
            Action::Previous => "◀ Previous".to_string(),
            Action::Next => "Next ▶".to_string(),
            Action::Quit => "Save and quit".to_string(),
        }
    }
}

/// Execute the wizard command
pub fn execute_wizard(options: WizardOptions) -> Result<()> {
    let mut session = if options.restart {
        WizardSession::new(&options.user)
    } else {
        WizardSession::load_or_new(&options.session, &options.user)
            .with_context(|| format!("Failed to load session {}", options.session.display()))?
    };
    let controller = WizardController::with_latency(options.latency);

    if !session.is_complete() {
        run_wizard(&controller, &mut session, &options)?;
    } else {
        println!(
            "{} Wizard already completed, opening dashboard (use --restart to start over)",
            style("→").cyan()
        );
    }

    if session.is_complete() {
        let dashboard_options = DashboardOptions {
            session: options.session.clone(),
            user: options.user.clone(),
            export_path: options.export_path.clone(),
        };
        run_dashboard(&mut session, &dashboard_options)?;
    }

    Ok(())
}

fn run_wizard(
    controller: &WizardController,
    session: &mut WizardSession,
    options: &WizardOptions,
) -> Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        let step = controller.current_step(session);
        print_step_header(session, step);
        print_draft(session, step);
        print_work_packages(session, step);

        let actions = available_actions(controller, session, step);
        let labels: Vec<String> = actions.iter().map(|a| a.label(step)).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("Choose an action")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions[choice] {
            Action::Generate => generate_step(controller, session, step, &theme)?,
            Action::EditDraft => edit_draft(controller, session, step)?,
            Action::AddTemplate(name) => {
                let package = controller.add_template(session, name);
                println!("{} Added {}", style("✓").green(), style(&package.name).cyan());
            }
            Action::Finish => {
                let confirmed = Confirm::with_theme(&theme)
                    .with_prompt("All steps complete! Go to your Dashboard to review and edit all sections?")
                    .default(true)
                    .interact()?;
                if confirmed && controller.confirm_submission(session) {
                    session.save(&options.session)?;
                    return Ok(());
                }
            }
            Action::Previous => {
                controller.retreat(session);
            }
            Action::Next => {
                controller.advance(session);
            }
            Action::Quit => {
                session.save(&options.session)?;
                println!(
                    "{} Session saved to {}",
                    style("✓").green(),
                    options.session.display()
                );
                return Ok(());
            }
        }

        session.save(&options.session)?;
    }
}

fn available_actions(
    controller: &WizardController,
    session: &WizardSession,
    step: Step,
) -> Vec<Action> {
    let mut actions = Vec::new();

    if step.generates() {
        actions.push(Action::Generate);
    } else {
        actions.push(Action::Finish);
    }
    if session.sections.generated(step).is_some() {
        actions.push(Action::EditDraft);
    }
    if step == Step::WorkPackages && controller.templates_available(session) {
        actions.extend(WORK_PACKAGE_TEMPLATES.iter().copied().map(Action::AddTemplate));
    }
    if step.previous().is_some() {
        actions.push(Action::Previous);
    }
    if step.next().is_some() {
        actions.push(Action::Next);
    }
    actions.push(Action::Quit);
    actions
}

fn print_step_header(session: &WizardSession, step: Step) {
    println!();
    println!(
        "{} | Logged in as: {}",
        style("🧙 ERDF Application Wizard").bold(),
        style(session.username()).dim()
    );
    println!(
        "{}",
        style(format!("Step {}/{}: {}", step.index() + 1, Step::COUNT, step.label())).bold()
    );
    println!("{}", style("─".repeat(60)).dim());
}

fn print_draft(session: &WizardSession, step: Step) {
    if let Some(generated) = session.sections.generated(step) {
        println!("{}", style("AI-Generated Draft").cyan());
        println!("{}", generated.as_markdown());
        println!();
        println!(
            "{}",
            style("ℹ️  Remember to generate again if you make changes to your inputs.").dim()
        );
    }
}

fn print_work_packages(session: &WizardSession, step: Step) {
    if step != Step::WorkPackages || session.work_packages().is_empty() {
        return;
    }
    println!("{}", style("Work packages:").bold());
    for (i, package) in session.work_packages().iter().enumerate() {
        println!("  {}. {} - {}", i + 1, style(&package.name).cyan(), package.description);
    }
}

fn generate_step(
    controller: &WizardController,
    session: &mut WizardSession,
    step: Step,
    theme: &ColorfulTheme,
) -> Result<()> {
    let form = prompt_form(session, step, theme)?;
    let input = match controller.submit_form(session, &form) {
        Ok(input) => input,
        Err(WizardError::InvalidInput { field, reason }) => {
            tracing::warn!(field = %field, "Rejected input: {}", reason);
            eprintln!("{} Invalid {}: {}", style("✗").red(), field, reason);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(step.spinner_message());
    spinner.enable_steady_tick(Duration::from_millis(100));
    controller.request_generation(session, step, input);
    spinner.finish_and_clear();

    println!("{} Draft generated for {}", style("✓").green(), style(step.label()).cyan());
    Ok(())
}

fn edit_draft(controller: &WizardController, session: &mut WizardSession, step: Step) -> Result<()> {
    let current = match session.sections.generated(step) {
        Some(generated) => generated.as_markdown().into_owned(),
        None => return Ok(()),
    };

    let edited = Editor::new().extension(".md").edit(&current)?;
    let changed = edited
        .map(|text| controller.record_edit(session, step, &text))
        .unwrap_or(false);

    if changed {
        println!("{} Draft updated", style("✓").green());
    } else {
        println!("{} No changes", style("→").dim());
    }
    Ok(())
}

fn previous_text(session: &WizardSession, step: Step) -> String {
    match session.sections.raw_input(step) {
        Some(RawInput::Text(text)) => text.clone(),
        _ => String::new(),
    }
}

fn prompt_text(theme: &ColorfulTheme, prompt: &str, initial: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?)
}

fn prompt_choice(theme: &ColorfulTheme, prompt: &str, options: &[&str]) -> Result<String> {
    let index = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(options)
        .default(0)
        .interact()?;
    Ok(options[index].to_string())
}

/// Collect the form for a step from interactive prompts
fn prompt_form(session: &WizardSession, step: Step, theme: &ColorfulTheme) -> Result<StepForm> {
    let previous = previous_text(session, step);

    let form = match step {
        Step::BasicInfo => {
            let project = session.project.clone().unwrap_or_default();
            let project_name = prompt_text(theme, "Project name", &project.name)?;
            let region = prompt_choice(theme, "Financier/Region", REGIONS)?;
            let programme = prompt_choice(theme, "Programme area (ERDF)", PROGRAMME_AREAS)?;
            let idea = Input::<String>::with_theme(theme)
                .with_prompt(format!("Short project idea (max {} characters)", MAX_IDEA_CHARS))
                .with_initial_text(previous)
                .allow_empty(true)
                .validate_with(|s: &String| validate_idea(s).map_err(|e| e.to_string()))
                .interact_text()?;
            StepForm::BasicInfo { project_name, region, programme, idea }
        }
        Step::AgendaGoal => StepForm::AgendaGoal {
            goal: prompt_choice(theme, "Select Agenda 2030 Goal", AGENDA_GOALS)?,
        },
        Step::TargetGroup => StepForm::TargetGroup {
            description: prompt_text(
                theme,
                "Describe your target group in one concise description",
                &previous,
            )?,
        },
        Step::WorkPackages => StepForm::WorkPackages,
        Step::Organisation => StepForm::Organisation {
            keywords: prompt_text(theme, "Enter keywords for roles and competencies", &previous)?,
        },
        Step::RiskAnalysis => {
            let selected = MultiSelect::with_theme(theme)
                .with_prompt("Select 3-4 generic risks")
                .items(GENERIC_RISKS)
                .interact()?;
            StepForm::RiskAnalysis {
                risks: selected.iter().map(|&i| GENERIC_RISKS[i].to_string()).collect(),
            }
        }
        Step::CommunicationPlan => StepForm::CommunicationPlan {
            audiences: prompt_text(theme, "Audiences (e.g., businesses, youth)", "")?,
            channels: prompt_text(theme, "Channels (e.g., LinkedIn, website)", "")?,
            messages: prompt_text(theme, "Messages (e.g., sustainability)", &previous)?,
        },
        Step::InternalPolicies => {
            let paths = prompt_text(
                theme,
                "Upload policy documents (optional, comma-separated pdf/docx paths)",
                "",
            )?;
            StepForm::InternalPolicies {
                documents: paths
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from)
                    .collect(),
            }
        }
        Step::FinalSubmission => StepForm::FinalSubmission,
    };

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_actions() {
        let controller = WizardController::with_latency(Duration::ZERO);
        let session = WizardSession::new("a@b.c");
        let actions = available_actions(&controller, &session, Step::BasicInfo);
        assert_eq!(actions, vec![Action::Generate, Action::Next, Action::Quit]);
    }

    #[test]
    fn test_work_package_templates_offered_after_generation() {
        let controller = WizardController::with_latency(Duration::ZERO);
        let mut session = WizardSession::new("a@b.c");
        controller.request_generation(&mut session, Step::WorkPackages, RawInput::Empty);
        let actions = available_actions(&controller, &session, Step::WorkPackages);
        assert!(actions.contains(&Action::EditDraft));
        assert!(actions.contains(&Action::AddTemplate("Pilot Lab")));
        assert!(actions.contains(&Action::Previous));
    }

    #[test]
    fn test_last_step_offers_finish() {
        let controller = WizardController::with_latency(Duration::ZERO);
        let session = WizardSession::new("a@b.c");
        let actions = available_actions(&controller, &session, Step::FinalSubmission);
        assert_eq!(actions[0], Action::Finish);
        assert!(!actions.contains(&Action::Next));
    }
}

//! @acp:module "Dashboard Command"
//! @acp:summary "Interactive review, edit and export of application sections"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `erdf dashboard`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Editor, Select};

use crate::dashboard::Dashboard;
use crate::document::{DocxWriter, DOCX_MEDIA_TYPE};
use crate::wizard::{Section, WizardSession};

/// Options for the dashboard command
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    /// Session snapshot path
    pub session: PathBuf,
    /// User identity for new sessions
    pub user: String,
    /// Where "Download as DOCX" writes
    pub export_path: PathBuf,
}

const FULL_PREVIEW: &str = "Full Document Preview";
const QUIT: &str = "Quit";

/// Execute the dashboard command
pub fn execute_dashboard(options: DashboardOptions) -> Result<()> {
    let mut session = WizardSession::load_or_new(&options.session, &options.user)
        .with_context(|| format!("Failed to load session {}", options.session.display()))?;

    if !session.is_complete() {
        println!(
            "{} The wizard has not been completed yet; showing what exists so far",
            style("⚠").yellow()
        );
    }

    run_dashboard(&mut session, &options)
}

/// Dashboard loop over an already loaded session
pub fn run_dashboard(session: &mut WizardSession, options: &DashboardOptions) -> Result<()> {
    let theme = ColorfulTheme::default();
    let dashboard = Dashboard::with_writer(
        DocxWriter::new()
            .author(session.user.clone())
            .created(session.created_at),
    );

    loop {
        println!();
        println!("{}", style("📋 ERDF Application Dashboard").bold());
        println!("{}", style(dashboard.header(session)).dim());

        let mut items: Vec<&str> = Section::all().iter().map(|s| s.name()).collect();
        items.push(FULL_PREVIEW);
        items.push(QUIT);

        let choice = Select::with_theme(&theme)
            .with_prompt("Sections")
            .items(&items)
            .default(0)
            .interact()?;

        match items[choice] {
            QUIT => return Ok(()),
            FULL_PREVIEW => full_preview(&dashboard, session, options, &theme)?,
            _ => {
                let section = Section::all()[choice];
                section_detail(&dashboard, session, section, options, &theme)?;
            }
        }
    }
}

fn section_detail(
    dashboard: &Dashboard,
    session: &mut WizardSession,
    section: Section,
    options: &DashboardOptions,
    theme: &ColorfulTheme,
) -> Result<()> {
    let view = dashboard.section_view(session, section);
    println!();
    println!("{}", style(format!("✏️  {}", view.name)).bold());
    if view.is_edited {
        println!("{}", style("(edited)").dim());
    }
    println!("{}", view.content);
    println!();
    println!("{}", style("Your Original Input").bold());
    println!("  {}", style(&view.original_input).cyan());

    let choice = Select::with_theme(theme)
        .items(&["Edit this section", "Back"])
        .default(1)
        .interact()?;

    if choice == 0 {
        edit_section(dashboard, session, section, &view.content, options)?;
    }
    Ok(())
}

fn edit_section(
    dashboard: &Dashboard,
    session: &mut WizardSession,
    section: Section,
    current: &str,
    options: &DashboardOptions,
) -> Result<()> {
    match Editor::new().extension(".md").edit(current)? {
        Some(text) => {
            dashboard.save_section(session, section, &text);
            session.save(&options.session)?;
            println!("{} Changes to {} saved!", style("✓").green(), section.name());
        }
        None => println!("{} Edit cancelled", style("→").dim()),
    }
    Ok(())
}

fn full_preview(
    dashboard: &Dashboard,
    session: &mut WizardSession,
    options: &DashboardOptions,
    theme: &ColorfulTheme,
) -> Result<()> {
    println!();
    println!("{}", style("📄 Complete Application Document").bold());
    println!("{}", dashboard.full_preview(session)?);
    println!();

    let choice = Select::with_theme(theme)
        .with_prompt("Export Options")
        .items(&["Edit a section", "⬇️  Download as DOCX", "Back"])
        .default(2)
        .interact()?;

    match choice {
        0 => {
            let names: Vec<&str> = Section::all().iter().map(|s| s.name()).collect();
            let index = Select::with_theme(theme)
                .with_prompt("Select section to edit")
                .items(&names)
                .default(0)
                .interact()?;
            let section = Section::all()[index];
            let view = dashboard.section_view(session, section);
            edit_section(dashboard, session, section, &view.content, options)?;
        }
        1 => match dashboard.export_to(session, &options.export_path) {
            Ok(bytes) => println!(
                "{} Wrote {} ({} bytes, {})",
                style("✓").green(),
                options.export_path.display(),
                bytes,
                style(DOCX_MEDIA_TYPE).dim()
            ),
            Err(e) => eprintln!("{} Export failed: {}", style("✗").red(), e),
        },
        _ => {}
    }
    Ok(())
}

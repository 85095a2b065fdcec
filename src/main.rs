#![forbid(unsafe_code)]
//! ERDF Wizard Command Line Interface

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use erdf::commands::{
    execute_dashboard, execute_edit, execute_export, execute_generate, execute_preview,
    execute_steps, execute_wizard, DashboardOptions, EditOptions, ExportOptions, GenerateOptions,
    PreviewOptions, StepsOptions, WizardOptions,
};
use erdf::config::CONFIG_FILE;
use erdf::{Config, Section};

#[derive(Parser)]
#[command(name = "erdf")]
#[command(about = "ERDF Application Wizard - draft, review and export grant applications")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Session snapshot path (overrides config)
    #[arg(short, long, global = true)]
    session: Option<PathBuf>,

    /// Logged-in user, email-like (overrides config)
    #[arg(short, long, global = true, env = "ERDF_USER")]
    user: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive application wizard
    Wizard {
        /// Discard the saved session and start from step 1
        #[arg(long)]
        restart: bool,

        /// Simulated generation latency in milliseconds (overrides config)
        #[arg(long)]
        latency_ms: Option<u64>,
    },

    /// Review, edit and export the application sections
    Dashboard,

    /// Print the full document preview
    Preview {
        /// Output the assembled document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the application as a DOCX file
    Export {
        /// Output file path (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the text of one section
    Edit {
        /// Section name (e.g. "Risk Analysis" or risk-analysis)
        section: Section,

        /// New text (reads from stdin if not provided)
        #[arg(short, long)]
        text: Option<String>,
    },

    /// Print the placeholder draft for a step
    Generate {
        /// Step index (0-8)
        #[arg(long)]
        step: usize,

        /// Input to echo into the draft
        #[arg(long)]
        input: Option<String>,

        /// Output the structured draft as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the wizard steps
    Steps {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "erdf=debug" } else { "erdf=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;

    let session = cli.session.unwrap_or_else(|| config.session_path.clone());
    let user = cli.user.unwrap_or_else(|| config.user.clone());

    match cli.command {
        Commands::Wizard { restart, latency_ms } => {
            let latency = latency_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.generation_latency());
            let options = WizardOptions {
                session,
                user,
                latency,
                restart,
                export_path: config.export_path.clone(),
            };
            execute_wizard(options)?;
        }

        Commands::Dashboard => {
            let options = DashboardOptions {
                session,
                user,
                export_path: config.export_path.clone(),
            };
            execute_dashboard(options)?;
        }

        Commands::Preview { json } => {
            let options = PreviewOptions { session, user, json };
            execute_preview(options)?;
        }

        Commands::Export { output } => {
            let options = ExportOptions {
                session,
                user,
                output: output.unwrap_or_else(|| config.export_path.clone()),
            };
            execute_export(options)?;
        }

        Commands::Edit { section, text } => {
            let options = EditOptions {
                session,
                user,
                section,
                text,
            };
            execute_edit(options)?;
        }

        Commands::Generate { step, input, json } => {
            let options = GenerateOptions { step, input, json };
            execute_generate(options)?;
        }

        Commands::Steps { json } => {
            execute_steps(StepsOptions { json })?;
        }
    }

    Ok(())
}

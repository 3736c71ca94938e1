use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use unitsmith::{
    cli::{Cli, Commands},
    config::Config,
    install,
    prompt::Prompter,
    render::render_unit,
    wizard,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr; stdout belongs to the prompts
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Create {
            unit_dir,
            no_install,
            output,
        } => {
            let config = Config::load()?;
            let unit_dir = unit_dir.unwrap_or_else(|| config.unit_dir.clone());
            let backup_dir = match output {
                Some(dir) => dir,
                None => std::env::current_dir().context("Failed to resolve current directory")?,
            };

            // Privilege is judged once up front; a negative answer
            // downgrades the run to file generation only.
            let will_install = !no_install && install::can_install(&unit_dir);
            if no_install {
                info!("Skipping install (--no-install)");
            } else if !will_install {
                warn!(
                    "Cannot write {}; the unit file will be generated but not installed",
                    unit_dir.display()
                );
            }

            let stdin = std::io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());

            let session = wizard::run(&mut prompter, &config, &unit_dir, will_install)?;
            let definition = session.definition;
            let file_name = definition.unit_file_name();

            let text = render_unit(&definition);
            let staged = install::stage(&text, &file_name, &backup_dir)?;
            prompter.status(&format!("Wrote {}", staged.backup_path.display()))?;

            if will_install {
                let outcome = install::install(
                    &staged,
                    &definition.name,
                    &file_name,
                    &unit_dir,
                    definition.auto_start_on_boot,
                    session.start_now,
                )?;
                prompter.status(&summary_line(&definition.name, &outcome, session.start_now))?;
            } else {
                prompter.status(&install::manual_instructions(
                    &staged.backup_path,
                    &unit_dir,
                    &definition.name,
                    definition.auto_start_on_boot,
                ))?;
            }
        }
        Commands::Version => {
            println!("unitsmith {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// One explicit status line per run. A failed start is a warning, not a
/// failure; the unit file is already in place.
fn summary_line(name: &str, outcome: &install::InstallOutcome, wanted_start: bool) -> String {
    let enabled = if outcome.enabled { ", enabled" } else { "" };
    if wanted_start && !outcome.started {
        format!(
            "warning: {} installed{} but did not start; see diagnostics above",
            name, enabled
        )
    } else if outcome.started {
        format!("success: {} installed{} and started", name, enabled)
    } else {
        format!("success: {} installed{}", name, enabled)
    }
}

//! rules - Command-line inspector for progression and eligibility queries

mod commands;
mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use rules_core::config::{self, RulesConfig};
use rules_core::{bundled, RulesContent};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Inspect class progressions and feat/archetype eligibility
#[derive(Parser, Debug)]
#[command(name = "rules")]
#[command(about = "Resolve proficiency progressions and check feat eligibility", long_about = None)]
#[command(version)]
struct Cli {
    /// Load feats.toml, archetypes.toml and classes.toml from this directory
    /// instead of the bundled content
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Rules settings (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a class's proficiency tables, or resolve them at a level
    Progression {
        class: String,

        /// Only this track (e.g. fortitude, martial_weapons)
        #[arg(long)]
        track: Option<String>,

        /// Resolve ranks and bonuses at this character level
        #[arg(long)]
        level: Option<u32>,
    },

    /// Check whether a character may take a feat
    Check {
        /// Character snapshot (.toml or .json)
        snapshot: PathBuf,
        feat: String,
    },

    /// Check an archetype's prerequisites and list its available feats
    Archetype {
        /// Character snapshot (.toml or .json)
        snapshot: PathBuf,
        archetype: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    if verbose {
        filter = filter.add_directive(LevelFilter::DEBUG.into());
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<String, CliError> {
    let settings = match &cli.config {
        Some(path) => RulesConfig::load(path)?,
        None => RulesConfig::default(),
    };
    let content = load_content(cli.content.as_deref(), &settings)?;

    match cli.command {
        Command::Progression {
            class,
            track,
            level,
        } => commands::progression(&content, &settings, &class, track.as_deref(), level),
        Command::Check { snapshot, feat } => {
            let snapshot = commands::load_snapshot(&snapshot, &settings)?;
            commands::check(&content, &settings, &snapshot, &feat)
        }
        Command::Archetype {
            snapshot,
            archetype,
        } => {
            let snapshot = commands::load_snapshot(&snapshot, &settings)?;
            commands::archetype(&content, &settings, &snapshot, &archetype)
        }
    }
}

fn load_content(
    dir: Option<&Path>,
    settings: &RulesConfig,
) -> Result<Cow<'static, RulesContent>, CliError> {
    match dir {
        Some(dir) => Ok(Cow::Owned(config::load_content_dir(dir, settings)?)),
        None => bundled().map(Cow::Borrowed).map_err(CliError::Bundled),
    }
}

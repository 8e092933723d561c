use crate::config::DispatchGenConfig;
use crate::logging::init_logging;
use anyhow::Context;
use brrtdispatch_codegen::{generate, signatures, GeneratorConfig};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Command-line interface for the dispatcher generator
#[derive(Parser, Debug)]
#[command(name = "brrtdispatch-gen")]
#[command(about = "Generate typed request dispatcher source", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Options selecting the arity range, shared by every command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeArgs {
    /// Path to a config file (default: ./brrtdispatch.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Smallest handler arity to emit (overrides the config file)
    #[arg(long)]
    pub min_arity: Option<usize>,

    /// Largest handler arity to emit (overrides the config file)
    #[arg(long)]
    pub max_arity: Option<usize>,
}

impl RangeArgs {
    /// Config file values with the command-line overrides applied.
    ///
    /// # Errors
    ///
    /// Fails when the config file cannot be loaded.
    pub fn resolve(&self, dir: &Path) -> anyhow::Result<DispatchGenConfig> {
        Ok(DispatchGenConfig::resolve(self.config.as_deref(), dir)?
            .with_arity_overrides(self.min_arity, self.max_arity))
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Emit dispatcher source for the configured arity range
    Generate {
        #[command(flatten)]
        range: RangeArgs,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the dispatcher types the configured range produces
    Inspect {
        #[command(flatten)]
        range: RangeArgs,
    },
}

impl Commands {
    pub fn range(&self) -> &RangeArgs {
        match self {
            Commands::Generate { range, .. } | Commands::Inspect { range } => range,
        }
    }
}

/// Parse the process arguments, set up logging and run the command.
///
/// # Errors
///
/// Any config, generation or I/O failure.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let config = cli.command.range().resolve(&cwd)?;
    init_logging(&config.logging)?;

    let stdout = std::io::stdout();
    execute(&cli.command, &config.generator, &mut stdout.lock())
}

/// Run `command` with an already resolved generator config, writing any
/// listing or stdout output to `out`.
///
/// # Errors
///
/// Fails on an invalid arity range or when output cannot be written.
pub fn execute(
    command: &Commands,
    generator: &GeneratorConfig,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Commands::Generate { output, .. } => {
            let source = generate(generator)?;
            match output {
                Some(path) => {
                    std::fs::write(path, &source)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(
                        path = %path.display(),
                        types = generator.type_count(),
                        bytes = source.len(),
                        "Wrote dispatcher source"
                    );
                }
                None => out.write_all(source.as_bytes())?,
            }
        }
        Commands::Inspect { .. } => {
            generator.validate()?;
            for sig in signatures(generator) {
                writeln!(out, "{:<40} {sig}", sig.type_header())?;
            }
        }
    }
    Ok(())
}

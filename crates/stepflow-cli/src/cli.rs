use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "stepflow")]
#[command(version, about = "StepFlow - ReAct step engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (defaults to ~/.config/stepflow/config.toml)
    #[arg(long, global = true, env = "STEPFLOW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Replay scripted model responses through the engine
    Run(RunArgs),

    /// List the tools the engine would offer the model
    Tools,
}

#[derive(Args)]
pub struct RunArgs {
    /// Question to answer
    #[arg(short, long)]
    pub question: String,

    /// File of model responses separated by `---` lines
    #[arg(short, long)]
    pub responses: PathBuf,

    /// Override the configured iteration cap
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Seed ambient state with KEY=VALUE pairs
    #[arg(long = "var", value_parser = parse_key_value)]
    pub vars: Vec<(String, String)>,
}

/// Write completions for `shell` to stdout.
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

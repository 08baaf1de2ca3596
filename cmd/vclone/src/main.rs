//! vclone - voice cloning pipeline CLI.

use clap::{Parser, Subcommand};

mod commands;
mod placeholder;

use commands::{CloneCommand, SynthCommand, ValidateCommand, VoicesCommand};

/// Voice cloning pipeline CLI.
///
/// Imports a reference recording, runs the audio quality gate, builds a
/// voice profile, and synthesizes new speech in that voice. The embedding
/// and synthesis models are placeholders until real model backends land.
#[derive(Parser)]
#[command(name = "vclone")]
#[command(about = "Clone a voice from reference audio and synthesize speech")]
#[command(version)]
pub struct Cli {
    /// Config file (JSON or YAML; defaults root under ~/.vclone)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clone a voice from a reference recording
    Clone(CloneCommand),
    /// Run the quality gate on a recording without cloning
    Validate(ValidateCommand),
    /// Manage stored voice profiles
    Voices(VoicesCommand),
    /// Synthesize speech with a cloned voice and export a WAV
    Synth(SynthCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Clone(cmd) => cmd.run(&cli),
        Commands::Validate(cmd) => cmd.run(&cli),
        Commands::Voices(cmd) => cmd.run(&cli),
        Commands::Synth(cmd) => cmd.run(&cli),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

use std::path::PathBuf;

use anyhow::bail;
use clap::Args;

use super::build_workflow;
use crate::Cli;
use vclone_cloning::CloneError;

/// Clone a voice from a reference recording.
#[derive(Args)]
pub struct CloneCommand {
    /// Reference audio file (wav, mp3, m4a)
    #[arg(short, long)]
    audio: PathBuf,

    /// Name for the cloned voice
    #[arg(short, long)]
    name: String,
}

impl CloneCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let workflow = build_workflow(cli)?;

        match workflow.clone_voice(&self.audio, &self.name) {
            Ok(outcome) => {
                println!("Voice profile stored: {}", outcome.name);
                println!(
                    "  duration: {:.1}s  snr: {:.1}dB  sample rate: {} Hz",
                    outcome.report.duration_secs,
                    outcome.report.snr_db,
                    outcome.report.sample_rate
                );
                Ok(())
            }
            Err(CloneError::ValidationRejected { issues }) => {
                // Users need the exact quality bars that failed.
                eprintln!("Reference audio rejected:");
                for issue in &issues {
                    eprintln!("  - {issue}");
                }
                bail!("audio validation failed ({} issue(s))", issues.len())
            }
            Err(e) => Err(e.into()),
        }
    }
}

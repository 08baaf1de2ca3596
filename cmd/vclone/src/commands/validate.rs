use std::path::PathBuf;

use clap::Args;

use super::build_workflow;
use crate::Cli;

/// Run the quality gate on a recording without cloning.
#[derive(Args)]
pub struct ValidateCommand {
    /// Audio file to check
    #[arg(short, long)]
    audio: PathBuf,
}

impl ValidateCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let workflow = build_workflow(cli)?;
        let report = workflow.validate_file(&self.audio)?;

        println!(
            "duration: {:.1}s  snr: {:.1}dB  sample rate: {} Hz",
            report.duration_secs, report.snr_db, report.sample_rate
        );
        if report.is_valid {
            println!("OK: audio passes the quality gate");
        } else {
            println!("Rejected:");
            for issue in &report.issues {
                println!("  - {issue}");
            }
        }
        Ok(())
    }
}

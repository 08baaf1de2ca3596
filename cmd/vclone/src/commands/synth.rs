use std::path::PathBuf;

use clap::Args;

use super::build_workflow;
use crate::Cli;
use vclone_cloning::{SynthesisParams, Tone};

/// Synthesize speech with a cloned voice and export a WAV.
#[derive(Args)]
pub struct SynthCommand {
    /// Text to speak
    #[arg(short, long)]
    text: String,

    /// Stored voice name
    #[arg(long)]
    voice: String,

    /// Output WAV path (default: <exports_dir>/<voice>.wav)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Speech rate multiplier (allowed range set in config, default 0.8-1.5)
    #[arg(long, default_value_t = 1.0)]
    rate: f32,

    /// Pitch shift (allowed range set in config, default -15 to 15)
    #[arg(long, default_value_t = 0.0)]
    pitch: f32,

    /// Emotional tone: neutral, warm, or energetic
    #[arg(long, default_value = "neutral")]
    tone: Tone,
}

impl SynthCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let workflow = build_workflow(cli)?;

        let params = SynthesisParams {
            speech_rate: self.rate,
            pitch: self.pitch,
            tone: self.tone,
        };
        let wave = workflow.synthesize(&self.text, &self.voice, &params)?;
        let out = match &self.out {
            Some(path) => path.clone(),
            None => default_export_path(&workflow.config().exports_dir, &self.voice),
        };
        workflow.export(&wave, &out)?;

        println!(
            "Exported {:.1}s of audio to {}",
            wave.duration_secs(),
            out.display()
        );
        Ok(())
    }
}

fn default_export_path(exports_dir: &std::path::Path, voice: &str) -> PathBuf {
    exports_dir.join(format!("{voice}.wav"))
}

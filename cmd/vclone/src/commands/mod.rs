//! CLI command implementations.

mod clone;
mod synth;
mod validate;
mod voices;

pub use clone::CloneCommand;
pub use synth::SynthCommand;
pub use validate::ValidateCommand;
pub use voices::VoicesCommand;

use std::sync::Arc;

use anyhow::Context;

use crate::Cli;
use crate::placeholder::{RandomEmbedder, SineSynthesizer};
use vclone_cloning::{AppConfig, CloningWorkflow};

/// Resolves the effective configuration: `--config` file or defaults.
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    match &cli.config {
        Some(path) => {
            AppConfig::load(path).with_context(|| format!("loading config from {path}"))
        }
        None => Ok(AppConfig::default()),
    }
}

/// Builds a workflow wired to the placeholder model capabilities.
pub fn build_workflow(cli: &Cli) -> anyhow::Result<CloningWorkflow> {
    let config = load_config(cli)?;
    let synthesizer = Arc::new(SineSynthesizer::new(config.audio.sample_rate));
    let workflow = CloningWorkflow::new(config, Arc::new(RandomEmbedder::new()), synthesizer)?;
    Ok(workflow)
}

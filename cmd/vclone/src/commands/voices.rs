use clap::{Args, Subcommand};

use super::build_workflow;
use crate::Cli;

/// Manage stored voice profiles.
#[derive(Args)]
pub struct VoicesCommand {
    #[command(subcommand)]
    command: VoicesSubcommand,
}

#[derive(Subcommand)]
enum VoicesSubcommand {
    /// List stored voices
    List,
    /// Delete a stored voice (no error if absent)
    Delete {
        /// Voice name to delete
        #[arg(short, long)]
        name: String,
    },
}

impl VoicesCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let workflow = build_workflow(cli)?;
        let store = workflow.store();

        match &self.command {
            VoicesSubcommand::List => {
                let names = store.list()?;
                if names.is_empty() {
                    println!("No voices stored in {}", store.dir().display());
                } else {
                    for name in names {
                        println!("{name}");
                    }
                }
                Ok(())
            }
            VoicesSubcommand::Delete { name } => {
                store.delete(name)?;
                println!("Deleted voice: {name}");
                Ok(())
            }
        }
    }
}

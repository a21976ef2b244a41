pub mod completions;
pub mod divide;
pub mod init;
pub mod inspect;

use clap::{Parser, Subcommand};

/// layerdiv - RGB region layer divider
#[derive(Parser, Debug)]
#[command(name = "layerdiv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Divide a base-colour image into per-colour layers under its line art
    Divide(divide::DivideArgs),

    /// List the layers of a written document
    Inspect(inspect::InspectArgs),

    /// Initialize a layerdiv project (generates layerdiv.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

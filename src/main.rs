use clap::Parser;
use layerdiv::cli::{Cli, Commands};
use layerdiv::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Divide(args) => layerdiv::cli::divide::run(args, &printer)?,
        Commands::Inspect(args) => layerdiv::cli::inspect::run(args, &printer)?,
        Commands::Init(args) => layerdiv::cli::init::run(args, &printer)?,
        Commands::Completions(args) => layerdiv::cli::completions::run(args)?,
    }

    Ok(())
}

mod commands;
mod config;
mod error;
mod logger;
mod runner;
mod writer;
use crate::commands::Commands;
use crate::error::Error;
use crate::logger::Logger;
use crate::runner::{Runnable, Runner};
use crate::writer::Writer;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "local-code-uri",
    version,
    about = "Point CodeUri of deployed SAM functions at a local build artifact",
    long_about = "Reads a deployed CloudFormation/SAM template, points CodeUri of its function resources at a local build artifact and prints the result, so that the functions can be run with `sam local invoke`. The template file itself is never modified.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Without a subcommand the template is patched
    #[command(flatten)]
    patch: commands::patch::PatchCommand,
}

/// Derive a runner from the command and run it
fn run(command: &impl Runnable, writer: &Writer) -> Result<(), Error> {
    command.runner(writer).run()
}

fn main() {
    Logger::init();

    if let Err(error) = color_eyre::install() {
        log::warn!("Failed to install error report handler: {error}");
    }

    let Cli { command, patch } = Cli::parse();
    let command = command.unwrap_or(Commands::Patch(patch));
    let writer = Writer::new(command.is_structured());

    // Match all commands here, in one place
    let result = match &command {
        Commands::Patch(cmd) => run(cmd, &writer),
        Commands::List(cmd) => run(cmd, &writer),
    };

    if let Err(error) = result {
        let output = format!("{}\n{error}\n", console::style("Error").red().bold());

        if writer.error(&output).is_err() {
            eprintln!("{output}");
        }

        std::process::exit(1);
    }
}

mod commands;
mod common;
mod input_output;
mod logging;

use clap::Parser;
use commands::Commands;

/// seqchipper: DNA training corpus and tokenizer preparation.
///
/// With no subcommand, runs `run` with its defaults.
#[derive(clap::Parser, Debug)]
pub struct Args {
    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    args.command.unwrap_or_default().run()
}

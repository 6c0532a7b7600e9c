mod cat;
mod prepare;
mod run;
mod tokenizer;

pub use run::RunArgs;

/// Subcommands for seqchipper
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Prepare the chunked training corpus.
    Prepare(prepare::PrepareArgs),

    /// Build the DNA tokenizer artifact.
    Tokenizer(tokenizer::TokenizerArgs),

    /// Prepare the corpus, then build the tokenizer (the default).
    Run(RunArgs),

    /// Act as a streaming tokenizer.
    Cat(cat::CatArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run(RunArgs::default())
    }
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Prepare(cmd) => cmd.run(),
            Commands::Tokenizer(cmd) => cmd.run(),
            Commands::Run(cmd) => cmd.run(),
            Commands::Cat(cmd) => cmd.run(),
        }
    }
}

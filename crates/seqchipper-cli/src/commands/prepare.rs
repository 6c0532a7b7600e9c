use crate::{common::CorpusArgs, logging::LogArgs};

/// Args for the prepare command.
#[derive(clap::Args, Debug)]
pub struct PrepareArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    corpus: CorpusArgs,
}

impl PrepareArgs {
    /// Run the prepare command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        self.corpus.prepare()?;
        Ok(())
    }
}

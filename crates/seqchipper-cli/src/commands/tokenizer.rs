use crate::{common::ArtifactArgs, logging::LogArgs};

/// Args for the tokenizer command.
#[derive(clap::Args, Debug)]
pub struct TokenizerArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    artifact: ArtifactArgs,
}

impl TokenizerArgs {
    /// Run the tokenizer command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let engine = self.artifact.build()?;
        log::info!("{} tokenizer ready", engine.name());
        Ok(())
    }
}

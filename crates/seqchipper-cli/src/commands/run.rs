use crate::{
    common::{ArtifactArgs, CorpusArgs},
    logging::LogArgs,
};

/// Args for the run command.
#[derive(clap::Args, Debug, Default)]
pub struct RunArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    corpus: CorpusArgs,

    #[command(flatten)]
    artifact: ArtifactArgs,
}

impl RunArgs {
    /// Run the run command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let prepared = self.corpus.prepare()?;
        let engine = self.artifact.build()?;

        log::info!("Data preparation complete!");
        for path in &prepared.files {
            log::info!("Corpus file: {}", path.display());
        }
        log::info!(
            "Tokenizer ({}): {}",
            engine.name(),
            self.artifact.dir()?.display()
        );
        Ok(())
    }
}

use std::path::PathBuf;

use seqchipper::{
    chunking::DEFAULT_MAX_CHUNK_LEN,
    export::DEFAULT_CORPUS_DIR,
    pipeline::{PreparedCorpus, prepare_corpus},
    preprocess::{DEFAULT_VALIDATION_FRACTION, PreprocessOptions},
    source::DEFAULT_SOURCE_DIR,
    tokenizer::{DEFAULT_TOKENIZER_DIR, EngineKind, TokenizerEngine, build_tokenizer_artifact},
};

/// Expand `~` and `$VAR` references in a path argument.
pub fn expand_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(PathBuf::from(shellexpand::full(path)?.as_ref()))
}

/// Tokenizer engine selector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EngineArg {
    /// Direct vocabulary lookup; writes `vocab.json` and `merges.txt`.
    Native,

    /// HuggingFace `tokenizers`; also writes `tokenizer.json` and loader configs.
    #[default]
    Tokenizers,
}

impl From<EngineArg> for EngineKind {
    fn from(value: EngineArg) -> Self {
        match value {
            EngineArg::Native => EngineKind::Native,
            EngineArg::Tokenizers => EngineKind::Tokenizers,
        }
    }
}

/// Corpus preparation argument group.
#[derive(clap::Args, Debug)]
pub struct CorpusArgs {
    /// Directory of raw split shards (`<split>[-*].jsonl` or `.parquet`).
    #[arg(long, default_value = DEFAULT_SOURCE_DIR)]
    pub input_dir: String,

    /// Directory for the `<split>.txt` corpus files.
    #[arg(long, default_value = DEFAULT_CORPUS_DIR)]
    pub output_dir: String,

    /// Maximum chunk length, in bases.
    #[arg(long, default_value_t = DEFAULT_MAX_CHUNK_LEN)]
    pub max_length: usize,

    /// Fraction of train chunks moved to a synthesized validation split.
    #[arg(long, default_value_t = DEFAULT_VALIDATION_FRACTION)]
    pub validation_fraction: f64,

    /// Seed for the validation partition.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for CorpusArgs {
    fn default() -> Self {
        Self {
            input_dir: DEFAULT_SOURCE_DIR.to_string(),
            output_dir: DEFAULT_CORPUS_DIR.to_string(),
            max_length: DEFAULT_MAX_CHUNK_LEN,
            validation_fraction: DEFAULT_VALIDATION_FRACTION,
            seed: None,
        }
    }
}

impl CorpusArgs {
    /// The preprocessing options.
    pub fn options(&self) -> PreprocessOptions {
        PreprocessOptions::default()
            .with_max_length(self.max_length)
            .with_validation_fraction(self.validation_fraction)
            .with_seed(self.seed)
    }

    /// Load, preprocess, and export the corpus.
    pub fn prepare(&self) -> Result<PreparedCorpus, Box<dyn std::error::Error>> {
        let input_dir = expand_path(&self.input_dir)?;
        let output_dir = expand_path(&self.output_dir)?;

        let prepared = prepare_corpus(&input_dir, &output_dir, &self.options())?;
        for split in &prepared.dataset.splits {
            let stats = &split.stats;
            log::info!(
                "{}: {} chunks from {} of {} records",
                split.name,
                split.chunks.len(),
                stats.records_examined,
                stats.total_records
            );
        }
        Ok(prepared)
    }
}

/// Tokenizer artifact argument group.
#[derive(clap::Args, Debug)]
pub struct ArtifactArgs {
    /// Tokenizer artifact directory.
    #[arg(long, default_value = DEFAULT_TOKENIZER_DIR)]
    pub tokenizer_dir: String,

    /// Tokenizer engine.
    #[arg(long, value_enum, default_value_t = EngineArg::default())]
    pub engine: EngineArg,
}

impl Default for ArtifactArgs {
    fn default() -> Self {
        Self {
            tokenizer_dir: DEFAULT_TOKENIZER_DIR.to_string(),
            engine: EngineArg::default(),
        }
    }
}

impl ArtifactArgs {
    /// The expanded artifact directory.
    pub fn dir(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        expand_path(&self.tokenizer_dir)
    }

    /// Build and persist the tokenizer artifact.
    pub fn build(&self) -> Result<Box<dyn TokenizerEngine>, Box<dyn std::error::Error>> {
        log::info!("Creating DNA tokenizer...");
        Ok(build_tokenizer_artifact(self.engine.into(), self.dir()?)?)
    }

    /// Load a previously built tokenizer artifact.
    pub fn load(&self) -> Result<Box<dyn TokenizerEngine>, Box<dyn std::error::Error>> {
        let kind: EngineKind = self.engine.into();
        Ok(kind.load(&self.dir()?)?)
    }
}

//! # Tokenizer Artifact Builder

use std::path::Path;

use crate::{
    errors::{SCResult, SeqChipperError},
    tokenizer::{
        DnaVocab, EngineKind, MERGES_FILE, MergeRules, TokenizerEngine, VOCAB_FILE,
        load_merges_path, load_vocab_json_path, save_merges_path, save_vocab_json_path,
    },
};

/// The default tokenizer artifact directory.
pub const DEFAULT_TOKENIZER_DIR: &str = "dna_tokenizer";

/// The sequence used to check a freshly built engine.
pub const SELF_CHECK_SEQUENCE: &str = "ACGTACGTACGT";

/// Check that an engine round-trips [`SELF_CHECK_SEQUENCE`].
///
/// The check is logged; a failed round trip is an error.
pub fn self_check(engine: &dyn TokenizerEngine) -> SCResult<()> {
    let ids = engine.encode(SELF_CHECK_SEQUENCE)?;
    let decoded = engine.decode(&ids)?;
    log::info!("Tokenizer test: {SELF_CHECK_SEQUENCE} -> {ids:?} -> {decoded}");

    if decoded != SELF_CHECK_SEQUENCE {
        return Err(SeqChipperError::SelfCheckFailed {
            engine: engine.name().to_string(),
            input: SELF_CHECK_SEQUENCE.to_string(),
            decoded,
        });
    }
    Ok(())
}

/// Build and persist the tokenizer artifact in `dir`.
///
/// Writes `vocab.json` and `merges.txt`, builds the selected engine from
/// those files, self-checks it, and persists it into the same directory.
///
/// ## Arguments
/// * `kind` - the engine to build.
/// * `dir` - the artifact directory; created if missing.
///
/// ## Returns
/// The built engine.
pub fn build_tokenizer_artifact<P: AsRef<Path>>(
    kind: EngineKind,
    dir: P,
) -> SCResult<Box<dyn TokenizerEngine>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let vocab_path = dir.join(VOCAB_FILE);
    let merges_path = dir.join(MERGES_FILE);
    save_vocab_json_path(&DnaVocab::default(), &vocab_path)?;
    save_merges_path(&MergeRules::empty(), &merges_path)?;

    let vocab = load_vocab_json_path(&vocab_path)?;
    let merges = load_merges_path(&merges_path)?;

    let engine = kind.build(&vocab, &merges)?;
    log::info!(
        "Built {} tokenizer: {} tokens, {} merges",
        engine.name(),
        vocab.len(),
        merges.len()
    );

    self_check(engine.as_ref())?;

    engine.persist(dir)?;
    log::info!("Tokenizer saved to {}", dir.display());

    Ok(engine)
}

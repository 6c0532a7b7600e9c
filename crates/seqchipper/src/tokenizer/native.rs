//! # Vocabulary Lookup Engine

use std::path::Path;

use crate::{
    errors::{SCResult, SeqChipperError},
    tokenizer::{
        DnaVocab, MERGES_FILE, MergeRules, TokenizerEngine, VOCAB_FILE, load_merges_path,
        load_vocab_json_path, save_merges_path, save_vocab_json_path,
    },
};

/// A [`TokenizerEngine`] which maps each base directly through the [`DnaVocab`].
///
/// Persists `vocab.json` and `merges.txt` only.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VocabTokenizer {
    vocab: DnaVocab,
}

impl VocabTokenizer {
    /// Get the vocabulary.
    pub fn vocab(&self) -> &DnaVocab {
        &self.vocab
    }
}

impl TokenizerEngine for VocabTokenizer {
    fn build_from_vocabulary(
        vocab: &DnaVocab,
        merges: &MergeRules,
    ) -> SCResult<Self> {
        if !merges.is_empty() {
            return Err(SeqChipperError::VocabMismatch(format!(
                "character-level engine takes no merge rules, found {}",
                merges.len()
            )));
        }
        Ok(Self {
            vocab: vocab.clone(),
        })
    }

    fn load(dir: &Path) -> SCResult<Self> {
        let vocab = load_vocab_json_path(dir.join(VOCAB_FILE))?;
        let merges = load_merges_path(dir.join(MERGES_FILE))?;
        Self::build_from_vocabulary(&vocab, &merges)
    }

    fn name(&self) -> &str {
        "native"
    }

    fn encode(
        &self,
        text: &str,
    ) -> SCResult<Vec<u32>> {
        self.vocab.encode(text)
    }

    fn decode(
        &self,
        ids: &[u32],
    ) -> SCResult<String> {
        self.vocab.decode(ids)
    }

    fn persist(
        &self,
        dir: &Path,
    ) -> SCResult<()> {
        save_vocab_json_path(&self.vocab, dir.join(VOCAB_FILE))?;
        save_merges_path(&MergeRules::empty(), dir.join(MERGES_FILE))
    }
}

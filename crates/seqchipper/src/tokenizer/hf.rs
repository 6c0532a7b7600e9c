//! # HuggingFace `tokenizers` Engine
//!
//! A byte-level BPE model over the fixed [`DnaVocab`] with zero merges,
//! in the GPT-2 tokenizer layout. With no merges, every base is its own token.
//!
//! Persisted artifacts:
//! * `vocab.json`, `merges.txt` - the engine inputs; sufficient to load.
//! * `tokenizer.json` - the serialized `tokenizers::Tokenizer`; preferred when present.
//! * `tokenizer_config.json`, `special_tokens_map.json` - loader configuration.

use std::{fs::File, io::BufWriter, path::Path};

use serde::{Deserialize, Serialize};
use tokenizers::{
    AddedToken,
    Tokenizer,
    models::bpe::BPE,
    pre_tokenizers::byte_level::ByteLevel,
};

use crate::{
    errors::{SCResult, SeqChipperError},
    tokenizer::{
        DnaVocab, END_OF_TEXT, MERGES_FILE, MergeRules, TokenizerEngine,
        VOCAB_FILE, load_vocab_json_path, save_merges_path, save_vocab_json_path,
    },
};

/// The serialized tokenizer file name.
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// The tokenizer loader config file name.
pub const TOKENIZER_CONFIG_FILE: &str = "tokenizer_config.json";

/// The special tokens map file name.
pub const SPECIAL_TOKENS_MAP_FILE: &str = "special_tokens_map.json";

/// The model context length recorded in the loader config.
pub const MODEL_MAX_LENGTH: usize = 1024;

fn engine_error<E: ToString>(err: E) -> SeqChipperError {
    SeqChipperError::Tokenizer(err.to_string())
}

fn path_str(path: &Path) -> SCResult<&str> {
    path.to_str().ok_or_else(|| {
        SeqChipperError::Tokenizer(format!("non UTF-8 path: {}", path.display()))
    })
}

/// The `tokenizer_config.json` loader configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Prefix a space before encoding.
    pub add_prefix_space: bool,

    /// Beginning-of-sequence token.
    pub bos_token: String,

    /// End-of-sequence token.
    pub eos_token: String,

    /// Unknown token.
    pub unk_token: String,

    /// Clean up spaces when decoding.
    pub clean_up_tokenization_spaces: bool,

    /// Model context length.
    pub model_max_length: usize,

    /// The loader class.
    pub tokenizer_class: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            add_prefix_space: false,
            bos_token: END_OF_TEXT.to_string(),
            eos_token: END_OF_TEXT.to_string(),
            unk_token: END_OF_TEXT.to_string(),
            clean_up_tokenization_spaces: false,
            model_max_length: MODEL_MAX_LENGTH,
            tokenizer_class: "GPT2Tokenizer".to_string(),
        }
    }
}

/// The `special_tokens_map.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialTokensMap {
    /// Beginning-of-sequence token.
    pub bos_token: String,

    /// End-of-sequence token.
    pub eos_token: String,

    /// Unknown token.
    pub unk_token: String,
}

impl Default for SpecialTokensMap {
    fn default() -> Self {
        Self {
            bos_token: END_OF_TEXT.to_string(),
            eos_token: END_OF_TEXT.to_string(),
            unk_token: END_OF_TEXT.to_string(),
        }
    }
}

fn save_json_path<T: Serialize, P: AsRef<Path>>(
    value: &T,
    path: P,
) -> SCResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

/// A [`TokenizerEngine`] backed by a `tokenizers::Tokenizer`.
///
/// Input is validated against the [`DnaVocab`] before it reaches the inner
/// tokenizer; so unknown symbols and ids are errors, not silent drops.
pub struct HfTokenizer {
    vocab: DnaVocab,
    inner: Tokenizer,
}

impl HfTokenizer {
    /// Build from a `vocab.json` and `merges.txt` pair.
    ///
    /// This is the GPT-2 loader path; no `tokenizer.json` is needed.
    pub fn from_files<V: AsRef<Path>, M: AsRef<Path>>(
        vocab_path: V,
        merges_path: M,
    ) -> SCResult<Self> {
        let vocab_path = vocab_path.as_ref();
        let merges_path = merges_path.as_ref();

        let vocab = load_vocab_json_path(vocab_path)?;
        let model = BPE::from_file(path_str(vocab_path)?, path_str(merges_path)?)
            .build()
            .map_err(engine_error)?;
        Self::from_model(vocab, model)
    }

    /// Wrap a BPE model in the GPT-2 byte-level pipeline.
    fn from_model(
        vocab: DnaVocab,
        model: BPE,
    ) -> SCResult<Self> {
        let mut inner = Tokenizer::new(model);
        inner
            .with_pre_tokenizer(Some(ByteLevel::default().add_prefix_space(false)))
            .with_post_processor(Some(ByteLevel::default().trim_offsets(false)))
            .with_decoder(Some(ByteLevel::default()));
        inner.add_special_tokens(&[AddedToken::from(END_OF_TEXT, true)]);

        Self::check_inner(&vocab, &inner)?;
        Ok(Self { vocab, inner })
    }

    /// Get the inner tokenizer.
    pub fn inner(&self) -> &Tokenizer {
        &self.inner
    }

    /// Check that the inner tokenizer agrees with `vocab`.
    fn check_inner(
        vocab: &DnaVocab,
        inner: &Tokenizer,
    ) -> SCResult<()> {
        let size = inner.get_vocab_size(false);
        if size != vocab.len() {
            return Err(SeqChipperError::VocabMismatch(format!(
                "tokenizer has {size} entries, expected {}",
                vocab.len()
            )));
        }
        for (symbol, id) in vocab.entries() {
            let found = inner.token_to_id(symbol);
            if found != Some(id) {
                return Err(SeqChipperError::VocabMismatch(format!(
                    "tokenizer maps {symbol:?} to {found:?}, expected {id}"
                )));
            }
        }
        Ok(())
    }
}

impl TokenizerEngine for HfTokenizer {
    fn build_from_vocabulary(
        vocab: &DnaVocab,
        merges: &MergeRules,
    ) -> SCResult<Self> {
        let symbols: tokenizers::models::bpe::Vocab = vocab
            .entries()
            .map(|(symbol, id)| (symbol.to_string(), id))
            .collect();
        let model = BPE::builder()
            .vocab_and_merges(symbols, merges.rules().to_vec())
            .build()
            .map_err(engine_error)?;
        Self::from_model(vocab.clone(), model)
    }

    /// Load from `tokenizer.json` if present; otherwise from `vocab.json` and `merges.txt`.
    fn load(dir: &Path) -> SCResult<Self> {
        let tokenizer_path = dir.join(TOKENIZER_FILE);
        if !tokenizer_path.exists() {
            log::debug!(
                "{} not found; loading from {VOCAB_FILE} and {MERGES_FILE}",
                tokenizer_path.display()
            );
            return Self::from_files(dir.join(VOCAB_FILE), dir.join(MERGES_FILE));
        }

        let vocab = load_vocab_json_path(dir.join(VOCAB_FILE))?;
        let inner = Tokenizer::from_file(&tokenizer_path).map_err(engine_error)?;
        Self::check_inner(&vocab, &inner)?;
        Ok(Self { vocab, inner })
    }

    fn name(&self) -> &str {
        "tokenizers"
    }

    fn encode(
        &self,
        text: &str,
    ) -> SCResult<Vec<u32>> {
        if let Some((offset, symbol)) = text
            .char_indices()
            .find(|&(_, c)| self.vocab.base_id(c).is_none())
        {
            return Err(SeqChipperError::UnknownSymbol { symbol, offset });
        }

        let encoding = self.inner.encode(text, false).map_err(engine_error)?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(
        &self,
        ids: &[u32],
    ) -> SCResult<String> {
        self.vocab.check_ids(ids)?;
        self.inner.decode(ids, false).map_err(engine_error)
    }

    fn persist(
        &self,
        dir: &Path,
    ) -> SCResult<()> {
        save_vocab_json_path(&self.vocab, dir.join(VOCAB_FILE))?;
        save_merges_path(&MergeRules::empty(), dir.join(MERGES_FILE))?;
        self.inner
            .save(dir.join(TOKENIZER_FILE), true)
            .map_err(engine_error)?;
        save_json_path(&TokenizerConfig::default(), dir.join(TOKENIZER_CONFIG_FILE))?;
        save_json_path(
            &SpecialTokensMap::default(),
            dir.join(SPECIAL_TOKENS_MAP_FILE),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::VocabTokenizer;

    fn build() -> HfTokenizer {
        HfTokenizer::build_from_vocabulary(&DnaVocab::default(), &MergeRules::empty())
            .expect("failed to build tokenizer")
    }

    #[test]
    fn test_encode_decode() {
        let tok = build();
        assert_eq!(tok.name(), "tokenizers");
        assert_eq!(tok.encode("ACGT").unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(tok.decode(&[1, 2, 3, 4]).unwrap(), "ACGT");
        assert_eq!(tok.encode("").unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_round_trip_matches_native() {
        let tok = build();
        let vocab = DnaVocab::default();
        for text in [
            "A",
            "ACGTACGTACGT",
            "GATTACA",
            "TTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTTT",
        ] {
            let ids = tok.encode(text).unwrap();
            assert_eq!(ids, vocab.encode(text).unwrap(), "{text}");
            assert_eq!(tok.decode(&ids).unwrap(), text);
        }

        let long: String = "CAGT".chars().cycle().take(1024).collect();
        let ids = tok.encode(&long).unwrap();
        assert_eq!(ids.len(), 1024);
        assert_eq!(tok.decode(&ids).unwrap(), long);
    }

    #[test]
    fn test_unknown_inputs() {
        let tok = build();
        assert!(matches!(
            tok.encode("ACGN"),
            Err(SeqChipperError::UnknownSymbol {
                symbol: 'N',
                offset: 3
            })
        ));
        assert!(matches!(
            tok.encode("AC GT"),
            Err(SeqChipperError::UnknownSymbol { symbol: ' ', .. })
        ));
        assert!(matches!(
            tok.decode(&[1, 5]),
            Err(SeqChipperError::UnknownTokenId(5))
        ));
    }

    #[test]
    fn test_persist_load() {
        let tok = build();

        tempdir::TempDir::new("hf_tokenizer_test")
            .and_then(|dir| {
                tok.persist(dir.path()).expect("failed to persist");
                for file in [
                    VOCAB_FILE,
                    MERGES_FILE,
                    TOKENIZER_FILE,
                    TOKENIZER_CONFIG_FILE,
                    SPECIAL_TOKENS_MAP_FILE,
                ] {
                    assert!(dir.path().join(file).exists(), "{file}");
                }
                assert_eq!(
                    std::fs::read_to_string(dir.path().join(MERGES_FILE))?,
                    "#version: 0.2\n"
                );

                let config: TokenizerConfig = serde_json::from_str(&std::fs::read_to_string(
                    dir.path().join(TOKENIZER_CONFIG_FILE),
                )?)
                .expect("config json");
                assert_eq!(config, TokenizerConfig::default());
                assert_eq!(config.eos_token, END_OF_TEXT);

                let special: SpecialTokensMap = serde_json::from_str(&std::fs::read_to_string(
                    dir.path().join(SPECIAL_TOKENS_MAP_FILE),
                )?)
                .expect("special tokens json");
                assert_eq!(special.unk_token, END_OF_TEXT);

                let loaded = HfTokenizer::load(dir.path()).expect("failed to load");
                assert_eq!(loaded.encode("GATTACA").unwrap(), vec![3, 1, 4, 4, 1, 2, 1]);
                assert_eq!(loaded.decode(&[3, 1, 4, 4, 1, 2, 1]).unwrap(), "GATTACA");

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_load_from_vocab_and_merges() {
        tempdir::TempDir::new("hf_tokenizer_pair")
            .and_then(|dir| {
                VocabTokenizer::default()
                    .persist(dir.path())
                    .expect("failed to persist");
                assert!(!dir.path().join(TOKENIZER_FILE).exists());

                let loaded = HfTokenizer::load(dir.path()).expect("failed to load");
                assert_eq!(loaded.encode("ACGT").unwrap(), vec![1, 2, 3, 4]);
                assert_eq!(loaded.decode(&[4, 3, 2, 1]).unwrap(), "TGCA");

                let direct = HfTokenizer::from_files(
                    dir.path().join(VOCAB_FILE),
                    dir.path().join(MERGES_FILE),
                )
                .expect("failed to load");
                assert_eq!(direct.encode("GATTACA").unwrap(), vec![3, 1, 4, 4, 1, 2, 1]);

                // Persisting the pair-loaded engine yields a loadable tokenizer.json.
                loaded.persist(dir.path()).expect("failed to persist");
                let reloaded = HfTokenizer::load(dir.path()).expect("failed to reload");
                assert_eq!(reloaded.encode("ACGT").unwrap(), vec![1, 2, 3, 4]);

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_load_rejects_foreign_vocab() {
        tempdir::TempDir::new("hf_tokenizer_mismatch")
            .and_then(|dir| {
                build().persist(dir.path()).expect("failed to persist");
                std::fs::write(
                    dir.path().join(VOCAB_FILE),
                    r#"{"<|endoftext|>":0,"A":1,"C":2,"G":3,"U":4}"#,
                )?;
                assert!(matches!(
                    HfTokenizer::load(dir.path()),
                    Err(SeqChipperError::VocabMismatch(_))
                ));
                Ok(())
            })
            .unwrap();
    }
}

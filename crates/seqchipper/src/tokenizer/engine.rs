//! # Tokenizer Engines

use std::path::Path;

use crate::{
    errors::{SCResult, SeqChipperError},
    tokenizer::{DnaVocab, MergeRules, VocabTokenizer},
};

/// A tokenizer implementation built from a [`DnaVocab`] and a [`MergeRules`] table.
///
/// Implementations must reject unknown symbols in `encode`, and unknown ids
/// in `decode`; they must never map them to a fallback token.
pub trait TokenizerEngine {
    /// Build an engine from a vocabulary and a merge table.
    fn build_from_vocabulary(
        vocab: &DnaVocab,
        merges: &MergeRules,
    ) -> SCResult<Self>
    where
        Self: Sized;

    /// Load an engine previously written by [`TokenizerEngine::persist`].
    fn load(dir: &Path) -> SCResult<Self>
    where
        Self: Sized;

    /// The engine name.
    fn name(&self) -> &str;

    /// Encode text to token ids.
    fn encode(
        &self,
        text: &str,
    ) -> SCResult<Vec<u32>>;

    /// Decode token ids to text.
    fn decode(
        &self,
        ids: &[u32],
    ) -> SCResult<String>;

    /// Write the engine's artifact files into `dir`.
    ///
    /// `dir` must exist.
    fn persist(
        &self,
        dir: &Path,
    ) -> SCResult<()>;
}

/// Engine selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// [`VocabTokenizer`].
    Native,

    /// [`HfTokenizer`](crate::tokenizer::HfTokenizer).
    #[default]
    Tokenizers,
}

impl EngineKind {
    /// The engine name.
    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::Native => "native",
            EngineKind::Tokenizers => "tokenizers",
        }
    }

    /// Build the selected engine.
    pub fn build(
        &self,
        vocab: &DnaVocab,
        merges: &MergeRules,
    ) -> SCResult<Box<dyn TokenizerEngine>> {
        Ok(match self {
            EngineKind::Native => Box::new(VocabTokenizer::build_from_vocabulary(vocab, merges)?),
            #[cfg(feature = "tokenizers")]
            EngineKind::Tokenizers => Box::new(crate::tokenizer::HfTokenizer::build_from_vocabulary(
                vocab, merges,
            )?),
            #[cfg(not(feature = "tokenizers"))]
            EngineKind::Tokenizers => return Err(Self::unavailable()),
        })
    }

    /// Load the selected engine from an artifact directory.
    pub fn load(
        &self,
        dir: &Path,
    ) -> SCResult<Box<dyn TokenizerEngine>> {
        Ok(match self {
            EngineKind::Native => Box::new(VocabTokenizer::load(dir)?),
            #[cfg(feature = "tokenizers")]
            EngineKind::Tokenizers => Box::new(crate::tokenizer::HfTokenizer::load(dir)?),
            #[cfg(not(feature = "tokenizers"))]
            EngineKind::Tokenizers => return Err(Self::unavailable()),
        })
    }

    #[cfg(not(feature = "tokenizers"))]
    fn unavailable() -> SeqChipperError {
        SeqChipperError::Tokenizer("built without the \"tokenizers\" feature".to_string())
    }
}

impl std::str::FromStr for EngineKind {
    type Err = SeqChipperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" => Ok(EngineKind::Native),
            "tokenizers" => Ok(EngineKind::Tokenizers),
            _ => Err(SeqChipperError::InvalidOptions(format!(
                "unknown engine: {s:?}"
            ))),
        }
    }
}

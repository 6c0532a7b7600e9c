//! # DNA Tokenizer
//!
//! A closed, character-level vocabulary over `{A, C, G, T}` plus a
//! single reserved control token; and the engines that serve it.
//!
//! * [`DnaVocab`] - the fixed symbol/id table.
//! * [`MergeRules`] - the (always empty) merge table.
//! * [`TokenizerEngine`] - the engine seam; selected by [`EngineKind`].
//! * [`build_tokenizer_artifact`] - writes, builds, checks, and persists.

mod artifact;
mod engine;
#[cfg(feature = "tokenizers")]
mod hf;
mod merges;
mod native;
mod vocab;

pub use artifact::*;
pub use engine::*;
#[cfg(feature = "tokenizers")]
pub use hf::*;
pub use merges::*;
pub use native::*;
pub use vocab::*;

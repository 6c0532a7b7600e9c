//! # `seqchipper` DNA Corpus and Tokenizer Toolkit
//!
//! Prepares raw DNA sequence datasets for language-model training,
//! and builds the fixed character-level tokenizer those models consume.
//!
//! See:
//! * [`source`] to load labeled splits of raw records.
//! * [`normalize`] and [`chunking`] for per-record cleaning and chunking.
//! * [`preprocess`] to turn raw splits into accepted chunks.
//! * [`export`] to write `<split>.txt` corpus files.
//! * [`tokenizer`] for the fixed DNA vocabulary and its engines.
//! * [`pipeline`] to run load, preprocess, and export in one call.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``parquet``
//! * ``tokenizers``
//!
//! #### feature: ``parquet``
//!
//! Enables loading splits from ``.parquet`` shards, via ``arrow`` and ``parquet``.
//! ``.jsonl`` shards are always supported.
//!
//! #### feature: ``tokenizers``
//!
//! Enables the HuggingFace ``tokenizers`` engine,
//! [`tokenizer::HfTokenizer`]; which persists a loadable
//! ``tokenizer.json``. Without it, only [`tokenizer::VocabTokenizer`] is available.
//!
//! ## Example
//!
//! ```rust,ignore
//! use seqchipper::pipeline::prepare_corpus;
//! use seqchipper::preprocess::PreprocessOptions;
//! use seqchipper::tokenizer::{EngineKind, build_tokenizer_artifact};
//!
//! let options = PreprocessOptions::default().with_seed(Some(42));
//! prepare_corpus("raw_dna_data", "processed_dna_data", &options)?;
//!
//! let engine = build_tokenizer_artifact(EngineKind::Tokenizers, "dna_tokenizer")?;
//! assert_eq!(engine.encode("ACGT")?, vec![1, 2, 3, 4]);
//! ```
#![warn(missing_docs, unused)]

pub mod alphabet;
pub mod chunking;
pub mod errors;
pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod preprocess;
pub mod records;
pub mod source;
pub mod tokenizer;

pub use errors::{SCResult, SeqChipperError};

//! # Error Types

/// Errors from seqchipper operations.
#[derive(Debug, thiserror::Error)]
pub enum SeqChipperError {
    /// A character outside the tokenizer alphabet was passed to `encode`.
    #[error("unknown symbol {symbol:?} at offset {offset}")]
    UnknownSymbol {
        /// The offending character.
        symbol: char,

        /// The byte offset of the character in the input.
        offset: usize,
    },

    /// A token id with no vocabulary entry was passed to `decode`.
    #[error("unknown token id {0}")]
    UnknownTokenId(u32),

    /// Persisted vocabulary does not match the fixed DNA vocabulary.
    #[error("vocabulary mismatch: {0}")]
    VocabMismatch(String),

    /// A line of a merges file is not a `{LEFT} {RIGHT}` rule.
    #[error("malformed merge rule: {0:?}")]
    MalformedMergeRule(String),

    /// A freshly built engine failed to round-trip its check sequence.
    #[error("{engine} engine self-check failed: {input:?} decoded as {decoded:?}")]
    SelfCheckFailed {
        /// The engine name.
        engine: String,

        /// The check sequence.
        input: String,

        /// What the engine decoded it to.
        decoded: String,
    },

    /// A validation carve would leave the train partition empty.
    #[error(
        "cannot carve a {validation_fraction} validation fraction from {chunks} train chunks: train would be empty"
    )]
    SplitTooSmall {
        /// The number of train chunks.
        chunks: usize,

        /// The requested validation fraction.
        validation_fraction: f64,
    },

    /// Options are out of range.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// No split files were found in the source directory.
    #[error("no split files found in {0}")]
    NoSplits(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Parquet read error.
    #[cfg(feature = "parquet")]
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Arrow conversion error.
    #[cfg(feature = "parquet")]
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error from the tokenizer engine.
    #[error("tokenizer engine: {0}")]
    Tokenizer(String),
}

/// Result type for seqchipper operations.
pub type SCResult<T> = core::result::Result<T, SeqChipperError>;

//! # Split Preprocessing
//!
//! Turns [`RawSplit`]s into [`ProcessedSplit`]s of accepted chunks.
//!
//! Each split is positionally truncated to its first `floor(0.8 * N)` records
//! (see [`truncation_bound`]); the remaining records are never examined.
//! If the processed dataset has a `train` split but no `validation` split,
//! a validation split is carved out of the train chunks
//! (see [`ProcessedDataset::ensure_validation_split`]).

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    chunking::{DEFAULT_MAX_CHUNK_LEN, extend_accepted_chunks},
    errors::{SCResult, SeqChipperError},
    normalize::normalize_value,
    records::RawSplit,
};

/// The name of the training split.
pub const TRAIN_SPLIT: &str = "train";

/// The name of the validation split.
pub const VALIDATION_SPLIT: &str = "validation";

/// The default fraction of train chunks moved to a synthesized validation split.
pub const DEFAULT_VALIDATION_FRACTION: f64 = 0.1;

/// The number of leading records examined in a split of `total` records.
///
/// This is `floor(0.8 * total)`, in exact integer arithmetic.
pub fn truncation_bound(total: usize) -> usize {
    total / 5 * 4 + (total % 5) * 4 / 5
}

/// Options for [`preprocess_split`] and [`preprocess_dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessOptions {
    /// The maximum chunk length.
    pub max_length: usize,

    /// Fraction of train chunks moved to a synthesized validation split.
    pub validation_fraction: f64,

    /// Optional seed for the validation partition.
    pub seed: Option<u64>,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_CHUNK_LEN,
            validation_fraction: DEFAULT_VALIDATION_FRACTION,
            seed: None,
        }
    }
}

impl PreprocessOptions {
    /// Sets the maximum chunk length.
    pub fn with_max_length(
        self,
        max_length: usize,
    ) -> Self {
        Self { max_length, ..self }
    }

    /// Sets the validation fraction.
    pub fn with_validation_fraction(
        self,
        validation_fraction: f64,
    ) -> Self {
        Self {
            validation_fraction,
            ..self
        }
    }

    /// Sets the partition seed.
    pub fn with_seed(
        self,
        seed: Option<u64>,
    ) -> Self {
        Self { seed, ..self }
    }

    /// Check that the options are in range.
    pub fn validate(&self) -> SCResult<()> {
        if self.max_length == 0 {
            return Err(SeqChipperError::InvalidOptions(
                "max_length must be > 0".to_string(),
            ));
        }
        if !(self.validation_fraction > 0.0 && self.validation_fraction < 1.0) {
            return Err(SeqChipperError::InvalidOptions(format!(
                "validation_fraction ({}) must be in (0, 1)",
                self.validation_fraction
            )));
        }
        Ok(())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Per-split preprocessing diagnostics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplitStats {
    /// Records in the input split.
    pub total_records: usize,

    /// The positional truncation bound; see [`truncation_bound`].
    pub truncation_bound: usize,

    /// Records examined.
    pub records_examined: usize,

    /// Records skipped because they were empty after cleaning.
    pub records_skipped: usize,

    /// Records whose sequence value was not text.
    pub records_coerced: usize,

    /// Accepted chunks.
    pub chunks_accepted: usize,

    /// Chunks discarded as too short.
    pub chunks_rejected: usize,
}

impl SplitStats {
    /// Average accepted chunks per examined record.
    ///
    /// ## Returns
    /// `None` if no records were examined.
    pub fn chunks_per_record(&self) -> Option<f64> {
        if self.records_examined == 0 {
            None
        } else {
            Some(self.chunks_accepted as f64 / self.records_examined as f64)
        }
    }
}

/// A named, ordered collection of accepted chunks.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProcessedSplit {
    /// The split name.
    pub name: String,

    /// The accepted chunks, in order.
    pub chunks: Vec<String>,

    /// Diagnostics from building the split.
    pub stats: SplitStats,
}

impl ProcessedSplit {
    /// Create a split from existing chunks.
    pub fn from_chunks<S: Into<String>>(
        name: S,
        chunks: Vec<String>,
    ) -> Self {
        let chunks_accepted = chunks.len();
        Self {
            name: name.into(),
            chunks,
            stats: SplitStats {
                chunks_accepted,
                ..Default::default()
            },
        }
    }
}

/// Preprocess a single split.
///
/// ## Arguments
/// * `split` - the raw split.
/// * `max_length` - the maximum chunk length; must be > 0.
///
/// ## Panics
/// If `max_length` is 0.
pub fn preprocess_split(
    split: &RawSplit,
    max_length: usize,
) -> ProcessedSplit {
    log::info!(
        "Preprocessing split {:?} with max chunk length of {max_length}...",
        split.name
    );

    let bound = truncation_bound(split.len());
    let mut stats = SplitStats {
        total_records: split.len(),
        truncation_bound: bound,
        ..Default::default()
    };
    let mut chunks = Vec::new();

    for (index, record) in split.records.iter().take(bound).enumerate() {
        stats.records_examined += 1;

        let normalized = normalize_value(record.sequence_value());
        if normalized.coerced {
            log::warn!("record {index}: non-text sequence value; coerced to text");
            stats.records_coerced += 1;
        }

        if normalized.sequence.is_empty() {
            log::warn!("record {index}: empty sequence after cleaning, skipping");
            stats.records_skipped += 1;
            continue;
        }

        let counts = extend_accepted_chunks(&normalized.sequence, max_length, &mut chunks);
        stats.chunks_accepted += counts.accepted;
        stats.chunks_rejected += counts.rejected;
    }

    log::info!(
        "Split {:?}: examined {} of {} records",
        split.name,
        stats.records_examined,
        stats.total_records
    );
    log::info!("Split {:?}: {} chunks", split.name, stats.chunks_accepted);
    if let Some(ratio) = stats.chunks_per_record() {
        log::info!("Split {:?}: average chunks per record: {ratio:.2}", split.name);
    }
    if let Some(first) = chunks.first() {
        log::info!("Sample chunk: {}...", &first[..first.len().min(100)]);
    }

    ProcessedSplit {
        name: split.name.clone(),
        chunks,
        stats,
    }
}

/// The `(train, validation)` sizes of a partition of `chunks` chunks.
///
/// Validation receives `ceil(validation_fraction * chunks)`; train the rest.
///
/// ## Errors
/// [`SeqChipperError::SplitTooSmall`] if the train side would be empty.
pub fn partition_sizes(
    chunks: usize,
    validation_fraction: f64,
) -> SCResult<(usize, usize)> {
    let n_validation = (((chunks as f64) * validation_fraction).ceil() as usize).min(chunks);
    let n_train = chunks - n_validation;
    if n_train == 0 {
        return Err(SeqChipperError::SplitTooSmall {
            chunks,
            validation_fraction,
        });
    }
    Ok((n_train, n_validation))
}

/// Randomly partition `chunks` into `(train, validation)`.
///
/// Sizes are given by [`partition_sizes`].
/// Both partitions keep the shuffled order.
pub fn partition_chunks<R: rand::Rng + ?Sized>(
    chunks: Vec<String>,
    validation_fraction: f64,
    rng: &mut R,
) -> SCResult<(Vec<String>, Vec<String>)> {
    let (_, n_validation) = partition_sizes(chunks.len(), validation_fraction)?;

    let mut chunks = chunks;
    chunks.shuffle(rng);

    let train = chunks.split_off(n_validation);
    Ok((train, chunks))
}

/// An ordered collection of [`ProcessedSplit`]s.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProcessedDataset {
    /// The splits, in source order.
    pub splits: Vec<ProcessedSplit>,
}

impl ProcessedDataset {
    /// Get a split by name.
    pub fn split(
        &self,
        name: &str,
    ) -> Option<&ProcessedSplit> {
        self.splits.iter().find(|s| s.name == name)
    }

    /// Does the dataset contain the named split?
    pub fn has_split(
        &self,
        name: &str,
    ) -> bool {
        self.split(name).is_some()
    }

    /// The split names, in order.
    pub fn split_names(&self) -> Vec<&str> {
        self.splits.iter().map(|s| s.name.as_str()).collect()
    }

    /// Carve a validation split out of `train`, if needed.
    ///
    /// Does nothing if a `validation` split exists, or if there is no `train` split.
    /// Otherwise, `train` is replaced in place by its larger partition,
    /// and `validation` is appended.
    ///
    /// ## Returns
    /// `true` if a validation split was created.
    ///
    /// ## Errors
    /// [`SeqChipperError::SplitTooSmall`] if `train` has too few chunks to
    /// keep any; the dataset is left unchanged.
    pub fn ensure_validation_split<R: rand::Rng + ?Sized>(
        &mut self,
        validation_fraction: f64,
        rng: &mut R,
    ) -> SCResult<bool> {
        if self.has_split(VALIDATION_SPLIT) {
            return Ok(false);
        }
        let Some(train) = self.splits.iter_mut().find(|s| s.name == TRAIN_SPLIT) else {
            return Ok(false);
        };

        log::info!("Creating validation split from training data");
        partition_sizes(train.chunks.len(), validation_fraction)?;

        let chunks = std::mem::take(&mut train.chunks);
        let (train_chunks, validation_chunks) =
            partition_chunks(chunks, validation_fraction, rng)?;

        log::info!(
            "Partitioned train chunks: {} train, {} validation",
            train_chunks.len(),
            validation_chunks.len()
        );

        train.stats.chunks_accepted = train_chunks.len();
        train.chunks = train_chunks;

        self.splits.push(ProcessedSplit::from_chunks(
            VALIDATION_SPLIT,
            validation_chunks,
        ));
        Ok(true)
    }
}

/// Preprocess every split, then ensure a validation split exists.
///
/// Splits are processed sequentially, in order.
pub fn preprocess_dataset(
    splits: &[RawSplit],
    options: &PreprocessOptions,
) -> SCResult<ProcessedDataset> {
    options.validate()?;

    let mut dataset = ProcessedDataset {
        splits: splits
            .iter()
            .map(|split| preprocess_split(split, options.max_length))
            .collect(),
    };

    let mut rng = options.rng();
    dataset.ensure_validation_split(options.validation_fraction, &mut rng)?;

    Ok(dataset)
}

//! # Corpus Pipeline
//!
//! Load, preprocess, and export in one call.
//!
//! Failures are logged at `error` with the stage that failed, then returned
//! unchanged.

use std::path::{Path, PathBuf};

use crate::{
    errors::SCResult,
    export::export_dataset,
    preprocess::{PreprocessOptions, ProcessedDataset, preprocess_dataset},
    source::load_split_dir,
};

/// The result of [`prepare_corpus`].
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCorpus {
    /// The processed splits.
    pub dataset: ProcessedDataset,

    /// The written corpus files, in split order.
    pub files: Vec<PathBuf>,
}

fn log_stage_error<T>(
    stage: &str,
    result: SCResult<T>,
) -> SCResult<T> {
    if let Err(err) = &result {
        log::error!("Error {stage}: {err}");
    }
    result
}

/// Load the splits in `source_dir`, preprocess them, and export to `output_dir`.
///
/// ## Arguments
/// * `source_dir` - the split shard directory; see [`load_split_dir`].
/// * `output_dir` - the corpus directory; created if missing.
/// * `options` - preprocessing options.
pub fn prepare_corpus<S: AsRef<Path>, O: AsRef<Path>>(
    source_dir: S,
    output_dir: O,
    options: &PreprocessOptions,
) -> SCResult<PreparedCorpus> {
    log::info!("Loading DNA dataset...");
    let splits = log_stage_error("loading dataset", load_split_dir(source_dir))?;

    log::info!("Preprocessing dataset...");
    let dataset = log_stage_error(
        "preprocessing dataset",
        preprocess_dataset(&splits, options),
    )?;

    log::info!("Saving processed data...");
    let files = log_stage_error("saving datasets", export_dataset(&dataset, output_dir))?;

    Ok(PreparedCorpus { dataset, files })
}

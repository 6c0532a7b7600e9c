//! # Split Sources
//!
//! Loads a labeled split collection from a local directory of shard files.
//!
//! Supported shard formats:
//! * `*.jsonl`, `*.json` - JSON lines; see [`read_jsonl_records`].
//! * `*.parquet` - (feature ``parquet``); see [`load_parquet_records_path`].
//!
//! The split name of a shard is its file stem up to the first `-`;
//! so `train-00000-of-00002.parquet` and `train-00001-of-00002.parquet`
//! are both shards of `train`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::{SCResult, SeqChipperError},
    records::{RawRecord, RawSplit},
};

mod jsonl;
#[doc(inline)]
pub use jsonl::*;

#[cfg(feature = "parquet")]
mod parquet_shards;
#[cfg(feature = "parquet")]
#[doc(inline)]
pub use parquet_shards::*;

/// The default raw split directory.
pub const DEFAULT_SOURCE_DIR: &str = "raw_dna_data";

/// Recognized shard file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardFormat {
    /// JSON lines.
    JsonLines,

    /// Apache Parquet.
    #[cfg(feature = "parquet")]
    Parquet,
}

impl ShardFormat {
    /// Select the format for a path, by extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "jsonl" | "json" => Some(ShardFormat::JsonLines),
            #[cfg(feature = "parquet")]
            "parquet" => Some(ShardFormat::Parquet),
            _ => None,
        }
    }
}

/// The split name for a shard path; the file stem up to the first `-`.
pub fn split_name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = stem.split('-').next().unwrap_or(stem);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Load all records from a single shard file.
pub fn load_shard_records(
    path: &Path,
    format: ShardFormat,
) -> SCResult<Vec<RawRecord>> {
    match format {
        ShardFormat::JsonLines => load_jsonl_records_path(path),
        #[cfg(feature = "parquet")]
        ShardFormat::Parquet => load_parquet_records_path(path),
    }
}

/// List the shard files of `dir`, grouped by split name.
///
/// Shards of each split are in sorted path order.
pub fn list_split_shards<P: AsRef<Path>>(
    dir: P
) -> SCResult<BTreeMap<String, Vec<(PathBuf, ShardFormat)>>> {
    let mut groups: BTreeMap<String, Vec<(PathBuf, ShardFormat)>> = BTreeMap::new();

    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(format) = ShardFormat::from_path(&path) else {
            log::debug!("ignoring {}", path.display());
            continue;
        };
        let Some(name) = split_name_from_path(&path) else {
            continue;
        };
        groups.entry(name).or_default().push((path, format));
    }

    for shards in groups.values_mut() {
        shards.sort_by(|a, b| a.0.cmp(&b.0));
    }

    Ok(groups)
}

/// Load every split in `dir`.
///
/// ## Returns
/// The splits, sorted by name; or [`SeqChipperError::NoSplits`] if the
/// directory holds no recognized shard files.
pub fn load_split_dir<P: AsRef<Path>>(dir: P) -> SCResult<Vec<RawSplit>> {
    let dir = dir.as_ref();
    log::info!("Loading splits from {}", dir.display());

    let groups = list_split_shards(dir)?;
    if groups.is_empty() {
        return Err(SeqChipperError::NoSplits(dir.display().to_string()));
    }

    let mut splits = Vec::with_capacity(groups.len());
    for (name, shards) in groups {
        let mut records = Vec::new();
        for (path, format) in shards {
            log::info!("{name}: {}", path.display());
            records.extend(load_shard_records(&path, format)?);
        }
        log::info!("Split {name:?}: {} records", records.len());
        splits.push(RawSplit::new(name, records));
    }

    log::info!(
        "Loaded splits: {:?}",
        splits.iter().map(|s| s.name.as_str()).collect::<Vec<_>>()
    );
    Ok(splits)
}

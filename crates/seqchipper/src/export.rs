//! # Corpus Export
//!
//! Chunks are written one per line, each terminated by `\n`;
//! no header, no escaping.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{errors::SCResult, preprocess::ProcessedDataset};

/// The default corpus output directory.
pub const DEFAULT_CORPUS_DIR: &str = "processed_dna_data";

/// Write `chunks` to `writer`, one per line.
pub fn write_corpus<S, W>(
    chunks: &[S],
    writer: &mut W,
) -> SCResult<()>
where
    S: AsRef<str>,
    W: Write,
{
    for chunk in chunks {
        writer.write_all(chunk.as_ref().as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Save `chunks` to `path`, replacing any existing file.
pub fn save_corpus_path<S, P>(
    chunks: &[S],
    path: P,
) -> SCResult<()>
where
    S: AsRef<str>,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    write_corpus(chunks, &mut writer)
}

/// The corpus path for a split: `{dir}/{split}.txt`.
pub fn corpus_path<P: AsRef<Path>>(
    dir: P,
    split: &str,
) -> PathBuf {
    dir.as_ref().join(format!("{split}.txt"))
}

/// Export every split of `dataset` into `dir`.
///
/// Creates `dir` if needed.
///
/// ## Returns
/// The written paths, in split order.
pub fn export_dataset<P: AsRef<Path>>(
    dataset: &ProcessedDataset,
    dir: P,
) -> SCResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut paths = Vec::with_capacity(dataset.splits.len());
    for split in &dataset.splits {
        let path = corpus_path(dir, &split.name);
        log::info!(
            "Saving split {:?} with {} chunks to {}",
            split.name,
            split.chunks.len(),
            path.display()
        );
        save_corpus_path(&split.chunks, &path)?;
        paths.push(path);
    }

    log::info!("Corpus saved to {}", dir.display());
    Ok(paths)
}

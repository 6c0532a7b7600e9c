//! # Merge-Rule Table
//!
//! The BPE merge file format:
//! ```terminaloutput
//! #version: 0.2
//! {LEFT} {RIGHT}
//! ...
//! ```
//!
//! The DNA vocabulary never merges; its table is always empty,
//! and its file is the version header alone.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::errors::{SCResult, SeqChipperError};

/// The merges file name.
pub const MERGES_FILE: &str = "merges.txt";

/// The version header line.
pub const MERGES_VERSION_HEADER: &str = "#version: 0.2";

/// An ordered table of merge rules.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeRules {
    rules: Vec<(String, String)>,
}

impl MergeRules {
    /// The empty merge table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules, in priority order.
    pub fn rules(&self) -> &[(String, String)] {
        &self.rules
    }
}

/// Write a [`MergeRules`] table.
pub fn write_merges<W: Write>(
    merges: &MergeRules,
    writer: &mut W,
) -> SCResult<()> {
    writeln!(writer, "{MERGES_VERSION_HEADER}")?;
    for (left, right) in merges.rules() {
        writeln!(writer, "{left} {right}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Save a [`MergeRules`] table to a file.
pub fn save_merges_path<P: AsRef<Path>>(
    merges: &MergeRules,
    path: P,
) -> SCResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_merges(merges, &mut writer)
}

/// Read a [`MergeRules`] table.
///
/// Lines starting with `#` and blank lines are skipped.
pub fn read_merges<R: BufRead>(reader: R) -> SCResult<MergeRules> {
    let mut rules = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((left, right)) = line.split_once(' ') else {
            return Err(SeqChipperError::MalformedMergeRule(line));
        };
        rules.push((left.to_string(), right.to_string()));
    }
    Ok(MergeRules { rules })
}

/// Load a [`MergeRules`] table from a file.
pub fn load_merges_path<P: AsRef<Path>>(path: P) -> SCResult<MergeRules> {
    read_merges(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_merges() {
        let merges = MergeRules::empty();
        assert!(merges.is_empty());
        assert_eq!(merges.len(), 0);

        let mut buf: Vec<u8> = Vec::new();
        write_merges(&merges, &mut buf).unwrap();
        assert_eq!(buf, b"#version: 0.2\n");

        assert_eq!(read_merges(buf.as_slice()).unwrap(), merges);
    }

    #[test]
    fn test_read_merges() {
        let merges = read_merges("#version: 0.2\nA C\n\nG T\n".as_bytes()).unwrap();
        assert_eq!(
            merges.rules(),
            &[
                ("A".to_string(), "C".to_string()),
                ("G".to_string(), "T".to_string())
            ]
        );

        assert!(matches!(
            read_merges("#version: 0.2\nACGT\n".as_bytes()),
            Err(SeqChipperError::MalformedMergeRule(line)) if line == "ACGT"
        ));
    }

    #[test]
    fn test_save_load_merges() {
        tempdir::TempDir::new("merges_test")
            .and_then(|dir| {
                let path = dir.path().join(MERGES_FILE);
                save_merges_path(&MergeRules::empty(), &path).expect("failed to save merges");
                assert_eq!(std::fs::read_to_string(&path)?, "#version: 0.2\n");
                assert!(load_merges_path(&path).expect("failed to load").is_empty());
                Ok(())
            })
            .unwrap();
    }
}

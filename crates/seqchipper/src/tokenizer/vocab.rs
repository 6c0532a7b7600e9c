//! # DNA Vocabulary
//!
//! The closed vocabulary: one reserved control token and the four bases;
//! `{"<|endoftext|>": 0, "A": 1, "C": 2, "G": 3, "T": 4}`.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde_json::{Map, Value};

use crate::{
    alphabet::DNA_ALPHABET,
    errors::{SCResult, SeqChipperError},
};

/// The reserved control token.
pub const END_OF_TEXT: &str = "<|endoftext|>";

/// The id of [`END_OF_TEXT`].
pub const END_OF_TEXT_ID: u32 = 0;

/// The vocabulary file name.
pub const VOCAB_FILE: &str = "vocab.json";

/// The fixed DNA vocabulary.
///
/// Symbols are stored in id order; the id of a symbol is its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnaVocab {
    symbols: Vec<String>,
}

impl Default for DnaVocab {
    fn default() -> Self {
        let mut symbols = Vec::with_capacity(1 + DNA_ALPHABET.len());
        symbols.push(END_OF_TEXT.to_string());
        symbols.extend(DNA_ALPHABET.iter().map(|c| c.to_string()));
        Self { symbols }
    }
}

impl DnaVocab {
    /// The number of entries.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Is the vocabulary empty? (Never, for the fixed vocabulary.)
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate `(symbol, id)` pairs in id order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(id, s)| (s.as_str(), id as u32))
    }

    /// Look up the id of a symbol.
    pub fn token_id(
        &self,
        symbol: &str,
    ) -> Option<u32> {
        self.entries()
            .find_map(|(s, id)| if s == symbol { Some(id) } else { None })
    }

    /// Look up the id of a base.
    #[inline]
    pub fn base_id(
        &self,
        base: char,
    ) -> Option<u32> {
        match base {
            'A' => Some(1),
            'C' => Some(2),
            'G' => Some(3),
            'T' => Some(4),
            _ => None,
        }
    }

    /// Look up the symbol of an id.
    pub fn symbol(
        &self,
        id: u32,
    ) -> Option<&str> {
        self.symbols.get(id as usize).map(String::as_str)
    }

    /// Encode a string of bases.
    ///
    /// ## Errors
    /// [`SeqChipperError::UnknownSymbol`] at the first non-base character;
    /// including any character of the control token.
    pub fn encode(
        &self,
        text: &str,
    ) -> SCResult<Vec<u32>> {
        text.char_indices()
            .map(|(offset, symbol)| {
                self.base_id(symbol)
                    .ok_or(SeqChipperError::UnknownSymbol { symbol, offset })
            })
            .collect()
    }

    /// Check that every id has a vocabulary entry.
    pub fn check_ids(
        &self,
        ids: &[u32],
    ) -> SCResult<()> {
        match ids.iter().find(|&&id| self.symbol(id).is_none()) {
            Some(&id) => Err(SeqChipperError::UnknownTokenId(id)),
            None => Ok(()),
        }
    }

    /// Decode ids back to their symbols.
    ///
    /// ## Errors
    /// [`SeqChipperError::UnknownTokenId`] for the first id with no entry.
    pub fn decode(
        &self,
        ids: &[u32],
    ) -> SCResult<String> {
        let mut out = String::with_capacity(ids.len());
        for &id in ids {
            out.push_str(self.symbol(id).ok_or(SeqChipperError::UnknownTokenId(id))?);
        }
        Ok(out)
    }

    /// The vocabulary as a flat `{symbol: id}` JSON object, in id order.
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.entries()
            .map(|(s, id)| (s.to_string(), Value::from(id)))
            .collect()
    }

    /// Build a vocabulary from a `{symbol: id}` JSON object.
    ///
    /// ## Errors
    /// [`SeqChipperError::VocabMismatch`] unless the object is exactly the
    /// fixed DNA vocabulary.
    pub fn from_json_map(map: &Map<String, Value>) -> SCResult<Self> {
        let vocab = Self::default();
        if map.len() != vocab.len() {
            return Err(SeqChipperError::VocabMismatch(format!(
                "expected {} entries, found {}",
                vocab.len(),
                map.len()
            )));
        }
        for (symbol, id) in vocab.entries() {
            match map.get(symbol).and_then(Value::as_u64) {
                Some(found) if found == id as u64 => {}
                found => {
                    return Err(SeqChipperError::VocabMismatch(format!(
                        "expected {symbol:?} => {id}, found {found:?}"
                    )));
                }
            }
        }
        Ok(vocab)
    }
}

/// Write a [`DnaVocab`] as `vocab.json` content.
pub fn write_vocab_json<W: Write>(
    vocab: &DnaVocab,
    writer: &mut W,
) -> SCResult<()> {
    serde_json::to_writer(&mut *writer, &vocab.to_json_map())?;
    writer.flush()?;
    Ok(())
}

/// Save a [`DnaVocab`] to a `vocab.json` file.
pub fn save_vocab_json_path<P: AsRef<Path>>(
    vocab: &DnaVocab,
    path: P,
) -> SCResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_vocab_json(vocab, &mut writer)
}

/// Read a [`DnaVocab`] from `vocab.json` content.
pub fn read_vocab_json<R: Read>(reader: R) -> SCResult<DnaVocab> {
    let map: Map<String, Value> = serde_json::from_reader(reader)?;
    DnaVocab::from_json_map(&map)
}

/// Load a [`DnaVocab`] from a `vocab.json` file.
pub fn load_vocab_json_path<P: AsRef<Path>>(path: P) -> SCResult<DnaVocab> {
    read_vocab_json(BufReader::new(File::open(path)?))
}

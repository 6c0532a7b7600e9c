//! # Chunking Engine
//!
//! Slices a normalized sequence into non-overlapping windows of at most
//! `max_length` bases, and discards windows shorter than [`MIN_CHUNK_LEN`].
//!
//! The acceptance floor is a fixed constant; it does not scale with
//! `max_length`. With `max_length < MIN_CHUNK_LEN` no chunk is ever accepted.

/// The default maximum chunk length.
pub const DEFAULT_MAX_CHUNK_LEN: usize = 1024;

/// Chunks shorter than this are discarded.
pub const MIN_CHUNK_LEN: usize = 200;

/// Slice `seq` at offsets `0, max_length, 2 * max_length, ...`.
///
/// Yields `ceil(len / max_length)` windows; all but the last are full length.
///
/// `seq` must be a normalized (ASCII) sequence; windows are byte slices.
///
/// ## Panics
/// If `max_length` is 0, or if `seq` is not ASCII.
pub fn chunk_sequence(
    seq: &str,
    max_length: usize,
) -> impl Iterator<Item = &str> {
    assert!(max_length > 0, "max_length must be > 0");
    assert!(seq.is_ascii(), "sequence must be ASCII");

    (0..seq.len())
        .step_by(max_length)
        .map(move |start| &seq[start..(start + max_length).min(seq.len())])
}

/// Is the chunk long enough to be accepted?
#[inline]
pub fn is_accepted_chunk(chunk: &str) -> bool {
    chunk.len() >= MIN_CHUNK_LEN
}

/// Counts from chunking a single sequence.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChunkCounts {
    /// Accepted chunks.
    pub accepted: usize,

    /// Chunks discarded for being shorter than [`MIN_CHUNK_LEN`].
    pub rejected: usize,
}

/// Chunk `seq`, and append every accepted chunk to `out`.
///
/// ## Panics
/// If `max_length` is 0, or if `seq` is not ASCII.
pub fn extend_accepted_chunks(
    seq: &str,
    max_length: usize,
    out: &mut Vec<String>,
) -> ChunkCounts {
    let mut counts = ChunkCounts::default();
    for chunk in chunk_sequence(seq, max_length) {
        if is_accepted_chunk(chunk) {
            out.push(chunk.to_string());
            counts.accepted += 1;
        } else {
            counts.rejected += 1;
        }
    }
    counts
}

/// Chunk `seq`, returning only the accepted chunks.
///
/// ## Panics
/// If `max_length` is 0, or if `seq` is not ASCII.
pub fn accepted_chunks(
    seq: &str,
    max_length: usize,
) -> Vec<String> {
    let mut out = Vec::new();
    extend_accepted_chunks(seq, max_length, &mut out);
    out
}

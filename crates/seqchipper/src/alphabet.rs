//! # DNA Alphabet
//!
//! The four nucleotide bases shared by the normalizer and the tokenizer.

/// The permitted bases, in vocabulary order.
pub const DNA_ALPHABET: [char; 4] = ['A', 'C', 'G', 'T'];

/// Is `c` one of the four (uppercase) bases?
#[inline]
pub fn is_base(c: char) -> bool {
    matches!(c, 'A' | 'C' | 'G' | 'T')
}

/// Is every character of `s` a base?
pub fn is_base_str(s: &str) -> bool {
    s.chars().all(is_base)
}

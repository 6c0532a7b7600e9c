//! # Sequence Normalizer
//!
//! Strips record values down to the [`DNA_ALPHABET`](crate::alphabet::DNA_ALPHABET).

use crate::{alphabet::is_base, records::FieldValue};

/// The result of normalizing a [`FieldValue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The cleaned sequence; only bases, possibly empty.
    pub sequence: String,

    /// Set when the value was not text and had to be coerced.
    pub coerced: bool,
}

/// Filter `seq` to the bases it contains, preserving order.
pub fn normalize_str(seq: &str) -> String {
    seq.chars().filter(|&c| is_base(c)).collect()
}

/// Normalize an optional record value.
///
/// * Text is filtered directly.
/// * `Null` becomes the empty sequence, and is flagged as coerced.
/// * `Other` values are filtered through their textual rendering, and are
///   flagged as coerced.
/// * A missing value is the empty sequence, and is not flagged.
pub fn normalize_value(value: Option<&FieldValue>) -> Normalized {
    match value {
        None => Normalized {
            sequence: String::new(),
            coerced: false,
        },
        Some(FieldValue::Text(s)) => Normalized {
            sequence: normalize_str(s),
            coerced: false,
        },
        Some(FieldValue::Null) => Normalized {
            sequence: String::new(),
            coerced: true,
        },
        Some(FieldValue::Other(rendered)) => Normalized {
            sequence: normalize_str(rendered),
            coerced: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_normalize_str() {
        assert_eq!(normalize_str(""), "");
        assert_eq!(normalize_str("ACGT"), "ACGT");
        assert_eq!(normalize_str("NNACGTNN"), "ACGT");
        assert_eq!(normalize_str("acgtACGT"), "ACGT");
        assert_eq!(normalize_str("A C\nG\tT-"), "ACGT");
        assert_eq!(normalize_str("AAAA"), "AAAA");
        assert_eq!(normalize_str("\u{00c5}A\u{00c7}"), "A");
    }

    #[test]
    fn test_normalize_value() {
        assert_eq!(
            normalize_value(None),
            Normalized {
                sequence: "".to_string(),
                coerced: false
            }
        );
        assert_eq!(
            normalize_value(Some(&FieldValue::from("xAxC"))),
            Normalized {
                sequence: "AC".to_string(),
                coerced: false
            }
        );
        assert_eq!(
            normalize_value(Some(&FieldValue::Null)),
            Normalized {
                sequence: "".to_string(),
                coerced: true
            }
        );
        assert_eq!(
            normalize_value(Some(&FieldValue::Other(r#"["GATTACA"]"#.to_string()))),
            Normalized {
                sequence: "GATTACA".to_string(),
                coerced: true
            }
        );
    }

    proptest! {
        #[test]
        fn prop_alphabet_only_is_identity(s in "[ACGT]{0,256}") {
            prop_assert_eq!(normalize_str(&s), s);
        }

        #[test]
        fn prop_idempotent(s in "\\PC{0,256}") {
            let once = normalize_str(&s);
            prop_assert_eq!(normalize_str(&once), once.clone());
            prop_assert!(once.chars().all(is_base));
        }
    }
}

//! Value splitting shared by both decoders.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};

/// Timestamp layout of the `received:` field.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Splits a field value into distinct words.
///
/// Words are separated by whitespace or commas, so `a, b,` and `a b` both
/// yield `{a, b}`. Empty pieces are dropped.
#[must_use]
pub fn extract_words(value: &str) -> BTreeSet<String> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| !word.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Parses a `received:` value such as `2022-12-08 14:14`.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] if the value does not follow
/// [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|_| Error::InvalidTimestamp(value.to_string()))
}

/// Returns the value after `prefix` if `line` starts with it.
pub(crate) fn strip_field<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    #[test]
    fn test_extract_comma_separated() {
        let words = extract_words(" pesho@gmail.com, gosho@gmail.com,");
        assert_eq!(words.len(), 2);
        assert!(words.contains("pesho@gmail.com"));
        assert!(words.contains("gosho@gmail.com"));
    }

    #[test]
    fn test_extract_without_spaces() {
        let words = extract_words("mjt,izpit,2022");
        assert_eq!(words.len(), 3);
        assert!(words.contains("izpit"));
    }

    #[test]
    fn test_extract_blank() {
        assert!(extract_words("   ").is_empty());
        assert!(extract_words(", ,").is_empty());
    }

    #[test]
    fn test_extract_deduplicates() {
        assert_eq!(extract_words("a a, a").len(), 1);
    }

    #[test]
    fn test_parse_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2022, 12, 8)
            .unwrap()
            .and_hms_opt(14, 14, 0)
            .unwrap();
        assert_eq!(parse_timestamp(" 2022-12-08 14:14 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert_eq!(
            parse_timestamp("yesterday"),
            Err(Error::InvalidTimestamp("yesterday".to_string()))
        );
        assert!(parse_timestamp("2022-13-08 14:14").is_err());
    }

    proptest! {
        #[test]
        fn extracted_words_have_no_separators(value in "[a-z@., ]{0,40}") {
            for word in extract_words(&value) {
                prop_assert!(!word.is_empty());
                prop_assert!(!word.contains(','));
                prop_assert!(!word.contains(' '));
            }
        }

        #[test]
        fn joined_words_extract_back(words in proptest::collection::btree_set("[a-z0-9@.]{1,12}", 0..8)) {
            let line = words.iter().cloned().collect::<Vec<_>>().join(", ");
            prop_assert_eq!(extract_words(&line), words);
        }
    }
}

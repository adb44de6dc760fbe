//! UTF-8 byte counting for index truncation.

/// Returns the length in bytes of the smallest prefix of `value` whose UTF-8
/// size is at least `threshold`, or the length of the whole string when it
/// fits under the threshold.
///
/// The result is always a `char` boundary, so slicing with it can never split
/// a code point. A threshold of zero yields the empty prefix.
pub fn truncated_string_len(value: &str, threshold: usize) -> usize {
    if threshold == 0 {
        return 0;
    }
    let mut bytes = 0;
    for c in value.chars() {
        bytes += c.len_utf8();
        if bytes >= threshold {
            break;
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_the_crossing_character() {
        let len = truncated_string_len("clément", 3);
        assert_eq!(&"clément"[..len], "clé");
        assert_eq!(len, 4);
    }

    #[test]
    fn counts_multibyte_characters() {
        let len = truncated_string_len("€uro", 4);
        assert_eq!(&"€uro"[..len], "€u");

        let len = truncated_string_len("€uro", 1);
        assert_eq!(&"€uro"[..len], "€");
    }

    #[test]
    fn never_splits_supplementary_plane_characters() {
        // U+10348 encodes as four UTF-8 bytes (a surrogate pair in UTF-16).
        let value = "\u{10348}pp";
        let len = truncated_string_len(value, 4);
        assert_eq!(&value[..len], "\u{10348}");
        assert!(value.is_char_boundary(len));
    }

    #[test]
    fn zero_threshold_yields_empty_prefix() {
        assert_eq!(truncated_string_len("anything", 0), 0);
        assert_eq!(truncated_string_len("", 0), 0);
    }

    #[test]
    fn whole_string_when_it_fits() {
        assert_eq!(truncated_string_len("abc", 100), 3);
        assert_eq!(truncated_string_len("", 100), 0);
    }
}

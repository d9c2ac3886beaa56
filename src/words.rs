//! Crude word counting used for every persisted count.
//!
//! The tokenizer is deliberately simple so counts stay comparable with
//! previously produced files: the punctuation marks `, . : ;` become spaces,
//! then the text is split on whitespace.

const SEPARATORS: [char; 4] = [',', '.', ':', ';'];

/// Count whitespace-delimited tokens after treating `, . : ;` as whitespace.
pub fn count_words(text: &str) -> u64 {
    text.split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .filter(|token| !token.is_empty())
        .count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hebrew_with_punctuation() {
        assert_eq!(count_words("שלום, עולם."), 2);
    }

    #[test]
    fn empty_and_whitespace() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \t\n "), 0);
        assert_eq!(count_words(",.:;"), 0);
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(count_words("a b  c"), 3);
        assert_eq!(count_words("  leading and trailing  "), 3);
    }

    #[test]
    fn punctuation_splits_joined_words() {
        assert_eq!(count_words("a,b.c:d;e"), 5);
    }

    #[test]
    fn other_marks_are_kept_inside_tokens() {
        // Maqaf, geresh and question marks are not separators.
        assert_eq!(count_words("מה־שאין? ר' מאיר"), 3);
    }

    #[test]
    fn non_blank_text_counts_at_least_one() {
        for text in ["x", " x ", "אבג", "a.", "-"] {
            assert!(count_words(text) >= 1, "{:?}", text);
        }
    }
}

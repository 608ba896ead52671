//! Word segmentation for text data regions.
//!
//! The structural tokenizer does not split natural-language text
//! itself; it delegates to a [`Segmenter`]. The contract matches the
//! usual NLP tokenizer convention: every token carries a trailing-space
//! flag, and concatenating token texts with a single space wherever the
//! flag is set reproduces the input exactly. Whitespace that the flag
//! cannot express (runs longer than one space, tabs, newlines,
//! non-breaking spaces) survives as tokens of its own.

use unicode_segmentation::UnicodeSegmentation;

/// One segmented token plus its trailing-space flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegToken {
    /// Token text. The default segmenter never produces an empty
    /// string.
    pub text: String,
    /// True iff a single space followed this token in the input.
    pub trailing_space: bool,
}

impl SegToken {
    /// Convenience constructor used by tests and custom segmenters.
    #[must_use]
    pub fn new(text: impl Into<String>, trailing_space: bool) -> Self {
        Self {
            text: text.into(),
            trailing_space,
        }
    }
}

/// Splits text into (token, trailing-space) pairs.
///
/// Implementations must be deterministic and pure: the same input
/// always produces the same output, with no internal state. That makes
/// a shared segmenter safe to use from concurrent tokenization calls.
pub trait Segmenter {
    /// Segment `text`, covering every character of it: rejoining the
    /// returned tokens per their flags must reproduce `text`.
    fn segment(&self, text: &str) -> Vec<SegToken>;
}

/// Default segmenter: Unicode word boundaries (UAX #29) with the
/// single-trailing-space convention described in the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordSegmenter;

impl WordSegmenter {
    /// Create the default segmenter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Segmenter for WordSegmenter {
    fn segment(&self, text: &str) -> Vec<SegToken> {
        let mut out: Vec<SegToken> = Vec::new();
        let mut whitespace = String::new();
        for piece in text.split_word_bounds() {
            if piece.chars().all(char::is_whitespace) {
                // adjacent whitespace pieces merge into one run
                whitespace.push_str(piece);
            } else {
                flush_whitespace(&mut out, &mut whitespace);
                out.push(SegToken::new(piece, false));
            }
        }
        flush_whitespace(&mut out, &mut whitespace);
        out
    }
}

/// Attach one leading space of the run to the previous token's flag;
/// whatever remains becomes a whitespace token.
fn flush_whitespace(out: &mut Vec<SegToken>, run: &mut String) {
    if run.is_empty() {
        return;
    }
    let mut rest = run.as_str();
    if rest.starts_with(' ') {
        if let Some(last) = out.last_mut() {
            if !last.trailing_space {
                last.trailing_space = true;
                rest = &rest[1..];
            }
        }
    }
    if !rest.is_empty() {
        out.push(SegToken::new(rest, false));
    }
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(tokens: &[SegToken]) -> String {
        let mut out = String::new();
        for token in tokens {
            out.push_str(&token.text);
            if token.trailing_space {
                out.push(' ');
            }
        }
        out
    }

    fn texts(tokens: &[SegToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn single_spaces_become_flags() {
        let tokens = WordSegmenter::new().segment("Page 1 of 2");
        assert_eq!(texts(&tokens), ["Page", "1", "of", "2"]);
        assert_eq!(
            tokens.iter().map(|t| t.trailing_space).collect::<Vec<_>>(),
            [true, true, true, false]
        );
    }

    #[test]
    fn punctuation_splits_off() {
        let tokens = WordSegmenter::new().segment("Balance (£)");
        assert_eq!(texts(&tokens), ["Balance", "(", "£", ")"]);
        assert_eq!(rejoin(&tokens), "Balance (£)");
    }

    #[test]
    fn interior_apostrophes_and_numbers_stay_whole() {
        let tokens = WordSegmenter::new().segment("SAINSBURY'S 2,679.71");
        assert_eq!(texts(&tokens), ["SAINSBURY'S", "2,679.71"]);
    }

    #[test]
    fn whitespace_runs_become_tokens() {
        let tokens = WordSegmenter::new().segment("multiple       white   spaces");
        assert_eq!(
            texts(&tokens),
            ["multiple", "      ", "white", "  ", "spaces"]
        );
        assert_eq!(rejoin(&tokens), "multiple       white   spaces");
    }

    #[test]
    fn non_space_whitespace_is_never_a_flag() {
        let tokens = WordSegmenter::new().segment("a\u{a0}b\nc");
        assert_eq!(texts(&tokens), ["a", "\u{a0}", "b", "\n", "c"]);
        assert_eq!(rejoin(&tokens), "a\u{a0}b\nc");
    }

    #[test]
    fn leading_and_trailing_whitespace_survive() {
        let tokens = WordSegmenter::new().segment("  a ");
        assert_eq!(rejoin(&tokens), "  a ");
        let tokens = WordSegmenter::new().segment("");
        assert!(tokens.is_empty());
    }
}

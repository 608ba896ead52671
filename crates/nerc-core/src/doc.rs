//! Token document model.
//!
//! A [`TokenDoc`] is the output of tokenization: a flat sequence of
//! tokens with one trailing-space flag per token. Joining every token,
//! followed by a single space wherever its flag is set, reproduces the
//! consumed input exactly. Annotation lookup happens through
//! [`TokenDoc::char_span`], which only succeeds when the requested
//! character range lands exactly on token boundaries.

use crate::error::{NercError, Result};
use serde::Serialize;

/// A tokenized document: parallel token and space sequences.
///
/// The two sequences are always the same length; the constructor
/// rejects anything else. Tokens are never empty strings.
///
/// # Examples
///
/// ```
/// use nerc_core::TokenDoc;
///
/// let doc = TokenDoc::new(
///     vec!["Money".into(), "In".into()],
///     vec![true, false],
/// ).unwrap();
/// assert_eq!(doc.text(), "Money In");
/// assert_eq!(doc.char_span(0, 8).unwrap().text, "Money In");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenDoc {
    tokens: Vec<String>,
    spaces: Vec<bool>,
}

/// A contiguous run of whole tokens inside a [`TokenDoc`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Index of the first token in the span.
    pub start_token: usize,
    /// Index one past the last token in the span.
    pub end_token: usize,
    /// Surface text of the span (no trailing space).
    pub text: String,
}

impl TokenDoc {
    /// Build a document from parallel token/space sequences.
    ///
    /// # Errors
    ///
    /// Returns [`NercError::TokenCountMismatch`] if the sequences have
    /// different lengths.
    pub fn new(tokens: Vec<String>, spaces: Vec<bool>) -> Result<Self> {
        if tokens.len() != spaces.len() {
            return Err(NercError::TokenCountMismatch {
                tokens: tokens.len(),
                spaces: spaces.len(),
            });
        }
        Ok(Self { tokens, spaces })
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if the document holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token texts, in document order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Trailing-space flags, one per token.
    #[must_use]
    pub fn spaces(&self) -> &[bool] {
        &self.spaces
    }

    /// Reconstruct the document text: each token followed by a single
    /// space where its flag is set.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (token, &space) in self.tokens.iter().zip(&self.spaces) {
            out.push_str(token);
            if space {
                out.push(' ');
            }
        }
        out
    }

    /// Length of the reconstructed text in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.tokens
            .iter()
            .zip(&self.spaces)
            .map(|(t, &s)| t.chars().count() + usize::from(s))
            .sum()
    }

    /// Look up the span covering the character range `[start, end)` of
    /// the reconstructed text.
    ///
    /// Returns `Some` only when `start` is the first character of a
    /// token and `end` is one past the last character of a token, i.e.
    /// the range covers whole tokens. Ranges that begin or end in the
    /// middle of a token yield `None`; that is how callers detect
    /// that annotation offsets were measured against a different view
    /// of the text.
    #[must_use]
    pub fn char_span(&self, start: usize, end: usize) -> Option<Span> {
        if end <= start {
            return None;
        }
        let mut pos = 0usize;
        let mut start_token = None;
        for (i, (token, &space)) in self.tokens.iter().zip(&self.spaces).enumerate() {
            let token_len = token.chars().count();
            if pos == start {
                start_token = Some(i);
            }
            if pos + token_len == end {
                let first = start_token?;
                return Some(Span {
                    start_token: first,
                    end_token: i + 1,
                    text: self.slice_text(first, i + 1),
                });
            }
            if pos + token_len > end {
                return None;
            }
            pos += token_len + usize::from(space);
        }
        None
    }

    /// Surface text of tokens `[start, end)`, honoring interior space
    /// flags but dropping the trailing space of the final token.
    fn slice_text(&self, start: usize, end: usize) -> String {
        let mut out = String::new();
        for i in start..end {
            out.push_str(&self.tokens[i]);
            if self.spaces[i] && i + 1 < end {
                out.push(' ');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(words: &[(&str, bool)]) -> TokenDoc {
        TokenDoc::new(
            words.iter().map(|(t, _)| (*t).to_string()).collect(),
            words.iter().map(|(_, s)| *s).collect(),
        )
        .unwrap()
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = TokenDoc::new(vec!["a".into()], vec![]).unwrap_err();
        assert!(matches!(
            err,
            NercError::TokenCountMismatch {
                tokens: 1,
                spaces: 0
            }
        ));
    }

    #[test]
    fn text_joins_tokens_and_spaces() {
        let d = doc(&[("Text1", true), ("text2", true), ("text3", false)]);
        assert_eq!(d.text(), "Text1 text2 text3");
        assert_eq!(d.char_len(), 17);
    }

    #[test]
    fn char_span_on_token_boundaries() {
        let d = doc(&[("Text1", true), ("text2", true), ("text3", false)]);
        assert_eq!(d.char_span(0, 5).unwrap().text, "Text1");
        assert_eq!(d.char_span(6, 11).unwrap().text, "text2");
        assert_eq!(d.char_span(12, 17).unwrap().text, "text3");
        assert_eq!(d.char_span(6, 17).unwrap().text, "text2 text3");
    }

    #[test]
    fn char_span_rejects_interior_offsets() {
        let d = doc(&[("Text1", true), ("text2", false)]);
        assert!(d.char_span(1, 5).is_none());
        assert!(d.char_span(0, 4).is_none());
        assert!(d.char_span(0, 0).is_none());
        assert!(d.char_span(5, 6).is_none());
    }

    #[test]
    fn char_span_counts_characters_not_bytes() {
        let d = doc(&[("£", true), ("100", false)]);
        assert_eq!(d.char_span(0, 1).unwrap().text, "£");
        assert_eq!(d.char_span(2, 5).unwrap().text, "100");
    }

    #[test]
    fn span_excludes_trailing_space() {
        let d = doc(&[("a", true), ("b", true)]);
        let span = d.char_span(0, 3).unwrap();
        assert_eq!(span.text, "a b");
        assert_eq!(span.start_token, 0);
        assert_eq!(span.end_token, 2);
    }
}

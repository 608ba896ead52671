//! Tokenizer facade.

use crate::html;
use crate::segment::{Segmenter, WordSegmenter};
use crate::selection;
use nerc_core::{NercError, Result, TokenDoc};

/// Entity-aware lossless HTML tokenizer.
///
/// Feed a raw document in, get back a [`TokenDoc`] whose rejoined text
/// equals the input. The segmenter used for text regions is pluggable;
/// the default is [`WordSegmenter`].
///
/// The tokenizer holds no per-document state: every call is
/// independent, so one instance can serve many documents (or threads,
/// if the segmenter is shareable).
///
/// # Examples
///
/// ```
/// use nerc_tokenizer::HtmlTokenizer;
///
/// let tokenizer = HtmlTokenizer::new();
/// let raw = r#"<span style="font-size:9pt">Balance (&#xa3;)</span>"#;
/// let doc = tokenizer.tokenize(raw).unwrap();
/// assert_eq!(doc.text(), raw);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlTokenizer<S = WordSegmenter> {
    segmenter: S,
}

impl HtmlTokenizer {
    /// Tokenizer with the default word segmenter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            segmenter: WordSegmenter::new(),
        }
    }
}

impl<S: Segmenter> HtmlTokenizer<S> {
    /// Tokenizer with a custom word segmenter.
    pub fn with_segmenter(segmenter: S) -> Self {
        Self { segmenter }
    }

    /// Tokenize a raw document.
    ///
    /// Empty tokens (a segmenter may legally produce them) are replaced
    /// by a single-space token with a cleared flag so the document
    /// model never holds zero-width entries.
    ///
    /// # Errors
    ///
    /// Propagates [`NercError::Alignment`] and
    /// [`NercError::MalformedAttribute`] from tokenization, and fails
    /// with [`NercError::TokenCountMismatch`] if the parallel sequences
    /// ever diverged; this is the boundary contract check.
    pub fn tokenize(&self, raw: &str) -> Result<TokenDoc> {
        let (mut tokens, mut spaces) = html::parse_document(raw, &self.segmenter)?;
        if tokens.len() != spaces.len() {
            return Err(NercError::TokenCountMismatch {
                tokens: tokens.len(),
                spaces: spaces.len(),
            });
        }
        for (token, space) in tokens.iter_mut().zip(spaces.iter_mut()) {
            if token.is_empty() {
                *token = " ".to_string();
                *space = false;
            }
        }
        TokenDoc::new(tokens, spaces)
    }

    /// Recover the raw substring for a decoded selection starting at
    /// character `offset` of `raw`. See [`selection::resolve_selection`].
    ///
    /// # Errors
    ///
    /// See [`selection::resolve_selection`].
    pub fn resolve_selection(
        &self,
        raw: &str,
        offset: usize,
        selection: &str,
    ) -> Result<String> {
        selection::resolve_selection(&self.segmenter, raw, offset, selection)
    }
}

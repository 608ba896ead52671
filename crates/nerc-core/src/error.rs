//! Error types for tokenization and annotation resolution.

use thiserror::Error;

/// Error types that can occur while tokenizing a document or resolving
/// annotation offsets against it.
///
/// The first three variants are the interesting ones: they describe the
/// ways the raw markup and the annotation data can disagree. The rest
/// wrap I/O and serialization failures from project bootstrap.
///
/// # Examples
///
/// ```
/// use nerc_core::NercError;
///
/// let err = NercError::Alignment {
///     expected: '£',
///     context: "&euro;100".to_string(),
/// };
/// assert!(err.to_string().contains("£"));
/// ```
#[derive(Error, Debug)]
pub enum NercError {
    /// The decoded text and the raw source cannot be made to agree at
    /// some character. Carries the decoded character we were looking
    /// for and an excerpt of the raw source where the walk stopped.
    ///
    /// This is not retried: it means the two views of the text differ
    /// by more than entity escaping, and any partial result would
    /// silently corrupt downstream training offsets. Callers abort the
    /// document instead.
    #[error("cannot align decoded text with raw source: expected {expected:?} near {context:?}")]
    Alignment {
        /// Decoded character the walk could not account for.
        expected: char,
        /// Bounded excerpt of the remaining raw source, for diagnostics.
        context: String,
    },

    /// An attribute is structurally incomplete, e.g. a non-empty style
    /// declaration with no `property:value` separator.
    #[error("malformed {name:?} attribute: {detail}")]
    MalformedAttribute {
        /// Attribute name as it appeared in the tag.
        name: String,
        /// What was wrong with it.
        detail: String,
    },

    /// The token and space sequences diverged in length. Always a bug
    /// in the tokenizer itself, never expected in correct operation.
    #[error("token/space sequence length mismatch: {tokens} tokens vs {spaces} space flags")]
    TokenCountMismatch {
        /// Number of tokens emitted.
        tokens: usize,
        /// Number of space flags emitted.
        spaces: usize,
    },

    /// An annotation offset points outside the document.
    #[error("offset {offset} is beyond the end of the document ({len} characters)")]
    InvalidOffset {
        /// The offending character offset.
        offset: usize,
        /// Document length in characters.
        len: usize,
    },

    /// The markup reader failed before any tokens could be emitted.
    #[error("failed to parse markup: {0}")]
    Parse(String),

    /// The annotations file or one of its records is unusable.
    #[error("invalid project configuration: {0}")]
    Config(String),

    /// File system error reading documents or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error reading the annotations file or writing records.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using [`NercError`].
pub type Result<T> = std::result::Result<T, NercError>;

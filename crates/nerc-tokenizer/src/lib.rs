//! # nerc-tokenizer
//!
//! Lossless, entity-aware HTML tokenization with annotation-offset
//! realignment.
//!
//! An HTML document is flattened into a sequence of tokens plus one
//! trailing-space flag per token, such that rejoining them reproduces
//! the input byte for byte. Structural markup (`<`, tag names,
//! attribute punctuation, style declarations) is emitted directly;
//! text regions are split by a pluggable word [`Segmenter`], and each
//! text token is mapped back to its original escaped form when the raw
//! source carries entity references like `&pound;` or `&#xa3;`.
//!
//! The same realignment machinery powers selection resolution: given
//! an annotation whose text was recorded against an entity-unescaped
//! view of the document, [`resolve_selection`] reconstructs the exact
//! raw substring so the annotation's span can be located in the
//! original source.
//!
//! ## Quick start
//!
//! ```
//! use nerc_tokenizer::HtmlTokenizer;
//!
//! let tokenizer = HtmlTokenizer::new();
//! let raw = "<p>SAINSBURY&apos;S S/MKT</p>";
//!
//! // lossless tokenization
//! let doc = tokenizer.tokenize(raw)?;
//! assert_eq!(doc.text(), raw);
//!
//! // the annotation tool saw the unescaped view
//! let escaped = tokenizer.resolve_selection(raw, 3, "SAINSBURY'S S/MKT")?;
//! assert_eq!(escaped, "SAINSBURY&apos;S S/MKT");
//! # Ok::<(), nerc_core::NercError>(())
//! ```

pub mod annotate;
pub mod entities;
mod html;
pub mod realign;
pub mod segment;
pub mod selection;
pub mod tokenizer;

pub use annotate::resolve_annotation;
pub use realign::realign;
pub use segment::{SegToken, Segmenter, WordSegmenter};
pub use selection::resolve_selection;
pub use tokenizer::HtmlTokenizer;

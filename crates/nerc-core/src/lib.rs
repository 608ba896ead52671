//! # nerc-core
//!
//! Shared types for nerc-rs, a tool that prepares named-entity training
//! data from annotated HTML documents.
//!
//! This crate provides:
//! - **Token documents**: [`TokenDoc`] and [`Span`], the parallel
//!   token/space model that tokenization produces and span lookup runs
//!   against
//! - **Annotations**: [`ProjectConfig`], [`DocumentRef`],
//!   [`Annotation`] (the records read from an annotations file) and
//!   the [`TrainingRecord`]/[`ResolvedSpan`] output records
//! - **Errors**: [`NercError`] and the crate-wide [`Result`] alias
//!
//! The tokenizer itself lives in `nerc-tokenizer`; the `nerc` binary
//! lives in `nerc-cli`. Both depend on this crate so the types stay
//! compatible across the workspace.

pub mod doc;
pub mod error;
pub mod project;

pub use doc::{Span, TokenDoc};
pub use error::{NercError, Result};
pub use project::{
    Annotation, DocumentRef, ProjectConfig, ResolvedSpan, TrainingRecord,
};

//! Annotation-to-span resolution.
//!
//! Annotations arrive with character offsets measured against whatever
//! view of the document the annotation tool showed. When that view had
//! entities unescaped, a direct token lookup fails; the fallback
//! re-derives the raw span through selection resolution and retries
//! with the corrected length.

use crate::segment::Segmenter;
use crate::tokenizer::HtmlTokenizer;
use log::debug;
use nerc_core::{Annotation, NercError, ResolvedSpan, Result, TokenDoc};

/// Resolve one annotation against a tokenized document.
///
/// Tries the recorded offsets directly first. If they do not land on
/// token boundaries, realigns the annotation's selection text against
/// the raw source starting at `offset_start` and retries with the
/// escaped length.
///
/// # Errors
///
/// [`NercError::Config`] when the offsets cannot be resolved and no
/// selection text is available (or the retry still misses token
/// boundaries); [`NercError::Alignment`] when the selection text
/// cannot be realigned at all.
pub fn resolve_annotation<S: Segmenter>(
    tokenizer: &HtmlTokenizer<S>,
    doc: &TokenDoc,
    raw: &str,
    annotation: &Annotation,
) -> Result<ResolvedSpan> {
    if doc
        .char_span(annotation.offset_start, annotation.offset_end)
        .is_some()
    {
        return Ok(ResolvedSpan {
            start: annotation.offset_start,
            end: annotation.offset_end,
            label: annotation.label.clone(),
        });
    }

    let Some(selection) = annotation.selection.as_deref() else {
        return Err(NercError::Config(format!(
            "annotation {}..{} ({}) does not land on token boundaries and carries no \
             selection text",
            annotation.offset_start, annotation.offset_end, annotation.label
        )));
    };

    debug!(
        "offsets {}..{} missed token boundaries; realigning selection {selection:?}",
        annotation.offset_start, annotation.offset_end
    );
    let escaped = tokenizer.resolve_selection(raw, annotation.offset_start, selection)?;
    let end = annotation.offset_start + escaped.chars().count();
    if doc.char_span(annotation.offset_start, end).is_none() {
        return Err(NercError::Config(format!(
            "annotation {}..{} ({}) still unresolvable after realignment to {}..{end}",
            annotation.offset_start, annotation.offset_end, annotation.label,
            annotation.offset_start
        )));
    }
    Ok(ResolvedSpan {
        start: annotation.offset_start,
        end,
        label: annotation.label.clone(),
    })
}

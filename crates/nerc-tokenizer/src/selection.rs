//! Selection resolution: recover a raw-source substring from a
//! decoded selection.
//!
//! An annotation records the text the annotator selected, but the tool
//! that produced it may have unescaped HTML entities first. Resolving
//! runs the word segmenter over that decoded selection and realigns
//! each token against the raw source at a moving cursor, rebuilding the
//! exact escaped substring so the caller can retry an offset lookup
//! with the correct raw length.

use crate::realign::{excerpt, realign};
use crate::segment::Segmenter;
use nerc_core::{NercError, Result};

/// Resolve a decoded selection back to the raw substring it names.
///
/// `offset` is the character offset into `raw` where the selection
/// starts. Each segmented token of `selection` is realigned against the
/// raw tail; a set trailing-space flag appends one literal space and
/// advances the cursor past it.
///
/// # Errors
///
/// [`NercError::InvalidOffset`] when `offset` is past the end of `raw`;
/// [`NercError::Alignment`] when any constituent token cannot be
/// realigned.
pub fn resolve_selection<S: Segmenter>(
    segmenter: &S,
    raw: &str,
    offset: usize,
    selection: &str,
) -> Result<String> {
    let start = byte_offset(raw, offset)?;
    let mut rest = &raw[start..];
    let mut resolved = String::new();
    for seg in segmenter.segment(selection) {
        let matched = realign(rest, &seg.text)?;
        rest = &rest[matched.len()..];
        resolved.push_str(&matched);
        if seg.trailing_space {
            if !rest.starts_with(' ') {
                return Err(NercError::Alignment {
                    expected: ' ',
                    context: excerpt(rest),
                });
            }
            resolved.push(' ');
            rest = &rest[1..];
        }
    }
    Ok(resolved)
}

/// Byte position of the `offset`-th character of `raw`.
fn byte_offset(raw: &str, offset: usize) -> Result<usize> {
    let mut count = 0usize;
    for (byte, _) in raw.char_indices() {
        if count == offset {
            return Ok(byte);
        }
        count += 1;
    }
    if count == offset {
        Ok(raw.len())
    } else {
        Err(NercError::InvalidOffset { offset, len: count })
    }
}

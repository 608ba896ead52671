//! Entity realignment: recover the escaped form of decoded text.
//!
//! Annotation tools hand back text with HTML entities already
//! unescaped, so the character offsets they record no longer line up
//! with the raw document. [`realign`] inverts that: given the raw
//! source at some position and a decoded target, it finds the shortest
//! raw prefix whose decoding reproduces the target, character by
//! character.
//!
//! The walk is correct whenever the two views differ *only* by entity
//! escaping (no reordering, no dropped characters), which is exactly
//! what an unescape pass produces.

use crate::entities::{decode_entity, ENTITY_PATTERN};
use nerc_core::{NercError, Result};

/// How much of the remaining raw source an [`NercError::Alignment`]
/// carries for diagnostics.
const CONTEXT_CHARS: usize = 40;

pub(crate) fn excerpt(raw: &str) -> String {
    raw.chars().take(CONTEXT_CHARS).collect()
}

/// Find the raw prefix of `raw` whose entity-decoding equals `decoded`.
///
/// At each decoded character the walk first tries an entity reference
/// anchored at the raw cursor; if one is there and its decoding matches
/// the upcoming decoded text, the whole reference is consumed as the
/// raw form of those characters. Otherwise exactly one raw character is
/// consumed and must match literally. Raw input past the decoded target
/// is ignored.
///
/// # Errors
///
/// Returns [`NercError::Alignment`] as soon as neither an entity nor a
/// literal character can account for the current decoded character.
/// Callers must treat this as fatal for the document: the two text
/// views disagree in a way realignment cannot bridge, and a partial
/// result would corrupt every downstream offset.
///
/// # Examples
///
/// ```
/// use nerc_tokenizer::realign;
///
/// let raw = "SAINSBURY&apos;S S/MKT";
/// assert_eq!(realign(raw, "SAINSBURY'S").unwrap(), "SAINSBURY&apos;S");
/// ```
pub fn realign(raw: &str, decoded: &str) -> Result<String> {
    let mut raw_pos = 0usize;
    let mut decoded_pos = 0usize;
    loop {
        let rest_decoded = &decoded[decoded_pos..];
        let Some(current) = rest_decoded.chars().next() else {
            break;
        };
        let rest_raw = &raw[raw_pos..];
        if let Some(found) = ENTITY_PATTERN.find(rest_raw) {
            if let Some(expansion) = decode_entity(found.as_str()) {
                if rest_decoded.starts_with(expansion.as_str()) {
                    raw_pos += found.end();
                    decoded_pos += expansion.len();
                    continue;
                }
            }
        }
        match rest_raw.chars().next() {
            Some(c) if c == current => {
                raw_pos += c.len_utf8();
                decoded_pos += c.len_utf8();
            }
            _ => {
                return Err(NercError::Alignment {
                    expected: current,
                    context: excerpt(rest_raw),
                });
            }
        }
    }
    Ok(raw[..raw_pos].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GARBAGE: &str = "asdlkfjas &amp;' 4444 &#x27; &pound; sldfkja sldkjf alsjdf";

    #[test]
    fn recovers_escaped_ampersand() {
        let raw = format!("&amp;{GARBAGE}");
        assert_eq!(realign(&raw, "&").unwrap(), "&amp;");
    }

    #[test]
    fn recovers_escaped_apostrophe_inside_word() {
        let raw = format!("SAINSBURY&apos;S{GARBAGE}");
        assert_eq!(realign(&raw, "SAINSBURY'S").unwrap(), "SAINSBURY&apos;S");
    }

    #[test]
    fn recovers_mixed_escaped_and_literal_characters() {
        // the first apostrophe was never escaped, the second was, and
        // the pound sign uses a named reference
        let raw = format!("&amp;'4444&#x27;&pound;{GARBAGE}");
        assert_eq!(
            realign(&raw, "&'4444'£").unwrap(),
            "&amp;'4444&#x27;&pound;"
        );
    }

    #[test]
    fn entity_forms_are_equivalent() {
        assert_eq!(realign("&pound;tail", "£").unwrap(), "&pound;");
        assert_eq!(realign("&#163;tail", "£").unwrap(), "&#163;");
        assert_eq!(realign("&#xa3;tail", "£").unwrap(), "&#xa3;");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(realign("Money In", "Money").unwrap(), "Money");
        assert_eq!(realign("", "").unwrap(), "");
    }

    #[test]
    fn mismatch_is_an_alignment_error() {
        let err = realign("abc", "xyz").unwrap_err();
        match err {
            NercError::Alignment { expected, context } => {
                assert_eq!(expected, 'x');
                assert_eq!(context, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn raw_shorter_than_decoded_is_an_alignment_error() {
        assert!(realign("ab", "abc").is_err());
    }

    #[test]
    fn literal_ampersand_not_matching_entity_stays_literal() {
        // `&` followed by text that is not a recognized reference
        assert_eq!(realign("& More", "& More").unwrap(), "& More");
    }
}

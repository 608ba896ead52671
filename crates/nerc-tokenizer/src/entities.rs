//! Entity reference matching and decoding.
//!
//! One pattern and one decoder, shared by the text tokenizer and the
//! realignment walk so that the two always agree on what counts as an
//! entity. The pattern accepts `&name;` (2-8 letters), `&#digits;` and
//! `&#xhex;` (2-4 digits); anything else stays literal text.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Entity reference anchored at the start of the haystack.
pub(crate) static ENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:&[A-Za-z]{2,8};|&#x?[A-Za-z0-9]{2,4};)")
        .expect("regex is compile-time constant")
});

/// Decode a single entity reference (including the `&` and `;`).
///
/// Numeric character references are decoded directly from their code
/// point; named references are delegated to the HTML5 entity table.
/// Returns `None` when the reference does not decode to anything.
pub(crate) fn decode_entity(entity: &str) -> Option<String> {
    let body = entity.strip_prefix('&')?.strip_suffix(';')?;
    if let Some(number) = body.strip_prefix('#') {
        let code = if let Some(hex) = number
            .strip_prefix('x')
            .or_else(|| number.strip_prefix('X'))
        {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            number.parse::<u32>().ok()?
        };
        char::from_u32(code).map(String::from)
    } else {
        let decoded = html_escape::decode_html_entities(entity);
        (decoded != entity).then(|| decoded.into_owned())
    }
}

/// Decode every recognized entity reference in `raw`, leaving anything
/// that does not match the pattern (or does not decode) untouched.
///
/// This is the decoded view the word segmenter runs over; realignment
/// inverts it one token at a time.
pub fn decode_text(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        if let Some(found) = ENTITY_PATTERN.find(rest) {
            if let Some(expansion) = decode_entity(found.as_str()) {
                out.push_str(&expansion);
                rest = &rest[found.end()..];
                continue;
            }
        }
        out.push('&');
        rest = &rest[1..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_decimal_and_hex_forms() {
        assert_eq!(decode_entity("&pound;").as_deref(), Some("£"));
        assert_eq!(decode_entity("&#163;").as_deref(), Some("£"));
        assert_eq!(decode_entity("&#xa3;").as_deref(), Some("£"));
        assert_eq!(decode_entity("&apos;").as_deref(), Some("'"));
        assert_eq!(decode_entity("&amp;").as_deref(), Some("&"));
    }

    #[test]
    fn unknown_names_do_not_decode() {
        assert_eq!(decode_entity("&zzqq;"), None);
    }

    #[test]
    fn pattern_bounds_are_enforced() {
        // single-letter names and 1-digit numeric forms stay literal
        assert!(ENTITY_PATTERN.find("&a;").is_none());
        assert!(ENTITY_PATTERN.find("&#9;").is_none());
        assert!(ENTITY_PATTERN.find("&toolongname;").is_none());
        assert!(ENTITY_PATTERN.find("&pound;").is_some());
        // only matches anchored at the start
        assert!(ENTITY_PATTERN.find(" &pound;").is_none());
    }

    #[test]
    fn decode_text_mixes_entities_and_literals() {
        assert_eq!(decode_text("SAINSBURY&apos;S"), "SAINSBURY'S");
        assert_eq!(decode_text("&amp;'4444&#x27;&pound;"), "&'4444'£");
        assert_eq!(decode_text("Money & More"), "Money & More");
        assert_eq!(decode_text("no entities here"), "no entities here");
    }
}

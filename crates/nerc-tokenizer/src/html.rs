//! Structural HTML tokenizer.
//!
//! One forward pass over the markup, driven by the pull-parser events,
//! emitting the parallel token/space sequences. Markup punctuation is
//! emitted directly; text data is decoded, handed to the word
//! segmenter, and each resulting token is mapped back to its escaped
//! raw form through realignment whenever the chunk carries entity
//! references. Rejoining the output per the space flags reproduces the
//! consumed input.

use crate::entities::decode_text;
use crate::realign::realign;
use crate::segment::Segmenter;
use log::{debug, warn};
use nerc_core::{NercError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Tokenize a raw document into parallel token/space sequences.
pub(crate) fn parse_document<S: Segmenter>(
    raw: &str,
    segmenter: &S,
) -> Result<(Vec<String>, Vec<bool>)> {
    let mut stream = TokenStream::new(segmenter);

    let mut reader = Reader::from_str(raw);
    // Every character must survive into the token sequence, including
    // inter-tag whitespace.
    reader.trim_text(false);
    // HTML leaves void elements like <br> unclosed; tag nesting is not
    // this tokenizer's concern.
    reader.check_end_names(false);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => stream.handle_tag(&e, false)?,
            Ok(Event::Empty(e)) => stream.handle_tag(&e, true)?,
            Ok(Event::End(e)) => {
                stream.handle_end_tag(&String::from_utf8_lossy(e.name().as_ref()));
            }
            Ok(Event::Text(e)) => {
                let chunk = String::from_utf8_lossy(&e).into_owned();
                stream.handle_data(&chunk)?;
            }
            Ok(Event::Comment(e)) => {
                stream.handle_comment(&String::from_utf8_lossy(&e));
            }
            Ok(Event::DocType(e)) => {
                stream.handle_doctype(&String::from_utf8_lossy(&e));
            }
            Ok(Event::CData(e)) => {
                let body = e.into_inner();
                stream.handle_cdata(&String::from_utf8_lossy(&body));
            }
            Ok(Event::Decl(_) | Event::PI(_)) => {
                return Err(NercError::Parse(format!(
                    "processing instruction at byte {} cannot be tokenized losslessly",
                    reader.buffer_position()
                )));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(NercError::Parse(format!(
                    "markup error at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
        buf.clear();
    }

    debug!(
        "emitted {} tokens covering {} characters",
        stream.tokens.len(),
        stream.cursor
    );
    Ok((stream.tokens, stream.spaces))
}

/// Accumulates the token/space sequences during one parse.
struct TokenStream<'s, S> {
    segmenter: &'s S,
    tokens: Vec<String>,
    spaces: Vec<bool>,
    /// Characters covered so far: token lengths plus one per set flag.
    cursor: usize,
}

impl<'s, S: Segmenter> TokenStream<'s, S> {
    fn new(segmenter: &'s S) -> Self {
        Self {
            segmenter,
            tokens: Vec::new(),
            spaces: Vec::new(),
            cursor: 0,
        }
    }

    fn push(&mut self, token: impl Into<String>, space: bool) {
        let token = token.into();
        self.cursor += token.chars().count() + usize::from(space);
        self.tokens.push(token);
        self.spaces.push(space);
        debug_assert_eq!(self.tokens.len(), self.spaces.len());
    }

    /// Start tag or self-closing tag: `<`, name, attributes, `>`/`/>`.
    fn handle_tag(&mut self, e: &BytesStart<'_>, self_closing: bool) -> Result<()> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let mut attrs = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| NercError::MalformedAttribute {
                name: name.clone(),
                detail: err.to_string(),
            })?;
            attrs.push((
                String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                String::from_utf8_lossy(&attr.value).into_owned(),
            ));
        }
        debug!("start tag: {name} ({} attributes)", attrs.len());

        self.push("<", false);
        self.push(name, !attrs.is_empty());
        let count = attrs.len();
        for (index, (attr_name, attr_value)) in attrs.into_iter().enumerate() {
            self.emit_attribute(&attr_name, &attr_value, index + 1 == count)?;
        }
        self.push(if self_closing { "/>" } else { ">" }, false);
        Ok(())
    }

    /// `name`, `=`, `"`, value tokens, `"`. The closing quote carries
    /// the space separating it from the next attribute.
    fn emit_attribute(&mut self, name: &str, value: &str, last: bool) -> Result<()> {
        self.push(name, false);
        self.push("=", false);
        self.push("\"", false);
        if name == "style" {
            self.emit_style_value(value)?;
        } else {
            self.push(value, false);
        }
        self.push("\"", !last);
        Ok(())
    }

    /// Split a style value into `property`, `:`, value, `;` runs.
    ///
    /// The `;` token emitted after the final declaration is kept only
    /// when the source value itself ends with `;`.
    fn emit_style_value(&mut self, value: &str) -> Result<()> {
        let declarations: Vec<&str> = value.split(';').collect();
        let count = declarations.len();
        let mut emitted = false;
        for (index, declaration) in declarations.into_iter().enumerate() {
            if declaration.trim().is_empty() {
                // an empty final piece is the normal artifact of a
                // trailing `;`; anything else is a doubled separator or
                // stray whitespace that cannot be reproduced
                if index + 1 != count || !declaration.is_empty() {
                    warn!("skipping empty declaration in style value {value:?}");
                }
                continue;
            }
            let Some((property, property_value)) = declaration.split_once(':') else {
                return Err(NercError::MalformedAttribute {
                    name: "style".to_string(),
                    detail: format!("declaration {declaration:?} has no value"),
                });
            };
            self.push(property, false);
            self.push(":", false);
            self.push(property_value, false);
            self.push(";", false);
            emitted = true;
        }
        if emitted && !value.trim_end().ends_with(';') {
            // the final `;` token has no counterpart in the source
            self.tokens.pop();
            self.spaces.pop();
            self.cursor -= 1;
        }
        Ok(())
    }

    fn handle_end_tag(&mut self, name: &str) {
        debug!("end tag: {name}");
        self.push("</", false);
        self.push(name, false);
        self.push(">", false);
    }

    /// Text between tags: decode, segment, and map each token back to
    /// its raw escaped form when the chunk carries entity references.
    fn handle_data(&mut self, chunk: &str) -> Result<()> {
        debug!("data chunk: {chunk:?}");
        let decoded = decode_text(chunk);
        let has_entities = chunk.contains('&');
        let mut rest = chunk;
        for seg in self.segmenter.segment(&decoded) {
            let token = if has_entities {
                realign(rest, &seg.text)?
            } else {
                seg.text
            };
            rest = &rest[token.len()..];
            if seg.trailing_space && !rest.is_empty() {
                rest = &rest[1..];
            }
            self.push(token, seg.trailing_space);
        }
        Ok(())
    }

    fn handle_comment(&mut self, body: &str) {
        self.push("<", false);
        self.push(format!("!--{body}--"), false);
        self.push(">", false);
    }

    fn handle_doctype(&mut self, body: &str) {
        // the reader strips the keyword; restore it unless the body
        // still carries one
        let body = if body
            .get(..7)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("doctype"))
        {
            body.to_string()
        } else {
            format!("DOCTYPE {}", body.trim_start())
        };
        self.push("<!", false);
        self.push(body, false);
        self.push(">", false);
    }

    fn handle_cdata(&mut self, body: &str) {
        self.push("<!", false);
        self.push(format!("[CDATA[{body}]]"), false);
        self.push(">", false);
    }
}

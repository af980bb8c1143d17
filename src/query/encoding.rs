//! Percent-encoding for literal keys and values.
//!
//! Keys are escaped the way `encodeURI` escapes a URI: reserved characters
//! such as `/ : ; = ?` and the unreserved marks stay literal, while every
//! grammar character (`> < ^ | " \ [ {`) is escaped. Decoding follows
//! `decodeURI` and keeps escapes of reserved characters as literal text.
//!
//! Symbols and separators of the query grammar are never passed through
//! here; only the literal substrings between them are.

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use super::error::{Result, TreeError};

/// ASCII characters escaped by `encodeURI`. Non-ASCII is always escaped.
const URI_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Characters whose escapes `decodeURI` leaves undecoded.
const URI_RESERVED: &[u8] = b";/?:@&=+$,#";

/// Encodes a literal key or value so that it cannot collide with grammar
/// characters.
pub fn encode_key(key: &str) -> Cow<'_, str> {
    utf8_percent_encode(key, URI_ESCAPE).into()
}

/// Decodes a percent-encoded literal key or value.
///
/// Malformed escapes (`%` not followed by two hex digits) and escapes that
/// don't decode to UTF-8 are errors.
pub fn decode_key(input: &str) -> Result<String> {
    let invalid = || TreeError::InvalidEncoding {
        input: input.to_string(),
    };

    // Reserved escapes get their '%' escaped so the decoder restores them verbatim
    let mut protected = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(idx) = rest.find('%') {
        let (head, tail) = rest.split_at(idx);
        protected.push_str(head);

        let hex = tail
            .get(1..3)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(invalid)?;
        let byte = u8::from_str_radix(hex, 16).map_err(|_| invalid())?;

        protected.push('%');
        if URI_RESERVED.contains(&byte) {
            protected.push_str("25");
        }
        protected.push_str(hex);
        rest = &tail[3..];
    }
    protected.push_str(rest);

    percent_decode_str(&protected)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| invalid())
}

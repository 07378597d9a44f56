//! Percent-encoding for route paths and query strings.
//!
//! Path segments are encoded per RFC 3986: everything outside the unreserved
//! set (`A-Z a-z 0-9 - . _ ~`) is percent-encoded, except for a small set of
//! delimiters that are safe inside a path segment and read better literally:
//!
//! - `@` and `:` are general delimiters with special meaning only in the
//!   authority component.
//! - `;` `,` `=` `+` `!` `*` `|` have no predefined meaning in a path and are
//!   commonly used to delimit subcomponents of a segment.
//!
//! Query strings use `application/x-www-form-urlencoded`: only
//! `A-Z a-z 0-9 - . _` pass through and a space becomes `+`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters percent-encoded inside a path segment.
pub const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'@')
    .remove(b':')
    .remove(b';')
    .remove(b',')
    .remove(b'=')
    .remove(b'+')
    .remove(b'!')
    .remove(b'*')
    .remove(b'|');

/// Characters percent-encoded inside a form-encoded query key or value.
pub const FORM_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

/// Encode a single path segment. `/` and `?` are always encoded.
pub fn encode_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Decode a percent-encoded path segment. `+` is left untouched, and invalid
/// UTF-8 sequences are replaced with U+FFFD.
pub fn decode_path_segment(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

/// Encode a query key or value, spaces as `+`.
pub fn encode_form_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    // Split on spaces so they can be written as '+' instead of "%20".
    for (index, part) in value.split(' ').enumerate() {
        if index > 0 {
            out.push('+');
        }
        out.extend(utf8_percent_encode(part, FORM_COMPONENT));
    }
    out
}

/// Build a query string (without the leading `?`) from key/value pairs,
/// keeping the order they are given in.
pub fn encode_query<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    for (key, value) in pairs {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(&encode_form_component(key));
        out.push('=');
        out.push_str(&encode_form_component(value));
    }
    out
}

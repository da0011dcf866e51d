//! Canonical query string encoding.
//!
//! Intermediaries may reorder or re-escape query parameters, so the signature
//! covers a canonical form: pairs sorted by key (byte order), values of a
//! repeated key in their original order, every component escaped the same
//! way regardless of how it arrived.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode, percent_encode};
use std::collections::BTreeMap;

/// Bytes left unescaped in a query component: `A-Z a-z 0-9 - _ . ~`
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Re-encode a raw query string into its canonical form
///
/// Segments containing `;` or a malformed `%` escape are dropped, as are
/// empty segments. A key without `=` is encoded as `key=`. Components are
/// handled as raw bytes, so escapes that do not decode to UTF-8 survive.
pub fn canonical_query(raw: &str) -> String {
    let mut params: BTreeMap<Vec<u8>, Vec<Vec<u8>>> = BTreeMap::new();

    for segment in raw.split('&').filter(|segment| {
        !segment.is_empty() && !segment.contains(';') && has_well_formed_escapes(segment)
    }) {
        let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
        params.entry(unescape(key)).or_default().push(unescape(value));
    }

    params
        .iter()
        .flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| format!("{}={}", escape(key), escape(value)))
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn unescape(component: &str) -> Vec<u8> {
    // '+' means space only when literal; an escaped %2B stays '+'.
    let spaced: Vec<u8> = component
        .bytes()
        .map(|b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}

fn escape(component: &[u8]) -> String {
    // A literal '%' is escaped as %25, so %20 can only come from a space.
    percent_encode(component, QUERY_COMPONENT)
        .to_string()
        .replace("%20", "+")
}

fn has_well_formed_escapes(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

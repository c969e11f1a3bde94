//! Reversible encoding of arbitrary field names into Solr-legal characters.
//!
//! Solr dynamic field names are restricted to ASCII letters, digits and
//! underscores. Logical field names may carry anything (hyphens, dots,
//! non-ASCII machine names), so every other character is encoded as
//! `_X<hex>_`, where `<hex>` is the lowercase hex of the character's UTF-8
//! bytes. The mapping is reversible: `decode_field_name(encode_field_name(s))
//! == s` for any `s` that does not itself contain a literal `_X<hex>_` run.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref ENCODED_SEQUENCE: Regex =
        Regex::new("_X([0-9a-f]+?)_").expect("valid encoded-sequence pattern");
}

/// Encode a field name into Solr-legal characters.
pub fn encode_field_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            encoded.push(ch);
        } else {
            let mut buf = [0u8; 4];
            encoded.push_str("_X");
            for byte in ch.encode_utf8(&mut buf).as_bytes() {
                encoded.push_str(&format!("{byte:02x}"));
            }
            encoded.push('_');
        }
    }
    encoded
}

/// Decode a field name previously encoded with [`encode_field_name`].
///
/// Hex runs that do not decode to valid UTF-8 are left untouched.
pub fn decode_field_name(name: &str) -> String {
    ENCODED_SEQUENCE
        .replace_all(name, |caps: &Captures| match hex_to_utf8(&caps[1]) {
            Some(decoded) => decoded,
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn hex_to_utf8(hex: &str) -> Option<String> {
    if hex.is_empty() || hex.len() % 2 != 0 {
        return None;
    }
    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        bytes.push(u8::from_str_radix(&hex[i..i + 2], 16).ok()?);
    }
    String::from_utf8(bytes).ok()
}

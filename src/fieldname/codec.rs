//! Language-specific dynamic field name variants.
//!
//! Multilingual indexes store one copy of each fulltext field per language,
//! using Solr's dynamic field matching to route them to the right field type.
//! A language-neutral name like `tm_title` becomes `tm;en_title` for English
//! content: the language tag is inserted between the dynamic field prefix and
//! the rest of the name, separated by a configurable character. Because Solr
//! picks the longest matching dynamic field pattern, `tm;en_*` wins over
//! `tm_*` for English fields while everything else falls back to the neutral
//! pattern.
//!
//! The separator must be a character that can never occur in a machine name
//! and carries no regex meaning, which keeps parsing unambiguous; `;`
//! satisfies both and is the default.

use regex::{Captures, Regex};

use crate::error::{Result, SolrKitError};
use crate::fieldname::encoding::{decode_field_name, encode_field_name};

/// The default character separating the dynamic field prefix from the
/// language tag.
pub const DEFAULT_LANGUAGE_SEPARATOR: char = ';';

/// Encodes and decodes language-specific dynamic field name variants.
///
/// All operations work on the decoded form of a field name: any Solr-safe
/// name encoding (see [`crate::fieldname::encoding`]) is reversed first and
/// reapplied to the result only when the input was encoded, since the
/// separator and the parsing patterns assume decoded text.
///
/// # Examples
///
/// ```
/// use solrkit::fieldname::FieldNameCodec;
///
/// let codec = FieldNameCodec::default();
/// let specialized = codec.specialize("tm_title", "en").unwrap();
/// assert_eq!(specialized, "tm;en_title");
/// assert_eq!(codec.generalize(&specialized), "tm_title");
/// ```
#[derive(Debug, Clone)]
pub struct FieldNameCodec {
    separator: char,
    /// The language-neutral dynamic field head: `^([a-z]+)_`.
    neutral_head: Regex,
    /// The language-specific dynamic field head: `^([a-z]+)<sep>([^_]+)_`.
    language_head: Regex,
}

impl FieldNameCodec {
    /// Create a codec using the given language separator.
    ///
    /// Rejects ASCII alphanumerics and `_` as separators since those occur
    /// inside field names and would make parsing ambiguous.
    pub fn new(separator: char) -> Result<Self> {
        if separator.is_ascii_alphanumeric() || separator == '_' {
            return Err(SolrKitError::other(format!(
                "language separator {separator:?} occurs inside field names and cannot be used"
            )));
        }
        let sep = regex::escape(&separator.to_string());
        let neutral_head = Regex::new("^([a-z]+)_")
            .map_err(|e| SolrKitError::other(format!("field name pattern: {e}")))?;
        let language_head = Regex::new(&format!("^([a-z]+){sep}([^_]+)_"))
            .map_err(|e| SolrKitError::other(format!("field name pattern: {e}")))?;
        Ok(FieldNameCodec {
            separator,
            neutral_head,
            language_head,
        })
    }

    /// Get the configured language separator.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Insert a language tag into a language-neutral dynamic field name.
    ///
    /// `tm_title` + `en` yields `tm;en_title`. Fails with
    /// [`SolrKitError::InvalidFieldName`] when the field does not start with
    /// a `prefix_` head or the language tag contains the separator or `_`.
    pub fn specialize(&self, field: &str, language_id: &str) -> Result<String> {
        if language_id.is_empty()
            || language_id.contains(self.separator)
            || language_id.contains('_')
        {
            return Err(SolrKitError::invalid_field_name(format!(
                "language tag '{language_id}' cannot be embedded in a field name"
            )));
        }
        let (decoded, was_encoded) = self.decoded(field);
        if !self.neutral_head.is_match(&decoded) {
            return Err(SolrKitError::invalid_field_name(format!(
                "'{field}' does not start with a dynamic field prefix"
            )));
        }
        let specialized = self
            .neutral_head
            .replace(&decoded, |caps: &Captures| {
                format!("{}{}{}_", &caps[1], self.separator, language_id)
            })
            .into_owned();
        Ok(self.reencoded(specialized, was_encoded))
    }

    /// Strip the language tag from a language-specific dynamic field name.
    ///
    /// Returns the input unchanged when no language segment is present.
    pub fn generalize(&self, field: &str) -> String {
        let (decoded, was_encoded) = self.decoded(field);
        let generalized = self
            .language_head
            .replace(&decoded, |caps: &Captures| format!("{}_", &caps[1]))
            .into_owned();
        self.reencoded(generalized, was_encoded)
    }

    /// Extract the language tag from a field name, if one is present.
    pub fn extract_language_id(&self, field: &str) -> Option<String> {
        let (decoded, _) = self.decoded(field);
        self.language_head
            .captures(&decoded)
            .map(|caps| caps[2].to_string())
    }

    /// Extract the language-specific head of a field name as a Solr dynamic
    /// field glob, e.g. `tm;en_*` for `tm;en_title`.
    pub fn extract_dynamic_pattern(&self, field: &str) -> Option<String> {
        let (decoded, was_encoded) = self.decoded(field);
        self.language_head.find(&decoded).map(|head| {
            let mut pattern = self.reencoded(head.as_str().to_string(), was_encoded);
            pattern.push('*');
            pattern
        })
    }

    fn decoded(&self, field: &str) -> (String, bool) {
        let decoded = decode_field_name(field);
        let was_encoded = decoded != field;
        (decoded, was_encoded)
    }

    fn reencoded(&self, field: String, was_encoded: bool) -> String {
        if was_encoded {
            encode_field_name(&field)
        } else {
            field
        }
    }
}

impl Default for FieldNameCodec {
    fn default() -> Self {
        // The default separator passes validation.
        FieldNameCodec::new(DEFAULT_LANGUAGE_SEPARATOR).unwrap()
    }
}

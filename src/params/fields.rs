//! Resolved field-name mappings and field classification.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolrKitError};

/// Dynamic field prefix used for location (lat/lon point) fields.
pub const LOCATION_FIELD_PREFIX: &str = "loc";

/// The resolved Solr field name for a logical field, plus the classification
/// the assemblers need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// The Solr field name, e.g. `tm_title` or `tm;en_title`.
    pub solr_name: String,
    /// Whether the field is a fulltext (tokenized) field.
    pub fulltext: bool,
    /// Whether the field holds multiple values per document.
    pub multivalued: bool,
    /// Whether the field is a spatial location field.
    pub location: bool,
}

impl FieldInfo {
    /// Create a field info with explicit classification flags all unset.
    pub fn new<S: Into<String>>(solr_name: S) -> Self {
        FieldInfo {
            solr_name: solr_name.into(),
            fulltext: false,
            multivalued: false,
            location: false,
        }
    }

    /// Create a field info, inferring the classification from the dynamic
    /// field prefix: `t*` prefixes are fulltext, `loc*` prefixes are
    /// locations, and a prefix ending in `m` marks a multivalued field.
    pub fn from_solr_name<S: Into<String>>(solr_name: S) -> Self {
        let solr_name = solr_name.into();
        let prefix = dynamic_prefix(&solr_name);
        let fulltext = prefix.starts_with('t');
        let location = prefix.starts_with(LOCATION_FIELD_PREFIX);
        let multivalued = prefix.ends_with('m');
        FieldInfo {
            solr_name,
            fulltext,
            multivalued,
            location,
        }
    }

    /// Mark the field as fulltext.
    pub fn fulltext(mut self) -> Self {
        self.fulltext = true;
        self
    }

    /// Mark the field as multivalued.
    pub fn multivalued(mut self) -> Self {
        self.multivalued = true;
        self
    }

    /// Mark the field as a location field.
    pub fn location(mut self) -> Self {
        self.location = true;
        self
    }

    /// The leading lowercase-letter dynamic field prefix of the Solr name.
    pub fn prefix(&self) -> &str {
        dynamic_prefix(&self.solr_name)
    }
}

/// The leading `[a-z]+` run of a field name.
pub(crate) fn dynamic_prefix(solr_name: &str) -> &str {
    let end = solr_name
        .find(|c: char| !c.is_ascii_lowercase())
        .unwrap_or(solr_name.len());
    &solr_name[..end]
}

/// Maps logical field names to their resolved Solr fields.
///
/// The mapping is produced per-request from static index configuration by
/// the enclosing backend; this crate only consumes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMap {
    fields: HashMap<String, FieldInfo>,
}

impl FieldMap {
    /// Create an empty field map.
    pub fn new() -> Self {
        FieldMap::default()
    }

    /// Insert a mapping for a logical field.
    pub fn insert<S: Into<String>>(&mut self, logical: S, info: FieldInfo) {
        self.fields.insert(logical.into(), info);
    }

    /// Look up a logical field.
    pub fn get(&self, logical: &str) -> Option<&FieldInfo> {
        self.fields.get(logical)
    }

    /// Look up a logical field, failing with
    /// [`SolrKitError::UnsupportedField`] when absent.
    pub fn require(&self, logical: &str) -> Result<&FieldInfo> {
        self.fields
            .get(logical)
            .ok_or_else(|| SolrKitError::unsupported_field(logical))
    }

    /// The number of mapped fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldInfo)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, FieldInfo)>>(iter: I) -> Self {
        FieldMap {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_from_prefix() {
        let info = FieldInfo::from_solr_name("tm_title");
        assert!(info.fulltext);
        assert!(info.multivalued);
        assert!(!info.location);

        let info = FieldInfo::from_solr_name("ss_name");
        assert!(!info.fulltext);
        assert!(!info.multivalued);

        let info = FieldInfo::from_solr_name("im_year");
        assert!(!info.fulltext);
        assert!(info.multivalued);

        let info = FieldInfo::from_solr_name("locm_coordinates");
        assert!(info.location);
        assert!(info.multivalued);
    }

    #[test]
    fn test_prefix_stops_at_separator() {
        assert_eq!(dynamic_prefix("tm;en_title"), "tm");
        assert_eq!(dynamic_prefix("sort_title"), "sort");
        assert_eq!(dynamic_prefix("score"), "score");
    }

    #[test]
    fn test_require_unknown_field() {
        let map = FieldMap::new();
        assert!(matches!(
            map.require("title"),
            Err(SolrKitError::UnsupportedField(_))
        ));
    }
}

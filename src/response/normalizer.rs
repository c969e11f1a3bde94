//! Rewriting raw response bodies so repeated same-named blocks survive
//! JSON decoding.
//!
//! A multilingual spellcheck request makes Solr return one result block per
//! active language plus one language-neutral block, all under the same
//! `"spellcheck"` key and always in that order with the neutral block last.
//! Decoding that into a key-unique mapping keeps only the last occurrence,
//! so before decoding, each language's block is relabeled with a suffixed
//! key directly in the response text.

use serde_json::{Map, Value};

/// Configuration for response normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// The repeated key label to disambiguate.
    pub key: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        NormalizerConfig {
            key: "spellcheck".to_string(),
        }
    }
}

/// Rewrites raw response bodies so that per-language result blocks survive
/// JSON decoding, then merges the decoded blocks into a response mapping.
///
/// # Examples
///
/// ```
/// use solrkit::response::ResponseNormalizer;
///
/// let normalizer = ResponseNormalizer::new(["en", "de"]);
/// let body = r#"{
///     "spellcheck": {"suggestions": ["kat"]},
///     "spellcheck": {"suggestions": ["katze"]},
///     "spellcheck": {"suggestions": []}
/// }"#;
/// let decoded = normalizer.normalize(body);
/// assert!(decoded.contains_key("spellcheck_en"));
/// assert!(decoded.contains_key("spellcheck_de"));
/// assert!(decoded.contains_key("spellcheck"));
/// ```
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    languages: Vec<String>,
    config: NormalizerConfig,
}

impl ResponseNormalizer {
    /// Create a normalizer for the given active languages, in the order
    /// their blocks appear in responses.
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ResponseNormalizer::with_config(languages, NormalizerConfig::default())
    }

    /// Create a normalizer with a custom key label.
    pub fn with_config<I, S>(languages: I, config: NormalizerConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ResponseNormalizer {
            languages: languages.into_iter().map(Into::into).collect(),
            config,
        }
    }

    /// The configured languages, in block order.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Relabel the per-language blocks in a raw response body.
    ///
    /// For each configured language, in order, the first remaining bare
    /// occurrence of the key label is replaced with a language-suffixed one.
    /// Earlier blocks appear first in document order, so sequential
    /// single-shot replacement disambiguates every block except the final,
    /// intentionally untouched, language-neutral one. When the body holds
    /// fewer blocks than there are languages the surplus substitutions find
    /// nothing and the corresponding keys are simply absent after decoding.
    pub fn disambiguate(&self, body: &str) -> String {
        let label = format!("\"{}\":", self.config.key);
        let mut body = body.to_string();
        for language in &self.languages {
            let suffixed = format!("\"{}_{language}\":", self.config.key);
            body = body.replacen(&label, &suffixed, 1);
        }
        body
    }

    /// Relabel and decode a raw response body.
    ///
    /// A body that fails to decode, or decodes to something other than a
    /// JSON object, is treated as bodyless: the failure is logged and an
    /// empty mapping returned.
    pub fn normalize(&self, body: &str) -> Map<String, Value> {
        let disambiguated = self.disambiguate(body);
        match serde_json::from_str::<Value>(&disambiguated) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                tracing::warn!(
                    target: "solrkit::response",
                    "response body decoded to non-object JSON ({}), treating as bodyless",
                    json_type_name(&other),
                );
                Map::new()
            }
            Err(error) => {
                tracing::warn!(
                    target: "solrkit::response",
                    "failed to decode response body, treating as bodyless: {error}",
                );
                Map::new()
            }
        }
    }

    /// Relabel and decode a raw response body, merging its top-level keys
    /// into an existing response mapping.
    pub fn merge_into(&self, body: &str, response: &mut Map<String, Value>) {
        for (key, value) in self.normalize(body) {
            response.insert(key, value);
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(blocks: usize) -> String {
        let mut body = String::from("{\n");
        for i in 0..blocks {
            body.push_str(&format!("  \"spellcheck\": {{\"block\": {i}}},\n"));
        }
        body.push_str("  \"responseHeader\": {\"status\": 0}\n}");
        body
    }

    #[test]
    fn test_all_blocks_survive_decoding() {
        let normalizer = ResponseNormalizer::new(["en", "de"]);
        let decoded = normalizer.normalize(&body(3));

        assert_eq!(decoded["spellcheck_en"], json!({"block": 0}));
        assert_eq!(decoded["spellcheck_de"], json!({"block": 1}));
        assert_eq!(decoded["spellcheck"], json!({"block": 2}));
        assert_eq!(decoded["responseHeader"], json!({"status": 0}));
    }

    #[test]
    fn test_fewer_blocks_than_languages() {
        // Two occurrences against two languages plus an expected neutral
        // block: the second substitution consumes what would have been the
        // neutral block, so no bare key survives.
        let normalizer = ResponseNormalizer::new(["en", "de"]);
        let decoded = normalizer.normalize(&body(2));

        assert_eq!(decoded["spellcheck_en"], json!({"block": 0}));
        assert_eq!(decoded["spellcheck_de"], json!({"block": 1}));
        assert!(!decoded.contains_key("spellcheck"));
    }

    #[test]
    fn test_more_blocks_than_languages_last_wins() {
        let normalizer = ResponseNormalizer::new(["en"]);
        let decoded = normalizer.normalize(&body(3));

        assert_eq!(decoded["spellcheck_en"], json!({"block": 0}));
        // The two remaining bare occurrences collapse; the last one wins.
        assert_eq!(decoded["spellcheck"], json!({"block": 2}));
    }

    #[test]
    fn test_no_languages_leaves_body_untouched() {
        let normalizer = ResponseNormalizer::new(Vec::<String>::new());
        let raw = body(1);
        assert_eq!(normalizer.disambiguate(&raw), raw);
    }

    #[test]
    fn test_suffixed_labels_are_not_rematched() {
        let normalizer = ResponseNormalizer::new(["en", "en-gb"]);
        let disambiguated = normalizer.disambiguate(&body(3));

        assert_eq!(disambiguated.matches("\"spellcheck_en\":").count(), 1);
        assert_eq!(disambiguated.matches("\"spellcheck_en-gb\":").count(), 1);
        assert_eq!(disambiguated.matches("\"spellcheck\":").count(), 1);
    }

    #[test]
    fn test_malformed_body_treated_as_bodyless() {
        let normalizer = ResponseNormalizer::new(["en"]);
        assert!(normalizer.normalize("{\"spellcheck\": oops").is_empty());
        assert!(normalizer.normalize("[1, 2, 3]").is_empty());
    }

    #[test]
    fn test_merge_into_overlays_existing_response() {
        let normalizer = ResponseNormalizer::new(["en"]);
        let mut response = Map::new();
        response.insert("response".into(), json!({"numFound": 2}));

        normalizer.merge_into(&body(2), &mut response);

        assert_eq!(response["response"], json!({"numFound": 2}));
        assert!(response.contains_key("spellcheck_en"));
        assert!(response.contains_key("spellcheck"));
    }

    #[test]
    fn test_custom_key_label() {
        let config = NormalizerConfig {
            key: "suggest".into(),
        };
        let normalizer = ResponseNormalizer::with_config(["en"], config);
        let body = r#"{"suggest": {"a": 1}, "suggest": {"b": 2}}"#;
        let decoded = normalizer.normalize(body);

        assert_eq!(decoded["suggest_en"], json!({"a": 1}));
        assert_eq!(decoded["suggest"], json!({"b": 2}));
    }
}

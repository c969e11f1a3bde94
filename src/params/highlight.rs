//! Highlighting and excerpt parameter assembly.

use serde::{Deserialize, Serialize};

use crate::params::assembler::ParamsAssembler;

/// The field excerpts are generated from: the aggregated fulltext copy.
pub const EXCERPT_FIELD: &str = "spell";

/// Server-side highlighting defaults.
///
/// Per-field overrides are only sent when they differ from these values,
/// keeping the request payload minimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightDefaults {
    /// Default number of snippets per field.
    pub snippets: u32,
    /// Default fragment size in characters.
    pub fragsize: u32,
}

impl Default for HighlightDefaults {
    fn default() -> Self {
        // Solr's own defaults for hl.snippets and hl.fragsize.
        HighlightDefaults {
            snippets: 1,
            fragsize: 100,
        }
    }
}

/// Highlighting options for a single request.
///
/// Excerpting and field highlighting are independent: excerpting builds
/// snippets from the aggregated [`EXCERPT_FIELD`], field highlighting marks
/// matches across all returned fields (`*`). Both may be active at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightOptions {
    /// Whether to build excerpt snippets.
    #[serde(default)]
    pub excerpt: bool,
    /// Whether to highlight matches in returned fields.
    #[serde(default)]
    pub highlight: bool,
    /// Marker inserted before each highlighted match.
    pub prefix: String,
    /// Marker inserted after each highlighted match.
    pub postfix: String,
    /// Snippets per excerpt.
    pub excerpt_snippets: u32,
    /// Excerpt fragment size in characters.
    pub excerpt_fragsize: u32,
    /// Snippets per highlighted field.
    pub highlight_snippets: u32,
    /// Highlight fragment size; 0 returns the whole field value.
    pub highlight_fragsize: u32,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        HighlightOptions {
            excerpt: false,
            highlight: false,
            prefix: "[HIGHLIGHT]".to_string(),
            postfix: "[/HIGHLIGHT]".to_string(),
            excerpt_snippets: 3,
            excerpt_fragsize: 70,
            highlight_snippets: 1,
            highlight_fragsize: 0,
        }
    }
}

impl ParamsAssembler {
    /// Populate highlighting parameters.
    ///
    /// Does nothing unless excerpting or highlighting is enabled. Per-field
    /// snippet and fragment-size overrides are emitted only when they differ
    /// from `defaults`.
    pub fn apply_highlighting(&mut self, options: &HighlightOptions, defaults: &HighlightDefaults) {
        if !options.excerpt && !options.highlight {
            return;
        }

        self.params.set("hl", "true");
        self.params.set("hl.simple.pre", &options.prefix);
        self.params.set("hl.simple.post", &options.postfix);

        if options.excerpt {
            self.params.add("hl.fl", EXCERPT_FIELD);
            if options.excerpt_snippets != defaults.snippets {
                self.params.set(
                    format!("f.{EXCERPT_FIELD}.hl.snippets"),
                    options.excerpt_snippets.to_string(),
                );
            }
            if options.excerpt_fragsize != defaults.fragsize {
                self.params.set(
                    format!("f.{EXCERPT_FIELD}.hl.fragsize"),
                    options.excerpt_fragsize.to_string(),
                );
            }
        }

        if options.highlight {
            self.params.add("hl.fl", "*");
            if options.highlight_snippets != defaults.snippets {
                self.params
                    .set("f.*.hl.snippets", options.highlight_snippets.to_string());
            }
            if options.highlight_fragsize != defaults.fragsize {
                self.params
                    .set("f.*.hl.fragsize", options.highlight_fragsize.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::fields::FieldMap;
    use crate::params::version::SchemaVersion;

    fn assembler() -> ParamsAssembler {
        ParamsAssembler::new(FieldMap::new(), SchemaVersion::new(4, 5))
    }

    #[test]
    fn test_disabled_sets_nothing() {
        let mut assembler = assembler();
        assembler.apply_highlighting(&HighlightOptions::default(), &HighlightDefaults::default());
        assert!(assembler.params().is_empty());
    }

    #[test]
    fn test_excerpt_targets_spell_field() {
        let mut assembler = assembler();
        let options = HighlightOptions {
            excerpt: true,
            ..HighlightOptions::default()
        };
        assembler.apply_highlighting(&options, &HighlightDefaults::default());

        let params = assembler.params();
        assert_eq!(params.get("hl"), Some("true"));
        assert_eq!(params.get("hl.simple.pre"), Some("[HIGHLIGHT]"));
        assert_eq!(params.get("hl.simple.post"), Some("[/HIGHLIGHT]"));
        assert_eq!(params.get_all("hl.fl"), vec!["spell"]);
        assert_eq!(params.get("f.spell.hl.snippets"), Some("3"));
        assert_eq!(params.get("f.spell.hl.fragsize"), Some("70"));
    }

    #[test]
    fn test_overrides_matching_defaults_are_omitted() {
        let mut assembler = assembler();
        let options = HighlightOptions {
            excerpt: true,
            excerpt_snippets: 1,
            excerpt_fragsize: 100,
            ..HighlightOptions::default()
        };
        assembler.apply_highlighting(&options, &HighlightDefaults::default());

        let params = assembler.params();
        assert_eq!(params.get_all("hl.fl"), vec!["spell"]);
        assert!(!params.contains_key("f.spell.hl.snippets"));
        assert!(!params.contains_key("f.spell.hl.fragsize"));
    }

    #[test]
    fn test_excerpt_and_highlight_target_different_fields() {
        let mut assembler = assembler();
        let options = HighlightOptions {
            excerpt: true,
            highlight: true,
            ..HighlightOptions::default()
        };
        assembler.apply_highlighting(&options, &HighlightDefaults::default());

        let params = assembler.params();
        assert_eq!(params.get_all("hl.fl"), vec!["spell", "*"]);
        assert_eq!(params.get("f.*.hl.fragsize"), Some("0"));
        // highlight_snippets matches the default of 1 and is omitted.
        assert!(!params.contains_key("f.*.hl.snippets"));
    }
}

//! Sort parameter assembly.
//!
//! Logical sort fields are resolved to the Solr field that actually carries
//! a sortable value: fulltext and string fields cannot be sorted directly on
//! schemas that ship `sort_*` companions, and multivalued fields sort on
//! their single-valued copies.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::assembler::ParamsAssembler;
use crate::params::fields::dynamic_prefix;

/// The reserved relevance meta-field; passes through to Solr unchanged.
pub const RELEVANCE_FIELD: &str = "score";

/// The reserved random-order meta-field.
pub const RANDOM_FIELD: &str = "random";

/// Prefix of the seeded random sort field, completed with a numeric seed.
pub const RANDOM_FIELD_PREFIX: &str = "random_";

/// Prefix of the dedicated sort companions of text and string fields.
pub const SORT_FIELD_PREFIX: &str = "sort_";

/// Options for sort assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    /// Seed for random sorting; a fresh one is generated when absent.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl ParamsAssembler {
    /// Serialize the pending sort entries into the `sort` parameter.
    ///
    /// Resolution precedence per entry: the reserved relevance field passes
    /// through; the random meta-field resolves to `random_<seed>`; on
    /// schemas with sort companions, fulltext and string fields redirect to
    /// `sort_<field>` and multivalued fields to their single-valued copy;
    /// anything else sorts on the mapped Solr field directly. Entries
    /// already rewritten by spatial assembly are serialized verbatim.
    pub fn apply_sorts(&mut self, options: &SortOptions) -> Result<()> {
        let pending = std::mem::take(&mut self.pending_sorts);
        let mut clauses = Vec::with_capacity(pending.len());
        for sort in &pending {
            let field = if sort.resolved {
                sort.field.clone()
            } else {
                self.resolve_sort_field(&sort.field, options)?
            };
            clauses.push(format!("{field} {}", sort.direction.as_str()));
        }
        if !clauses.is_empty() {
            self.params.set("sort", clauses.join(","));
        }
        Ok(())
    }

    pub(crate) fn resolve_sort_field(&self, logical: &str, options: &SortOptions) -> Result<String> {
        if logical == RELEVANCE_FIELD {
            return Ok(logical.to_string());
        }
        if logical == RANDOM_FIELD {
            let seed = options
                .random_seed
                .unwrap_or_else(|| u64::from(rand::random::<u32>()));
            return Ok(format!("{RANDOM_FIELD_PREFIX}{seed}"));
        }

        let info = self.fields.require(logical)?;
        if self.schema_version.has_sort_companions() {
            let prefix = info.prefix();
            let is_text = info.fulltext || prefix.starts_with('t');
            let is_string = prefix.starts_with('s') && prefix != "sort";
            if is_text || is_string {
                return Ok(format!("{SORT_FIELD_PREFIX}{logical}"));
            }
            if info.multivalued {
                return Ok(single_valued_companion(&info.solr_name));
            }
        }
        Ok(info.solr_name.clone())
    }
}

/// The single-valued companion of a multivalued dynamic field: the trailing
/// `m` of the prefix becomes `s` (`im_year` sorts on `is_year`).
fn single_valued_companion(solr_name: &str) -> String {
    let prefix = dynamic_prefix(solr_name);
    if prefix.len() >= 2 && prefix.ends_with('m') {
        let mut companion = String::with_capacity(solr_name.len());
        companion.push_str(&prefix[..prefix.len() - 1]);
        companion.push('s');
        companion.push_str(&solr_name[prefix.len()..]);
        companion
    } else {
        solr_name.to_string()
    }
}

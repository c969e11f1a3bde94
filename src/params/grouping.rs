//! Result grouping parameter assembly.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::assembler::{ParamsAssembler, SortOrder};
use crate::params::sort::SortOptions;

/// Options for result grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingOptions {
    /// Logical fields to group on.
    pub fields: Vec<String>,
    /// Maximum number of documents returned per group.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Sorts applied within each group.
    #[serde(default)]
    pub sorts: Vec<SortOrder>,
    /// Whether facet counts are computed per group instead of per document.
    #[serde(default)]
    pub truncate: bool,
}

impl ParamsAssembler {
    /// Populate grouping parameters.
    ///
    /// Enables group mode and always requests group counts. Grouping is only
    /// valid on single-valued, non-fulltext fields: a requested field
    /// classified fulltext or multivalued is skipped with a user-facing warning while the
    /// remaining fields are still added. Unknown logical fields are an
    /// error.
    pub fn apply_grouping(&mut self, options: &GroupingOptions) -> Result<()> {
        self.params.set("group", "true");
        self.params.set("group.ngroups", "true");

        for logical in &options.fields {
            let info = self.fields.require(logical)?.clone();
            if info.fulltext || info.multivalued {
                let kind = if info.fulltext {
                    "fulltext"
                } else {
                    "multivalued"
                };
                self.warn(format!(
                    "Grouping is not supported for {kind} field '{logical}'; \
                     only single-valued, non-fulltext fields can be grouped on."
                ));
                continue;
            }
            self.params.add("group.field", info.solr_name);
        }

        if options.truncate {
            self.params.set("group.truncate", "true");
        }
        if let Some(limit) = options.limit {
            self.params.set("group.limit", limit.to_string());
        }
        if !options.sorts.is_empty() {
            let mut clauses = Vec::with_capacity(options.sorts.len());
            for sort in &options.sorts {
                let field = self.resolve_sort_field(&sort.field, &SortOptions::default())?;
                clauses.push(format!("{field} {}", sort.direction.as_str()));
            }
            self.params.set("group.sort", clauses.join(","));
        }
        Ok(())
    }
}

//! The request parameter assembler core.

use serde::{Deserialize, Serialize};

use crate::params::fields::FieldMap;
use crate::params::params::QueryParams;
use crate::params::version::SchemaVersion;

/// Sort direction for a sort clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// The Solr sort keyword for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A requested sort on a logical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    /// The logical field to sort on.
    pub field: String,
    /// The direction to sort in.
    pub direction: SortDirection,
}

impl SortOrder {
    /// Create a sort order.
    pub fn new<S: Into<String>>(field: S, direction: SortDirection) -> Self {
        SortOrder {
            field: field.into(),
            direction,
        }
    }
}

/// A sort entry awaiting serialization into the `sort` parameter.
///
/// `field` holds the logical field name until the entry is resolved; spatial
/// assembly may resolve it early by rewriting it to a `geodist(...)`
/// expression, after which sort assembly serializes it verbatim.
#[derive(Debug, Clone)]
pub(crate) struct PendingSort {
    pub field: String,
    pub direction: SortDirection,
    pub resolved: bool,
}

/// Builds the Solr parameter set for a single search request.
///
/// The four sub-procedures ([`apply_highlighting`], [`apply_sorts`],
/// [`apply_grouping`] and [`apply_spatial`]) are independent and callable in
/// any combination, with one ordering constraint: when spatial filtering and
/// sorting touch the same field, spatial must run first, since it rewrites
/// the still-pending sort entry for that field into a geodistance expression.
///
/// [`apply_highlighting`]: ParamsAssembler::apply_highlighting
/// [`apply_sorts`]: ParamsAssembler::apply_sorts
/// [`apply_grouping`]: ParamsAssembler::apply_grouping
/// [`apply_spatial`]: ParamsAssembler::apply_spatial
///
/// # Examples
///
/// ```
/// use solrkit::params::{
///     FieldInfo, FieldMap, ParamsAssembler, SchemaVersion, SortDirection, SortOptions,
/// };
///
/// let mut fields = FieldMap::new();
/// fields.insert("created", FieldInfo::from_solr_name("ds_created"));
///
/// let mut assembler = ParamsAssembler::new(fields, SchemaVersion::new(4, 5));
/// assembler.request_sort("created", SortDirection::Desc);
/// assembler.apply_sorts(&SortOptions::default()).unwrap();
///
/// let (params, warnings) = assembler.finish();
/// assert_eq!(params.get("sort"), Some("ds_created desc"));
/// assert!(warnings.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ParamsAssembler {
    pub(crate) params: QueryParams,
    pub(crate) fields: FieldMap,
    pub(crate) schema_version: SchemaVersion,
    pub(crate) pending_sorts: Vec<PendingSort>,
    pub(crate) warnings: Vec<String>,
}

impl ParamsAssembler {
    /// Create an assembler over an empty parameter set.
    pub fn new(fields: FieldMap, schema_version: SchemaVersion) -> Self {
        ParamsAssembler {
            params: QueryParams::new(),
            fields,
            schema_version,
            pending_sorts: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Seed the assembler with pre-existing parameters, e.g. filter queries
    /// already derived from the request's conditions.
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Queue a sort on a logical field.
    ///
    /// Entries are serialized into the `sort` parameter by
    /// [`apply_sorts`](ParamsAssembler::apply_sorts), in request order.
    pub fn request_sort<S: Into<String>>(&mut self, field: S, direction: SortDirection) {
        self.pending_sorts.push(PendingSort {
            field: field.into(),
            direction,
            resolved: false,
        });
    }

    /// The parameter set assembled so far.
    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    /// The field map this assembler resolves logical fields against.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// The schema version in use.
    pub fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }

    /// User-facing warnings collected while assembling (skipped grouping
    /// fields, malformed spatial options).
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the assembler, returning the parameter set and the collected
    /// warnings.
    pub fn finish(self) -> (QueryParams, Vec<String>) {
        (self.params, self.warnings)
    }

    pub(crate) fn warn(&mut self, message: String) {
        tracing::warn!(target: "solrkit::params", "{message}");
        self.warnings.push(message);
    }
}

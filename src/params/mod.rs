//! Solr request parameter assembly.
//!
//! [`QueryParams`] is the accumulator for a single request's parameter set;
//! [`ParamsAssembler`] populates it through four independent sub-procedures
//! (highlighting, sort, grouping, spatial filtering) given a resolved
//! [`FieldMap`] and the active [`SchemaVersion`].

pub mod assembler;
pub mod fields;
pub mod grouping;
pub mod highlight;
#[allow(clippy::module_inception)]
pub mod params;
pub mod sort;
pub mod spatial;
pub mod version;

pub use self::assembler::{ParamsAssembler, SortDirection, SortOrder};
pub use self::fields::{FieldInfo, FieldMap};
pub use self::grouping::GroupingOptions;
pub use self::highlight::{HighlightDefaults, HighlightOptions};
pub use self::params::QueryParams;
pub use self::sort::SortOptions;
pub use self::spatial::{SpatialMethod, SpatialOptions};
pub use self::version::SchemaVersion;

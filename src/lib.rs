//! # Solrkit
//!
//! Query translation utilities for Apache Solr backends.
//!
//! ## Features
//!
//! - Language-specific dynamic field name encoding with fallback-friendly
//!   glob patterns
//! - Flattening of nested boolean keyword trees into Solr query syntax
//! - Assembly of highlighting, sort, grouping and spatial request parameters
//! - Normalization of multilingual response bodies whose repeated blocks
//!   would otherwise be lost at JSON decode time
//!
//! Every component is a pure, synchronous transformation over immutable
//! inputs; the crate performs no I/O of its own and is safely callable from
//! multiple threads.

pub mod error;
pub mod fieldname;
pub mod keyword;
pub mod params;
pub mod response;

pub mod prelude {
    //! Convenience re-exports of the most commonly used types.

    pub use crate::error::{Result, SolrKitError};
    pub use crate::fieldname::FieldNameCodec;
    pub use crate::keyword::{Conjunction, KeywordExpr, flatten};
    pub use crate::params::{
        FieldInfo, FieldMap, GroupingOptions, HighlightDefaults, HighlightOptions, ParamsAssembler,
        QueryParams, SchemaVersion, SortDirection, SortOptions, SpatialOptions,
    };
    pub use crate::response::ResponseNormalizer;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

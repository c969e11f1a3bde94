//! Schema version gating for companion sort fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolrKitError};

/// A version marker of the Solr field-type/schema definition in use.
///
/// Gates which companion fields exist: schemas from 4.4 on ship dedicated
/// `sort_*` copies of text and string fields plus single-valued companions
/// of multivalued fields.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SchemaVersion {
    /// Major version component.
    pub major: u32,
    /// Minor version component.
    pub minor: u32,
}

impl SchemaVersion {
    /// Create a schema version.
    pub const fn new(major: u32, minor: u32) -> Self {
        SchemaVersion { major, minor }
    }

    /// Whether this schema ships companion sort fields (`sort_*` and the
    /// single-valued copies of multivalued fields).
    pub fn has_sort_companions(&self) -> bool {
        *self >= SchemaVersion::new(4, 4)
    }
}

impl FromStr for SchemaVersion {
    type Err = SolrKitError;

    /// Parse `"major.minor"`; trailing components (`"4.5.1"`) are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut components = s.trim().split('.');
        let major = components
            .next()
            .and_then(|c| c.parse().ok())
            .ok_or_else(|| SolrKitError::other(format!("invalid schema version '{s}'")))?;
        let minor = match components.next() {
            Some(c) => c
                .parse()
                .map_err(|_| SolrKitError::other(format!("invalid schema version '{s}'")))?,
            None => 0,
        };
        Ok(SchemaVersion::new(major, minor))
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("4.5".parse::<SchemaVersion>().unwrap(), SchemaVersion::new(4, 5));
        assert_eq!("4.5.1".parse::<SchemaVersion>().unwrap(), SchemaVersion::new(4, 5));
        assert_eq!("7".parse::<SchemaVersion>().unwrap(), SchemaVersion::new(7, 0));
        assert!("four.five".parse::<SchemaVersion>().is_err());
        assert!("".parse::<SchemaVersion>().is_err());
    }

    #[test]
    fn test_sort_companion_gate() {
        assert!(!SchemaVersion::new(4, 3).has_sort_companions());
        assert!(SchemaVersion::new(4, 4).has_sort_companions());
        assert!(SchemaVersion::new(4, 5).has_sort_companions());
        assert!(SchemaVersion::new(5, 0).has_sort_companions());
        assert!(!SchemaVersion::new(3, 9).has_sort_companions());
    }
}

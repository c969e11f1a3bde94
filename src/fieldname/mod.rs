//! Solr field name handling: Solr-safe name encoding and language-specific
//! dynamic field name variants.

pub mod codec;
pub mod encoding;

pub use self::codec::{DEFAULT_LANGUAGE_SEPARATOR, FieldNameCodec};
pub use self::encoding::{decode_field_name, encode_field_name};

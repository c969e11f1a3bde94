//! Keyword expression trees and flattening into Solr query syntax.

pub mod expression;
pub mod flatten;

pub use self::expression::{Conjunction, KeywordExpr};
pub use self::flatten::{escape_term, flatten};

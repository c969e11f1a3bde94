//! Multilingual response body normalization.

pub mod normalizer;

pub use self::normalizer::{NormalizerConfig, ResponseNormalizer};

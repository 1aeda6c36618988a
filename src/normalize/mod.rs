//! Indic text normalization.
//!
//! Collapses the several Unicode spellings of one visual character (precomposed
//! vs. decomposed nukta letters, candra vowels, pipe vs. danda) into a single
//! form before text reaches an encoder.
//!
//! - [`IndicNormalizer`] is the production implementation.
//! - [`TextNormalizer`] is the seam the scorer depends on.

mod error;
mod indic;
/// Script table and language-code resolution.
pub mod script;

#[cfg(test)]
mod tests;

pub use error::NormalizeError;
pub use indic::{IndicNormalizer, NormalizerOptions};
pub use script::Script;

/// Canonicalizes raw input text for one configured language.
pub trait TextNormalizer: Send + Sync {
    /// Returns the canonical form of `text`, or an error for empty or wrong-script input.
    fn normalize(&self, text: &str) -> Result<String, NormalizeError>;

    /// Language code this normalizer was built for.
    fn language(&self) -> &str;
}

use tracing::trace;

use crate::headers::AcceptLanguageHeaderValue;

/// Matches `Accept-Language` values against a configured list of supported
/// languages.
///
/// Values are ranked by quality (declaration order among equals, zero-quality
/// values excluded). A requested tag is progressively truncated from the
/// right until it equals a supported language (`en-US-POSIX` → `en-US` →
/// `en`); the wildcard `*` matches the first supported language. A bare
/// requested `en` does not match a supported `en-US`.
#[derive(Debug, Default)]
pub struct LanguageMatcher;

impl LanguageMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Returns the best supported language for the given values, or `None`
    /// when nothing matches (a normal result, not an error).
    pub fn best_language_match(
        &self,
        supported_languages: &[String],
        accepts: &[AcceptLanguageHeaderValue],
    ) -> Option<String> {
        let mut ranked: Vec<&AcceptLanguageHeaderValue> =
            accepts.iter().filter(|value| value.quality() > 0.0).collect();
        ranked.sort_by(|a, b| b.quality().total_cmp(&a.quality()));

        for value in ranked {
            if value.is_wildcard() {
                return supported_languages.first().cloned();
            }

            let mut parts: Vec<&str> = value.language().split('-').collect();
            while !parts.is_empty() {
                let tag = parts.join("-");
                if let Some(supported) = supported_languages.iter().find(|supported| **supported == tag) {
                    trace!(language = %supported, requested = %value.language(), "matched language");
                    return Some(supported.clone());
                }
                parts.pop();
            }
        }

        None
    }
}

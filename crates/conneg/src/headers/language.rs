use indexmap::IndexMap;

use super::{parse_parameters, quality_from_parameters, HeaderValueError};

/// A single `Accept-Language` header value: a language tag plus a quality score.
///
/// The tag itself is not validated beyond being non-empty; quality semantics
/// are identical to [`super::AcceptMediaTypeHeaderValue`]. The wildcard tag
/// `*` accepts any language.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptLanguageHeaderValue {
    language: String,
    parameters: IndexMap<String, Option<String>>,
    quality: f64,
}

impl AcceptLanguageHeaderValue {
    pub fn new(
        language: impl Into<String>,
        parameters: IndexMap<String, Option<String>>,
    ) -> Result<Self, HeaderValueError> {
        let language = language.into();
        if language.is_empty() {
            return Err(HeaderValueError::invalid_format(&language));
        }
        let quality = quality_from_parameters(&parameters)?;
        Ok(Self { language, parameters, quality })
    }

    /// Parses a raw `Accept-Language` header line, e.g. `en-US; q=0.5`.
    pub fn parse(raw: &str) -> Result<Self, HeaderValueError> {
        let mut segments = raw.split(';');
        let language = segments.next().unwrap_or_default().trim().to_string();
        Self::new(language, parse_parameters(segments))
    }

    /// Returns the language tag, e.g. `en-US`.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns true if the tag is the wildcard `*`.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.language == "*"
    }

    /// Returns the quality score in `[0,1]`.
    pub fn quality(&self) -> f64 {
        self.quality
    }

    pub fn parameters(&self) -> &IndexMap<String, Option<String>> {
        &self.parameters
    }
}

use indexmap::IndexMap;

use super::{quality_from_parameters, HeaderValueError, MediaType, MediaTypeHeaderValue};

/// A single `Accept` header value: a media type plus a quality score.
///
/// The quality score comes from the `q` parameter and defaults to `1.0` when
/// absent. Scores outside `[0,1]` are rejected at construction, so a stored
/// value is always in range. A score of exactly `0` is an explicit exclusion
/// of the media type, not a low-priority preference.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptMediaTypeHeaderValue {
    value: MediaTypeHeaderValue,
    quality: f64,
}

impl AcceptMediaTypeHeaderValue {
    /// Wraps a parsed media-type header value, validating its `q` parameter.
    pub fn new(value: MediaTypeHeaderValue) -> Result<Self, HeaderValueError> {
        let quality = quality_from_parameters(value.parameters())?;
        Ok(Self { value, quality })
    }

    /// Parses a raw `Accept` header line, e.g. `text/*; q=0.5`.
    pub fn parse(raw: &str) -> Result<Self, HeaderValueError> {
        Self::new(MediaTypeHeaderValue::parse(raw)?)
    }

    /// Creates a value from parts, validating the `q` parameter.
    pub fn from_parts(
        media_type: MediaType,
        parameters: IndexMap<String, Option<String>>,
    ) -> Result<Self, HeaderValueError> {
        Self::new(MediaTypeHeaderValue::new(media_type, parameters))
    }

    /// Returns the quality score in `[0,1]`.
    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// Returns the media type this value accepts (possibly wildcarded).
    pub fn media_type(&self) -> &MediaType {
        self.value.media_type()
    }

    /// Returns the `charset` parameter, if present.
    pub fn charset(&self) -> Option<&str> {
        self.value.charset()
    }

    /// Returns the underlying media-type header value.
    pub fn value(&self) -> &MediaTypeHeaderValue {
        &self.value
    }
}

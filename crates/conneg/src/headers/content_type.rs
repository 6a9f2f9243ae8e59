use indexmap::IndexMap;

use super::{HeaderValueError, MediaType, MediaTypeHeaderValue};

/// A `Content-Type` header value.
///
/// Structurally a [`MediaTypeHeaderValue`]; `Content-Type` never carries a
/// quality score, so none is parsed or validated here.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentTypeHeaderValue {
    value: MediaTypeHeaderValue,
}

impl ContentTypeHeaderValue {
    pub fn new(media_type: MediaType, parameters: IndexMap<String, Option<String>>) -> Self {
        Self { value: MediaTypeHeaderValue::new(media_type, parameters) }
    }

    /// Parses a raw `Content-Type` header line, e.g. `text/html; charset=utf-16`.
    pub fn parse(raw: &str) -> Result<Self, HeaderValueError> {
        Ok(Self { value: MediaTypeHeaderValue::parse(raw)? })
    }

    pub fn media_type(&self) -> &MediaType {
        self.value.media_type()
    }

    pub fn charset(&self) -> Option<&str> {
        self.value.charset()
    }

    pub fn parameters(&self) -> &IndexMap<String, Option<String>> {
        self.value.parameters()
    }

    /// Returns the underlying media-type header value.
    pub fn value(&self) -> &MediaTypeHeaderValue {
        &self.value
    }
}

//! Media type parsing and the shared media-type header value shape.
//!
//! [`MediaType`] is the validated `{type}/{sub-type}` pair; [`MediaTypeHeaderValue`]
//! pairs it with the ordered parameter map that `Content-Type` and `Accept`
//! header lines carry. Both are plain value types with no interior state.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use super::{parse_parameters, HeaderValueError};

/// A validated `{type}/{sub-type}` media type.
///
/// The sub-type may carry a structured-syntax suffix after its last `+`
/// (e.g. `foo+json`). A `*` on either axis marks that axis as a wildcard;
/// the two axes are independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    type_: String,
    sub_type: String,
}

impl MediaType {
    /// Parses a raw `{type}/{sub-type}` string.
    ///
    /// Fails with [`HeaderValueError::InvalidFormat`] when the `/` is missing,
    /// either side is empty, or more than one `/` is present.
    pub fn parse(raw: &str) -> Result<Self, HeaderValueError> {
        let mut parts = raw.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(type_), Some(sub_type), None) if !type_.is_empty() && !sub_type.is_empty() => {
                Ok(Self { type_: type_.to_string(), sub_type: sub_type.to_string() })
            }
            _ => Err(HeaderValueError::invalid_format(raw)),
        }
    }

    /// Returns the type portion, e.g. `text` in `text/html`.
    pub fn type_(&self) -> &str {
        &self.type_
    }

    /// Returns the full sub-type portion, including any suffix.
    pub fn sub_type(&self) -> &str {
        &self.sub_type
    }

    /// Returns the portion of the sub-type after its last `+`, if any.
    pub fn suffix(&self) -> Option<&str> {
        self.sub_type.rsplit_once('+').map(|(_, suffix)| suffix)
    }

    /// Returns the sub-type with any `+suffix` removed.
    pub fn sub_type_without_suffix(&self) -> &str {
        self.sub_type.rsplit_once('+').map_or(self.sub_type.as_str(), |(sub_type, _)| sub_type)
    }

    /// Returns true if the type axis is the wildcard `*`.
    #[inline]
    pub fn is_wildcard_type(&self) -> bool {
        self.type_ == "*"
    }

    /// Returns true if the sub-type axis is the wildcard `*`.
    #[inline]
    pub fn is_wildcard_sub_type(&self) -> bool {
        self.sub_type == "*"
    }

    /// Returns true if this (possibly wildcarded) media type accepts the given
    /// concrete type/sub-type pair.
    ///
    /// A `*` matches anything on its axis; otherwise comparison is exact and
    /// case-sensitive.
    pub fn matches_parts(&self, type_: &str, sub_type: &str) -> bool {
        (self.is_wildcard_type() || self.type_ == type_)
            && (self.is_wildcard_sub_type() || self.sub_type == sub_type)
    }

    /// Returns true if this (possibly wildcarded) media type accepts the other one.
    pub fn matches(&self, other: &MediaType) -> bool {
        self.matches_parts(other.type_(), other.sub_type())
    }
}

impl FromStr for MediaType {
    type Err = HeaderValueError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_, self.sub_type)
    }
}

/// A media type plus its ordered header parameters.
///
/// This is the shape shared by `Content-Type` and `Accept` header values:
/// a [`MediaType`] and the `;key=value` parameters that followed it on the
/// header line, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaTypeHeaderValue {
    media_type: MediaType,
    parameters: IndexMap<String, Option<String>>,
}

impl MediaTypeHeaderValue {
    /// Creates a value from an already-parsed media type and parameter map.
    pub fn new(media_type: MediaType, parameters: IndexMap<String, Option<String>>) -> Self {
        Self { media_type, parameters }
    }

    /// Parses a raw header line of the form `type/sub-type;param=value;…`.
    pub fn parse(raw: &str) -> Result<Self, HeaderValueError> {
        let mut segments = raw.split(';');
        // The split iterator always yields at least one segment
        let media_type = MediaType::parse(segments.next().unwrap_or_default().trim())?;
        let parameters = parse_parameters(segments);
        Ok(Self { media_type, parameters })
    }

    /// Returns the media type this value describes.
    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    /// Returns the parameters in declaration order.
    pub fn parameters(&self) -> &IndexMap<String, Option<String>> {
        &self.parameters
    }

    /// Returns the `charset` parameter, if present with a value.
    pub fn charset(&self) -> Option<&str> {
        self.parameters.get("charset").and_then(|value| value.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_and_sub_type() {
        let media_type = MediaType::parse("foo/bar").unwrap();
        assert_eq!(media_type.type_(), "foo");
        assert_eq!(media_type.sub_type(), "bar");
        assert_eq!(media_type.suffix(), None);
        assert_eq!(media_type.to_string(), "foo/bar");
    }

    #[test]
    fn sub_type_suffix_is_split_on_last_plus() {
        let media_type = MediaType::parse("application/foo+json").unwrap();
        assert_eq!(media_type.type_(), "application");
        assert_eq!(media_type.sub_type(), "foo+json");
        assert_eq!(media_type.sub_type_without_suffix(), "foo");
        assert_eq!(media_type.suffix(), Some("json"));
    }

    #[test]
    fn malformed_media_types_are_rejected() {
        for raw in ["text", "text/", "/html", "", "/", "a/b/c"] {
            let err = MediaType::parse(raw).unwrap_err();
            assert!(matches!(err, HeaderValueError::InvalidFormat { .. }), "{raw} should be invalid");
            assert!(err.to_string().contains(raw));
        }
    }

    #[test]
    fn wildcard_axes_are_orthogonal() {
        let any = MediaType::parse("*/*").unwrap();
        assert!(any.is_wildcard_type());
        assert!(any.is_wildcard_sub_type());

        let any_text = MediaType::parse("text/*").unwrap();
        assert!(!any_text.is_wildcard_type());
        assert!(any_text.is_wildcard_sub_type());
    }

    #[test]
    fn wildcard_matching() {
        let html = MediaType::parse("text/html").unwrap();
        assert!(MediaType::parse("*/*").unwrap().matches(&html));
        assert!(MediaType::parse("text/*").unwrap().matches(&html));
        assert!(MediaType::parse("text/html").unwrap().matches(&html));
        assert!(!MediaType::parse("application/*").unwrap().matches(&html));
        assert!(!MediaType::parse("text/plain").unwrap().matches(&html));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let html = MediaType::parse("text/html").unwrap();
        assert!(!MediaType::parse("Text/html").unwrap().matches(&html));
        assert!(!MediaType::parse("text/HTML").unwrap().matches(&html));
    }

    #[test]
    fn header_value_parses_parameters() {
        let value = MediaTypeHeaderValue::parse("text/html; charset=utf-8").unwrap();
        assert_eq!(value.media_type().to_string(), "text/html");
        assert_eq!(value.charset(), Some("utf-8"));
    }

    #[test]
    fn header_value_without_charset() {
        let value = MediaTypeHeaderValue::parse("text/html").unwrap();
        assert_eq!(value.charset(), None);
        assert!(value.parameters().is_empty());
    }

    #[test]
    fn header_value_rejects_malformed_media_type() {
        assert!(MediaTypeHeaderValue::parse("text; charset=utf-8").is_err());
    }
}

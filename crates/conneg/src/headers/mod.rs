//! Structured header values and the raw header store.
//!
//! Header value types are immutable value objects created fresh per header line.
//! Construction is pure: parsing either yields a validated value or a
//! [`HeaderValueError`], never a partially-initialized value.

mod accept;
mod content_type;
mod error;
mod language;
mod media_type;
mod store;

pub use accept::AcceptMediaTypeHeaderValue;
pub use content_type::ContentTypeHeaderValue;
pub use error::HeaderValueError;
pub use language::AcceptLanguageHeaderValue;
pub use media_type::{MediaType, MediaTypeHeaderValue};
pub use store::HttpHeaders;

use indexmap::IndexMap;

/// Parses `;`-separated header parameters into an ordered map.
///
/// Each segment is a `key=value` pair or a bare key (mapped to `None`).
/// Surrounding double quotes on values are stripped. Unrecognized structure is
/// preserved, not rejected.
pub(crate) fn parse_parameters<'a>(segments: impl Iterator<Item = &'a str>) -> IndexMap<String, Option<String>> {
    let mut parameters = IndexMap::new();
    for segment in segments {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match segment.split_once('=') {
            Some((key, value)) => {
                let value = value.trim().trim_matches('"');
                parameters.insert(key.trim().to_string(), Some(value.to_string()));
            }
            None => {
                parameters.insert(segment.to_string(), None);
            }
        }
    }
    parameters
}

/// Extracts and validates the `q` parameter, defaulting to `1.0` when absent.
pub(crate) fn quality_from_parameters(
    parameters: &IndexMap<String, Option<String>>,
) -> Result<f64, HeaderValueError> {
    match parameters.get("q") {
        Some(Some(raw)) => {
            let quality: f64 = raw.parse().map_err(|_| HeaderValueError::invalid_quality(raw))?;
            if !(0.0..=1.0).contains(&quality) {
                return Err(HeaderValueError::invalid_quality(raw));
            }
            Ok(quality)
        }
        // A bare `q` with no value is treated the same as an absent one
        _ => Ok(1.0),
    }
}

use thiserror::Error;

/// Errors raised while parsing structured header values.
///
/// Only two shapes are validated: the `{type}/{sub-type}` form of media types
/// and the `[0,1]` range of quality scores. Everything else (unknown header
/// names, extra parameters) is ignored rather than rejected.
#[derive(Error, Debug)]
pub enum HeaderValueError {
    #[error("media type must be in format {{type}}/{{sub-type}}, received {raw}")]
    InvalidFormat { raw: String },

    #[error("quality score must be between 0 and 1, inclusive, received {raw}")]
    InvalidQuality { raw: String },
}

impl HeaderValueError {
    pub fn invalid_format<S: ToString>(raw: S) -> Self {
        Self::InvalidFormat { raw: raw.to_string() }
    }

    pub fn invalid_quality<S: ToString>(raw: S) -> Self {
        Self::InvalidQuality { raw: raw.to_string() }
    }
}

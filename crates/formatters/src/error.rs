use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatterError {
    #[error("serialization failed: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("invalid encoding: {reason}")]
    InvalidEncoding { reason: String },
}

impl FormatterError {
    pub fn invalid_encoding<S: ToString>(reason: S) -> Self {
        Self::InvalidEncoding { reason: reason.to_string() }
    }
}

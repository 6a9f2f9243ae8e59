use std::any::TypeId;

use bytes::Bytes;
use conneg::negotiation::MediaTypeFormatter;
use mime::Mime;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::FormatterError;

static SUPPORTED_MEDIA_TYPES: Lazy<Vec<Mime>> =
    Lazy::new(|| vec![mime::APPLICATION_JSON, "text/json".parse().unwrap()]);

/// Reads and writes JSON bodies via `serde_json`.
///
/// Capability is unconstrained: any serde-capable semantic type can be read
/// or written, so both predicates answer true and the real constraint is the
/// `DeserializeOwned`/`Serialize` bound on [`read`](Self::read) and
/// [`write`](Self::write).
#[derive(Debug, Default)]
pub struct JsonMediaTypeFormatter;

impl JsonMediaTypeFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Decodes a JSON body into `T`.
    pub fn read<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, FormatterError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Encodes `value` as a JSON body.
    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, FormatterError> {
        Ok(Bytes::from(serde_json::to_vec(value)?))
    }
}

impl MediaTypeFormatter for JsonMediaTypeFormatter {
    fn supported_media_types(&self) -> Vec<Mime> {
        SUPPORTED_MEDIA_TYPES.clone()
    }

    fn can_read(&self, _target: TypeId) -> bool {
        true
    }

    fn can_write(&self, _target: TypeId) -> bool {
        true
    }
}

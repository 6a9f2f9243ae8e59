use std::any::TypeId;

use bytes::Bytes;
use conneg::negotiation::MediaTypeFormatter;
use mime::Mime;
use once_cell::sync::Lazy;

static SUPPORTED_MEDIA_TYPES: Lazy<Vec<Mime>> = Lazy::new(|| vec![mime::APPLICATION_OCTET_STREAM]);

/// Passes `application/octet-stream` bodies through untouched.
///
/// Useful as the first registered formatter: it then also serves as the
/// default when a request carries no negotiation header at all.
#[derive(Debug, Default)]
pub struct OctetStreamMediaTypeFormatter;

impl OctetStreamMediaTypeFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, body: &[u8]) -> Bytes {
        Bytes::copy_from_slice(body)
    }

    pub fn write(&self, value: &[u8]) -> Bytes {
        Bytes::copy_from_slice(value)
    }
}

impl MediaTypeFormatter for OctetStreamMediaTypeFormatter {
    fn supported_media_types(&self) -> Vec<Mime> {
        SUPPORTED_MEDIA_TYPES.clone()
    }

    fn can_read(&self, target: TypeId) -> bool {
        target == TypeId::of::<Bytes>() || target == TypeId::of::<Vec<u8>>()
    }

    fn can_write(&self, target: TypeId) -> bool {
        target == TypeId::of::<Bytes>() || target == TypeId::of::<Vec<u8>>()
    }
}

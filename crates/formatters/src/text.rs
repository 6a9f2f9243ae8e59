//! Text-based formatters: plain text and HTML.
//!
//! Both speak UTF-8 strings and nothing else; their capability predicates
//! answer true only for string targets, which is what keeps the matcher from
//! routing arbitrary semantic types through them.

use std::any::TypeId;

use bytes::Bytes;
use conneg::negotiation::MediaTypeFormatter;
use mime::Mime;
use once_cell::sync::Lazy;

use crate::error::FormatterError;

static PLAIN_TEXT_MEDIA_TYPES: Lazy<Vec<Mime>> = Lazy::new(|| vec![mime::TEXT_PLAIN]);
static HTML_MEDIA_TYPES: Lazy<Vec<Mime>> = Lazy::new(|| vec![mime::TEXT_HTML]);

fn is_string_target(target: TypeId) -> bool {
    target == TypeId::of::<String>() || target == TypeId::of::<&str>()
}

fn read_text(body: &[u8]) -> Result<String, FormatterError> {
    String::from_utf8(body.to_vec()).map_err(|_| FormatterError::invalid_encoding("body is not valid utf-8"))
}

fn write_text(value: &str) -> Bytes {
    Bytes::copy_from_slice(value.as_bytes())
}

/// Reads and writes `text/plain` string bodies.
#[derive(Debug, Default)]
pub struct PlainTextMediaTypeFormatter;

impl PlainTextMediaTypeFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, body: &[u8]) -> Result<String, FormatterError> {
        read_text(body)
    }

    pub fn write(&self, value: &str) -> Bytes {
        write_text(value)
    }
}

impl MediaTypeFormatter for PlainTextMediaTypeFormatter {
    fn supported_media_types(&self) -> Vec<Mime> {
        PLAIN_TEXT_MEDIA_TYPES.clone()
    }

    fn can_read(&self, target: TypeId) -> bool {
        is_string_target(target)
    }

    fn can_write(&self, target: TypeId) -> bool {
        is_string_target(target)
    }
}

/// Reads and writes `text/html` string bodies.
///
/// No markup handling happens here; HTML is just text with a different media
/// type, exactly like the plain-text formatter.
#[derive(Debug, Default)]
pub struct HtmlMediaTypeFormatter;

impl HtmlMediaTypeFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, body: &[u8]) -> Result<String, FormatterError> {
        read_text(body)
    }

    pub fn write(&self, value: &str) -> Bytes {
        write_text(value)
    }
}

impl MediaTypeFormatter for HtmlMediaTypeFormatter {
    fn supported_media_types(&self) -> Vec<Mime> {
        HTML_MEDIA_TYPES.clone()
    }

    fn can_read(&self, target: TypeId) -> bool {
        is_string_target(target)
    }

    fn can_write(&self, target: TypeId) -> bool {
        is_string_target(target)
    }
}

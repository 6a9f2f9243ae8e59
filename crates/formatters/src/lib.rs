//! Concrete media type formatters for the `conneg` negotiation engine
//!
//! The engine only *selects* a formatter; these types do the actual encoding
//! and decoding once selected. Each one implements the
//! [`MediaTypeFormatter`](conneg::negotiation::MediaTypeFormatter) capability
//! contract and adds its own typed `read`/`write` surface:
//!
//! - [`JsonMediaTypeFormatter`]: JSON via serde, any semantic type
//! - [`PlainTextMediaTypeFormatter`] / [`HtmlMediaTypeFormatter`]: UTF-8 strings
//! - [`OctetStreamMediaTypeFormatter`]: raw byte passthrough
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use conneg::negotiation::{ContentNegotiator, MediaTypeFormatter};
//! use conneg::Request;
//! use conneg_formatters::{JsonMediaTypeFormatter, PlainTextMediaTypeFormatter};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u32,
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let formatters: Vec<Arc<dyn MediaTypeFormatter>> =
//!         vec![Arc::new(JsonMediaTypeFormatter::new()), Arc::new(PlainTextMediaTypeFormatter::new())];
//!     let negotiator = ContentNegotiator::new(formatters)?;
//!
//!     let request = Request::builder().header("Accept", "application/*").build();
//!     let result = negotiator.negotiate_response_content::<User>(&request)?.expect("no match");
//!     assert_eq!(result.media_type(), "application/json");
//!
//!     let body = JsonMediaTypeFormatter::new().write(&User { id: 1 })?;
//!     assert_eq!(&body[..], br#"{"id":1}"#);
//!     Ok(())
//! }
//! ```

mod error;
mod json;
mod octet_stream;
mod text;

pub use error::FormatterError;
pub use json::JsonMediaTypeFormatter;
pub use octet_stream::OctetStreamMediaTypeFormatter;
pub use text::{HtmlMediaTypeFormatter, PlainTextMediaTypeFormatter};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use conneg::negotiation::{ContentNegotiator, MediaTypeFormatter};
    use conneg::Request;
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct User {
        id: u32,
    }

    fn negotiator() -> ContentNegotiator {
        let formatters: Vec<Arc<dyn MediaTypeFormatter>> = vec![
            Arc::new(JsonMediaTypeFormatter::new()),
            Arc::new(PlainTextMediaTypeFormatter::new()),
            Arc::new(HtmlMediaTypeFormatter::new()),
        ];
        ContentNegotiator::new(formatters).unwrap()
    }

    #[test]
    fn string_response_can_use_a_text_formatter() {
        let request = Request::builder().header("Accept", "text/plain").build();
        let result = negotiator().negotiate_response_content::<String>(&request).unwrap().unwrap();
        assert_eq!(result.media_type(), "text/plain");
    }

    #[test]
    fn text_wildcard_follows_registration_order() {
        // The JSON formatter also declares text/json, and it is registered first
        let request = Request::builder().header("Accept", "text/*").build();
        let result = negotiator().negotiate_response_content::<String>(&request).unwrap().unwrap();
        assert_eq!(result.media_type(), "text/json");
    }

    #[test]
    fn non_string_response_skips_text_formatters() {
        // text/html only matches the HTML formatter, which cannot write a User
        let request = Request::builder().header("Accept", "text/html").build();
        let result = negotiator().negotiate_response_content::<User>(&request).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn full_wildcard_falls_through_to_json_for_non_string_targets() {
        let request = Request::builder().header("Accept", "*/*").build();
        let result = negotiator().negotiate_response_content::<User>(&request).unwrap().unwrap();
        assert_eq!(result.media_type(), "application/json");
    }

    #[test]
    fn json_request_round_trip_with_charset() {
        let request = Request::builder()
            .header("Content-Type", "application/json; charset=utf-8")
            .build();
        let result = negotiator().negotiate_request_content::<User>(&request).unwrap().unwrap();
        assert_eq!(result.media_type(), "application/json");
        assert_eq!(result.charset(), Some("utf-8"));
    }
}

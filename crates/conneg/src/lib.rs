//! A content negotiation engine for HTTP-like requests
//!
//! This crate decides, for an incoming request, which media-type representation and
//! character encoding should be used to read the request body and to write the response
//! body, given a set of available codecs ("formatters") and the request's structured
//! header values (`Accept`, `Accept-Charset`, `Content-Type`, `Accept-Language`).
//!
//! # Features
//!
//! - Typed, validated header value model (media types, quality scores, parameters)
//! - Ordered, case-insensitive multi-value header store
//! - Formatter matching with quality-first, specificity-second ranking
//! - Charset resolution from `Accept-Charset` and `charset` parameters
//! - Language resolution from `Accept-Language`
//! - Synchronous and stateless per call; no transport I/O
//!
//! # Example
//!
//! ```
//! use std::any::TypeId;
//! use std::sync::Arc;
//!
//! use conneg::negotiation::{ContentNegotiator, MediaTypeFormatter};
//! use conneg::Request;
//! use http::Method;
//! use mime::Mime;
//!
//! struct JsonOnly;
//!
//! impl MediaTypeFormatter for JsonOnly {
//!     fn supported_media_types(&self) -> Vec<Mime> {
//!         vec![mime::APPLICATION_JSON]
//!     }
//!
//!     fn can_read(&self, _target: TypeId) -> bool {
//!         true
//!     }
//!
//!     fn can_write(&self, _target: TypeId) -> bool {
//!         true
//!     }
//! }
//!
//! struct User;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let formatters: Vec<Arc<dyn MediaTypeFormatter>> = vec![Arc::new(JsonOnly)];
//!     let negotiator = ContentNegotiator::new(formatters)?;
//!
//!     let request = Request::builder()
//!         .method(Method::GET)
//!         .uri("/users/1".parse()?)
//!         .header("Accept", "application/*; q=0.8")
//!         .build();
//!
//!     let result = negotiator
//!         .negotiate_response_content::<User>(&request)?
//!         .expect("no acceptable formatter");
//!     assert_eq!(result.media_type(), "application/json");
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`headers`]: Structured header values and the raw header store
//! - [`negotiation`]: The formatter contract, the matcher and the negotiator
//!
//! Data flows in one direction: the negotiator reads raw header lines from the
//! store, the header value model parses them into validated value objects, the
//! matcher scores formatter and media-type combinations, and the negotiator
//! assembles the final result.
//!
//! # Error Handling
//!
//! Malformed media types and out-of-range quality scores surface as
//! [`headers::HeaderValueError`] and are never recovered locally. The *absence*
//! of a usable formatter is not an error: negotiation returns `Ok(None)` and the
//! caller chooses the protocol-level failure response (406/415-equivalent).
//!
//! # Concurrency
//!
//! Negotiation calls across requests are fully independent. The registered
//! formatter list is shared immutably (`Arc`) and must not be mutated after
//! construction. The one stateful collaborator is [`UriParser`], whose
//! query-string memo cache requires per-thread instances or external locking.

pub mod headers;
pub mod negotiation;

mod request;
mod uri;

pub use request::{Request, RequestBuilder};
pub use uri::UriParser;

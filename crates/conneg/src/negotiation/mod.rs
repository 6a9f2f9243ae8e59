//! Formatter matching and content negotiation.
//!
//! [`MediaTypeFormatter`] is the capability contract codecs implement,
//! [`FormatterMatcher`] scores formatter and media-type combinations against
//! parsed header values, and [`ContentNegotiator`] orchestrates both
//! directions (request body, response body) including charset and language
//! resolution.

mod formatter;
mod language;
mod matcher;
mod negotiator;

pub use formatter::MediaTypeFormatter;
pub use language::LanguageMatcher;
pub use matcher::{FormatterMatch, FormatterMatcher};
pub use negotiator::{ContentNegotiationResult, ContentNegotiator, NegotiationError};

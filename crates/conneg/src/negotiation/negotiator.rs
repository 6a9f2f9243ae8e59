//! Orchestration: header extraction, matcher invocation and charset/language
//! resolution for both negotiation directions.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use mime::Mime;
use thiserror::Error;
use tracing::debug;

use crate::headers::{
    AcceptLanguageHeaderValue, AcceptMediaTypeHeaderValue, ContentTypeHeaderValue, HeaderValueError,
    MediaTypeHeaderValue,
};
use crate::Request;

use super::{FormatterMatcher, LanguageMatcher, MediaTypeFormatter};

const ACCEPT: &str = "Accept";
const ACCEPT_CHARSET: &str = "Accept-Charset";
const ACCEPT_LANGUAGE: &str = "Accept-Language";
const CONTENT_TYPE: &str = "Content-Type";
const CONTENT_LANGUAGE: &str = "Content-Language";

/// Errors raised by [`ContentNegotiator`].
///
/// The *absence of a match* is not among them: that is a normal result
/// (`Ok(None)`), left to the caller to turn into a 406/415-equivalent.
#[derive(Error, Debug)]
pub enum NegotiationError {
    #[error("at least one media type formatter must be registered")]
    NoFormatters,

    #[error("invalid header value: {source}")]
    Header {
        #[from]
        source: HeaderValueError,
    },
}

/// The outcome of one negotiation call: the selected formatter, the concrete
/// media type, and the resolved charset and language, if any.
///
/// Results are immutable and live for the call only; nothing is cached across
/// negotiations.
#[derive(Clone)]
pub struct ContentNegotiationResult {
    formatter: Arc<dyn MediaTypeFormatter>,
    media_type: String,
    charset: Option<String>,
    language: Option<String>,
}

impl ContentNegotiationResult {
    /// Returns the selected formatter.
    pub fn formatter(&self) -> &Arc<dyn MediaTypeFormatter> {
        &self.formatter
    }

    /// Returns the concrete media type, never a wildcard.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns the resolved character encoding, if one was negotiated.
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    /// Returns the resolved language, if one was negotiated.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl fmt::Debug for ContentNegotiationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentNegotiationResult")
            .field("media_type", &self.media_type)
            .field("charset", &self.charset)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

/// Negotiates request and response body representations for a request.
///
/// Holds the registered formatter list immutably; concurrent negotiation
/// calls share it without locking because every call is stateless.
pub struct ContentNegotiator {
    formatters: Vec<Arc<dyn MediaTypeFormatter>>,
    supported_languages: Vec<String>,
    formatter_matcher: FormatterMatcher,
    language_matcher: LanguageMatcher,
}

impl ContentNegotiator {
    /// Creates a negotiator over the given formatters.
    ///
    /// The list order matters: the first formatter is the default when a
    /// request carries no negotiation header. Fails with
    /// [`NegotiationError::NoFormatters`] when the list is empty.
    pub fn new(formatters: Vec<Arc<dyn MediaTypeFormatter>>) -> Result<Self, NegotiationError> {
        if formatters.is_empty() {
            return Err(NegotiationError::NoFormatters);
        }
        Ok(Self {
            formatters,
            supported_languages: Vec::new(),
            formatter_matcher: FormatterMatcher::new(),
            language_matcher: LanguageMatcher::new(),
        })
    }

    /// Sets the languages response bodies can be produced in, in preference order.
    pub fn with_supported_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Negotiates how the request body should be read into `T`.
    ///
    /// Reads the first `Content-Type` value; the charset is its `charset`
    /// parameter, the language the first `Content-Language` value. An absent
    /// `Content-Type` falls back to the first registered formatter.
    pub fn negotiate_request_content<T: 'static>(
        &self,
        request: &Request,
    ) -> Result<Option<ContentNegotiationResult>, NegotiationError> {
        let headers = request.headers();
        let content_type = headers.get_first(CONTENT_TYPE).map(ContentTypeHeaderValue::parse).transpose()?;
        let language = headers.get_first(CONTENT_LANGUAGE).map(str::to_string);

        let Some(matched) = self.formatter_matcher.best_request_match(
            TypeId::of::<T>(),
            &self.formatters,
            content_type.as_ref(),
        ) else {
            debug!("no formatter can read the request body");
            return Ok(None);
        };

        let charset = content_type.as_ref().and_then(ContentTypeHeaderValue::charset).map(str::to_string);
        let (formatter, media_type, _) = matched.into_parts();
        Ok(Some(ContentNegotiationResult { formatter, media_type, charset, language }))
    }

    /// Negotiates how a `T` response body should be written.
    ///
    /// Every `Accept` occurrence is a separate candidate (no comma-splitting
    /// at this layer). Charset precedence, highest first: the first
    /// `Accept-Charset` value, the `charset` parameter on the winning
    /// `Accept` value, absent.
    pub fn negotiate_response_content<T: 'static>(
        &self,
        request: &Request,
    ) -> Result<Option<ContentNegotiationResult>, NegotiationError> {
        let headers = request.headers();
        let accepts = headers
            .get(ACCEPT)
            .iter()
            .map(|raw| AcceptMediaTypeHeaderValue::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        let accept_languages = headers
            .get(ACCEPT_LANGUAGE)
            .iter()
            .map(|raw| AcceptLanguageHeaderValue::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let Some(matched) =
            self.formatter_matcher.best_response_match(TypeId::of::<T>(), &self.formatters, &accepts)
        else {
            debug!("no formatter can write the response body");
            return Ok(None);
        };

        let charset = match headers.get_first(ACCEPT_CHARSET) {
            Some(raw) => Some(strip_parameters(raw).to_string()),
            None => matched.header_value().and_then(MediaTypeHeaderValue::charset).map(str::to_string),
        };
        let language = self.language_matcher.best_language_match(&self.supported_languages, &accept_languages);

        let (formatter, media_type, _) = matched.into_parts();
        Ok(Some(ContentNegotiationResult { formatter, media_type, charset, language }))
    }

    /// Lists the media types an acceptable response for `T` could use, across
    /// all formatters able to write it, deduplicated in declaration order.
    pub fn acceptable_response_media_types<T: 'static>(&self) -> Vec<Mime> {
        let target = TypeId::of::<T>();
        let mut media_types = Vec::new();
        for formatter in &self.formatters {
            if !formatter.can_write(target) {
                continue;
            }
            for declared in formatter.supported_media_types() {
                if !media_types.contains(&declared) {
                    media_types.push(declared);
                }
            }
        }
        media_types
    }
}

impl fmt::Debug for ContentNegotiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentNegotiator")
            .field("formatters", &self.formatters.len())
            .field("supported_languages", &self.supported_languages)
            .finish_non_exhaustive()
    }
}

/// Drops any `;`-separated parameters from a raw header value.
fn strip_parameters(raw: &str) -> &str {
    raw.split(';').next().unwrap_or(raw).trim()
}

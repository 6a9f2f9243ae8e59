//! Formatter matching: scoring formatter and media-type combinations against
//! parsed header values.
//!
//! The ranking is quality-first, specificity-second, declaration-order-third:
//! a higher-quality wildcard beats a lower-quality exact match, equal-quality
//! values are ordered exact > sub-type wildcard > full wildcard, and remaining
//! ties go to the earlier-declared header value. A quality of exactly `0` is a
//! hard exclusion, not a low-priority candidate.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::headers::{AcceptMediaTypeHeaderValue, ContentTypeHeaderValue, MediaType, MediaTypeHeaderValue};

use super::MediaTypeFormatter;

/// The outcome of matching one direction: the selected formatter, the concrete
/// media type drawn from its declared list (never a wildcard), and the header
/// value that won the match (absent on the no-header default path).
#[derive(Clone)]
pub struct FormatterMatch {
    formatter: Arc<dyn MediaTypeFormatter>,
    media_type: String,
    header: Option<MediaTypeHeaderValue>,
}

impl FormatterMatch {
    /// Returns the selected formatter.
    pub fn formatter(&self) -> &Arc<dyn MediaTypeFormatter> {
        &self.formatter
    }

    /// Returns the concrete media type, e.g. `application/json`.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns the header value that produced this match, if one did.
    pub fn header_value(&self) -> Option<&MediaTypeHeaderValue> {
        self.header.as_ref()
    }

    /// Decomposes the match into its parts.
    pub fn into_parts(self) -> (Arc<dyn MediaTypeFormatter>, String, Option<MediaTypeHeaderValue>) {
        (self.formatter, self.media_type, self.header)
    }
}

impl fmt::Debug for FormatterMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterMatch")
            .field("media_type", &self.media_type)
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

/// Which formatter capability predicate a match consults.
#[derive(Debug, Copy, Clone)]
enum Direction {
    Read,
    Write,
}

impl Direction {
    fn capable(self, formatter: &dyn MediaTypeFormatter, target: TypeId) -> bool {
        match self {
            Direction::Read => formatter.can_read(target),
            Direction::Write => formatter.can_write(target),
        }
    }
}

/// Ranks how precisely a media-type pattern identifies a concrete type:
/// exact match > sub-type wildcard (`text/*`) > full wildcard (`*/*`).
fn specificity(media_type: &MediaType) -> u8 {
    if media_type.is_wildcard_type() {
        0
    } else if media_type.is_wildcard_sub_type() {
        1
    } else {
        2
    }
}

/// Computes the single best (formatter, media type) pair for a direction, or
/// reports that nothing matched.
#[derive(Debug, Default)]
pub struct FormatterMatcher;

impl FormatterMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Matches the request direction against the parsed `Content-Type` value.
    ///
    /// `None` for `content_type` means the request carried no negotiation
    /// header: the first formatter wins with its first declared media type
    /// (`application/octet-stream` when it declares none), without consulting
    /// capability predicates.
    pub fn best_request_match(
        &self,
        target: TypeId,
        formatters: &[Arc<dyn MediaTypeFormatter>],
        content_type: Option<&ContentTypeHeaderValue>,
    ) -> Option<FormatterMatch> {
        match content_type {
            None => default_match(formatters),
            Some(content_type) => self.match_value(target, formatters, content_type.value(), Direction::Read),
        }
    }

    /// Matches the response direction against the parsed `Accept` values, in
    /// the order the request supplied them.
    ///
    /// An empty list falls back the same way as an absent `Content-Type`; a
    /// non-empty list in which every value has quality `0` matches nothing.
    pub fn best_response_match(
        &self,
        target: TypeId,
        formatters: &[Arc<dyn MediaTypeFormatter>],
        accepts: &[AcceptMediaTypeHeaderValue],
    ) -> Option<FormatterMatch> {
        if accepts.is_empty() {
            return default_match(formatters);
        }

        // Zero quality is an explicit exclusion. The sort is stable, so
        // equally-ranked values keep their declaration order.
        let mut ranked: Vec<&AcceptMediaTypeHeaderValue> =
            accepts.iter().filter(|value| value.quality() > 0.0).collect();
        ranked.sort_by(|a, b| {
            b.quality()
                .total_cmp(&a.quality())
                .then_with(|| specificity(b.media_type()).cmp(&specificity(a.media_type())))
        });

        for value in ranked {
            if let Some(matched) = self.match_value(target, formatters, value.value(), Direction::Write) {
                return Some(matched);
            }
        }

        None
    }

    fn match_value(
        &self,
        target: TypeId,
        formatters: &[Arc<dyn MediaTypeFormatter>],
        value: &MediaTypeHeaderValue,
        direction: Direction,
    ) -> Option<FormatterMatch> {
        for formatter in formatters {
            let supported = formatter.supported_media_types();

            // Capability is a per-candidate filter: a formatter capable for
            // one target type may be ineligible for another.
            if !direction.capable(formatter.as_ref(), target) {
                continue;
            }

            for declared in &supported {
                let Some((type_, sub_type)) = declared.essence_str().split_once('/') else {
                    continue;
                };
                if value.media_type().matches_parts(type_, sub_type) {
                    trace!(
                        header = %value.media_type(),
                        media_type = declared.essence_str(),
                        "matched formatter media type"
                    );
                    return Some(FormatterMatch {
                        formatter: Arc::clone(formatter),
                        media_type: declared.essence_str().to_string(),
                        header: Some(value.clone()),
                    });
                }
            }
        }

        None
    }
}

/// The no-negotiation-header fallback: the caller's first preference wins.
fn default_match(formatters: &[Arc<dyn MediaTypeFormatter>]) -> Option<FormatterMatch> {
    let formatter = formatters.first()?;
    let media_type = formatter
        .supported_media_types()
        .first()
        .map_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string(), |declared| declared.essence_str().to_string());
    Some(FormatterMatch { formatter: Arc::clone(formatter), media_type, header: None })
}

#[cfg(test)]
mod tests {
    use mime::Mime;
    use mockall::mock;
    use mockall::predicate::eq;

    use super::*;

    struct User;

    mock! {
        pub Formatter {}

        impl MediaTypeFormatter for Formatter {
            fn supported_media_types(&self) -> Vec<Mime>;
            fn can_read(&self, target: TypeId) -> bool;
            fn can_write(&self, target: TypeId) -> bool;
        }
    }

    fn formatter_mock(media_types: &[&str], times_supported_called: usize) -> MockFormatter {
        let mut formatter = MockFormatter::new();
        let mimes: Vec<Mime> = media_types.iter().map(|raw| raw.parse().unwrap()).collect();
        formatter.expect_supported_media_types().times(times_supported_called).return_const(mimes);
        formatter
    }

    fn accept(raw: &str) -> AcceptMediaTypeHeaderValue {
        AcceptMediaTypeHeaderValue::parse(raw).unwrap()
    }

    #[test]
    fn response_match_with_wildcard_sub_type() {
        let mut formatter1 = formatter_mock(&["application/json"], 1);
        formatter1.expect_can_write().with(eq(TypeId::of::<User>())).times(1).return_const(true);
        let mut formatter2 = formatter_mock(&["text/html"], 1);
        formatter2.expect_can_write().with(eq(TypeId::of::<User>())).times(1).return_const(true);

        let formatters: Vec<Arc<dyn MediaTypeFormatter>> = vec![Arc::new(formatter1), Arc::new(formatter2)];
        let matched = FormatterMatcher::new()
            .best_response_match(TypeId::of::<User>(), &formatters, &[accept("text/*")])
            .unwrap();

        assert!(Arc::ptr_eq(matched.formatter(), &formatters[1]));
        assert_eq!(matched.media_type(), "text/html");
    }

    #[test]
    fn response_match_with_wildcard_type() {
        let mut formatter1 = formatter_mock(&["application/json"], 1);
        formatter1.expect_can_write().with(eq(TypeId::of::<User>())).times(1).return_const(true);
        // The second formatter is never reached
        let formatter2 = formatter_mock(&["text/html"], 0);

        let formatters: Vec<Arc<dyn MediaTypeFormatter>> = vec![Arc::new(formatter1), Arc::new(formatter2)];
        let matched = FormatterMatcher::new()
            .best_response_match(TypeId::of::<User>(), &formatters, &[accept("*/*")])
            .unwrap();

        assert!(Arc::ptr_eq(matched.formatter(), &formatters[0]));
        assert_eq!(matched.media_type(), "application/json");
    }

    #[test]
    fn request_match_by_content_type() {
        let mut formatter1 = formatter_mock(&["application/json"], 1);
        formatter1.expect_can_read().with(eq(TypeId::of::<User>())).times(1).return_const(true);
        let mut formatter2 = formatter_mock(&["text/html"], 1);
        formatter2.expect_can_read().with(eq(TypeId::of::<User>())).times(1).return_const(true);

        let formatters: Vec<Arc<dyn MediaTypeFormatter>> = vec![Arc::new(formatter1), Arc::new(formatter2)];
        let content_type = ContentTypeHeaderValue::parse("text/html").unwrap();
        let matched = FormatterMatcher::new()
            .best_request_match(TypeId::of::<User>(), &formatters, Some(&content_type))
            .unwrap();

        assert!(Arc::ptr_eq(matched.formatter(), &formatters[1]));
        assert_eq!(matched.media_type(), "text/html");
    }

    #[test]
    fn most_specific_value_wins_among_equal_qualities() {
        let mut formatter1 = formatter_mock(&["text/plain"], 1);
        formatter1.expect_can_write().times(1).return_const(true);
        let mut formatter2 = formatter_mock(&["text/xml"], 1);
        formatter2.expect_can_write().times(1).return_const(true);
        let mut formatter3 = formatter_mock(&["text/html"], 1);
        formatter3.expect_can_write().times(1).return_const(true);

        let formatters: Vec<Arc<dyn MediaTypeFormatter>> =
            vec![Arc::new(formatter1), Arc::new(formatter2), Arc::new(formatter3)];
        let accepts = [accept("*/*"), accept("text/*"), accept("text/html")];
        let matched =
            FormatterMatcher::new().best_response_match(TypeId::of::<User>(), &formatters, &accepts).unwrap();

        assert!(Arc::ptr_eq(matched.formatter(), &formatters[2]));
        assert_eq!(matched.media_type(), "text/html");
    }

    #[test]
    fn higher_quality_wildcard_beats_lower_quality_exact_match() {
        let mut formatter = formatter_mock(&["text/plain", "text/html"], 1);
        formatter.expect_can_write().times(1).return_const(true);

        let formatters: Vec<Arc<dyn MediaTypeFormatter>> = vec![Arc::new(formatter)];
        let accepts = [accept("text/*; q=0.5"), accept("text/html; q=0.3")];
        let matched =
            FormatterMatcher::new().best_response_match(TypeId::of::<User>(), &formatters, &accepts).unwrap();

        assert!(Arc::ptr_eq(matched.formatter(), &formatters[0]));
        assert_eq!(matched.media_type(), "text/plain");
    }

    #[test]
    fn higher_quality_full_wildcard_beats_lower_quality_exact_match() {
        let mut formatter = formatter_mock(&["application/json", "text/html"], 1);
        formatter.expect_can_write().times(1).return_const(true);

        let formatters: Vec<Arc<dyn MediaTypeFormatter>> = vec![Arc::new(formatter)];
        let accepts = [accept("*/*; q=0.5"), accept("text/html; q=0.3")];
        let matched =
            FormatterMatcher::new().best_response_match(TypeId::of::<User>(), &formatters, &accepts).unwrap();

        assert_eq!(matched.media_type(), "application/json");
    }

    #[test]
    fn zero_quality_value_matches_nothing() {
        // The value is filtered out before any formatter is consulted
        let formatter = formatter_mock(&["text/html"], 0);

        let formatters: Vec<Arc<dyn MediaTypeFormatter>> = vec![Arc::new(formatter)];
        let matched =
            FormatterMatcher::new().best_response_match(TypeId::of::<User>(), &formatters, &[accept("text/html; q=0.0")]);

        assert!(matched.is_none());
    }

    #[test]
    fn request_formatter_skipped_if_it_cannot_read_target() {
        let mut formatter1 = formatter_mock(&["application/json"], 1);
        formatter1.expect_can_read().with(eq(TypeId::of::<User>())).times(1).return_const(false);
        let mut formatter2 = formatter_mock(&["text/html"], 1);
        formatter2.expect_can_read().with(eq(TypeId::of::<User>())).times(1).return_const(true);

        let formatters: Vec<Arc<dyn MediaTypeFormatter>> = vec![Arc::new(formatter1), Arc::new(formatter2)];
        let content_type = ContentTypeHeaderValue::parse("*/*").unwrap();
        let matched = FormatterMatcher::new()
            .best_request_match(TypeId::of::<User>(), &formatters, Some(&content_type))
            .unwrap();

        assert!(Arc::ptr_eq(matched.formatter(), &formatters[1]));
        assert_eq!(matched.media_type(), "text/html");
    }

    #[test]
    fn response_formatter_skipped_if_it_cannot_write_target() {
        let mut formatter1 = formatter_mock(&["application/json"], 1);
        formatter1.expect_can_write().with(eq(TypeId::of::<User>())).times(1).return_const(false);
        let mut formatter2 = formatter_mock(&["text/html"], 1);
        formatter2.expect_can_write().with(eq(TypeId::of::<User>())).times(1).return_const(true);

        let formatters: Vec<Arc<dyn MediaTypeFormatter>> = vec![Arc::new(formatter1), Arc::new(formatter2)];
        let matched = FormatterMatcher::new()
            .best_response_match(TypeId::of::<User>(), &formatters, &[accept("*/*")])
            .unwrap();

        assert!(Arc::ptr_eq(matched.formatter(), &formatters[1]));
        assert_eq!(matched.media_type(), "text/html");
    }

    #[test]
    fn no_accept_values_fall_back_to_first_formatter() {
        let formatter1 = formatter_mock(&["application/json"], 1);
        let formatter2 = formatter_mock(&["text/html"], 0);

        let formatters: Vec<Arc<dyn MediaTypeFormatter>> = vec![Arc::new(formatter1), Arc::new(formatter2)];
        let matched = FormatterMatcher::new().best_response_match(TypeId::of::<User>(), &formatters, &[]).unwrap();

        assert!(Arc::ptr_eq(matched.formatter(), &formatters[0]));
        assert_eq!(matched.media_type(), "application/json");
        assert!(matched.header_value().is_none());
    }

    #[test]
    fn default_media_type_when_first_formatter_declares_none() {
        let formatter = formatter_mock(&[], 1);

        let formatters: Vec<Arc<dyn MediaTypeFormatter>> = vec![Arc::new(formatter)];
        let matched =
            FormatterMatcher::new().best_request_match(TypeId::of::<User>(), &formatters, None).unwrap();

        assert_eq!(matched.media_type(), "application/octet-stream");
    }

    #[test]
    fn no_formatters_yields_no_match() {
        let matched = FormatterMatcher::new().best_response_match(TypeId::of::<User>(), &[], &[]);
        assert!(matched.is_none());
    }

    #[test]
    fn no_surviving_candidate_yields_no_match() {
        let mut formatter = formatter_mock(&["text/html"], 1);
        formatter.expect_can_write().times(1).return_const(true);

        let formatters: Vec<Arc<dyn MediaTypeFormatter>> = vec![Arc::new(formatter)];
        let matched = FormatterMatcher::new()
            .best_response_match(TypeId::of::<User>(), &formatters, &[accept("application/json")]);

        assert!(matched.is_none());
    }

    #[test]
    fn repeated_calls_yield_identical_results() {
        let mut formatter = MockFormatter::new();
        formatter.expect_supported_media_types().return_const(vec![mime::TEXT_HTML]);
        formatter.expect_can_write().return_const(true);

        let formatters: Vec<Arc<dyn MediaTypeFormatter>> = vec![Arc::new(formatter)];
        let accepts = [accept("text/*; q=0.8")];
        let matcher = FormatterMatcher::new();

        let first = matcher.best_response_match(TypeId::of::<User>(), &formatters, &accepts).unwrap();
        let second = matcher.best_response_match(TypeId::of::<User>(), &formatters, &accepts).unwrap();

        assert!(Arc::ptr_eq(first.formatter(), second.formatter()));
        assert_eq!(first.media_type(), second.media_type());
    }
}

use std::error::Error;
use std::sync::Arc;

use conneg::negotiation::{ContentNegotiator, MediaTypeFormatter};
use conneg::Request;
use conneg_formatters::{JsonMediaTypeFormatter, PlainTextMediaTypeFormatter};
use http::Method;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Serialize)]
struct User {
    id: u32,
    email: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let formatters: Vec<Arc<dyn MediaTypeFormatter>> =
        vec![Arc::new(JsonMediaTypeFormatter::new()), Arc::new(PlainTextMediaTypeFormatter::new())];
    let negotiator = ContentNegotiator::new(formatters)?.with_supported_languages(["en", "de"]);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/users/1".parse()?)
        .header("Accept", "text/*; q=0.3")
        .header("Accept", "application/*; q=0.9")
        .header("Accept-Charset", "utf-8")
        .header("Accept-Language", "en-US")
        .build();

    let result = negotiator
        .negotiate_response_content::<User>(&request)?
        .expect("no formatter can satisfy the request");
    info!(
        media_type = result.media_type(),
        charset = ?result.charset(),
        language = ?result.language(),
        "negotiated response representation"
    );

    let body = JsonMediaTypeFormatter::new().write(&User { id: 1, email: "dave@example.com".to_string() })?;
    info!(bytes = body.len(), "encoded response body");

    Ok(())
}

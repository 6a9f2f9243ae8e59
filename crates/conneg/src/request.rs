//! The request abstraction the negotiator reads from.
//!
//! [`Request`] is a plain data holder: method, URI, headers, optional body
//! and protocol version. The negotiation engine only ever touches its header
//! store; everything else exists for the surrounding application.

use bytes::Bytes;
use http::{Method, Uri};

use crate::headers::HttpHeaders;

/// An HTTP request message, as seen by the negotiation engine.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HttpHeaders,
    body: Option<Bytes>,
    protocol_version: String,
}

impl Request {
    /// Creates a request with the given method and URI and no headers.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self { method, uri, headers: HttpHeaders::new(), body: None, protocol_version: "1.1".to_string() }
    }

    /// Starts building a request; defaults to `GET /` over protocol `1.1`.
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the header store the negotiation engine reads from.
    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HttpHeaders {
        &mut self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn set_body(&mut self, body: Bytes) {
        self.body = Some(body);
    }

    /// Returns the HTTP protocol version, e.g. `1.1`.
    pub fn protocol_version(&self) -> &str {
        &self.protocol_version
    }
}

/// Builder for [`Request`].
#[derive(Debug)]
pub struct RequestBuilder {
    method: Method,
    uri: Uri,
    headers: HttpHeaders,
    body: Option<Bytes>,
    protocol_version: String,
}

impl RequestBuilder {
    fn new() -> Self {
        Self {
            method: Method::GET,
            uri: Uri::from_static("/"),
            headers: HttpHeaders::new(),
            body: None,
            protocol_version: "1.1".to_string(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = uri;
        self
    }

    /// Appends one occurrence of a header; call repeatedly for multi-valued headers.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            uri: self.uri,
            headers: self.headers,
            body: self.body,
            protocol_version: self.protocol_version,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Request assembly and serialization.

use super::headers::HeaderSet;
use crate::buffer::LentBuffer;
use crate::error::GuestError;
use crate::types::HttpMethod;
use serde::Serialize;
use url::Url;

/// A validated outbound request.
///
/// `url` is absolute (http or https) and the method is one of the fixed
/// verbs, so both are non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: HttpMethod,
    url: String,
    body: Option<Vec<u8>>,
    headers: HeaderSet,
}

impl Request {
    /// Starts building a request.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder {
            method,
            url: url.into(),
            body: None,
            headers: HeaderSet::new(),
        }
    }

    /// The HTTP method.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// The absolute target URL, exactly as provided.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// The header set.
    #[must_use]
    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    /// Serializes every part into owned byte sequences ready for lending.
    ///
    /// # Errors
    ///
    /// Returns an encode error if the header set cannot be serialized.
    pub fn prepare(&self) -> Result<PreparedRequest, GuestError> {
        let headers = self
            .headers
            .to_bytes()
            .map_err(|e| GuestError::encode(format!("headers: {e}")))?;

        Ok(PreparedRequest {
            method: self.method.as_str().as_bytes().to_vec(),
            url: self.url.as_bytes().to_vec(),
            body: self.body.clone().filter(|b| !b.is_empty()),
            headers,
        })
    }
}

/// Builder for [`Request`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: HttpMethod,
    url: String,
    body: Option<Vec<u8>>,
    headers: HeaderSet,
}

impl RequestBuilder {
    /// Adds one header. A later header with the same exact name wins.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Merges a header set into the request headers.
    #[must_use]
    pub fn headers(mut self, headers: &HeaderSet) -> Self {
        for (name, value) in headers {
            self.headers.insert(name.clone(), value.clone());
        }
        self
    }

    /// Sets a raw body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a JSON-encoded body.
    ///
    /// # Errors
    ///
    /// Returns an encode error if `value` cannot be serialized.
    pub fn json_body<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, GuestError> {
        let body =
            serde_json::to_vec(value).map_err(|e| GuestError::encode(format!("request body: {e}")))?;
        self.body = Some(body);
        Ok(self)
    }

    /// Validates the URL and produces the request.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the URL is empty, not absolute, or
    /// uses a scheme other than http or https.
    pub fn build(self) -> Result<Request, GuestError> {
        validate_url(&self.url)?;
        Ok(Request {
            method: self.method,
            url: self.url,
            body: self.body,
            headers: self.headers,
        })
    }
}

/// Checks that `url` is a non-empty absolute http(s) URL.
///
/// # Errors
///
/// Returns a validation error describing what is wrong with `url`.
pub(crate) fn validate_url(url: &str) -> Result<Url, GuestError> {
    if url.is_empty() {
        return Err(GuestError::validation("url", "URL is required"));
    }

    let parsed = Url::parse(url)
        .map_err(|e| GuestError::validation("url", format!("invalid URL '{url}': {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(GuestError::validation(
            "url",
            format!("unsupported URL scheme: {scheme}; only http and https are allowed"),
        )),
    }
}

/// The owned byte sequences backing one host call.
///
/// These allocations must outlive the [`LentRequest`] borrowed from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    method: Vec<u8>,
    url: Vec<u8>,
    body: Option<Vec<u8>>,
    headers: Vec<u8>,
}

impl PreparedRequest {
    /// Lends every part to the host.
    ///
    /// An absent body is not lent; hosts receive it as address 0, length 0.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required part is empty.
    pub fn lend(&self) -> Result<LentRequest<'_>, GuestError> {
        Ok(LentRequest {
            method: LentBuffer::new("method", &self.method)?,
            url: LentBuffer::new("url", &self.url)?,
            body: self
                .body
                .as_deref()
                .map(|body| LentBuffer::new("body", body))
                .transpose()?,
            headers: LentBuffer::new("headers", &self.headers)?,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        method: Vec<u8>,
        url: Vec<u8>,
        body: Option<Vec<u8>>,
        headers: Vec<u8>,
    ) -> Self {
        Self {
            method,
            url,
            body,
            headers,
        }
    }

    /// The serialized headers.
    #[must_use]
    pub fn header_bytes(&self) -> &[u8] {
        &self.headers
    }
}

/// The four buffers of one `perform request with headers` call.
#[derive(Debug)]
pub struct LentRequest<'a> {
    /// Upper-case method verb
    pub method: LentBuffer<'a>,
    /// Absolute URL
    pub url: LentBuffer<'a>,
    /// Body, absent for requests without one
    pub body: Option<LentBuffer<'a>>,
    /// JSON object of headers, `{}` when empty
    pub headers: LentBuffer<'a>,
}

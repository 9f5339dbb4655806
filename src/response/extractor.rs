//! Status and body retrieval.

use super::fields::ResponseFields;
use crate::buffer::ResponseBuffer;
use crate::error::GuestError;
use crate::host::{HostCallError, HostImports};
use serde_json::Value;
use std::borrow::Cow;

/// Status and body of the last response, borrowed from the response buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawResponse<'a> {
    /// HTTP status code
    pub status: u16,
    /// Body bytes; `None` when the host reported zero bytes
    pub body: Option<&'a [u8]>,
}

/// Reads the last response: status first, then body into `buffer`.
///
/// Must run directly after a successful `perform request`, with no other
/// boundary call in between.
///
/// # Errors
///
/// - A status or body count equal to a known sentinel is decoded into the
///   matching host call error.
/// - A body count above the buffer capacity is a response too large error;
///   the buffer contents are not read.
pub fn fetch<'b, H: HostImports + ?Sized>(
    host: &mut H,
    buffer: &'b mut ResponseBuffer,
) -> Result<RawResponse<'b>, GuestError> {
    let raw_status = host.last_response_status();
    let status = decode_status(raw_status)?;

    let reported = {
        let mut lent = buffer.lend_mut();
        host.last_response_body(&mut lent)
    };

    let buffer: &'b ResponseBuffer = buffer;
    let body = match buffer.filled(reported) {
        Ok(body) => body,
        Err(oversized) => {
            if let Some(err) = known_sentinel(reported) {
                tracing::warn!(code = %err.code(), error = %err, "Host failed to return response body");
                return Err(GuestError::host_call(err));
            }
            tracing::warn!(
                reported = oversized.reported,
                capacity = oversized.capacity,
                "Response body exceeds buffer capacity; not reading it"
            );
            return Err(oversized.into());
        }
    };

    tracing::debug!(status, body_len = body.map_or(0, <[u8]>::len), "Fetched response");
    Ok(RawResponse { status, body })
}

fn decode_status(raw: u32) -> Result<u16, GuestError> {
    if let Some(err) = known_sentinel(raw) {
        return Err(GuestError::host_call(err));
    }
    u16::try_from(raw).map_err(|_| GuestError::host_call(HostCallError::Unknown(raw)))
}

fn known_sentinel(raw: u32) -> Option<HostCallError> {
    HostCallError::from_code(raw).filter(|err| !err.is_unknown())
}

/// A response copied out of the call cycle with its structured fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedResponse {
    status: u16,
    body: Option<Vec<u8>>,
    json: Option<Value>,
    fields: ResponseFields,
}

impl CompletedResponse {
    /// Copies `raw` and parses its body as JSON if possible.
    #[must_use]
    pub fn from_raw(raw: RawResponse<'_>) -> Self {
        let (json, fields) = match raw.body.map(ResponseFields::parse) {
            Some(Ok((json, fields))) => (Some(json), fields),
            Some(Err(err)) => {
                tracing::debug!(error = %err, "No structured fields extracted");
                (serde_json::from_slice(raw.body.unwrap_or_default()).ok(), ResponseFields::default())
            }
            None => (None, ResponseFields::default()),
        };

        Self {
            status: raw.status,
            body: raw.body.map(<[u8]>::to_vec),
            json,
            fields,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true for a status in `[200, 300)`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Raw body bytes, `None` when empty.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> Option<Cow<'_, str>> {
        self.body.as_deref().map(String::from_utf8_lossy)
    }

    /// The body as JSON, if it parsed.
    #[must_use]
    pub fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Fields extracted from a JSON object body.
    #[must_use]
    pub fn fields(&self) -> &ResponseFields {
        &self.fields
    }

    /// Passes 2xx responses through and turns anything else into an
    /// upstream error labelled with `service`.
    ///
    /// # Errors
    ///
    /// Returns an upstream error carrying the body's `message` and `errors`
    /// fields when the status is outside `[200, 300)`.
    pub fn require_success(self, service: &str) -> Result<Self, GuestError> {
        if self.is_success() {
            return Ok(self);
        }
        tracing::warn!(
            service,
            status = self.status,
            message = self.fields.message.as_deref().unwrap_or(""),
            "Upstream request failed"
        );
        Err(GuestError::upstream(
            service,
            self.status,
            self.fields.message,
            self.fields.errors,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::MockHost;
    use crate::request::Request;
    use crate::types::HttpMethod;
    use std::num::NonZeroUsize;

    fn after_request(mut host: MockHost) -> MockHost {
        let prepared = Request::builder(HttpMethod::Get, "https://example.com")
            .build()
            .unwrap()
            .prepare()
            .unwrap();
        host.perform_request(&prepared.lend().unwrap());
        host
    }

    fn small_buffer(capacity: usize) -> ResponseBuffer {
        ResponseBuffer::with_capacity(NonZeroUsize::new(capacity).unwrap())
    }

    #[test]
    fn fetch_reads_status_then_body() {
        let mut host = after_request(MockHost::responding(201, r#"{"id":1}"#));
        let mut buffer = ResponseBuffer::new();

        let raw = fetch(&mut host, &mut buffer).unwrap();
        assert_eq!(raw.status, 201);
        assert_eq!(raw.body, Some(&br#"{"id":1}"#[..]));
        assert_eq!(host.status_queries(), 1);
        assert_eq!(host.body_queries(), 1);
    }

    #[test]
    fn fetch_treats_zero_bytes_as_no_content() {
        let mut host = after_request(MockHost::responding(204, Vec::new()));
        let mut buffer = ResponseBuffer::new();
        let raw = fetch(&mut host, &mut buffer).unwrap();
        assert_eq!(raw.body, None);
    }

    #[test]
    fn fetch_rejects_oversized_body_without_copying() {
        let mut host = after_request(MockHost::responding(200, vec![b'a'; 32]));
        let mut buffer = small_buffer(16);

        let err = fetch(&mut host, &mut buffer).unwrap_err();
        assert!(err.is_response_too_large());
        assert!(err.to_string().contains("response too large"));
        assert_eq!(host.body_copies(), 0);
    }

    #[test]
    fn fetch_decodes_buffer_too_small_sentinel() {
        let mut host = after_request(MockHost::responding(200, "x").with_reported_body_len(0xFFFF_FFF5));
        let mut buffer = ResponseBuffer::new();

        let err = fetch(&mut host, &mut buffer).unwrap_err();
        assert_eq!(err.host_call_error(), Some(HostCallError::BufferTooSmall));
        assert_eq!(
            err.to_string(),
            "HTTP request failed: buffer too small for response data"
        );
    }

    #[test]
    fn fetch_decodes_missing_response_status() {
        let mut host = MockHost::responding(200, "x");
        let mut buffer = ResponseBuffer::new();
        let err = fetch(&mut host, &mut buffer).unwrap_err();
        assert_eq!(err.host_call_error(), Some(HostCallError::NoResponseAvailable));
    }

    #[test]
    fn completed_response_extracts_fields() {
        let body = br#"{"html_url":"https://x/y?a=1&b=2","message":"Created"}"#;
        let completed = CompletedResponse::from_raw(RawResponse {
            status: 201,
            body: Some(body),
        });
        assert!(completed.is_success());
        assert_eq!(completed.fields().html_url.as_deref(), Some("https://x/y?a=1&b=2"));
        assert!(completed.json().is_some());
    }

    #[test]
    fn completed_response_tolerates_non_json() {
        let completed = CompletedResponse::from_raw(RawResponse {
            status: 500,
            body: Some(b"Internal Server Error"),
        });
        assert!(completed.fields().is_empty());
        assert!(completed.json().is_none());
        assert_eq!(completed.body_text().unwrap(), "Internal Server Error");
    }

    #[test]
    fn completed_response_keeps_json_arrays() {
        let completed = CompletedResponse::from_raw(RawResponse {
            status: 200,
            body: Some(b"[1,2,3]"),
        });
        assert!(completed.fields().is_empty());
        assert_eq!(completed.json(), Some(&serde_json::json!([1, 2, 3])));
    }

    #[test]
    fn status_boundaries() {
        for (status, ok) in [(199, false), (200, true), (299, true), (300, false), (404, false)] {
            let completed = CompletedResponse::from_raw(RawResponse { status, body: None });
            assert_eq!(completed.is_success(), ok, "{status}");
        }
    }

    #[test]
    fn require_success_uses_generic_fallback() {
        let completed = CompletedResponse::from_raw(RawResponse {
            status: 503,
            body: None,
        });
        let err = completed.require_success("upstream").unwrap_err();
        assert_eq!(err.to_string(), "upstream request failed with status: 503");
    }

    #[test]
    fn require_success_uses_extracted_message() {
        let completed = CompletedResponse::from_raw(RawResponse {
            status: 404,
            body: Some(br#"{"message":"Not Found"}"#),
        });
        let err = completed.require_success("GitHub API").unwrap_err();
        assert_eq!(err.to_string(), "GitHub API error: Not Found (status: 404)");
    }
}

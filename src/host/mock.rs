//! Scripted host for tests.
//!
//! `MockHost` answers every request with a fixed outcome, status and body,
//! and records what crossed the boundary so tests can assert on the exact
//! bytes the guest lent and on which calls were made.

use super::traits::HostImports;
use crate::buffer::LentBufferMut;
use crate::request::{HeaderSet, LentRequest};
use crate::types::OutcomeCode;

/// One request as the host received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Method bytes, decoded as UTF-8
    pub method: String,
    /// URL bytes, decoded as UTF-8
    pub url: String,
    /// Body bytes, `None` when the guest passed no body
    pub body: Option<Vec<u8>>,
    /// Raw header buffer
    pub headers: Vec<u8>,
}

impl RecordedRequest {
    /// Parses the lent header buffer the way the host would.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is not a JSON object of strings.
    pub fn header_set(&self) -> Result<HeaderSet, serde_json::Error> {
        HeaderSet::from_bytes(&self.headers)
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no body or it is not JSON.
    pub fn json_body(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(self.body.as_deref().unwrap_or_default())
    }
}

/// A host that replays one scripted response.
#[derive(Debug, Clone)]
pub struct MockHost {
    outcome: OutcomeCode,
    status: u32,
    body: Vec<u8>,
    reported_body_len: Option<u32>,
    responded: bool,
    requests: Vec<RecordedRequest>,
    status_queries: usize,
    body_queries: usize,
    body_copies: usize,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::responding(200, Vec::new())
    }
}

impl MockHost {
    /// A host whose requests succeed with `status` and `body`.
    #[must_use]
    pub fn responding(status: u32, body: impl Into<Vec<u8>>) -> Self {
        Self {
            outcome: OutcomeCode::SUCCESS,
            status,
            body: body.into(),
            reported_body_len: None,
            responded: false,
            requests: Vec::new(),
            status_queries: 0,
            body_queries: 0,
            body_copies: 0,
        }
    }

    /// A host whose requests succeed with `status` and a JSON body.
    #[must_use]
    pub fn responding_json(status: u32, body: &serde_json::Value) -> Self {
        Self::responding(status, body.to_string())
    }

    /// A host whose requests fail with `code`.
    #[must_use]
    pub fn failing(code: u32) -> Self {
        Self {
            outcome: OutcomeCode::new(code),
            ..Self::default()
        }
    }

    /// Makes the body query return `len` without copying anything.
    #[must_use]
    pub fn with_reported_body_len(mut self, len: u32) -> Self {
        self.reported_body_len = Some(len);
        self
    }

    /// Every request received, in order.
    #[must_use]
    pub fn requests(&self) -> &[RecordedRequest] {
        &self.requests
    }

    /// The most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<&RecordedRequest> {
        self.requests.last()
    }

    /// Number of `perform request` calls.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Number of status queries.
    #[must_use]
    pub fn status_queries(&self) -> usize {
        self.status_queries
    }

    /// Number of body queries.
    #[must_use]
    pub fn body_queries(&self) -> usize {
        self.body_queries
    }

    /// Number of body queries that actually copied bytes into guest memory.
    #[must_use]
    pub fn body_copies(&self) -> usize {
        self.body_copies
    }
}

impl HostImports for MockHost {
    fn perform_request(&mut self, request: &LentRequest<'_>) -> OutcomeCode {
        self.requests.push(RecordedRequest {
            method: String::from_utf8_lossy(request.method.as_bytes()).into_owned(),
            url: String::from_utf8_lossy(request.url.as_bytes()).into_owned(),
            body: request.body.as_ref().map(|b| b.as_bytes().to_vec()),
            headers: request.headers.as_bytes().to_vec(),
        });
        self.responded = self.outcome.is_success();
        self.outcome
    }

    fn last_response_status(&mut self) -> u32 {
        self.status_queries += 1;
        if !self.responded {
            return OutcomeCode::NO_RESPONSE_AVAILABLE.raw();
        }
        self.status
    }

    fn last_response_body(&mut self, destination: &mut LentBufferMut<'_>) -> u32 {
        self.body_queries += 1;
        if !self.responded {
            return OutcomeCode::NO_RESPONSE_AVAILABLE.raw();
        }
        if let Some(len) = self.reported_body_len {
            return len;
        }

        let len = u32::try_from(self.body.len()).unwrap_or(u32::MAX);
        if self.body.len() > destination.capacity() {
            return len;
        }
        destination.as_mut_slice()[..self.body.len()].copy_from_slice(&self.body);
        self.body_copies += 1;
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ResponseBuffer;
    use crate::request::Request;
    use crate::types::HttpMethod;
    use std::num::NonZeroUsize;

    fn get(url: &str) -> crate::request::PreparedRequest {
        Request::builder(HttpMethod::Get, url)
            .build()
            .unwrap()
            .prepare()
            .unwrap()
    }

    #[test]
    fn records_lent_request() {
        let mut host = MockHost::responding(200, "ok");
        let prepared = get("https://example.com/a");
        host.perform_request(&prepared.lend().unwrap());

        let recorded = host.last_request().unwrap();
        assert_eq!(recorded.method, "GET");
        assert_eq!(recorded.url, "https://example.com/a");
        assert_eq!(recorded.body, None);
        assert!(recorded.header_set().unwrap().is_empty());
    }

    #[test]
    fn no_response_before_request() {
        let mut host = MockHost::responding(200, "ok");
        assert_eq!(
            host.last_response_status(),
            OutcomeCode::NO_RESPONSE_AVAILABLE.raw()
        );
    }

    #[test]
    fn oversized_body_is_reported_not_copied() {
        let mut host = MockHost::responding(200, vec![b'x'; 10]);
        host.perform_request(&get("https://example.com").lend().unwrap());

        let mut buffer = ResponseBuffer::with_capacity(NonZeroUsize::new(4).unwrap());
        let reported = host.last_response_body(&mut buffer.lend_mut());

        assert_eq!(reported, 10);
        assert_eq!(host.body_copies(), 0);
        assert_eq!(host.body_queries(), 1);
    }

    #[test]
    fn failing_host_stores_no_response() {
        let mut host = MockHost::failing(0xFFFF_FFFE);
        let outcome = host.perform_request(&get("https://example.com").lend().unwrap());
        assert_eq!(outcome, OutcomeCode::URL_NOT_ALLOWED);
        assert_eq!(
            host.last_response_status(),
            OutcomeCode::NO_RESPONSE_AVAILABLE.raw()
        );
    }
}

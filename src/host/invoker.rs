//! The one-request exchange with the host.

use super::traits::HostImports;
use crate::buffer::ResponseBuffer;
use crate::error::GuestError;
use crate::request::LentRequest;
use crate::response::{fetch, RawResponse};

/// Owns the host handle and the response buffer for a call cycle.
///
/// [`exchange`](Self::exchange) borrows the invoker mutably for as long as
/// the returned response lives, so a second request cannot start until the
/// first one's status and body have been consumed.
#[derive(Debug)]
pub struct HostCallInvoker<H> {
    host: H,
    buffer: ResponseBuffer,
}

impl<H: HostImports> HostCallInvoker<H> {
    /// Creates an invoker with a default-capacity response buffer.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_buffer(host, ResponseBuffer::new())
    }

    /// Creates an invoker around an existing buffer.
    #[must_use]
    pub fn with_buffer(host: H, buffer: ResponseBuffer) -> Self {
        Self { host, buffer }
    }

    /// Performs the lent request, then reads status and body.
    ///
    /// # Errors
    ///
    /// - A nonzero outcome is returned as a host call error and neither
    ///   status nor body is queried.
    /// - Retrieval failures are returned as described on [`fetch`].
    pub fn exchange(&mut self, request: &LentRequest<'_>) -> Result<RawResponse<'_>, GuestError> {
        tracing::debug!(
            method = %String::from_utf8_lossy(request.method.as_bytes()),
            url = %String::from_utf8_lossy(request.url.as_bytes()),
            body_len = request.body.as_ref().map_or(0, |b| b.len()),
            "Performing host request"
        );
        let outcome = self.host.perform_request(request);

        if let Err(err) = outcome.into_result() {
            tracing::warn!(code = %outcome, error = %err, "Host request failed");
            return Err(GuestError::host_call(err));
        }

        fetch(&mut self.host, &mut self.buffer)
    }

    /// Returns the host handle.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Consumes the invoker and returns the host handle.
    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }
}

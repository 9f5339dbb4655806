//! Stub host for native builds.
//!
//! Lets guest binaries compile and run off-target. It performs no I/O.

use super::traits::HostImports;
use crate::buffer::LentBufferMut;
use crate::request::LentRequest;
use crate::types::OutcomeCode;

/// A host that refuses every request.
///
/// Each request fails with [`OutcomeCode::REQUEST_EXECUTION_FAILED`], so a
/// natively built guest emits a clean error object instead of crashing.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubHost;

impl StubHost {
    /// Creates a new stub host.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HostImports for StubHost {
    fn perform_request(&mut self, request: &LentRequest<'_>) -> OutcomeCode {
        tracing::warn!(
            url = %String::from_utf8_lossy(request.url.as_bytes()),
            "StubHost: not running inside a host runtime; request not sent"
        );
        OutcomeCode::REQUEST_EXECUTION_FAILED
    }

    fn last_response_status(&mut self) -> u32 {
        OutcomeCode::NO_RESPONSE_AVAILABLE.raw()
    }

    fn last_response_body(&mut self, _destination: &mut LentBufferMut<'_>) -> u32 {
        OutcomeCode::NO_RESPONSE_AVAILABLE.raw()
    }
}

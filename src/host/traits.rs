//! Host import trait.

use crate::buffer::LentBufferMut;
use crate::request::LentRequest;
use crate::types::OutcomeCode;
use std::fmt::Debug;

/// The three synchronous boundary calls offered by the host runtime.
///
/// Every call blocks until the host returns. There is no timeout parameter;
/// any timeout policy belongs to the host. Implementations must not retain
/// the lent buffers past the call that received them, which the borrow
/// lifetimes enforce.
pub trait HostImports: Debug {
    /// Issues one HTTP request and stores its response host-side.
    ///
    /// Returns [`OutcomeCode::SUCCESS`] or a sentinel.
    fn perform_request(&mut self, request: &LentRequest<'_>) -> OutcomeCode;

    /// Returns the HTTP status of the last completed request.
    fn last_response_status(&mut self) -> u32;

    /// Copies the last response body into `destination`.
    ///
    /// Returns the byte count. A value larger than the destination capacity
    /// means nothing was copied.
    fn last_response_body(&mut self, destination: &mut LentBufferMut<'_>) -> u32;
}

impl<H: HostImports + ?Sized> HostImports for &mut H {
    fn perform_request(&mut self, request: &LentRequest<'_>) -> OutcomeCode {
        (**self).perform_request(request)
    }

    fn last_response_status(&mut self) -> u32 {
        (**self).last_response_status()
    }

    fn last_response_body(&mut self, destination: &mut LentBufferMut<'_>) -> u32 {
        (**self).last_response_body(destination)
    }
}

//! Raw outcome code returned by the host.
//!
//! The integer only lives at the boundary. `into_result` decodes it once into
//! a [`HostCallError`] so nothing further up handles bare sentinels.

use crate::host::HostCallError;
use std::fmt;

/// The unsigned value returned by `perform request with headers`.
///
/// `0` is success; every other value is either one of the sentinels below
/// or an unknown code carried verbatim into diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutcomeCode(u32);

impl OutcomeCode {
    /// The call completed.
    pub const SUCCESS: Self = Self(0x0000_0000);
    /// The host could not read the URL from guest memory.
    pub const READ_URL_FAILED: Self = Self(0xFFFF_FFFF);
    /// The host's allowlist rejected the URL.
    pub const URL_NOT_ALLOWED: Self = Self(0xFFFF_FFFE);
    /// The host could not build the request object.
    pub const REQUEST_CREATION_FAILED: Self = Self(0xFFFF_FFFD);
    /// The request was sent but did not complete.
    pub const REQUEST_EXECUTION_FAILED: Self = Self(0xFFFF_FFFC);
    /// The response body could not be read by the host.
    pub const RESPONSE_BODY_READ_FAILED: Self = Self(0xFFFF_FFFB);
    /// The host could not read the method from guest memory.
    pub const METHOD_READ_FAILED: Self = Self(0xFFFF_FFF0);
    /// The host could not read the body from guest memory.
    pub const BODY_READ_FAILED: Self = Self(0xFFFF_FFF1);
    /// The host could not read the headers from guest memory.
    pub const HEADERS_READ_FAILED: Self = Self(0xFFFF_FFF2);
    /// The headers buffer was not a JSON object of strings.
    pub const HEADERS_PARSE_FAILED: Self = Self(0xFFFF_FFF3);
    /// No response is stored for this module instance.
    pub const NO_RESPONSE_AVAILABLE: Self = Self(0xFFFF_FFF4);
    /// The destination buffer cannot hold the response data.
    pub const BUFFER_TOO_SMALL: Self = Self(0xFFFF_FFF5);
    /// The host could not write the response into guest memory.
    pub const WRITE_RESPONSE_FAILED: Self = Self(0xFFFF_FFF6);
    /// The host could not read a header name from guest memory.
    pub const HEADER_NAME_READ_FAILED: Self = Self(0xFFFF_FFF7);

    /// Wraps a raw value returned by the host.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns true for the success code.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    /// Decodes the code into a tagged result.
    ///
    /// # Errors
    ///
    /// Returns the matching [`HostCallError`] for any nonzero code.
    pub fn into_result(self) -> Result<(), HostCallError> {
        match HostCallError::from_code(self.0) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}

impl From<u32> for OutcomeCode {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for OutcomeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl fmt::LowerHex for OutcomeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

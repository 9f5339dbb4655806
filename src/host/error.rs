//! Host call error decoding.
//!
//! The host cannot raise rich errors across the boundary, so it returns one
//! of a closed set of sentinel integers. `HostCallError` is the tagged form
//! of that table; it is total over `u32` via the `Unknown` variant.

use crate::types::OutcomeCode;
use std::fmt;

/// A decoded, nonzero host outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCallError {
    /// `0xFFFFFFFF`
    ReadUrlFailed,
    /// `0xFFFFFFFE`
    UrlNotAllowed,
    /// `0xFFFFFFFD`
    RequestCreationFailed,
    /// `0xFFFFFFFC`
    RequestExecutionFailed,
    /// `0xFFFFFFFB`
    ResponseBodyReadFailed,
    /// `0xFFFFFFF0`
    MethodReadFailed,
    /// `0xFFFFFFF1`
    BodyReadFailed,
    /// `0xFFFFFFF2`
    HeadersReadFailed,
    /// `0xFFFFFFF3`
    HeadersParseFailed,
    /// `0xFFFFFFF4`
    NoResponseAvailable,
    /// `0xFFFFFFF5`
    BufferTooSmall,
    /// `0xFFFFFFF6`
    WriteResponseFailed,
    /// `0xFFFFFFF7`
    HeaderNameReadFailed,
    /// Any nonzero value outside the table.
    Unknown(u32),
}

impl HostCallError {
    /// Decodes a raw host value. Returns `None` for success.
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        let decoded = match OutcomeCode::new(code) {
            OutcomeCode::SUCCESS => return None,
            OutcomeCode::READ_URL_FAILED => Self::ReadUrlFailed,
            OutcomeCode::URL_NOT_ALLOWED => Self::UrlNotAllowed,
            OutcomeCode::REQUEST_CREATION_FAILED => Self::RequestCreationFailed,
            OutcomeCode::REQUEST_EXECUTION_FAILED => Self::RequestExecutionFailed,
            OutcomeCode::RESPONSE_BODY_READ_FAILED => Self::ResponseBodyReadFailed,
            OutcomeCode::METHOD_READ_FAILED => Self::MethodReadFailed,
            OutcomeCode::BODY_READ_FAILED => Self::BodyReadFailed,
            OutcomeCode::HEADERS_READ_FAILED => Self::HeadersReadFailed,
            OutcomeCode::HEADERS_PARSE_FAILED => Self::HeadersParseFailed,
            OutcomeCode::NO_RESPONSE_AVAILABLE => Self::NoResponseAvailable,
            OutcomeCode::BUFFER_TOO_SMALL => Self::BufferTooSmall,
            OutcomeCode::WRITE_RESPONSE_FAILED => Self::WriteResponseFailed,
            OutcomeCode::HEADER_NAME_READ_FAILED => Self::HeaderNameReadFailed,
            other => Self::Unknown(other.raw()),
        };
        Some(decoded)
    }

    /// Returns the wire value for this error.
    #[must_use]
    pub fn code(&self) -> OutcomeCode {
        match self {
            Self::ReadUrlFailed => OutcomeCode::READ_URL_FAILED,
            Self::UrlNotAllowed => OutcomeCode::URL_NOT_ALLOWED,
            Self::RequestCreationFailed => OutcomeCode::REQUEST_CREATION_FAILED,
            Self::RequestExecutionFailed => OutcomeCode::REQUEST_EXECUTION_FAILED,
            Self::ResponseBodyReadFailed => OutcomeCode::RESPONSE_BODY_READ_FAILED,
            Self::MethodReadFailed => OutcomeCode::METHOD_READ_FAILED,
            Self::BodyReadFailed => OutcomeCode::BODY_READ_FAILED,
            Self::HeadersReadFailed => OutcomeCode::HEADERS_READ_FAILED,
            Self::HeadersParseFailed => OutcomeCode::HEADERS_PARSE_FAILED,
            Self::NoResponseAvailable => OutcomeCode::NO_RESPONSE_AVAILABLE,
            Self::BufferTooSmall => OutcomeCode::BUFFER_TOO_SMALL,
            Self::WriteResponseFailed => OutcomeCode::WRITE_RESPONSE_FAILED,
            Self::HeaderNameReadFailed => OutcomeCode::HEADER_NAME_READ_FAILED,
            Self::Unknown(raw) => OutcomeCode::new(*raw),
        }
    }

    /// Returns the fixed description for table entries, or `None` for unknown codes.
    #[must_use]
    pub fn description(&self) -> Option<&'static str> {
        let text = match self {
            Self::ReadUrlFailed => "failed to read URL from memory",
            Self::UrlNotAllowed => "URL not allowed",
            Self::RequestCreationFailed => "failed to create HTTP request",
            Self::RequestExecutionFailed => "failed to make HTTP request",
            Self::ResponseBodyReadFailed => "failed to read response body",
            Self::MethodReadFailed => "failed to read HTTP method from memory",
            Self::BodyReadFailed => "failed to read HTTP body from memory",
            Self::HeadersReadFailed => "failed to read HTTP headers from memory",
            Self::HeadersParseFailed => "failed to parse HTTP headers JSON",
            Self::NoResponseAvailable => "no response available",
            Self::BufferTooSmall => "buffer too small for response data",
            Self::WriteResponseFailed => "failed to write response data to memory",
            Self::HeaderNameReadFailed => "failed to read header name from memory",
            Self::Unknown(_) => return None,
        };
        Some(text)
    }

    /// Returns true if the code is not part of the sentinel table.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for HostCallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(raw) => write!(f, "unknown error (code: 0x{raw:x})"),
            known => f.write_str(known.description().unwrap_or_default()),
        }
    }
}

impl std::error::Error for HostCallError {}

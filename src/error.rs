//! Error types for the guest call cycle.
//!
//! Every stage of the linear pipeline fails with a [`GuestError`]. The first
//! error is terminal: it is rendered into the `error` field of the single
//! output object and the process exits nonzero.
//!
//! No external error crates (anyhow, thiserror, eyre) are used.

use crate::buffer::{EmptyBuffer, Oversized};
use crate::host::HostCallError;
use serde_json::Value;
use std::fmt;

/// An error that ends the current call cycle.
///
/// The kind is boxed to keep `Result<_, GuestError>` small.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestError {
    kind: Box<GuestErrorKind>,
}

/// Specific guest error types.
#[derive(Debug, Clone, PartialEq)]
pub enum GuestErrorKind {
    /// Input JSON could not be decoded
    Decode {
        /// What failed to decode and why
        reason: String,
    },
    /// A required field is missing or malformed
    Validation {
        /// The offending field
        field: String,
        /// Human-readable description
        reason: String,
    },
    /// The host returned a nonzero outcome
    HostCall(HostCallError),
    /// The response body does not fit the response buffer
    ResponseTooLarge {
        /// Byte count reported by the host
        reported: u32,
        /// Buffer capacity
        capacity: usize,
    },
    /// The upstream answered 2xx with no body where one was required
    EmptyResponse {
        /// Label of the upstream service
        service: String,
    },
    /// The upstream answered outside `[200, 300)`
    Upstream {
        /// Label of the upstream service
        service: String,
        /// HTTP status code
        status: u16,
        /// `message` field from the response body, if any
        message: Option<String>,
        /// `errors` field from the response body, if any
        details: Option<Value>,
    },
    /// A 2xx response body did not have the required shape
    InvalidResponse {
        /// Human-readable description
        reason: String,
    },
    /// The result could not be serialized
    Encode {
        /// Why encoding failed
        reason: String,
    },
}

impl GuestError {
    /// Creates a new GuestError with the given kind.
    #[must_use]
    pub fn new(kind: GuestErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }

    /// Returns a reference to the error kind.
    #[must_use]
    pub fn kind(&self) -> &GuestErrorKind {
        &self.kind
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::new(GuestErrorKind::Decode {
            reason: reason.into(),
        })
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(GuestErrorKind::Validation {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Creates a host call error.
    #[must_use]
    pub fn host_call(err: HostCallError) -> Self {
        Self::new(GuestErrorKind::HostCall(err))
    }

    /// Creates a response too large error.
    #[must_use]
    pub fn response_too_large(reported: u32, capacity: usize) -> Self {
        Self::new(GuestErrorKind::ResponseTooLarge { reported, capacity })
    }

    /// Creates an empty response error.
    #[must_use]
    pub fn empty_response(service: impl Into<String>) -> Self {
        Self::new(GuestErrorKind::EmptyResponse {
            service: service.into(),
        })
    }

    /// Creates an upstream error.
    #[must_use]
    pub fn upstream(
        service: impl Into<String>,
        status: u16,
        message: Option<String>,
        details: Option<Value>,
    ) -> Self {
        Self::new(GuestErrorKind::Upstream {
            service: service.into(),
            status,
            message,
            details,
        })
    }

    /// Creates an invalid response error.
    #[must_use]
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::new(GuestErrorKind::InvalidResponse {
            reason: reason.into(),
        })
    }

    /// Creates an encode error.
    #[must_use]
    pub fn encode(reason: impl Into<String>) -> Self {
        Self::new(GuestErrorKind::Encode {
            reason: reason.into(),
        })
    }

    /// Returns true if this error was raised before any host call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(*self.kind, GuestErrorKind::Validation { .. })
    }

    /// Returns true if the host reported a nonzero outcome.
    #[must_use]
    pub fn is_host_call(&self) -> bool {
        matches!(*self.kind, GuestErrorKind::HostCall(_))
    }

    /// Returns true if the body exceeded the response buffer.
    #[must_use]
    pub fn is_response_too_large(&self) -> bool {
        matches!(*self.kind, GuestErrorKind::ResponseTooLarge { .. })
    }

    /// Returns true if the upstream status was outside `[200, 300)`.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(*self.kind, GuestErrorKind::Upstream { .. })
    }

    /// Returns the decoded host error, if this is a host call error.
    #[must_use]
    pub fn host_call_error(&self) -> Option<HostCallError> {
        match *self.kind {
            GuestErrorKind::HostCall(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for GuestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.as_ref() {
            GuestErrorKind::Decode { reason } => write!(f, "failed to decode {reason}"),
            GuestErrorKind::Validation { reason, .. } => f.write_str(reason),
            GuestErrorKind::HostCall(err) => write!(f, "HTTP request failed: {err}"),
            GuestErrorKind::ResponseTooLarge { reported, capacity } => write!(
                f,
                "response too large: host reported {reported} bytes for a {capacity}-byte buffer"
            ),
            GuestErrorKind::EmptyResponse { service } => {
                write!(f, "empty response from {service}")
            }
            GuestErrorKind::Upstream {
                service,
                status,
                message,
                details,
            } => {
                match message {
                    Some(message) => write!(f, "{service} error: {message} (status: {status})")?,
                    None => write!(f, "{service} request failed with status: {status}")?,
                }
                if let Some(details) = details {
                    write!(f, ", details: {details}")?;
                }
                Ok(())
            }
            GuestErrorKind::InvalidResponse { reason } => f.write_str(reason),
            GuestErrorKind::Encode { reason } => write!(f, "failed to encode output: {reason}"),
        }
    }
}

impl std::error::Error for GuestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind.as_ref() {
            GuestErrorKind::HostCall(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HostCallError> for GuestError {
    fn from(err: HostCallError) -> Self {
        Self::host_call(err)
    }
}

impl From<Oversized> for GuestError {
    fn from(err: Oversized) -> Self {
        Self::response_too_large(err.reported, err.capacity)
    }
}

impl From<EmptyBuffer> for GuestError {
    fn from(err: EmptyBuffer) -> Self {
        Self::validation(err.what, err.to_string())
    }
}

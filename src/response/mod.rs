//! Response retrieval and extraction.
//!
//! After a successful outcome the guest reads the status and then the body
//! of the stored response ([`fetch`]), validates the byte count against the
//! response buffer, and opportunistically parses the body as JSON
//! ([`CompletedResponse`]). A body that is not JSON yields no structured
//! fields; it never fails the cycle on its own.

mod extractor;
mod fields;

pub use extractor::{fetch, CompletedResponse, RawResponse};
pub use fields::{ResponseFields, ResponseParseError};

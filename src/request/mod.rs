//! Request building.
//!
//! Turns validated module input into a [`Request`] and then into the byte
//! sequences that are lent to the host:
//! - [`HeaderSet`]: unique, case-sensitive header names serialized as a JSON object
//! - [`Request`] / [`RequestBuilder`]: method, absolute URL, body and headers
//! - [`PreparedRequest`]: the owned byte sequences backing one host call
//! - [`IssueUrl`]: the exact GitHub issue API URL shape, checked before any buffer is built

mod builder;
mod github;
mod headers;

pub use builder::{LentRequest, PreparedRequest, Request, RequestBuilder};
pub use github::IssueUrl;
pub use headers::HeaderSet;

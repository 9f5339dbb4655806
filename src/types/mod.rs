//! Core type definitions for the guest HTTP protocol.
//!
//! This module contains the small value types that cross or describe the
//! host boundary:
//! - `HttpMethod`: the fixed verb set a request may carry
//! - `OutcomeCode`: the raw integer returned by `perform request with headers`

mod method;
mod outcome_code;

pub use method::{HttpMethod, InvalidHttpMethod};
pub use outcome_code::OutcomeCode;

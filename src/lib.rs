//! # guest-http: outbound HTTP for sandboxed guest modules
//!
//! A guest module is a single-shot process inside a memory-isolated host
//! runtime. It reads one JSON object from stdin, makes at most one HTTP
//! call through the host, and writes exactly one result to stdout.
//!
//! ## Architecture
//!
//! - **Buffer Lender** ([`buffer`]): scoped, non-empty views of guest memory
//! - **Request Builder** ([`request`]): validated method, URL, body, headers
//! - **Host Call Invoker** ([`host`]): the three boundary imports and the
//!   atomic request/status/body exchange
//! - **Error Code Decoder** ([`host::HostCallError`]): sentinel table
//! - **Response Extractor** ([`response`]): bounded body retrieval and JSON
//!   field extraction
//! - **Output Encoder** ([`output`]): one terminal object and the exit signal
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use guest_http::modules::GithubComment;
//!
//! fn main() -> std::process::ExitCode {
//!     guest_http::run_stdio(GithubComment)
//! }
//! ```

pub mod buffer;
pub mod config;
pub mod cycle;
pub mod error;
pub mod host;
pub mod logging;
pub mod modules;
pub mod output;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod types;

pub use pipeline::{run_module, run_stdio};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::buffer::{LentBuffer, ResponseBuffer, RESPONSE_BUFFER_CAPACITY};
    pub use crate::config::GuestConfig;
    pub use crate::cycle::CycleState;
    pub use crate::error::{GuestError, GuestErrorKind};
    pub use crate::host::{HostCallError, HostCallInvoker, HostImports};
    pub use crate::output::{Emission, ExitSignal, Output};
    pub use crate::pipeline::{run_module, run_stdio, GuestModule, Plan};
    pub use crate::request::{HeaderSet, Request};
    pub use crate::response::CompletedResponse;
    pub use crate::types::{HttpMethod, OutcomeCode};
}
